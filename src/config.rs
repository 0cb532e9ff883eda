//! Compile-time configuration for the dock player.
//!
//! The listing repository, branch and audio directory are baked into the
//! build; the widget has no runtime configuration surface.

pub const LISTING_API_BASE: &str = "https://api.github.com/repos";
pub const REPO_OWNER: &str = "dkacan98";
pub const REPO_NAME: &str = "dkacan98.github.io";
pub const REPO_BRANCH: &str = "main";
pub const AUDIO_PATH: &str = "audio";

/// Lowercase suffixes of files the playlist accepts.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".mp3", ".m4a", ".ogg", ".wav"];

/// Host element created inside `<body>` that Dioxus mounts into.
#[cfg(target_arch = "wasm32")]
pub const DOCK_ROOT_ID: &str = "player-dock-root";

pub const AUDIO_ELEMENT_ID: &str = "pAudio";

/// Local storage key holding `"1"` when the panel is open.
#[cfg(target_arch = "wasm32")]
pub const OPEN_KEY: &str = "dk_player_open";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    pub api_base: &'static str,
    pub owner: &'static str,
    pub repo: &'static str,
    pub branch: &'static str,
    pub audio_path: &'static str,
}

impl ListingConfig {
    pub const SITE: ListingConfig = ListingConfig {
        api_base: LISTING_API_BASE,
        owner: REPO_OWNER,
        repo: REPO_NAME,
        branch: REPO_BRANCH,
        audio_path: AUDIO_PATH,
    };

    pub fn listing_url(&self) -> String {
        format!(
            "{}/{}/{}/contents/{}?ref={}",
            self.api_base, self.owner, self.repo, self.audio_path, self.branch
        )
    }

    /// Root-relative so the same locator works from nested pages.
    pub fn track_src(&self, file_name: &str) -> String {
        format!("/{}/{}", self.audio_path, urlencoding::encode(file_name))
    }

    pub fn empty_message(&self) -> String {
        format!("No audio files in /{}", self.audio_path)
    }

    pub fn failure_message(&self) -> String {
        format!("Failed to load /{}", self.audio_path)
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self::SITE
    }
}
