use serde::Deserialize;

/// One playable entry of the dock playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub src: String,
}

/// A directory entry returned by the contents listing endpoint.
///
/// Only the fields the loader reads are modelled; the rest of the payload
/// (sha, size, download_url, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// Display title for a file name: drop the final extension, turn runs of
/// `_`/`-` into single spaces, trim.
pub fn nice_title(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(dot) => {
            let ext = &file_name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                file_name
            } else {
                &file_name[..dot]
            }
        }
        None => file_name,
    };

    let mut out = String::with_capacity(stem.len());
    let mut in_separator_run = false;
    for ch in stem.chars() {
        if ch == '_' || ch == '-' {
            if !in_separator_run {
                out.push(' ');
                in_separator_run = true;
            }
        } else {
            out.push(ch);
            in_separator_run = false;
        }
    }

    out.trim().to_string()
}

/// `mm:ss` for the LCD clock. Minutes are not wrapped into hours.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "00:00".to_string();
    }
    let whole = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Fill width for the progress bar, `None` while the duration is unknown.
pub fn progress_percent(elapsed: f64, duration: f64) -> Option<f64> {
    if duration.is_nan() || duration == 0.0 {
        return None;
    }
    Some(elapsed / duration * 100.0)
}

pub fn ordinal_label(index: usize) -> String {
    format!("{:02}", index + 1)
}
