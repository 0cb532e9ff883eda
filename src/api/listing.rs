//! Track loader: one GET against the contents listing endpoint, then a
//! filter/sort/map into playlist tracks.

use crate::api::models::{nice_title, ContentEntry, Track};
use crate::config::{ListingConfig, ALLOWED_EXTENSIONS};
use dioxus::logger::tracing::{debug, info};
use once_cell::sync::Lazy;
use reqwest::header::ACCEPT;
use std::cmp::Ordering;

static LISTING_HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, thiserror::Error)]
pub enum TrackLoadError {
    #[error("listing API error: {0}")]
    Status(u16),

    #[error("listing request failed: {0}")]
    Network(String),

    #[error("listing body is not a directory array: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw reply from the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingResponse {
    pub status: u16,
    pub body: String,
}

impl ListingResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch seam so the loader can run against a fake in tests.
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    async fn get(&self, url: &str) -> Result<ListingResponse, TrackLoadError>;
}

/// Production listing source over the shared HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpListing;

impl ListingSource for HttpListing {
    async fn get(&self, url: &str) -> Result<ListingResponse, TrackLoadError> {
        let response = LISTING_HTTP_CLIENT
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| TrackLoadError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TrackLoadError::Network(e.to_string()))?;
        Ok(ListingResponse { status, body })
    }
}

fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Locale-aware ordering of file names.
#[cfg(target_arch = "wasm32")]
pub fn locale_order(a: &str, b: &str) -> Ordering {
    let a = js_sys::JsString::from(a);
    let rank = a.locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new());
    rank.cmp(&0)
}

/// Locale-aware ordering of file names.
///
/// Without a browser collator this folds case first; names equal after
/// folding put lowercase ahead of uppercase like the browser collators do.
#[cfg(not(target_arch = "wasm32"))]
pub fn locale_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn tracks_from_entries(entries: Vec<ContentEntry>, config: &ListingConfig) -> Vec<Track> {
    let mut names: Vec<String> = entries
        .into_iter()
        .filter(ContentEntry::is_file)
        .map(|entry| entry.name)
        .filter(|name| has_allowed_extension(name))
        .collect();
    names.sort_by(|a, b| locale_order(a, b));

    names
        .iter()
        .map(|name| Track {
            title: nice_title(name),
            src: config.track_src(name),
        })
        .collect()
}

pub fn parse_listing(
    response: &ListingResponse,
    config: &ListingConfig,
) -> Result<Vec<Track>, TrackLoadError> {
    if !response.is_success() {
        return Err(TrackLoadError::Status(response.status));
    }
    let entries: Vec<ContentEntry> = serde_json::from_str(&response.body)?;
    Ok(tracks_from_entries(entries, config))
}

/// Issue the single listing request. No retry and no timeout.
pub async fn load_tracks<S: ListingSource>(
    source: &S,
    config: &ListingConfig,
) -> Result<Vec<Track>, TrackLoadError> {
    let url = config.listing_url();
    debug!("requesting track listing from {url}");
    let response = source.get(&url).await?;
    let tracks = parse_listing(&response, config)?;
    info!(count = tracks.len(), "track listing loaded");
    Ok(tracks)
}
