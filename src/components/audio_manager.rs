//! Audio Manager - transport state machine over the page's media element.
//! Component code owns one `Transport` inside a signal and forwards UI and
//! media events to it.

use crate::api::{format_clock, progress_percent, Track, TrackLoadError};
use crate::config::ListingConfig;
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use futures_util::future::LocalBoxFuture;

mod browser_audio;

pub use browser_audio::BrowserAudio;

pub const LOADING_TITLE: &str = "Loading…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// The media element refused to start, usually an autoplay restriction.
    Rejected,
}

/// Pending answer to a play request.
pub type PlayRequest = LocalBoxFuture<'static, PlayOutcome>;

/// The playback primitive the transport drives.
pub trait MediaElement {
    fn has_source(&self) -> bool;
    fn set_source(&mut self, src: &str);
    fn request_play(&mut self) -> PlayRequest;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    /// NaN while the duration is unknown.
    fn duration(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Empty,
    LoadedPaused,
    LoadedPlaying,
}

/// What the LCD shows.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub clock: String,
    pub fill_percent: f64,
    pub active: Option<usize>,
    pub playing: bool,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            title: LOADING_TITLE.to_string(),
            clock: format_clock(0.0),
            fill_percent: 0.0,
            active: None,
            playing: false,
        }
    }
}

pub struct Transport<M: MediaElement> {
    tracks: Vec<Track>,
    current: usize,
    media: M,
    display: NowPlaying,
}

impl<M: MediaElement> Transport<M> {
    pub fn new(media: M) -> Self {
        Self {
            tracks: Vec::new(),
            current: 0,
            media,
            display: NowPlaying::default(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.display
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn state(&self) -> TransportState {
        if !self.media.has_source() {
            TransportState::Empty
        } else if self.media.is_paused() {
            TransportState::LoadedPaused
        } else {
            TransportState::LoadedPlaying
        }
    }

    /// Present the outcome of the listing fetch.
    pub fn apply_listing(
        &mut self,
        result: Result<Vec<Track>, TrackLoadError>,
        config: &ListingConfig,
    ) {
        match result {
            Ok(tracks) if tracks.is_empty() => {
                self.set_tracks(tracks);
                self.show_message(config.empty_message());
            }
            Ok(tracks) => self.set_tracks(tracks),
            Err(err) => {
                error!("{err}");
                self.show_message(config.failure_message());
            }
        }
    }

    /// Replace the playlist and cue the first track without playing it.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current = 0;
        self.display.active = None;
        // autoplay is off so no request comes back
        let _ = self.load_track(0, false);
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.display.title = message.into();
    }

    /// Cue `index` (wrapped into range). Returns the play request when
    /// `autoplay` asked for one.
    pub fn load_track(&mut self, index: i64, autoplay: bool) -> Option<PlayRequest> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = index.rem_euclid(self.tracks.len() as i64) as usize;
        let track = &self.tracks[self.current];
        self.media.set_source(&track.src);
        self.display.title = track.title.clone();
        self.display.active = Some(self.current);

        autoplay.then(|| self.media.request_play())
    }

    pub fn next(&mut self) -> Option<PlayRequest> {
        self.load_track(self.current as i64 + 1, true)
    }

    pub fn prev(&mut self) -> Option<PlayRequest> {
        self.load_track(self.current as i64 - 1, true)
    }

    pub fn play(&mut self) -> Option<PlayRequest> {
        if !self.media.has_source() {
            let _ = self.load_track(0, false);
        }
        if !self.media.has_source() {
            return None;
        }
        Some(self.media.request_play())
    }

    pub fn pause(&mut self) {
        self.media.pause();
    }

    /// Rewind to the start; the cued track and title stay.
    pub fn stop(&mut self) {
        self.media.pause();
        self.media.set_position(0.0);
        self.display.fill_percent = 0.0;
        self.display.clock = format_clock(0.0);
    }

    /// Media `play` / `pause` events. A rejected play request flips the
    /// element back to paused after the click already re-rendered.
    pub fn on_playback_changed(&mut self) {
        self.display.playing = self.state() == TransportState::LoadedPlaying;
    }

    pub fn on_time_update(&mut self) {
        let position = self.media.position();
        self.display.clock = format_clock(position);
        if let Some(percent) = progress_percent(position, self.media.duration()) {
            self.display.fill_percent = percent;
        }
    }

    pub fn on_ended(&mut self) -> Option<PlayRequest> {
        self.next()
    }

    /// Jump to `fraction` of the duration. Ignored while the duration is
    /// unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> bool {
        let duration = self.media.duration();
        if !duration.is_finite() || duration <= 0.0 || !fraction.is_finite() {
            return false;
        }
        self.media
            .set_position((fraction * duration).clamp(0.0, duration));
        true
    }
}

/// Drive a play request to completion and raise `play_blocked` when the
/// browser refuses to start.
pub fn watch_play(request: Option<PlayRequest>, mut play_blocked: Signal<bool>) {
    let Some(request) = request else {
        return;
    };
    spawn(async move {
        let blocked = request.await == PlayOutcome::Rejected;
        if *play_blocked.peek() != blocked {
            play_blocked.set(blocked);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures_util::future::{ready, FutureExt};
    use dioxus::logger::tracing::{subscriber::with_default, Event, Level, Subscriber};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Default)]
    struct ErrorCount(Arc<AtomicUsize>);

    impl ErrorCount {
        fn get(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for ErrorCount {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn errors_logged_by(f: impl FnOnce()) -> usize {
        let count = ErrorCount::default();
        let subscriber = tracing_subscriber::registry().with(count.clone());
        with_default(subscriber, f);
        count.get()
    }

    #[derive(Debug)]
    struct FakeMedia {
        src: String,
        paused: bool,
        position: f64,
        duration: f64,
        autoplay_allowed: bool,
        play_requests: usize,
    }

    impl Default for FakeMedia {
        fn default() -> Self {
            Self {
                src: String::new(),
                paused: true,
                position: 0.0,
                duration: f64::NAN,
                autoplay_allowed: true,
                play_requests: 0,
            }
        }
    }

    impl MediaElement for FakeMedia {
        fn has_source(&self) -> bool {
            !self.src.is_empty()
        }

        fn set_source(&mut self, src: &str) {
            self.src = src.to_string();
            self.position = 0.0;
        }

        fn request_play(&mut self) -> PlayRequest {
            self.play_requests += 1;
            if self.autoplay_allowed && self.has_source() {
                self.paused = false;
                ready(PlayOutcome::Started).boxed_local()
            } else {
                ready(PlayOutcome::Rejected).boxed_local()
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn position(&self) -> f64 {
            self.position
        }

        fn set_position(&mut self, seconds: f64) {
            self.position = seconds;
        }

        fn duration(&self) -> f64 {
            self.duration
        }
    }

    fn tracks(names: &[&str]) -> Vec<Track> {
        names
            .iter()
            .map(|name| Track {
                title: name.to_string(),
                src: format!("/audio/{name}.mp3"),
            })
            .collect()
    }

    fn loaded(names: &[&str]) -> Transport<FakeMedia> {
        let mut transport = Transport::new(FakeMedia::default());
        transport.set_tracks(tracks(names));
        transport
    }

    #[test]
    fn starts_empty_with_loading_title() {
        let transport = Transport::new(FakeMedia::default());
        assert_eq!(transport.state(), TransportState::Empty);
        assert_eq!(transport.now_playing().title, LOADING_TITLE);
        assert_eq!(transport.now_playing().clock, "00:00");
    }

    #[test]
    fn set_tracks_cues_first_without_playing() {
        let transport = loaded(&["a", "b"]);
        assert_eq!(transport.state(), TransportState::LoadedPaused);
        assert_eq!(transport.current_index(), 0);
        assert_eq!(transport.now_playing().title, "a");
        assert_eq!(transport.now_playing().active, Some(0));
        assert_eq!(transport.media().play_requests, 0);
    }

    #[test]
    fn operations_on_empty_playlist_are_noops() {
        let mut transport = Transport::new(FakeMedia::default());
        assert!(transport.load_track(3, true).is_none());
        assert!(transport.next().is_none());
        assert!(transport.prev().is_none());
        assert!(transport.play().is_none());
        assert_eq!(transport.state(), TransportState::Empty);
        assert_eq!(transport.media().play_requests, 0);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut transport = loaded(&["a", "b", "c"]);
        transport.load_track(2, false);
        assert!(transport.next().is_some());
        assert_eq!(transport.current_index(), 0);
        assert!(transport.prev().is_some());
        assert_eq!(transport.current_index(), 2);
        assert_eq!(transport.now_playing().title, "c");
        assert_eq!(transport.state(), TransportState::LoadedPlaying);
    }

    #[test]
    fn ended_advances_with_autoplay() {
        let mut transport = loaded(&["a", "b"]);
        let request = transport.on_ended().expect("autoplay request");
        assert_eq!(block_on(request), PlayOutcome::Started);
        assert_eq!(transport.current_index(), 1);
        assert_eq!(transport.now_playing().active, Some(1));
    }

    #[test]
    fn rejected_autoplay_leaves_track_paused() {
        let mut transport = Transport::new(FakeMedia {
            autoplay_allowed: false,
            ..FakeMedia::default()
        });
        transport.set_tracks(tracks(&["a", "b"]));
        let request = transport.next().expect("play request");
        assert_eq!(block_on(request), PlayOutcome::Rejected);
        assert_eq!(transport.state(), TransportState::LoadedPaused);
        assert_eq!(transport.now_playing().title, "b");
    }

    #[test]
    fn play_cues_first_track_when_nothing_loaded() {
        let mut transport = Transport::new(FakeMedia::default());
        transport.tracks = tracks(&["x", "y"]);
        assert_eq!(transport.state(), TransportState::Empty);
        let request = transport.play().expect("play request");
        assert_eq!(block_on(request), PlayOutcome::Started);
        assert_eq!(transport.media().src, "/audio/x.mp3");
        assert_eq!(transport.media().play_requests, 1);
    }

    #[test]
    fn pause_keeps_position() {
        let mut transport = loaded(&["a"]);
        let _ = transport.play();
        transport.media.position = 42.0;
        transport.pause();
        assert_eq!(transport.state(), TransportState::LoadedPaused);
        assert_eq!(transport.media().position, 42.0);
    }

    #[test]
    fn stop_resets_clock_and_fill_but_keeps_track() {
        let mut transport = loaded(&["a", "b"]);
        transport.load_track(1, true);
        transport.media.duration = 200.0;
        transport.media.position = 150.0;
        transport.on_time_update();
        assert_eq!(transport.now_playing().clock, "02:30");
        assert_eq!(transport.now_playing().fill_percent, 75.0);

        transport.stop();
        assert_eq!(transport.now_playing().clock, "00:00");
        assert_eq!(transport.now_playing().fill_percent, 0.0);
        assert_eq!(transport.now_playing().title, "b");
        assert_eq!(transport.media().position, 0.0);
        assert_eq!(transport.state(), TransportState::LoadedPaused);
    }

    #[test]
    fn time_update_without_duration_only_moves_clock() {
        let mut transport = loaded(&["a"]);
        transport.media.position = 61.0;
        transport.on_time_update();
        assert_eq!(transport.now_playing().clock, "01:01");
        assert_eq!(transport.now_playing().fill_percent, 0.0);
    }

    #[test]
    fn seek_clamps_and_requires_duration() {
        let mut transport = loaded(&["a"]);
        assert!(!transport.seek_to_fraction(0.5));

        transport.media.duration = 100.0;
        assert!(transport.seek_to_fraction(0.25));
        assert_eq!(transport.media().position, 25.0);
        assert!(transport.seek_to_fraction(1.7));
        assert_eq!(transport.media().position, 100.0);
        assert!(transport.seek_to_fraction(-0.2));
        assert_eq!(transport.media().position, 0.0);
        assert!(!transport.seek_to_fraction(f64::NAN));
    }

    #[test]
    fn listing_outcomes_set_the_title() {
        let config = ListingConfig::SITE;

        let mut empty = Transport::new(FakeMedia::default());
        empty.apply_listing(Ok(Vec::new()), &config);
        assert_eq!(empty.now_playing().title, "No audio files in /audio");
        assert_eq!(empty.state(), TransportState::Empty);
        assert!(empty.tracks().is_empty());

        let mut failed = Transport::new(FakeMedia::default());
        failed.apply_listing(Err(TrackLoadError::Status(404)), &config);
        assert_eq!(failed.now_playing().title, "Failed to load /audio");
        assert_eq!(failed.state(), TransportState::Empty);

        let mut ok = Transport::new(FakeMedia::default());
        ok.apply_listing(Ok(tracks(&["a"])), &config);
        assert_eq!(ok.now_playing().title, "a");
        assert_eq!(ok.state(), TransportState::LoadedPaused);
    }

    #[test]
    fn failed_listing_logs_one_error() {
        let config = ListingConfig::SITE;
        let mut failed = Transport::new(FakeMedia::default());
        let errors = errors_logged_by(|| {
            failed.apply_listing(Err(TrackLoadError::Status(404)), &config)
        });
        assert_eq!(errors, 1);

        let mut ok = Transport::new(FakeMedia::default());
        assert_eq!(
            errors_logged_by(|| ok.apply_listing(Ok(tracks(&["a"])), &config)),
            0
        );
        let mut empty = Transport::new(FakeMedia::default());
        assert_eq!(
            errors_logged_by(|| empty.apply_listing(Ok(Vec::new()), &config)),
            0
        );
    }

    #[test]
    fn rejected_play_on_cued_track_reports_paused() {
        let mut transport = Transport::new(FakeMedia {
            autoplay_allowed: false,
            ..FakeMedia::default()
        });
        transport.set_tracks(tracks(&["a", "b"]));
        assert_eq!(transport.state(), TransportState::LoadedPaused);

        let request = transport.play().expect("play request");
        assert_eq!(block_on(request), PlayOutcome::Rejected);
        transport.on_playback_changed();
        assert_eq!(transport.state(), TransportState::LoadedPaused);
        assert!(!transport.now_playing().playing);
    }

    #[test]
    fn playback_events_track_the_element() {
        let mut transport = loaded(&["a"]);
        let _ = transport.play();
        transport.on_playback_changed();
        assert!(transport.now_playing().playing);

        transport.pause();
        transport.on_playback_changed();
        assert!(!transport.now_playing().playing);
    }

    proptest! {
        /// Any index lands on its euclidean remainder.
        #[test]
        fn load_track_wraps_any_index(len in 1usize..12, index in -1000i64..1000) {
            let names: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut transport = loaded(&refs);

            let _ = transport.load_track(index, false);
            let expected = ((index % len as i64) + len as i64) % len as i64;
            prop_assert_eq!(transport.current_index() as i64, expected);
            prop_assert_eq!(transport.now_playing().active, Some(expected as usize));
        }

        /// Stop always zeroes the display whatever was playing.
        #[test]
        fn stop_always_zeroes_display(position in 0.0f64..10_000.0, duration in 1.0f64..10_000.0) {
            let mut transport = loaded(&["a"]);
            transport.media.duration = duration;
            transport.media.position = position.min(duration);
            transport.on_time_update();
            transport.stop();
            prop_assert_eq!(transport.now_playing().clock.as_str(), "00:00");
            prop_assert_eq!(transport.now_playing().fill_percent, 0.0);
        }
    }
}
