// Browser-side media element handle for the transport.
use super::{MediaElement, PlayOutcome, PlayRequest};
use futures_util::future::{ready, FutureExt};

#[cfg(target_arch = "wasm32")]
use crate::config::AUDIO_ELEMENT_ID;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

/// Handle to the dock's `<audio>` element. The element is rendered by the
/// panel and looked up by id on every call, so the handle stays valid across
/// re-renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserAudio;

#[cfg(target_arch = "wasm32")]
impl BrowserAudio {
    fn element() -> Option<HtmlAudioElement> {
        window()?
            .document()?
            .get_element_by_id(AUDIO_ELEMENT_ID)?
            .dyn_into::<HtmlAudioElement>()
            .ok()
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaElement for BrowserAudio {
    fn has_source(&self) -> bool {
        Self::element()
            .map(|audio| !audio.src().is_empty())
            .unwrap_or(false)
    }

    fn set_source(&mut self, src: &str) {
        if let Some(audio) = Self::element() {
            audio.set_src(src);
        }
    }

    fn request_play(&mut self) -> PlayRequest {
        let Some(audio) = Self::element() else {
            return ready(PlayOutcome::Rejected).boxed_local();
        };
        match audio.play() {
            Ok(promise) => async move {
                match wasm_bindgen_futures::JsFuture::from(promise).await {
                    Ok(_) => PlayOutcome::Started,
                    Err(_) => PlayOutcome::Rejected,
                }
            }
            .boxed_local(),
            Err(_) => ready(PlayOutcome::Rejected).boxed_local(),
        }
    }

    fn pause(&mut self) {
        if let Some(audio) = Self::element() {
            let _ = audio.pause();
        }
    }

    fn is_paused(&self) -> bool {
        Self::element().map(|audio| audio.paused()).unwrap_or(true)
    }

    fn position(&self) -> f64 {
        Self::element()
            .map(|audio| audio.current_time())
            .unwrap_or(0.0)
    }

    fn set_position(&mut self, seconds: f64) {
        if let Some(audio) = Self::element() {
            audio.set_current_time(seconds);
        }
    }

    fn duration(&self) -> f64 {
        Self::element()
            .map(|audio| audio.duration())
            .unwrap_or(f64::NAN)
    }
}

// Host builds have no media element; the widget only plays in the browser.
#[cfg(not(target_arch = "wasm32"))]
impl MediaElement for BrowserAudio {
    fn has_source(&self) -> bool {
        false
    }

    fn set_source(&mut self, _src: &str) {}

    fn request_play(&mut self) -> PlayRequest {
        ready(PlayOutcome::Rejected).boxed_local()
    }

    fn pause(&mut self) {}

    fn is_paused(&self) -> bool {
        true
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn set_position(&mut self, _seconds: f64) {}

    fn duration(&self) -> f64 {
        f64::NAN
    }
}
