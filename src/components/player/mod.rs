use crate::components::{
    watch_play, DockState, DockTransport, Icon, IconKind, PlayBlockedSignal,
};
use crate::config::AUDIO_ELEMENT_ID;
use dioxus::prelude::*;
use std::rc::Rc;

mod controls;
mod playlist;

use controls::TransportButtons;
use playlist::Playlist;

/// The floating player panel. It stays mounted while closed so the
/// `<audio>` element keeps playing across open/close toggles.
#[component]
pub fn PlayerPanel(visible: bool) -> Element {
    let transport = use_context::<Signal<DockTransport>>();
    let mut dock = use_context::<Signal<DockState>>();
    let play_blocked = use_context::<PlayBlockedSignal>().0;
    let mut progress_bar = use_signal(|| None::<Rc<MountedData>>);

    let now = transport.read().now_playing().clone();
    let panel_style = if visible {
        "display: block;"
    } else {
        "display: none;"
    };
    let fill_style = format!("width: {}%;", now.fill_percent);

    let on_seek = move |evt: MouseEvent| {
        let click_x = evt.client_coordinates().x;
        let Some(bar) = progress_bar.peek().clone() else {
            return;
        };
        spawn(async move {
            let mut transport = transport;
            let Ok(rect) = bar.get_client_rect().await else {
                return;
            };
            let width = rect.width();
            if width <= 0.0 {
                return;
            }
            transport
                .write()
                .seek_to_fraction((click_x - rect.min_x()) / width);
        });
    };

    let on_time_update = move |_: Event<MediaData>| {
        let mut transport = transport;
        transport.write().on_time_update();
    };

    let on_playback_changed = move |_: Event<MediaData>| {
        let mut transport = transport;
        transport.write().on_playback_changed();
    };

    let on_ended = move |_: Event<MediaData>| {
        let mut transport = transport;
        let request = transport.write().on_ended();
        watch_play(request, play_blocked);
    };

    rsx! {
        div { class: "playerPanel", id: "playerPanel", style: "{panel_style}",
            div { class: "playerTop",
                div { class: "title", "music player" }
                button {
                    class: "close",
                    id: "playerClose",
                    r#type: "button",
                    title: "Close",
                    onclick: move |_| dock.write().set_open(false),
                    Icon { kind: IconKind::Close, class: "closeIcon".to_string() }
                }
            }

            div { class: "playerBody",
                div { class: "lcd",
                    div { class: "lcdRow",
                        div { class: "lcdTitle", id: "pTitle", "{now.title}" }
                        div { class: "lcdTime", id: "pTime", "{now.clock}" }
                    }
                    div {
                        class: "progress",
                        id: "pProgress",
                        title: "Seek",
                        onmounted: move |evt: MountedEvent| progress_bar.set(Some(evt.data())),
                        onclick: on_seek,
                        div { class: "fill", id: "pFill", style: "{fill_style}" }
                    }
                    if play_blocked() {
                        div { class: "lcdHint", "press play to start" }
                    }
                }

                TransportButtons {}

                Playlist { active: now.active }

                audio {
                    id: AUDIO_ELEMENT_ID,
                    preload: "metadata",
                    ontimeupdate: on_time_update,
                    onplay: on_playback_changed,
                    onpause: on_playback_changed,
                    onended: on_ended,
                }
            }
        }
    }
}
