use crate::components::{watch_play, DockTransport, Icon, IconKind, PlayBlockedSignal};
use dioxus::prelude::*;

/// Prev / play / pause / stop / next row.
#[component]
pub(super) fn TransportButtons() -> Element {
    let transport = use_context::<Signal<DockTransport>>();
    let play_blocked = use_context::<PlayBlockedSignal>().0;
    let play_class = if transport.read().now_playing().playing {
        "btn primary playing"
    } else {
        "btn primary"
    };

    let on_prev = move |_: MouseEvent| {
        let mut transport = transport;
        let request = transport.write().prev();
        watch_play(request, play_blocked);
    };

    let on_play = move |_: MouseEvent| {
        let mut transport = transport;
        let request = transport.write().play();
        watch_play(request, play_blocked);
    };

    let on_pause = move |_: MouseEvent| {
        let mut transport = transport;
        transport.write().pause();
    };

    let on_stop = move |_: MouseEvent| {
        let mut transport = transport;
        transport.write().stop();
    };

    let on_next = move |_: MouseEvent| {
        let mut transport = transport;
        let request = transport.write().next();
        watch_play(request, play_blocked);
    };

    rsx! {
        div { class: "controls",
            button {
                class: "btn",
                id: "pPrev",
                r#type: "button",
                title: "Previous",
                onclick: on_prev,
                Icon { kind: IconKind::Prev, class: "btnIcon".to_string() }
            }
            button {
                class: play_class,
                id: "pPlay",
                r#type: "button",
                title: "Play",
                onclick: on_play,
                Icon { kind: IconKind::Play, class: "btnIcon".to_string() }
            }
            button {
                class: "btn",
                id: "pPause",
                r#type: "button",
                title: "Pause",
                onclick: on_pause,
                Icon { kind: IconKind::Pause, class: "btnIcon".to_string() }
            }
            button {
                class: "btn",
                id: "pStop",
                r#type: "button",
                title: "Stop",
                onclick: on_stop,
                Icon { kind: IconKind::Stop, class: "btnIcon".to_string() }
            }
            button {
                class: "btn",
                id: "pNext",
                r#type: "button",
                title: "Next",
                onclick: on_next,
                Icon { kind: IconKind::Next, class: "btnIcon".to_string() }
            }
        }
    }
}
