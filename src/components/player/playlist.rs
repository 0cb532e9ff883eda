use crate::api::ordinal_label;
use crate::components::{watch_play, DockTransport, PlayBlockedSignal};
use dioxus::prelude::*;

#[component]
pub(super) fn Playlist(#[props(!optional)] active: Option<usize>) -> Element {
    let transport = use_context::<Signal<DockTransport>>();
    let titles: Vec<String> = transport
        .read()
        .tracks()
        .iter()
        .map(|track| track.title.clone())
        .collect();

    rsx! {
        ul { class: "playlist", id: "pList",
            for (index , title) in titles.into_iter().enumerate() {
                PlaylistRow {
                    key: "{index}",
                    index,
                    title,
                    active: active == Some(index),
                }
            }
        }
    }
}

#[component]
fn PlaylistRow(index: usize, title: String, active: bool) -> Element {
    let transport = use_context::<Signal<DockTransport>>();
    let play_blocked = use_context::<PlayBlockedSignal>().0;
    let ordinal = ordinal_label(index);

    let on_select = move |_: MouseEvent| {
        let mut transport = transport;
        let request = transport.write().load_track(index as i64, true);
        watch_play(request, play_blocked);
    };

    rsx! {
        li { class: if active { "active" } else { "" }, onclick: on_select,
            span { "{title}" }
            span { class: "meta", "{ordinal}" }
        }
    }
}
