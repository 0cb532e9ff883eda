use crate::api::{load_tracks, HttpListing};
use crate::components::{BrowserAudio, Icon, IconKind, PlayerPanel, Transport};
use crate::config::ListingConfig;
use crate::db::{BrowserStore, DockVisibility};
use dioxus::prelude::*;

pub type DockTransport = Transport<BrowserAudio>;
pub type DockState = DockVisibility<BrowserStore>;

/// Raised when the browser refused a play request (autoplay policy).
#[derive(Clone, Copy)]
pub struct PlayBlockedSignal(pub Signal<bool>);

#[component]
pub fn PlayerDock() -> Element {
    let transport = use_signal(|| Transport::new(BrowserAudio));
    let mut dock = use_signal(|| DockVisibility::restore(BrowserStore));
    let play_blocked = use_signal(|| false);

    use_context_provider(|| transport);
    use_context_provider(|| dock);
    use_context_provider(|| PlayBlockedSignal(play_blocked));

    // The playlist is fetched once per page load.
    use_future(move || async move {
        let mut transport = transport;
        let config = ListingConfig::SITE;
        let result = load_tracks(&HttpListing, &config).await;
        transport.write().apply_listing(result, &config);
    });

    let panel_visible = dock.read().panel_visible();
    let launcher_style = if dock.read().launcher_visible() {
        "display: flex;"
    } else {
        "display: none;"
    };

    rsx! {
        div { class: "playerDock",
            PlayerPanel { visible: panel_visible }
            div {
                class: "playerFab",
                id: "playerFab",
                title: "Open player",
                style: "{launcher_style}",
                onclick: move |_| dock.write().set_open(true),
                Icon { kind: IconKind::Note, class: "fabIcon".to_string() }
            }
        }
    }
}
