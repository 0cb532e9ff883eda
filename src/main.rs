use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod db;

use components::PlayerDock;
#[cfg(target_arch = "wasm32")]
use config::DOCK_ROOT_ID;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn main() {
    // Installed ahead of launch so the mount-point warning below reaches the
    // console; launch skips its own init once a subscriber is set.
    dioxus::logger::initialize_default();

    #[cfg(target_arch = "wasm32")]
    {
        if attach_dock_root().is_none() {
            dioxus::logger::tracing::warn!("could not create #{DOCK_ROOT_ID} in <body>");
        }
        dioxus::LaunchBuilder::new()
            .with_cfg(dioxus::web::Config::new().rootname(DOCK_ROOT_ID))
            .launch(App);
    }

    #[cfg(not(target_arch = "wasm32"))]
    dioxus::launch(App);
}

/// The host page only ships a script tag; the widget brings its own mount
/// point and appends it to the end of `<body>`.
#[cfg(target_arch = "wasm32")]
fn attach_dock_root() -> Option<()> {
    let document = web_sys::window()?.document()?;
    if document.get_element_by_id(DOCK_ROOT_ID).is_some() {
        return Some(());
    }

    let root = document.create_element("div").ok()?;
    root.set_id(DOCK_ROOT_ID);
    document.body()?.append_child(&root).ok()?;
    Some(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: PLAYER_CSS }

        PlayerDock {}
    }
}
