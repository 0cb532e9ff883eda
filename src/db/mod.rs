#[cfg(target_arch = "wasm32")]
use crate::config::OPEN_KEY;
#[cfg(any(test, not(target_arch = "wasm32")))]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;
#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// Where the panel open/closed flag lives between page loads.
pub trait OpenStateStore {
    fn load_open(&self) -> Option<String>;
    fn save_open(&self, value: &str);
}

/// Browser local storage. Values are written raw (`"1"` / `"0"`) rather
/// than JSON encoded so the key stays readable by plain scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl OpenStateStore for BrowserStore {
    fn load_open(&self) -> Option<String> {
        LocalStorage::raw().get_item(OPEN_KEY).ok().flatten()
    }

    fn save_open(&self, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(OPEN_KEY, value) {
            warn!("failed to persist player state: {err:?}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static NATIVE_OPEN_STATE: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[cfg(not(target_arch = "wasm32"))]
impl OpenStateStore for BrowserStore {
    fn load_open(&self) -> Option<String> {
        NATIVE_OPEN_STATE.with(|slot| slot.borrow().clone())
    }

    fn save_open(&self, value: &str) {
        NATIVE_OPEN_STATE.with(|slot| *slot.borrow_mut() = Some(value.to_string()));
    }
}

/// In-process store. Clones share one slot, so a second `restore` from a
/// clone behaves like a page reload.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

#[cfg(test)]
impl OpenStateStore for MemoryStore {
    fn load_open(&self) -> Option<String> {
        self.raw()
    }

    fn save_open(&self, value: &str) {
        *self.slot.borrow_mut() = Some(value.to_string());
    }
}

/// Open/closed state of the dock: exactly one of panel and launcher shows.
#[derive(Debug, Clone)]
pub struct DockVisibility<S: OpenStateStore> {
    is_open: bool,
    store: S,
}

impl<S: OpenStateStore> DockVisibility<S> {
    pub fn restore(store: S) -> Self {
        let is_open = store.load_open().as_deref() == Some("1");
        Self { is_open, store }
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
        self.store.save_open(if open { "1" } else { "0" });
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn panel_visible(&self) -> bool {
        self.is_open()
    }

    pub fn launcher_visible(&self) -> bool {
        !self.is_open()
    }
}
