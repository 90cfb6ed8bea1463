//! # Browser bindings: `localStorage`, `sessionStorage` and `location`
//!
//! [`BrowserStorage`] is the [`KeyValueStore`] used on the web platform and
//! [`BrowserNavigator`] performs full-page navigations for the session guard.
//!
//! Both are zero-state handles that look the window up on every call, so
//! they are `Clone` and never hold a JS object across an await point.
//!
//! Storage errors (quota exceeded, storage disabled by privacy settings) are
//! logged and otherwise ignored: a failed write degrades to "not remembered".

use wasm_bindgen::JsValue;

use crate::navigation::Navigator;
use crate::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Area {
    Local,
    Session,
}

/// `window.localStorage` or `window.sessionStorage`.
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    area: Area,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self { area: Area::Local }
    }

    pub fn session() -> Self {
        Self {
            area: Area::Session,
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            Area::Local => window.local_storage(),
            Area::Session => window.session_storage(),
        };
        match storage {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("{:?} storage unavailable: {}", self.area, describe(&e));
                None
            }
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!("Failed to store `{key}`: {}", describe(&e));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.clear();
        }
    }
}

/// Full-page navigation through `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn replace(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().replace(url) {
                tracing::error!("Failed to navigate to {url}: {}", describe(&e));
            }
        }
    }

    fn assign(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to navigate to {url}: {}", describe(&e));
            }
        }
    }
}

/// Whether the operating system asks for a dark color scheme.
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(value)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string())
}
