//! # Client-held state: persistent and tab-scoped key/value areas
//!
//! The frontend keeps a handful of strings in the browser: the session
//! credential and theme in persistent storage, the view cursors, the
//! recommendation session id and the article referrer in tab-scoped storage.
//! Everything goes through the synchronous [`KeyValueStore`] trait so the same
//! controllers run against the browser ([`crate::BrowserStorage`], web only)
//! or an in-memory map ([`crate::MemoryStorage`], tests and native builds).
//!
//! [`ClientStorage`] bundles the two areas a page needs.

use std::sync::Arc;

/// Persistent-storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Persistent-storage key for the signed-in user's id.
pub const USER_ID_KEY: &str = "user_id";
/// Persistent-storage key for the signed-in user's role tag.
pub const USER_ROLE_KEY: &str = "user_role";
/// Persistent-storage key for the theme preference.
pub const THEME_KEY: &str = "theme";
/// Persistent-storage key for the composer's recovery draft.
pub const DRAFT_KEY: &str = "draft_article";
/// Tab-storage key for the recommendation paging session.
pub const REC_SESSION_KEY: &str = "rec_session_id";
/// Tab-storage key for the listing that opened the article view.
pub const REFERRER_KEY: &str = "article_referrer";

/// Synchronous string key/value area.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// The persistent area and the tab-scoped area, side by side.
#[derive(Clone)]
pub struct ClientStorage {
    pub local: Arc<dyn KeyValueStore>,
    pub session: Arc<dyn KeyValueStore>,
}

impl ClientStorage {
    pub fn new(local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Two independent in-memory areas.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::MemoryStorage::new()),
            Arc::new(crate::MemoryStorage::new()),
        )
    }

    /// `window.localStorage` and `window.sessionStorage`.
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    pub fn browser() -> Self {
        Self::new(
            Arc::new(crate::BrowserStorage::local()),
            Arc::new(crate::BrowserStorage::session()),
        )
    }

    /// Platform default: browser storage on the web, memory elsewhere.
    pub fn platform() -> Self {
        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        {
            Self::browser()
        }
        #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
        {
            Self::in_memory()
        }
    }

    /// Wipe both areas.
    pub fn clear_all(&self) {
        self.local.clear();
        self.session.clear();
    }

    /// Tab-scoped recommendation session id, created on first use.
    pub fn recommendation_session_id(&self) -> String {
        if let Some(id) = self.session.get(REC_SESSION_KEY) {
            return id;
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.session.set(REC_SESSION_KEY, &id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_session_id_is_stable_per_tab() {
        let storage = ClientStorage::in_memory();
        let first = storage.recommendation_session_id();
        assert_eq!(storage.recommendation_session_id(), first);
        assert!(uuid::Uuid::parse_str(&first).is_ok());

        storage.session.clear();
        assert_ne!(storage.recommendation_session_id(), first);
    }

    #[test]
    fn clear_all_wipes_both_areas() {
        let storage = ClientStorage::in_memory();
        storage.local.set(AUTH_TOKEN_KEY, "t");
        storage.session.set("home_current_page", "2");
        storage.clear_all();
        assert!(storage.local.get(AUTH_TOKEN_KEY).is_none());
        assert!(storage.session.get("home_current_page").is_none());
    }
}
