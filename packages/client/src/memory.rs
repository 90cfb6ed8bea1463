use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::KeyValueStore;

/// In-memory key/value area for tests and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStorage::new();
        assert!(store.get("theme").is_none());

        store.set("theme", "dark");
        assert_eq!(store.get("theme").as_deref(), Some("dark"));

        store.set("theme", "light");
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert_eq!(store.len(), 1);

        store.remove("theme");
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryStorage::new();
        let other = store.clone();
        other.set("user_id", "7");
        assert_eq!(store.get("user_id").as_deref(), Some("7"));
        store.clear();
        assert!(other.is_empty());
    }
}
