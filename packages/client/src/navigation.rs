//! Full-page navigation, abstracted so guards and controllers can be tested.

use std::sync::{Arc, Mutex};

/// Performs browser-level navigations (not router pushes).
pub trait Navigator {
    /// Navigate without leaving a history entry.
    fn replace(&self, url: &str);
    /// Navigate, keeping the current page in history.
    fn assign(&self, url: &str);
}

/// Records navigations instead of performing them. Used by tests and as the
/// native fallback, where there is no location to change.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, url: &str) {
        tracing::debug!("navigate (replace) {url}");
        self.visited.lock().unwrap().push(url.to_string());
    }

    fn assign(&self, url: &str) {
        tracing::debug!("navigate {url}");
        self.visited.lock().unwrap().push(url.to_string());
    }
}
