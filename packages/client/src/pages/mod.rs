//! # Page controllers
//!
//! One module per page type. Each exposes a plain state object the UI keeps
//! in a signal, plus free async functions that talk to the [`Backend`] and
//! hand their result back to the state object.
//!
//! Fetches follow the same lifecycle everywhere:
//!
//! 1. the page takes a [`FetchTicket`] from its [`PageState`] (this shows the
//!    loading indicator),
//! 2. the request runs with no state borrowed,
//! 3. the result goes through [`PageState::complete`], which drops it if a
//!    newer fetch was started in the meantime.
//!
//! A failed fetch records the message and leaves earlier content in place.
//!
//! [`Backend`]: crate::Backend

pub mod article;
pub mod auth;
pub mod composer;
pub mod home;
pub mod listing;
pub mod paths;
pub mod profile;
pub mod search;
pub mod your_articles;

use crate::cursor::ViewCursor;
use crate::error::ClientError;

/// Identifies one fetch of a [`PageState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What happened to a completed fetch.
#[derive(Debug)]
pub enum Completion {
    /// A newer fetch was issued; the result was dropped.
    Stale,
    Loaded,
    /// The error message is stored on the state; the error itself is handed
    /// back so the page can redirect on authentication failures.
    Failed(ClientError),
}

impl Completion {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Completion::Loaded)
    }
}

/// Content, loading flag and last error of one fetched region of a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageState<T> {
    pub content: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    issued: u64,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            content: None,
            loading: false,
            error: None,
            issued: 0,
        }
    }
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch. Any fetch started earlier becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    pub fn complete(&mut self, ticket: FetchTicket, result: Result<T, ClientError>) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!("Dropping stale response (ticket {})", ticket.0);
            return Completion::Stale;
        }
        self.loading = false;
        match result {
            Ok(content) => {
                self.content = Some(content);
                Completion::Loaded
            }
            Err(e) => {
                tracing::error!("Fetch failed: {}", e);
                self.error = Some(e.user_message());
                Completion::Failed(e)
            }
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.content.as_mut()
    }
}

/// Pagination controls derived from a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages.max(1))
    }

    pub fn prev_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.page < self.total_pages
    }

    /// Hidden when everything fits on one page.
    pub fn visible(&self) -> bool {
        self.total_pages > 1
    }
}

impl From<&ViewCursor> for Pagination {
    fn from(cursor: &ViewCursor) -> Self {
        Self {
            page: cursor.page,
            total_pages: cursor.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{CursorStore, ListingKind, SortKey};
    use crate::storage::KeyValueStore;
    use crate::MemoryStorage;

    #[test]
    fn stored_cursor_renders_its_position() {
        let store = MemoryStorage::new();
        store.set("home_current_page", "3");
        store.set("home_sort", "popular");
        store.set("home_total_pages", "5");

        let cursor = CursorStore::new(&store, ListingKind::Home).load();
        assert_eq!(cursor.sort, SortKey::Popular);

        let pagination = Pagination::from(&cursor);
        assert_eq!(pagination.label(), "Page 3 of 5");
        assert!(pagination.prev_enabled());
        assert!(pagination.next_enabled());
        assert!(pagination.visible());
    }

    #[test]
    fn single_page_hides_controls() {
        let pagination = Pagination {
            page: 1,
            total_pages: 1,
        };
        assert!(!pagination.visible());
        assert!(!pagination.prev_enabled());
        assert!(!pagination.next_enabled());
        assert_eq!(Pagination { page: 1, total_pages: 0 }.label(), "Page 1 of 1");
    }

    #[test]
    fn only_latest_fetch_is_applied() {
        let mut state = PageState::<u32>::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.complete(second, Ok(2)).is_loaded());
        assert!(matches!(state.complete(first, Ok(1)), Completion::Stale));
        assert_eq!(state.content, Some(2));
        assert!(!state.loading);
    }

    #[test]
    fn failure_keeps_previous_content() {
        let mut state = PageState::<u32>::new();
        let ticket = state.begin();
        state.complete(ticket, Ok(7));

        let ticket = state.begin();
        let outcome = state.complete(ticket, Err(ClientError::Status(503)));
        assert!(matches!(outcome, Completion::Failed(ClientError::Status(503))));
        assert_eq!(state.content, Some(7));
        assert_eq!(
            state.error.as_deref(),
            Some("Something went wrong. Please try again later.")
        );
    }
}
