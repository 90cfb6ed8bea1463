//! Search results. The backend returns every match at once; ordering and
//! paging happen here.

use crate::api::Backend;
use crate::cursor::{CursorStore, ListingKind, SortKey, ViewCursor};
use crate::error::ClientError;
use crate::models::{ArticleSummary, SearchResults, UserHit};
use crate::pages::listing::sort_articles;
use crate::pages::{paths, Completion, FetchTicket, PageState, Pagination};
use crate::storage::{KeyValueStore, REFERRER_KEY};

/// Session key holding the query the stored search cursor belongs to.
pub const SEARCH_QUERY_KEY: &str = "search_query";

/// Shortest query, in characters after trimming, that is sent to the backend.
pub const MIN_QUERY_CHARS: usize = 2;

pub fn validate_query(raw: &str) -> Result<String, ClientError> {
    let query = raw.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ClientError::field(
            "q",
            format!("Please enter at least {MIN_QUERY_CHARS} characters to search."),
        ));
    }
    Ok(query.to_string())
}

pub async fn run_search<B: Backend>(
    backend: &B,
    token: &str,
    query: &str,
) -> Result<SearchResults, ClientError> {
    let query = validate_query(query)?;
    backend.search(token, &query).await
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchPage {
    pub query: String,
    pub page_size: u32,
    pub cursor: ViewCursor,
    pub state: PageState<SearchResults>,
}

impl SearchPage {
    /// Resume the stored cursor when it belongs to `query`. Any other query
    /// starts on page 1 with the default order.
    pub fn new(query: impl Into<String>, page_size: u32, store: &dyn KeyValueStore) -> Self {
        let query = query.into();
        let slot = CursorStore::new(store, ListingKind::Search);
        let cursor = if store.get(SEARCH_QUERY_KEY).as_deref() == Some(query.as_str()) {
            slot.load()
        } else {
            slot.clear();
            store.set(SEARCH_QUERY_KEY, &query);
            ViewCursor::default()
        };
        Self {
            query,
            page_size: page_size.max(1),
            cursor,
            state: PageState::new(),
        }
    }

    fn slot<'a>(&self, store: &'a dyn KeyValueStore) -> CursorStore<'a> {
        CursorStore::new(store, ListingKind::Search)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state.begin()
    }

    pub fn complete(
        &mut self,
        store: &dyn KeyValueStore,
        ticket: FetchTicket,
        result: Result<SearchResults, ClientError>,
    ) -> Completion {
        let sort = self.cursor.sort;
        let result = result.map(|mut results| {
            sort_articles(&mut results.articles, sort);
            results
        });
        let completion = self.state.complete(ticket, result);
        if completion.is_loaded() {
            let total = self.total_pages();
            let slot = self.slot(store);
            slot.set_total_pages(&mut self.cursor, total);
        }
        completion
    }

    fn total_pages(&self) -> u32 {
        let count = self.article_count() as u32;
        count.div_ceil(self.page_size)
    }

    pub fn article_count(&self) -> usize {
        self.state
            .content
            .as_ref()
            .map_or(0, |results| results.articles.len())
    }

    /// `"3 articles found"`.
    pub fn count_label(&self) -> String {
        let count = self.article_count();
        format!("{count} article{} found", if count == 1 { "" } else { "s" })
    }

    pub fn users(&self) -> &[UserHit] {
        self.state
            .content
            .as_ref()
            .map(|results| results.users.as_slice())
            .unwrap_or_default()
    }

    /// Articles on the cursor's page.
    pub fn visible_articles(&self) -> &[ArticleSummary] {
        let Some(results) = self.state.content.as_ref() else {
            return &[];
        };
        let size = self.page_size as usize;
        let start = (self.cursor.page.saturating_sub(1) as usize) * size;
        let end = (start + size).min(results.articles.len());
        results.articles.get(start..end).unwrap_or_default()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from(&self.cursor)
    }

    pub fn next(&mut self, store: &dyn KeyValueStore) -> bool {
        let slot = self.slot(store);
        slot.next(&mut self.cursor)
    }

    pub fn prev(&mut self, store: &dyn KeyValueStore) -> bool {
        let slot = self.slot(store);
        slot.prev(&mut self.cursor)
    }

    /// Re-order all results and go back to the first page.
    pub fn set_sort(&mut self, store: &dyn KeyValueStore, sort: SortKey) {
        let slot = self.slot(store);
        if !slot.set_sort(&mut self.cursor, sort) {
            return;
        }
        slot.go_to(&mut self.cursor, 1);
        if let Some(results) = self.state.content_mut() {
            sort_articles(&mut results.articles, sort);
        }
    }

    pub fn open_article(&self, store: &dyn KeyValueStore, article_id: i64) -> String {
        self.slot(store).save(&self.cursor);
        store.set(REFERRER_KEY, &paths::search(&self.query));
        paths::view(article_id)
    }
}

/// Forget the stored search position so the next results page starts over.
/// Called when the user submits a search.
pub fn start_new_search(store: &dyn KeyValueStore) {
    store.remove(SEARCH_QUERY_KEY);
}
