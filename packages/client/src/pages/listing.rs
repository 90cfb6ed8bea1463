//! Paged article listings: home feed, bookmarks, trending tag, trending
//! author and the user's own articles.
//!
//! All five share [`ListingController`]; they differ only in the
//! [`ListingSource`] they fetch from. The home feed keeps the backend's rank
//! order and cannot be re-sorted. "Your articles" is sorted by the backend.
//! The others are ordered client-side, one page at a time, so a sort change
//! there re-orders what is on screen without a new request.

use std::cmp::Reverse;

use crate::api::Backend;
use crate::cursor::{CursorStore, ListingKind, ListingOrder, SortKey, ViewCursor};
use crate::error::ClientError;
use crate::models::{ArticlePage, ArticleSummary};
use crate::pages::{paths, Completion, FetchTicket, PageState, Pagination};
use crate::storage::{ClientStorage, KeyValueStore, REFERRER_KEY};

/// Where a listing's articles come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingSource {
    Home { page_size: u32 },
    Bookmarks,
    Tag(i64),
    Author(i64),
    YourArticles { page_size: u32 },
}

impl ListingSource {
    pub fn kind(&self) -> ListingKind {
        match self {
            ListingSource::Home { .. } => ListingKind::Home,
            ListingSource::Bookmarks => ListingKind::Bookmarks,
            ListingSource::Tag(_) => ListingKind::TrendingTag,
            ListingSource::Author(_) => ListingKind::TrendingAuthor,
            ListingSource::YourArticles { .. } => ListingKind::YourArticles,
        }
    }

    /// This listing's own location, stored as the referrer when an article
    /// is opened from it.
    pub fn location(&self) -> String {
        match self {
            ListingSource::Home { .. } => paths::HOME.to_string(),
            ListingSource::Bookmarks => paths::BOOKMARKS.to_string(),
            ListingSource::Tag(id) => paths::trending_tag(*id),
            ListingSource::Author(id) => paths::trending_author(*id),
            ListingSource::YourArticles { .. } => paths::YOUR_ARTICLES.to_string(),
        }
    }
}

/// Everything a fetch needs, detached from the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingRequest {
    pub source: ListingSource,
    pub page: u32,
    pub sort: SortKey,
}

/// Order articles in place. Popular falls back to newest among equal likes.
pub fn sort_articles(articles: &mut [ArticleSummary], sort: SortKey) {
    match sort {
        SortKey::Newest => articles.sort_by_key(|a| Reverse(a.created_at)),
        SortKey::Oldest => articles.sort_by_key(|a| a.created_at),
        SortKey::Popular => articles.sort_by_key(|a| (Reverse(a.likes), Reverse(a.created_at))),
    }
}

/// Fetch one page for `request`.
pub async fn fetch_listing<B: Backend>(
    backend: &B,
    storage: &ClientStorage,
    token: &str,
    request: &ListingRequest,
) -> Result<ArticlePage, ClientError> {
    let page = request.page;
    match request.source {
        ListingSource::Home { page_size } => {
            let session_id = storage.recommendation_session_id();
            backend
                .recommendations(token, page, page_size, &session_id)
                .await
        }
        ListingSource::Bookmarks => backend.saved_articles(token, page).await,
        ListingSource::Tag(tag_id) => backend.articles_by_tag(tag_id, page).await,
        ListingSource::Author(author_id) => backend.articles_by_author(author_id, page).await,
        ListingSource::YourArticles { page_size } => {
            backend
                .my_articles(token, request.sort, page, page_size)
                .await
        }
    }
}

/// State of one listing page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingController {
    pub source: ListingSource,
    pub cursor: ViewCursor,
    pub state: PageState<ArticlePage>,
}

impl ListingController {
    /// Resume from the stored cursor.
    pub fn new(source: ListingSource, store: &dyn KeyValueStore) -> Self {
        let cursor = CursorStore::new(store, source.kind()).load();
        Self {
            source,
            cursor,
            state: PageState::new(),
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.source.kind()
    }

    fn slot<'a>(&self, store: &'a dyn KeyValueStore) -> CursorStore<'a> {
        CursorStore::new(store, self.kind())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from(&self.cursor)
    }

    pub fn articles(&self) -> &[ArticleSummary] {
        self.state
            .content
            .as_ref()
            .map(|page| page.articles.as_slice())
            .unwrap_or_default()
    }

    /// Start a fetch of the cursor's current page.
    pub fn begin_fetch(&mut self) -> (FetchTicket, ListingRequest) {
        let ticket = self.state.begin();
        let request = ListingRequest {
            source: self.source,
            page: self.cursor.page,
            sort: self.cursor.sort,
        };
        (ticket, request)
    }

    /// Take a fetch result. On success the backend's total is recorded and
    /// client-sorted listings are ordered.
    pub fn complete(
        &mut self,
        store: &dyn KeyValueStore,
        ticket: FetchTicket,
        result: Result<ArticlePage, ClientError>,
    ) -> Completion {
        let result = result.map(|mut page| {
            if self.kind().ordering() == ListingOrder::Client {
                sort_articles(&mut page.articles, self.cursor.sort);
            }
            page
        });
        let completion = self.state.complete(ticket, result);
        if completion.is_loaded() {
            let total = self
                .state
                .content
                .as_ref()
                .map_or(0, |page| page.total_pages);
            let slot = self.slot(store);
            slot.set_total_pages(&mut self.cursor, total);
        }
        completion
    }

    /// Move forward. `true` when a fetch should follow.
    pub fn next(&mut self, store: &dyn KeyValueStore) -> bool {
        let slot = self.slot(store);
        slot.next(&mut self.cursor)
    }

    /// Move back. `true` when a fetch should follow.
    pub fn prev(&mut self, store: &dyn KeyValueStore) -> bool {
        let slot = self.slot(store);
        slot.prev(&mut self.cursor)
    }

    /// Change the ordering. `true` when a fetch should follow: the backend
    /// sorts this listing, so it restarts from page 1. Client-sorted listings
    /// re-order the loaded page and return `false`. Ranked listings ignore it.
    pub fn set_sort(&mut self, store: &dyn KeyValueStore, sort: SortKey) -> bool {
        let ordering = self.kind().ordering();
        if !ordering.sortable() {
            return false;
        }
        let slot = self.slot(store);
        if !slot.set_sort(&mut self.cursor, sort) {
            return false;
        }
        if ordering == ListingOrder::Server {
            slot.go_to(&mut self.cursor, 1);
            return true;
        }
        if let Some(page) = self.state.content_mut() {
            sort_articles(&mut page.articles, sort);
        }
        false
    }

    /// Remember where we are and return the article's location.
    pub fn open_article(&self, store: &dyn KeyValueStore, article_id: i64) -> String {
        self.slot(store).save(&self.cursor);
        store.set(REFERRER_KEY, &self.source.location());
        paths::view(article_id)
    }

    /// Leave the listing through its back button; the next visit starts over.
    pub fn leave(&self, store: &dyn KeyValueStore) {
        self.slot(store).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_of, summary, FakeBackend, Reply};
    use crate::MemoryStorage;

    #[test]
    fn sort_orders() {
        let mut articles = vec![
            summary(1, "old", 1, 5),
            summary(2, "new", 9, 1),
            summary(3, "mid", 5, 5),
        ];
        sort_articles(&mut articles, SortKey::Newest);
        assert_eq!(ids(&articles), [2, 3, 1]);
        sort_articles(&mut articles, SortKey::Oldest);
        assert_eq!(ids(&articles), [1, 3, 2]);
        sort_articles(&mut articles, SortKey::Popular);
        assert_eq!(ids(&articles), [3, 1, 2]);
    }

    fn ids(articles: &[ArticleSummary]) -> Vec<i64> {
        articles.iter().map(|a| a.article_id).collect()
    }

    #[tokio::test]
    async fn home_fetch_uses_cursor_and_session_id() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(vec![summary(1, "a", 1, 0)], 2, 4)));
        let storage = ClientStorage::in_memory();
        storage.session.set("home_current_page", "2");
        storage.session.set("home_total_pages", "4");

        let mut home = ListingController::new(ListingSource::Home { page_size: 5 }, storage.session.as_ref());
        let (ticket, request) = home.begin_fetch();
        let result = fetch_listing(&backend, &storage, "tok", &request).await;
        assert!(home.complete(storage.session.as_ref(), ticket, result).is_loaded());

        let session_id = storage.recommendation_session_id();
        assert_eq!(
            backend.requests(),
            vec![format!("recommendations page=2 size=5 session={session_id}")]
        );
        assert_eq!(home.pagination().label(), "Page 2 of 4");
        assert_eq!(home.articles().len(), 1);
    }

    #[tokio::test]
    async fn home_keeps_rank_order() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(
            vec![summary(1, "a", 1, 0), summary(2, "b", 2, 9), summary(3, "c", 3, 4)],
            1,
            1,
        )));
        let storage = ClientStorage::in_memory();
        let store = storage.session.as_ref();

        let mut home = ListingController::new(ListingSource::Home { page_size: 5 }, store);
        let (ticket, request) = home.begin_fetch();
        let result = fetch_listing(&backend, &storage, "tok", &request).await;
        home.complete(store, ticket, result);
        assert_eq!(ids(home.articles()), [1, 2, 3]);

        assert!(!home.set_sort(store, SortKey::Popular));
        assert_eq!(ids(home.articles()), [1, 2, 3]);
        assert!(store.get("home_sort").is_none());
    }

    #[tokio::test]
    async fn total_from_backend_is_persisted() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(vec![], 1, 3)));
        let storage = ClientStorage::in_memory();
        let store = storage.session.as_ref();

        let mut tag = ListingController::new(ListingSource::Tag(4), store);
        let (ticket, request) = tag.begin_fetch();
        let result = fetch_listing(&backend, &storage, "tok", &request).await;
        tag.complete(store, ticket, result);

        assert_eq!(store.get("trending_total_pages").as_deref(), Some("3"));
        assert!(tag.next(store));
        assert_eq!(store.get("trending_current_page").as_deref(), Some("2"));
        assert_eq!(backend.requests(), vec!["articles_by_tag tag=4 page=1".to_string()]);
    }

    #[tokio::test]
    async fn client_sorted_listing_resorts_without_fetching() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(
            vec![summary(1, "a", 1, 9), summary(2, "b", 2, 0)],
            1,
            1,
        )));
        let storage = ClientStorage::in_memory();
        let store = storage.session.as_ref();

        let mut saved = ListingController::new(ListingSource::Bookmarks, store);
        let (ticket, request) = saved.begin_fetch();
        let result = fetch_listing(&backend, &storage, "tok", &request).await;
        saved.complete(store, ticket, result);
        assert_eq!(ids(saved.articles()), [2, 1]);

        assert!(!saved.set_sort(store, SortKey::Popular));
        assert_eq!(ids(saved.articles()), [1, 2]);
        assert_eq!(store.get("bookmarks_sort").as_deref(), Some("popular"));
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn server_sorted_listing_restarts_on_sort_change() {
        let store = MemoryStorage::new();
        store.set("your_articles_current_page", "3");
        store.set("your_articles_total_pages", "3");
        let mut mine = ListingController::new(ListingSource::YourArticles { page_size: 5 }, &store);

        assert!(mine.set_sort(&store, SortKey::Oldest));
        assert_eq!(mine.cursor.page, 1);
        assert!(!mine.set_sort(&store, SortKey::Oldest));
    }

    #[test]
    fn opening_an_article_records_referrer_and_cursor() {
        let store = MemoryStorage::new();
        let mut author = ListingController::new(ListingSource::Author(8), &store);
        author.cursor.page = 2;
        author.cursor.total_pages = 2;

        let target = author.open_article(&store, 41);
        assert_eq!(target, "/view?article_id=41");
        assert_eq!(store.get(REFERRER_KEY).as_deref(), Some("/author?author_id=8"));
        assert_eq!(store.get("author_current_page").as_deref(), Some("2"));

        author.leave(&store);
        assert!(store.get("author_current_page").is_none());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_rendered_page() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(vec![summary(1, "a", 1, 0)], 1, 2)));
        backend.push_page(Reply::Status(502));
        let storage = ClientStorage::in_memory();
        let store = storage.session.as_ref();

        let mut saved = ListingController::new(ListingSource::Bookmarks, store);
        let (ticket, request) = saved.begin_fetch();
        let first = fetch_listing(&backend, &storage, "tok", &request).await;
        saved.complete(store, ticket, first);

        saved.next(store);
        let (ticket, request) = saved.begin_fetch();
        let second = fetch_listing(&backend, &storage, "tok", &request).await;
        let outcome = saved.complete(store, ticket, second);

        assert!(matches!(outcome, Completion::Failed(_)));
        assert_eq!(ids(saved.articles()), [1]);
        assert!(saved.state.error.is_some());
    }
}
