//! # View cursor: per-listing page number and sort order
//!
//! Each listing page remembers where the user was in tab-scoped storage so
//! that coming back from an article resumes on the same page with the same
//! ordering. Keys are `<prefix>_current_page`, `<prefix>_sort` and
//! `<prefix>_total_pages` where the prefix comes from [`ListingKind`].
//!
//! The page number always stays within `[1, max(total_pages, 1)]`, using the
//! last total the backend reported. Every mutation writes through to storage
//! before returning, so the caller can issue its fetch afterwards and a
//! reload in between still sees the newest intent.

use std::fmt;
use std::str::FromStr;

use crate::storage::KeyValueStore;

/// Listing pages that keep a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Home,
    Bookmarks,
    TrendingTag,
    TrendingAuthor,
    YourArticles,
    Search,
}

impl ListingKind {
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            ListingKind::Home => "home",
            ListingKind::Bookmarks => "bookmarks",
            ListingKind::TrendingTag => "trending",
            ListingKind::TrendingAuthor => "author",
            ListingKind::YourArticles => "your_articles",
            ListingKind::Search => "search",
        }
    }

    pub fn ordering(&self) -> ListingOrder {
        match self {
            ListingKind::Home => ListingOrder::Ranked,
            ListingKind::YourArticles => ListingOrder::Server,
            _ => ListingOrder::Client,
        }
    }
}

/// Who decides the order of a listing's articles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingOrder {
    /// Backend rank order, kept as is. No sort control.
    Ranked,
    /// The backend sorts by the requested key.
    Server,
    /// The client sorts the current page.
    Client,
}

impl ListingOrder {
    pub fn sortable(&self) -> bool {
        !matches!(self, ListingOrder::Ranked)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Newest, SortKey::Oldest, SortKey::Popular];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::Oldest => "Oldest",
            SortKey::Popular => "Popular",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "popular" => Ok(SortKey::Popular),
            _ => Err(()),
        }
    }
}

/// Snapshot of a listing's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewCursor {
    pub page: u32,
    pub sort: SortKey,
    /// Last total reported by the backend; 0 until the first response.
    pub total_pages: u32,
}

impl Default for ViewCursor {
    fn default() -> Self {
        Self {
            page: 1,
            sort: SortKey::Newest,
            total_pages: 0,
        }
    }
}

impl ViewCursor {
    fn upper_bound(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    fn clamped(mut self) -> Self {
        self.page = self.page.clamp(1, self.upper_bound());
        self
    }
}

/// A cursor bound to its storage slot.
pub struct CursorStore<'a> {
    store: &'a dyn KeyValueStore,
    kind: ListingKind,
}

impl<'a> CursorStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore, kind: ListingKind) -> Self {
        Self { store, kind }
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.kind.storage_prefix(), suffix)
    }

    /// Stored cursor, or page 1 / newest.
    pub fn load(&self) -> ViewCursor {
        let page = self
            .store
            .get(&self.key("current_page"))
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let sort = self
            .store
            .get(&self.key("sort"))
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let total_pages = self
            .store
            .get(&self.key("total_pages"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let cursor = ViewCursor {
            page,
            sort,
            total_pages,
        };
        if total_pages > 0 {
            cursor.clamped()
        } else {
            cursor
        }
    }

    pub fn save(&self, cursor: &ViewCursor) {
        self.store
            .set(&self.key("current_page"), &cursor.page.to_string());
        self.store.set(&self.key("sort"), cursor.sort.as_str());
        self.store
            .set(&self.key("total_pages"), &cursor.total_pages.to_string());
    }

    /// Move forward one page. `false` (and nothing stored) at the last page.
    pub fn next(&self, cursor: &mut ViewCursor) -> bool {
        if !cursor.has_next() {
            return false;
        }
        cursor.page += 1;
        self.save(cursor);
        true
    }

    /// Move back one page. `false` (and nothing stored) at page 1.
    pub fn prev(&self, cursor: &mut ViewCursor) -> bool {
        if !cursor.has_prev() {
            return false;
        }
        cursor.page -= 1;
        self.save(cursor);
        true
    }

    /// Jump to a page, clamped into range.
    pub fn go_to(&self, cursor: &mut ViewCursor, page: u32) {
        cursor.page = page;
        *cursor = cursor.clamped();
        self.save(cursor);
    }

    /// Change the ordering. Returns `false` when it was already selected.
    pub fn set_sort(&self, cursor: &mut ViewCursor, sort: SortKey) -> bool {
        if cursor.sort == sort {
            return false;
        }
        cursor.sort = sort;
        self.save(cursor);
        true
    }

    /// Record the backend's total and pull the page back into range.
    pub fn set_total_pages(&self, cursor: &mut ViewCursor, total_pages: u32) {
        cursor.total_pages = total_pages;
        *cursor = cursor.clamped();
        self.save(cursor);
    }

    /// Forget this listing's position so the next visit starts at page 1.
    pub fn clear(&self) {
        self.store.remove(&self.key("current_page"));
        self.store.remove(&self.key("sort"));
        self.store.remove(&self.key("total_pages"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn defaults_to_first_page_newest() {
        let store = MemoryStorage::new();
        let cursor = CursorStore::new(&store, ListingKind::Home).load();
        assert_eq!(cursor, ViewCursor::default());
        assert!(!cursor.has_prev());
        assert!(!cursor.has_next());
    }

    #[test]
    fn next_and_prev_are_clamped() {
        let store = MemoryStorage::new();
        let slot = CursorStore::new(&store, ListingKind::Bookmarks);
        let mut cursor = slot.load();
        slot.set_total_pages(&mut cursor, 2);

        assert!(!slot.prev(&mut cursor));
        assert_eq!(cursor.page, 1);

        assert!(slot.next(&mut cursor));
        assert_eq!(cursor.page, 2);
        assert!(!slot.next(&mut cursor));
        assert_eq!(cursor.page, 2);
        assert_eq!(store.get("bookmarks_current_page").as_deref(), Some("2"));
    }

    #[test]
    fn mutations_are_persisted_before_returning() {
        let store = MemoryStorage::new();
        let slot = CursorStore::new(&store, ListingKind::TrendingTag);
        let mut cursor = slot.load();
        slot.set_total_pages(&mut cursor, 4);
        slot.next(&mut cursor);
        slot.set_sort(&mut cursor, SortKey::Oldest);

        let reloaded = CursorStore::new(&store, ListingKind::TrendingTag).load();
        assert_eq!(reloaded.page, 2);
        assert_eq!(reloaded.sort, SortKey::Oldest);
        assert_eq!(reloaded.total_pages, 4);
        assert_eq!(store.get("trending_sort").as_deref(), Some("oldest"));
    }

    #[test]
    fn shrinking_total_pulls_page_back() {
        let store = MemoryStorage::new();
        let slot = CursorStore::new(&store, ListingKind::TrendingAuthor);
        let mut cursor = ViewCursor {
            page: 5,
            sort: SortKey::Newest,
            total_pages: 5,
        };
        slot.set_total_pages(&mut cursor, 3);
        assert_eq!(cursor.page, 3);

        slot.set_total_pages(&mut cursor, 0);
        assert_eq!(cursor.page, 1);
    }

    #[test]
    fn stored_page_beyond_known_total_is_clamped_on_load() {
        let store = MemoryStorage::new();
        store.set("home_current_page", "9");
        store.set("home_total_pages", "4");
        let cursor = CursorStore::new(&store, ListingKind::Home).load();
        assert_eq!(cursor.page, 4);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let store = MemoryStorage::new();
        store.set("search_current_page", "zero");
        store.set("search_sort", "random");
        let cursor = CursorStore::new(&store, ListingKind::Search).load();
        assert_eq!(cursor.page, 1);
        assert_eq!(cursor.sort, SortKey::Newest);
    }

    #[test]
    fn clear_only_touches_its_own_listing() {
        let store = MemoryStorage::new();
        let home = CursorStore::new(&store, ListingKind::Home);
        let tag = CursorStore::new(&store, ListingKind::TrendingTag);
        let mut a = ViewCursor { page: 2, sort: SortKey::Popular, total_pages: 3 };
        home.save(&a);
        tag.go_to(&mut a, 3);

        tag.clear();
        assert_eq!(tag.load(), ViewCursor::default());
        assert_eq!(home.load().page, 2);
    }

    #[test]
    fn go_to_clamps() {
        let store = MemoryStorage::new();
        let slot = CursorStore::new(&store, ListingKind::Search);
        let mut cursor = ViewCursor { page: 1, sort: SortKey::Newest, total_pages: 3 };
        slot.go_to(&mut cursor, 10);
        assert_eq!(cursor.page, 3);
        slot.go_to(&mut cursor, 0);
        assert_eq!(cursor.page, 1);
    }
}
