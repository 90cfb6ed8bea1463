//! The signed-in user's own articles with totals, edit and delete.

use crate::api::Backend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::ArticleStats;
use crate::pages::listing::{ListingController, ListingSource};
use crate::pages::PageState;
use crate::storage::KeyValueStore;

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this article? This action cannot be undone.";
pub const DELETE_FAILED: &str = "Failed to delete article. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct YourArticlesPage {
    pub listing: ListingController,
    pub stats: PageState<ArticleStats>,
    /// Article whose delete request is in flight.
    pub deleting: Option<i64>,
}

impl YourArticlesPage {
    pub fn new(config: &ClientConfig, store: &dyn KeyValueStore) -> Self {
        let source = ListingSource::YourArticles {
            page_size: config.paging.your_articles_page_size,
        };
        Self {
            listing: ListingController::new(source, store),
            stats: PageState::new(),
            deleting: None,
        }
    }

    /// Loaded and the backend has nothing: show the "Create Article" prompt.
    pub fn is_empty(&self) -> bool {
        self.listing
            .state
            .content
            .as_ref()
            .is_some_and(|page| page.articles.is_empty())
    }

    /// Mark `article_id` as being deleted. `false` while another delete runs.
    pub fn begin_delete(&mut self, article_id: i64) -> bool {
        if self.deleting.is_some() {
            return false;
        }
        self.deleting = Some(article_id);
        true
    }

    /// Settle a delete. Only a confirmed delete removes the card; returns
    /// whether the list and totals should be fetched again.
    pub fn finish_delete(&mut self, result: &Result<(), ClientError>) -> bool {
        let Some(article_id) = self.deleting.take() else {
            return false;
        };
        match result {
            Ok(()) => {
                if let Some(page) = self.listing.state.content_mut() {
                    page.articles.retain(|a| a.article_id != article_id);
                }
                true
            }
            Err(e) => {
                tracing::error!("Deleting article {} failed: {}", article_id, e);
                false
            }
        }
    }
}

pub async fn delete_article<B: Backend>(
    backend: &B,
    token: &str,
    article_id: i64,
) -> Result<(), ClientError> {
    backend.delete_article(token, article_id).await?;
    tracing::info!("Deleted article {}", article_id);
    Ok(())
}

pub async fn load_stats<B: Backend>(backend: &B, token: &str) -> Result<ArticleStats, ClientError> {
    backend.my_article_stats(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSummary;
    use crate::pages::listing::fetch_listing;
    use crate::storage::ClientStorage;
    use crate::testing::{page_of, summary, FakeBackend, Reply};

    async fn loaded(backend: &FakeBackend, storage: &ClientStorage) -> YourArticlesPage {
        let store = storage.session.as_ref();
        let mut page = YourArticlesPage::new(&ClientConfig::default(), store);
        let (ticket, request) = page.listing.begin_fetch();
        let result = fetch_listing(backend, storage, "tok", &request).await;
        page.listing.complete(store, ticket, result);
        let ticket = page.stats.begin();
        let result = load_stats(backend, "tok").await;
        page.stats.complete(ticket, result);
        page
    }

    fn ids(page: &YourArticlesPage) -> Vec<i64> {
        page.listing.articles().iter().map(|a: &ArticleSummary| a.article_id).collect()
    }

    #[tokio::test]
    async fn delete_removes_card_then_refreshes_list_and_stats() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(
            vec![summary(1, "a", 2, 0), summary(2, "b", 1, 0)],
            1,
            1,
        )));
        backend.push_page(Reply::Ok(page_of(vec![summary(1, "a", 2, 0)], 1, 1)));
        backend.set_stats(Reply::Ok(ArticleStats {
            total_articles: 2,
            ..Default::default()
        }));
        backend.push_stats(Reply::Ok(ArticleStats {
            total_articles: 1,
            ..Default::default()
        }));
        let storage = ClientStorage::in_memory();
        let store = storage.session.as_ref();
        let mut page = loaded(&backend, &storage).await;

        assert!(page.begin_delete(2));
        let result = delete_article(&backend, "tok", 2).await;
        assert!(page.finish_delete(&result));
        assert_eq!(ids(&page), [1]);

        let (ticket, request) = page.listing.begin_fetch();
        let refreshed = fetch_listing(&backend, &storage, "tok", &request).await;
        page.listing.complete(store, ticket, refreshed);
        let ticket = page.stats.begin();
        let stats = load_stats(&backend, "tok").await;
        page.stats.complete(ticket, stats);

        assert_eq!(page.stats.content.as_ref().map(|s| s.total_articles), Some(1));
        assert_eq!(
            backend.calls(),
            [
                "my_articles",
                "my_article_stats",
                "delete_article",
                "my_articles",
                "my_article_stats"
            ]
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_card() {
        let backend = FakeBackend::new();
        backend.set_page(Reply::Ok(page_of(vec![summary(5, "a", 1, 0)], 1, 1)));
        backend.set_delete(Reply::Status(500));
        let storage = ClientStorage::in_memory();
        let mut page = loaded(&backend, &storage).await;

        page.begin_delete(5);
        let result = delete_article(&backend, "tok", 5).await;
        assert!(!page.finish_delete(&result));
        assert_eq!(ids(&page), [5]);
        assert!(page.deleting.is_none());
    }

    #[tokio::test]
    async fn request_uses_server_sort_and_page_size() {
        let backend = FakeBackend::new();
        let storage = ClientStorage::in_memory();
        storage.session.set("your_articles_sort", "popular");
        let page = loaded(&backend, &storage).await;

        assert_eq!(backend.requests()[0], "my_articles sort=popular page=1 size=5");
        assert!(page.is_empty());
    }

    #[test]
    fn one_delete_at_a_time() {
        let storage = ClientStorage::in_memory();
        let mut page = YourArticlesPage::new(&ClientConfig::default(), storage.session.as_ref());
        assert!(page.begin_delete(1));
        assert!(!page.begin_delete(2));
    }
}
