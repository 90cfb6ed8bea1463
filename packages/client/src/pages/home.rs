//! Home feed: recommendations plus trending tags and authors, and the navbar
//! actions every signed-in page shares (search, logout).

use crate::api::Backend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{TrendingAuthor, TrendingTag};
use crate::navigation::Navigator;
use crate::pages::listing::{ListingController, ListingSource};
use crate::pages::{paths, PageState};
use crate::storage::{ClientStorage, KeyValueStore};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trending {
    pub tags: Vec<TrendingTag>,
    pub authors: Vec<TrendingAuthor>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HomePage {
    pub feed: ListingController,
    pub trending: PageState<Trending>,
}

impl HomePage {
    pub fn new(config: &ClientConfig, store: &dyn KeyValueStore) -> Self {
        let source = ListingSource::Home {
            page_size: config.paging.home_page_size,
        };
        Self {
            feed: ListingController::new(source, store),
            trending: PageState::new(),
        }
    }
}

pub async fn load_trending<B: Backend>(backend: &B) -> Result<Trending, ClientError> {
    let tags = backend.trending_tags().await?;
    let authors = backend.trending_authors().await?;
    Ok(Trending { tags, authors })
}

/// Location for a navbar search, or `None` for a blank query.
pub fn search_target(raw: &str) -> Option<String> {
    let query = raw.trim();
    (!query.is_empty()).then(|| paths::search(query))
}

/// Forget the session and go to the sign-in page.
pub fn logout<N: Navigator + ?Sized>(storage: &ClientStorage, navigator: &N, config: &ClientConfig) {
    tracing::info!("Logging out");
    storage.clear_all();
    navigator.replace(&config.routes.authentication);
}
