//! The composer's recovery draft.
//!
//! Stored as JSON under [`DRAFT_KEY`] in persistent storage. Restored when the
//! create page opens, written on "Save draft" and removed once the article is
//! published or the draft is discarded.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::models::ArticlePayload;
use crate::storage::{KeyValueStore, DRAFT_KEY};

pub const MISSING_FIELDS: &str = "Please add a title and content before publishing.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DraftArticle {
    /// Stored draft, if any. A corrupt entry is dropped.
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let raw = store.get(DRAFT_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                tracing::warn!("Discarding unreadable draft: {}", e);
                store.remove(DRAFT_KEY);
                None
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), ClientError> {
        store.set(DRAFT_KEY, &serde_json::to_string(self)?);
        Ok(())
    }

    pub fn discard(store: &dyn KeyValueStore) {
        store.remove(DRAFT_KEY);
    }

    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty() && self.tags.is_empty()
    }

    /// Request body for publishing. Title and body must not be blank.
    pub fn to_payload(&self) -> Result<ArticlePayload, ClientError> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(ClientError::field("article", MISSING_FIELDS));
        }
        Ok(ArticlePayload {
            title: title.to_string(),
            content: content.to_string(),
            tag_names: self.tags.clone(),
        })
    }
}
