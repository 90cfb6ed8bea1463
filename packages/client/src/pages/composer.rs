//! Create and edit pages share one composer.
//!
//! The body is edited as rich text but published as its plain text, so the
//! backend never stores markup and nothing needs sanitizing on the way back.

use crate::api::Backend;
use crate::draft::DraftArticle;
use crate::editor::TextStats;
use crate::error::ClientError;
use crate::models::{ArticleDetail, ArticlePayload};
use crate::pages::{paths, PageState};
use crate::storage::KeyValueStore;
use crate::tags::TagList;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposerMode {
    Create,
    Edit(i64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Composer {
    pub mode: ComposerMode,
    pub title: String,
    /// Plain text of the editor.
    pub content: String,
    pub tags: TagList,
    pub tag_error: Option<String>,
    /// Messages from the last failed submit, one per rejected field.
    pub errors: Vec<String>,
    pub submitting: bool,
    /// The article being edited, once loaded.
    pub original: PageState<ArticleDetail>,
}

impl Composer {
    fn empty(mode: ComposerMode) -> Self {
        Self {
            mode,
            title: String::new(),
            content: String::new(),
            tags: TagList::new(),
            tag_error: None,
            errors: Vec::new(),
            submitting: false,
            original: PageState::new(),
        }
    }

    /// New article, restored from the recovery draft if there is one.
    pub fn create(store: &dyn KeyValueStore) -> Self {
        let mut composer = Self::empty(ComposerMode::Create);
        if let Some(draft) = DraftArticle::load(store) {
            tracing::debug!("Restoring draft");
            composer.title = draft.title;
            composer.content = draft.content;
            composer.tags = TagList::from_names(draft.tags);
        }
        composer
    }

    pub fn edit(article_id: i64) -> Self {
        Self::empty(ComposerMode::Edit(article_id))
    }

    /// Fill the form from the loaded article.
    pub fn fill(&mut self, article: &ArticleDetail) {
        self.title = article.title.clone();
        self.content = article.content.clone();
        self.tags = TagList::from_tags(article.tags.iter().cloned());
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.content)
    }

    pub fn draft(&self) -> DraftArticle {
        DraftArticle {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.names(),
        }
    }

    pub fn save_draft(&self, store: &dyn KeyValueStore) -> Result<(), ClientError> {
        self.draft().save(store)
    }

    /// Drop the recovery draft and clear the form.
    pub fn discard(&mut self, store: &dyn KeyValueStore) {
        DraftArticle::discard(store);
        *self = Self::empty(self.mode);
    }

    /// Add a typed tag; the rejection is kept for display.
    pub fn add_tag(&mut self, input: &str) -> bool {
        match self.tags.add(input) {
            Ok(()) => {
                self.tag_error = None;
                true
            }
            Err(e) => {
                self.tag_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn remove_tag(&mut self, name: &str) -> bool {
        self.tag_error = None;
        self.tags.remove(name)
    }

    /// Validate and lock the form. `None` while a submit is in flight or
    /// when the form is incomplete (the message is in `errors`).
    pub fn begin_submit(&mut self) -> Option<ArticlePayload> {
        if self.submitting {
            return None;
        }
        match self.draft().to_payload() {
            Ok(payload) => {
                self.errors.clear();
                self.submitting = true;
                Some(payload)
            }
            Err(e) => {
                self.errors = messages(&e);
                None
            }
        }
    }

    /// Settle a submit. Returns where to go on success: home after
    /// publishing, the article after an edit.
    pub fn finish_submit(
        &mut self,
        store: &dyn KeyValueStore,
        result: Result<i64, ClientError>,
    ) -> Option<String> {
        self.submitting = false;
        match (self.mode, result) {
            (ComposerMode::Create, Ok(id)) => {
                tracing::info!("Published article {}", id);
                DraftArticle::discard(store);
                Some(paths::HOME.to_string())
            }
            (ComposerMode::Edit(_), Ok(id)) => {
                tracing::info!("Updated article {}", id);
                Some(paths::view(id))
            }
            (_, Err(e)) => {
                tracing::error!("Saving article failed: {}", e);
                self.errors = messages(&e);
                None
            }
        }
    }
}

fn messages(error: &ClientError) -> Vec<String> {
    match error.field_errors() {
        [] => vec![error.user_message()],
        fields => fields.iter().map(|f| f.user_message()).collect(),
    }
}

/// Send the payload for `mode`; yields the saved article's id.
pub async fn submit<B: Backend>(
    backend: &B,
    token: &str,
    mode: ComposerMode,
    payload: &ArticlePayload,
) -> Result<i64, ClientError> {
    let saved = match mode {
        ComposerMode::Create => backend.create_article(token, payload).await?,
        ComposerMode::Edit(id) => backend.update_article(token, id, payload).await?,
    };
    Ok(saved.article_id)
}
