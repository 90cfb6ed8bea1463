//! Single article view: content, like/save, view logging, the back link and
//! moderation.

use crate::api::Backend;
use crate::error::ClientError;
use crate::interaction::InteractionToggle;
use crate::models::{AdminAction, AdminDeleteRequest, ArticleDetail, InteractionEvent, LogInteraction};
use crate::pages::{paths, PageState};
use crate::session::SessionCredential;
use crate::storage::{KeyValueStore, REFERRER_KEY};

/// Shortest accepted moderation reason, in characters after trimming.
pub const MIN_REASON_CHARS: usize = 5;

/// Read a required numeric id from the location's query.
pub fn required_id(raw: Option<&str>, name: &'static str) -> Result<i64, ClientError> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
        .ok_or(ClientError::MissingParameter(name))
}

/// Where the back link goes and what it says.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackLink {
    pub href: String,
    pub label: &'static str,
}

impl BackLink {
    /// Build the link from the stored referrer and consume it.
    pub fn take(store: &dyn KeyValueStore) -> Self {
        let Some(referrer) = store.get(REFERRER_KEY).filter(|r| !r.is_empty()) else {
            return Self {
                href: paths::HOME.to_string(),
                label: "← Back to Home",
            };
        };
        store.remove(REFERRER_KEY);
        let label = match paths::route_of(&referrer) {
            paths::TRENDING_TAG => "← Back to Trending Tag",
            paths::TRENDING_AUTHOR => "← Back to Author Articles",
            paths::HOME => "← Back to Home",
            _ => "← Back",
        };
        Self {
            href: referrer,
            label,
        }
    }
}

pub fn admin_delete_request(reason: &str) -> Result<AdminDeleteRequest, ClientError> {
    let reason = reason.trim();
    if reason.chars().count() < MIN_REASON_CHARS {
        return Err(ClientError::field(
            "reason",
            format!("Reason must be at least {MIN_REASON_CHARS} characters."),
        ));
    }
    Ok(AdminDeleteRequest {
        reason: reason.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArticleView {
    pub article_id: i64,
    pub article: PageState<ArticleDetail>,
    pub interactions: InteractionToggle,
    pub back: BackLink,
    /// Signed in as an administrator: offer moderation.
    pub can_moderate: bool,
}

impl ArticleView {
    pub fn new(article_id: i64, credential: &SessionCredential, store: &dyn KeyValueStore) -> Self {
        Self {
            article_id,
            article: PageState::new(),
            interactions: InteractionToggle::new(article_id),
            back: BackLink::take(store),
            can_moderate: credential.is_admin(),
        }
    }
}

pub async fn load_article<B: Backend>(backend: &B, article_id: i64) -> Result<ArticleDetail, ClientError> {
    backend.article(article_id).await
}

/// Record that the article was read. Skipped without a stored user id.
pub async fn log_view<B: Backend>(
    backend: &B,
    credential: &SessionCredential,
    article_id: i64,
) -> Result<(), ClientError> {
    let Some(user_id) = credential.user_id.as_deref() else {
        return Ok(());
    };
    let event = LogInteraction {
        article_id,
        interaction_type: InteractionEvent::View,
    };
    backend.log_interaction(user_id, &event).await
}

/// Remove an article as an administrator.
pub async fn moderate<B: Backend>(
    backend: &B,
    credential: &SessionCredential,
    article_id: i64,
    reason: &str,
) -> Result<AdminAction, ClientError> {
    if !credential.is_admin() {
        return Err(ClientError::Rejected {
            status: 403,
            detail: "Admin access required".into(),
        });
    }
    let request = admin_delete_request(reason)?;
    let action = backend
        .admin_delete_article(&credential.token, article_id, &request)
        .await?;
    tracing::info!("Article {} removed by moderator", article_id);
    Ok(action)
}
