//! # Wire models for the article backend
//!
//! Request and response bodies exchanged with the backend, grouped by area.
//! Responses are deliberately lenient: optional fields default, and the few
//! places where different endpoints name the same thing differently
//! (`total_results` / `total_articles`, `likes` / `like_count`) are covered by
//! serde aliases so one listing type serves every paged endpoint.
//!
//! Timestamps arrive either as RFC 3339 strings or as naive ISO strings; both
//! are read into a UTC [`NaiveDateTime`] by the [`timestamp`] helpers.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------- auth

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub user_email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegistrationRequest {
    pub user_name: String,
    pub user_email: String,
    pub password: String,
    pub confirm_password: String,
    pub birth_date: Option<NaiveDate>,
    pub about_author: Option<String>,
    pub social_link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RegistrationResponse {
    pub user_id: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
}

// ---------------------------------------------------------------- users

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub user_email: String,
    pub user_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub social_link: Option<String>,
    #[serde(default = "default_role")]
    pub user_role: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_role() -> String {
    "user".to_string()
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.user_role == "admin"
    }
}

/// `PUT /users/me` body. Only the fields of the edited section are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `Some(None)` clears the birth date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------- articles

/// A tag attached to an article. The backend sends either bare names or
/// `{tag_id, tag_name}` objects depending on the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "TagRepr")]
pub struct Tag {
    pub id: Option<i64>,
    pub name: String,
}

impl Tag {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagRepr {
    Name(String),
    Object {
        #[serde(default)]
        tag_id: Option<i64>,
        tag_name: String,
    },
}

impl From<TagRepr> for Tag {
    fn from(repr: TagRepr) -> Self {
        match repr {
            TagRepr::Name(name) => Tag { id: None, name },
            TagRepr::Object { tag_id, tag_name } => Tag {
                id: tag_id,
                name: tag_name,
            },
        }
    }
}

/// One card in any article listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArticleSummary {
    pub article_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "author_name")]
    pub author_username: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: NaiveDateTime,
    #[serde(default, alias = "like_count", alias = "total_likes")]
    pub likes: u64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A page of articles from any paged listing endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArticlePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, alias = "total_articles")]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<ArticleSummary>,
    /// Tag or author name for the trending listings.
    #[serde(default, alias = "tag_name", alias = "author_name", alias = "user_name")]
    pub heading: Option<String>,
}

fn first_page() -> u32 {
    1
}

/// Full article for the view and edit pages.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArticleDetail {
    pub article_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author_username: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: NaiveDateTime,
    #[serde(default, alias = "tag_names")]
    pub tags: Vec<Tag>,
}

/// Create/update body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArticlePayload {
    pub title: String,
    pub content: String,
    pub tag_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArticleSaved {
    pub article_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleStats {
    #[serde(default)]
    pub total_articles: u64,
    #[serde(default)]
    pub published_articles: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub total_saves: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdminDeleteRequest {
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminAction {
    pub id: i64,
    #[serde(default)]
    pub action_type: String,
    #[serde(default)]
    pub target_id: i64,
    #[serde(default)]
    pub reason: String,
}

// ---------------------------------------------------------------- discovery

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrendingTag {
    pub tag_id: i64,
    pub tag_name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrendingAuthor {
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserHit {
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchResults {
    #[serde(default, alias = "results")]
    pub articles: Vec<ArticleSummary>,
    #[serde(default)]
    pub users: Vec<UserHit>,
}

// ---------------------------------------------------------------- interactions

/// Interactions a user can switch on and off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Save,
}

/// Interactions recorded for recommendations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionEvent {
    View,
    Like,
    Save,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct InteractionStatus {
    pub liked: bool,
    pub saved: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToggleRequest {
    pub article_id: i64,
    pub interaction_type: InteractionKind,
}

/// Authoritative state after a toggle.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ToggleResult {
    pub interaction_type: InteractionKind,
    pub active: bool,
    #[serde(default)]
    pub new_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogInteraction {
    pub article_id: i64,
    pub interaction_type: InteractionEvent,
}

/// Timestamp parsing that accepts both offset and naive ISO strings.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer};

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`"))),
        }
    }
}
