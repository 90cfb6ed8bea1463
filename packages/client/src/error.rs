//! Errors surfaced by the backend client and the page controllers.
//!
//! Every failure maps onto one of four [`ErrorKind`]s, which decide how a page
//! reacts: redirect, inline field message, inline/alert retry prompt, or an
//! empty page for a missing URL parameter.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// How a page should react to a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, invalid or expired token.
    Authentication,
    /// The backend (or a local check) rejected user input.
    Validation,
    /// Network or server failure; the user may retry.
    Transient,
    /// A required URL parameter was absent.
    MissingParameter,
}

/// A single rejected field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Last element of the backend's `loc` path, e.g. `"content"`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message shown to the user for this field.
    pub fn user_message(&self) -> String {
        match self.field.as_str() {
            "content" => {
                "Your article content is too short. Please write at least 50 characters."
                    .to_string()
            }
            "title" => "Your title is too short. Please write a longer title.".to_string(),
            _ => self.message.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("session is no longer valid")]
    InvalidSession,

    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Deserialize)]
struct DetailBody {
    detail: Value,
}

impl ClientError {
    /// Build an error from a non-success response body.
    ///
    /// Understands FastAPI-style bodies: `{"detail": "..."}` becomes
    /// [`ClientError::Rejected`], `{"detail": [{"loc": [...], "msg": "..."}]}`
    /// becomes [`ClientError::Validation`]. 401 always means the session is gone.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ClientError::InvalidSession;
        }
        let Ok(parsed) = serde_json::from_str::<DetailBody>(body) else {
            return ClientError::Status(status);
        };
        match parsed.detail {
            Value::String(detail) => ClientError::Rejected { status, detail },
            Value::Array(items) => {
                let errors: Vec<FieldError> = items.iter().filter_map(field_error).collect();
                if errors.is_empty() {
                    ClientError::Status(status)
                } else {
                    ClientError::Validation(errors)
                }
            }
            _ => ClientError::Status(status),
        }
    }

    /// Local validation failure on one field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Unauthenticated | ClientError::InvalidSession => {
                ErrorKind::Authentication
            }
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Rejected { status, .. } if (400..500).contains(status) => {
                ErrorKind::Validation
            }
            ClientError::Rejected { .. }
            | ClientError::Status(_)
            | ClientError::Network(_)
            | ClientError::Decode(_) => ErrorKind::Transient,
            ClientError::MissingParameter(_) => ErrorKind::MissingParameter,
        }
    }

    /// The backend's `detail` string, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Text shown to the user in an alert or inline panel.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(errors) => errors
                .iter()
                .map(FieldError::user_message)
                .collect::<Vec<_>>()
                .join("\n"),
            ClientError::Rejected { detail, .. } => detail.clone(),
            ClientError::Unauthenticated | ClientError::InvalidSession => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::MissingParameter(name) => format!("No {name} provided."),
            ClientError::Network(_) => {
                "Unable to connect to the server. Try again later.".to_string()
            }
            ClientError::Status(_) | ClientError::Decode(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }
}

fn field_error(item: &Value) -> Option<FieldError> {
    let message = item.get("msg")?.as_str()?.to_string();
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .map(|last| match last {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default();
    Some(FieldError { field, message })
}
