//! # Session guard: gate protected pages on a validated token
//!
//! [`protect_route`] runs before any protected page fetches its content:
//!
//! | Situation | Storage | Redirect (replace) | Result |
//! |-----------|---------|--------------------|--------|
//! | no token stored | untouched | `routes.session_timeout` | [`GuardOutcome::Redirected`] |
//! | backend answers non-success or `valid: false` | **both areas cleared** | `routes.session_timeout` | [`GuardOutcome::Redirected`] |
//! | validation request could not be sent/decoded | untouched | `routes.authentication` | [`GuardOutcome::Redirected`] |
//! | backend answers `valid: true` | untouched | none | [`GuardOutcome::Valid`] |
//!
//! [`guarded`] wraps a page loader so it only runs behind a valid session.

use std::future::Future;

use crate::api::Backend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::navigation::Navigator;
use crate::session::SessionCredential;
use crate::storage::ClientStorage;

/// Why the guard sent the user away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    MissingToken,
    RejectedToken,
    Unreachable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Valid(SessionCredential),
    Redirected(RedirectReason),
}

impl GuardOutcome {
    pub fn credential(&self) -> Option<&SessionCredential> {
        match self {
            GuardOutcome::Valid(cred) => Some(cred),
            GuardOutcome::Redirected(_) => None,
        }
    }
}

/// Confirm the stored token with the backend, redirecting when it cannot be used.
pub async fn protect_route<B, N>(
    backend: &B,
    storage: &ClientStorage,
    navigator: &N,
    config: &ClientConfig,
) -> GuardOutcome
where
    B: Backend,
    N: Navigator + ?Sized,
{
    let Some(credential) = SessionCredential::load(storage.local.as_ref()) else {
        tracing::warn!("No stored token, redirecting to session timeout");
        navigator.replace(&config.routes.session_timeout);
        return GuardOutcome::Redirected(RedirectReason::MissingToken);
    };

    match backend.validate_token(&credential.token).await {
        Ok(validation) if validation.valid => GuardOutcome::Valid(credential),
        Ok(_) | Err(ClientError::InvalidSession | ClientError::Rejected { .. } | ClientError::Status(_)) => {
            tracing::warn!("Stored token rejected, clearing client state");
            storage.clear_all();
            navigator.replace(&config.routes.session_timeout);
            GuardOutcome::Redirected(RedirectReason::RejectedToken)
        }
        Err(e) => {
            tracing::error!("Token validation failed: {}", e);
            navigator.replace(&config.routes.authentication);
            GuardOutcome::Redirected(RedirectReason::Unreachable)
        }
    }
}

/// Run `page` only behind a valid session. Returns `None` after a redirect.
pub async fn guarded<B, N, F, Fut, T>(
    backend: &B,
    storage: &ClientStorage,
    navigator: &N,
    config: &ClientConfig,
    page: F,
) -> Option<T>
where
    B: Backend,
    N: Navigator + ?Sized,
    F: FnOnce(SessionCredential) -> Fut,
    Fut: Future<Output = T>,
{
    match protect_route(backend, storage, navigator, config).await {
        GuardOutcome::Valid(credential) => Some(page(credential).await),
        GuardOutcome::Redirected(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenValidation;
    use crate::navigation::RecordingNavigator;
    use crate::storage::{AUTH_TOKEN_KEY, THEME_KEY, USER_ID_KEY};
    use crate::testing::{FakeBackend, Reply};

    fn signed_in() -> ClientStorage {
        let storage = ClientStorage::in_memory();
        SessionCredential::store_login(storage.local.as_ref(), "tok", 5);
        storage.local.set(THEME_KEY, "dark");
        storage.session.set("home_current_page", "3");
        storage
    }

    #[tokio::test]
    async fn missing_token_redirects_without_calling_backend() {
        let backend = FakeBackend::new();
        let storage = ClientStorage::in_memory();
        let nav = RecordingNavigator::new();
        let config = ClientConfig::default();

        let loaded = guarded(&backend, &storage, &nav, &config, |_| async {
            backend.recommendations("tok", 1, 5, "sid").await
        })
        .await;

        assert!(loaded.is_none());
        assert_eq!(backend.call_count(), 0);
        assert_eq!(nav.visited(), vec!["/session-timeout".to_string()]);
    }

    #[tokio::test]
    async fn invalid_flag_clears_storage_and_redirects() {
        let backend = FakeBackend::new();
        backend.set_validation(Reply::Ok(TokenValidation {
            valid: false,
            user_id: None,
        }));
        let storage = signed_in();
        let nav = RecordingNavigator::new();

        let outcome = protect_route(&backend, &storage, &nav, &ClientConfig::default()).await;

        assert_eq!(outcome, GuardOutcome::Redirected(RedirectReason::RejectedToken));
        assert!(storage.local.get(AUTH_TOKEN_KEY).is_none());
        assert!(storage.local.get(THEME_KEY).is_none());
        assert!(storage.session.get("home_current_page").is_none());
        assert_eq!(nav.last().as_deref(), Some("/session-timeout"));
    }

    #[tokio::test]
    async fn unauthorized_status_clears_storage_and_redirects() {
        let backend = FakeBackend::new();
        backend.set_validation(Reply::Status(401));
        let storage = signed_in();
        let nav = RecordingNavigator::new();

        let outcome = protect_route(&backend, &storage, &nav, &ClientConfig::default()).await;

        assert_eq!(outcome, GuardOutcome::Redirected(RedirectReason::RejectedToken));
        assert!(storage.local.get(USER_ID_KEY).is_none());
        assert_eq!(nav.last().as_deref(), Some("/session-timeout"));
    }

    #[tokio::test]
    async fn unreachable_backend_goes_to_authentication_page() {
        let backend = FakeBackend::new();
        backend.set_validation(Reply::Unreachable);
        let storage = signed_in();
        let nav = RecordingNavigator::new();

        let outcome = protect_route(&backend, &storage, &nav, &ClientConfig::default()).await;

        assert_eq!(outcome, GuardOutcome::Redirected(RedirectReason::Unreachable));
        assert_eq!(nav.last().as_deref(), Some("/auth"));
        assert!(storage.local.get(AUTH_TOKEN_KEY).is_some());
    }

    #[tokio::test]
    async fn valid_token_lets_the_page_run() {
        let backend = FakeBackend::new();
        let storage = signed_in();
        let nav = RecordingNavigator::new();

        let user = guarded(&backend, &storage, &nav, &ClientConfig::default(), |cred| async move {
            cred.user_id
        })
        .await;

        assert_eq!(user, Some(Some("5".to_string())));
        assert!(nav.visited().is_empty());
        assert_eq!(backend.calls(), vec!["validate_token".to_string()]);
    }
}
