//! The signed-in user's credential as kept in persistent storage.

use crate::storage::{KeyValueStore, AUTH_TOKEN_KEY, USER_ID_KEY, USER_ROLE_KEY};

/// Opaque bearer token plus the identity the backend issued it for.
///
/// The token's structure is never inspected; only the backend decides
/// whether it is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCredential {
    pub token: String,
    pub user_id: Option<String>,
    pub role: Option<String>,
}

impl SessionCredential {
    /// Read the stored credential. `None` when no token is stored.
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let token = store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(Self {
            token,
            user_id: store.get(USER_ID_KEY),
            role: store.get(USER_ROLE_KEY),
        })
    }

    /// Persist the token and user id returned by login.
    pub fn store_login(store: &dyn KeyValueStore, token: &str, user_id: i64) {
        store.set(AUTH_TOKEN_KEY, token);
        store.set(USER_ID_KEY, &user_id.to_string());
    }

    pub fn store_role(store: &dyn KeyValueStore, role: &str) {
        store.set(USER_ROLE_KEY, role);
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn missing_or_empty_token_is_no_session() {
        let store = MemoryStorage::new();
        assert!(SessionCredential::load(&store).is_none());
        store.set(AUTH_TOKEN_KEY, "");
        assert!(SessionCredential::load(&store).is_none());
    }

    #[test]
    fn login_then_role() {
        let store = MemoryStorage::new();
        SessionCredential::store_login(&store, "abc.def", 42);
        let cred = SessionCredential::load(&store).unwrap();
        assert_eq!(cred.token, "abc.def");
        assert_eq!(cred.user_id.as_deref(), Some("42"));
        assert!(!cred.is_admin());

        SessionCredential::store_role(&store, "admin");
        assert!(SessionCredential::load(&store).unwrap().is_admin());
    }
}
