//! Bearer-token access control.
//!
//! Tokens are opaque values handed out by `POST /token` after a plaintext
//! lookup against the seeded user list. There is no expiry and no signing:
//! the store is an in-process map from token to identity. Capability is
//! checked once at the HTTP boundary by the extractors in [`extract`]; the
//! query and aggregation services never re-derive it.

mod extract;

pub use extract::{AdminUser, AuthenticatedUser};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Any role string other than "admin" is an ordinary user.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// Resolved caller identity attached to a bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// In-process map of issued tokens. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<HashMap<String, Identity>>>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh opaque token for `identity` and remember it.
    pub fn issue(&self, identity: Identity) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.inner
            .write()
            .expect("token store lock poisoned")
            .insert(token.clone(), identity);
        token
    }

    /// Look up the identity behind a token, if any.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Identity> {
        self.inner
            .read()
            .expect("token store lock poisoned")
            .get(token)
            .cloned()
    }
}

/// Plaintext credential check against the seeded user list.
#[must_use]
pub fn verify_credentials(users: &[UserRecord], username: &str, password: &str) -> Option<Identity> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .map(|u| Identity {
            username: u.username.clone(),
            role: Role::from_str(&u.role),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord {
                username: "alvin_admin".to_string(),
                password: "password123".to_string(),
                role: "admin".to_string(),
            },
            UserRecord {
                username: "dana".to_string(),
                password: "plainpass".to_string(),
                role: "user".to_string(),
            },
        ]
    }

    #[test]
    fn issues_and_resolves_tokens() {
        let store = TokenStore::new();
        let token = store.issue(Identity {
            username: "dana".to_string(),
            role: Role::User,
        });

        let identity = store.resolve(&token).unwrap();
        assert_eq!(identity.username, "dana");
        assert_eq!(identity.role, Role::User);
        assert!(store.resolve("not-a-token").is_none());
    }

    #[test]
    fn verifies_credentials_exactly() {
        let users = users();
        let admin = verify_credentials(&users, "alvin_admin", "password123").unwrap();
        assert_eq!(admin.role, Role::Admin);

        assert!(verify_credentials(&users, "alvin_admin", "wrong").is_none());
        assert!(verify_credentials(&users, "nobody", "password123").is_none());
    }

    #[test]
    fn non_admin_role_strings_map_to_user() {
        assert_eq!(Role::from_str("admin"), Role::Admin);
        assert_eq!(Role::from_str("ADMIN"), Role::Admin);
        assert_eq!(Role::from_str("user"), Role::User);
        assert_eq!(Role::from_str("viewer"), Role::User);
    }
}
