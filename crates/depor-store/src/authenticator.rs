//! Credential check against the store.

use crate::error::StoreError;
use crate::models::AuthenticatedUser;
use crate::password::{hash_password, verify_password};
use crate::store::CredentialStore;
use std::sync::{Arc, OnceLock};

/// Verifies username/password pairs.
///
/// Unknown user, inactive user and wrong password all yield `Ok(None)`.
/// Only a store failure is an error.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, StoreError> {
        if username.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let Some(user) = self.store.find_user(username).await? else {
            // Same hashing cost as a real check.
            if let Some(dummy) = dummy_hash() {
                verify_password(password, dummy);
            }
            tracing::warn!(username, "login failed");
            return Ok(None);
        };

        if !user.is_active {
            tracing::warn!(username, user_id = user.id, "login failed: account inactive");
            return Ok(None);
        }

        if !verify_password(password, &user.password_hash) {
            tracing::warn!(username, user_id = user.id, "login failed");
            return Ok(None);
        }

        let roles = self.store.user_roles(user.id).await?;
        tracing::info!(username, user_id = user.id, roles = ?roles, "login succeeded");

        Ok(Some(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
            full_name: user.full_name,
            roles,
        }))
    }
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("depor-dummy-password").ok())
        .as_deref()
}
