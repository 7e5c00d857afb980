//! The credential store seam.

use crate::error::StoreError;
use crate::models::{NewUser, UserRecord};
use async_trait::async_trait;
use depor_core::RoleSet;

/// Persistent user and role records.
///
/// Implementations must keep usernames unique and must never hold
/// plaintext passwords. [`NewUser`] carries the plaintext only until
/// [`crate::users::create_user`] replaces it with a hash.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by exact username.
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Roles granted to an account. Labels outside the catalog are skipped.
    async fn user_roles(&self, user_id: i64) -> Result<RoleSet, StoreError>;

    /// Insert an account and its role links atomically.
    ///
    /// Returns [`StoreError::AlreadyExists`] when the username is taken; the
    /// existing record is left untouched.
    async fn insert_user(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError>;

    /// Ensure every catalog role has a row. Idempotent.
    async fn seed_roles(&self) -> Result<(), StoreError>;

    /// Role labels known to the store, sorted by name.
    async fn list_roles(&self) -> Result<Vec<String>, StoreError>;
}
