//! Credential records.

use chrono::{DateTime, Utc};
use depor_core::RoleSet;
use sqlx::FromRow;

/// A row of `dash_users`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account. The password is plaintext here and is
/// hashed before it reaches the store.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub roles: RoleSet,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_full_name(mut self, full_name: Option<String>) -> Self {
        self.full_name = full_name.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Outcome of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub roles: RoleSet,
}
