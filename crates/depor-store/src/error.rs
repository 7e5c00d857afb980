//! Error types for the credential store.

use thiserror::Error;

/// Errors raised by the credential store and the authenticator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database cannot be reached.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// The database answered with an error.
    #[error("database error: {0}")]
    Database(String),

    /// Username is already taken.
    #[error("El usuario '{username}' ya existe.")]
    AlreadyExists { username: String },

    /// A required field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// IO error (creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the store itself is down, as opposed to a request problem.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable(_)
                | StoreError::Database(_)
                | StoreError::Migration(_)
                | StoreError::Io(_)
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_message() {
        let err = StoreError::AlreadyExists {
            username: "laura".to_string(),
        };
        assert_eq!(err.to_string(), "El usuario 'laura' ya existe.");
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(StoreError::from(sqlx::Error::RowNotFound).is_unavailable());
    }
}
