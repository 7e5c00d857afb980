//! Account creation shared by the admin page, the CLI and the bootstrap.

use crate::error::StoreError;
use crate::models::{NewUser, UserRecord};
use crate::password::hash_password;
use crate::store::CredentialStore;

/// Validate, hash and persist a new account.
///
/// Username and password are required. The username is trimmed; the
/// password is taken as typed.
pub async fn create_user(
    store: &dyn CredentialStore,
    user: NewUser,
) -> Result<UserRecord, StoreError> {
    let user = NewUser {
        username: user.username.trim().to_string(),
        ..user
    };

    if user.username.is_empty() || user.password.is_empty() {
        return Err(StoreError::InvalidInput(
            "Usuario y contraseña son obligatorios.".to_string(),
        ));
    }

    let hash = hash_password(&user.password)?;
    let record = store.insert_user(&user, &hash).await?;

    tracing::info!(
        user_id = record.id,
        username = %record.username,
        roles = ?user.roles,
        "user created"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::verify_password;
    use crate::sqlite::SqliteCredentialStore;
    use depor_core::Role;

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let record = create_user(
            &store,
            NewUser::new("  pablo ", "s3cret").with_roles([Role::Analista].into_iter().collect()),
        )
        .await
        .unwrap();

        assert_eq!(record.username, "pablo");
        assert_ne!(record.password_hash, "s3cret");
        assert!(verify_password("s3cret", &record.password_hash));
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        assert!(matches!(
            create_user(&store, NewUser::new("", "pw")).await,
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            create_user(&store, NewUser::new("pablo", "")).await,
            Err(StoreError::InvalidInput(_))
        ));
        assert!(store.find_user("pablo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_is_distinct_outcome() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        create_user(&store, NewUser::new("pablo", "a")).await.unwrap();
        let err = create_user(&store, NewUser::new("pablo", "b")).await.unwrap_err();
        assert_eq!(err.to_string(), "El usuario 'pablo' ya existe.");
    }
}
