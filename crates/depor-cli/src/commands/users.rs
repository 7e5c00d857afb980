//! User management commands.
//!
//! `depor users create` - Create a dashboard user with roles.
//! `depor users roles`  - List the role catalog.

use anyhow::Context;
use depor_core::{DeporConfig, Role, parse_role_list};
use depor_store::{CredentialStore, NewUser, SqliteCredentialStore, UserRecord, create_user};

/// Arguments for `depor users create`.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub roles: Option<String>,
}

/// Create a user in the configured store.
pub async fn create(config: &DeporConfig, args: CreateArgs) -> anyhow::Result<()> {
    let store = SqliteCredentialStore::open(&config.store).await?;
    store.seed_roles().await?;

    let record = create_in(&store, args).await?;
    let roles = store.user_roles(record.id).await?;
    let labels: Vec<&str> = roles.iter().map(Role::as_str).collect();

    if labels.is_empty() {
        println!("✔ Created user '{}' without roles", record.username);
    } else {
        println!(
            "✔ Created user '{}' with roles: {}",
            record.username,
            labels.join(", ")
        );
    }
    Ok(())
}

async fn create_in(store: &dyn CredentialStore, args: CreateArgs) -> anyhow::Result<UserRecord> {
    let roles = parse_role_list(args.roles.as_deref().unwrap_or_default())
        .with_context(|| format!("valid roles: {}", catalog_labels().join(", ")))?;

    let new_user = NewUser::new(args.username, args.password)
        .with_full_name(args.full_name)
        .with_email(args.email)
        .with_roles(roles);

    Ok(create_user(store, new_user).await?)
}

/// Print the role catalog.
pub async fn roles(config: &DeporConfig) -> anyhow::Result<()> {
    let store = SqliteCredentialStore::open(&config.store).await;
    let labels = match &store {
        Ok(store) => role_labels(store).await,
        Err(e) => {
            tracing::warn!(error = %e, "credential store unavailable; listing built-in roles");
            catalog_labels()
        }
    };

    for label in labels {
        let description = label
            .parse::<Role>()
            .map(|r| r.description())
            .unwrap_or_default();
        println!("{:<12} {}", label, description);
    }
    Ok(())
}

/// Store catalog, or the built-in catalog when the store cannot be read.
async fn role_labels(store: &dyn CredentialStore) -> Vec<String> {
    match store.list_roles().await {
        Ok(labels) if !labels.is_empty() => labels,
        Ok(_) => catalog_labels(),
        Err(e) => {
            tracing::warn!(error = %e, "role list unavailable; listing built-in roles");
            catalog_labels()
        }
    }
}

fn catalog_labels() -> Vec<String> {
    Role::ALL.iter().map(|r| r.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depor_store::StoreError;

    fn args(username: &str, roles: Option<&str>) -> CreateArgs {
        CreateArgs {
            username: username.to_string(),
            password: "secreto".to_string(),
            full_name: Some("Laura Gómez".to_string()),
            roles: roles.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_with_roles() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        store.seed_roles().await.unwrap();

        let record = create_in(&store, args("laura", Some("medico, nutricion")))
            .await
            .unwrap();
        assert_eq!(record.full_name.as_deref(), Some("Laura Gómez"));

        let roles = store.user_roles(record.id).await.unwrap();
        assert!(roles.contains(&Role::Medico));
        assert!(roles.contains(&Role::Nutricion));
        assert_eq!(roles.len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_role() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let err = create_in(&store, args("laura", Some("medico,entrenador")))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("entrenador"));
        assert!(store.find_user("laura").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        create_in(&store, args("laura", None)).await.unwrap();

        let err = create_in(&store, args("laura", Some("admin")))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_role_labels_from_store() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        assert_eq!(role_labels(&store).await, catalog_labels());

        store.seed_roles().await.unwrap();
        let mut labels = role_labels(&store).await;
        labels.sort();
        let mut expected = catalog_labels();
        expected.sort();
        assert_eq!(labels, expected);
    }
}
