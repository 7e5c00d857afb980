//! SQLite-backed credential store.

use crate::error::StoreError;
use crate::models::{NewUser, UserRecord};
use crate::store::CredentialStore;
use async_trait::async_trait;
use chrono::Utc;
use depor_core::{Role, RoleSet, StoreConfig};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Credential store over the `dash_users` / `dash_roles` / `dash_user_roles`
/// tables.
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open (creating if needed) the configured database file and migrate it.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        ensure_parent_dir(&config.sqlite_path)?;

        let options = SqliteConnectOptions::from_str(&sqlite_url(&config.sqlite_path))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::debug!(path = %config.sqlite_path.display(), "credential store ready");
        Ok(store)
    }

    /// A private in-memory database, migrated and empty.
    ///
    /// Uses a single connection that is never recycled, since every SQLite
    /// in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Flip the `is_active` flag of an account.
    pub async fn set_active(&self, username: &str, active: bool) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE dash_users SET is_active = ? WHERE username = ?")
            .bind(active)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash, full_name, email, is_active, created_at \
             FROM dash_users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_roles(&self, user_id: i64) -> Result<RoleSet, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT r.name FROM dash_user_roles ur \
             JOIN dash_roles r ON r.id = ur.role_id \
             WHERE ur.user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut roles = RoleSet::new();
        for (name,) in rows {
            match name.parse::<Role>() {
                Ok(role) => {
                    roles.insert(role);
                }
                Err(_) => {
                    tracing::warn!(user_id, role = %name, "ignoring role outside the catalog");
                }
            }
        }
        Ok(roles)
    }

    async fn insert_user(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM dash_users WHERE username = ?")
            .bind(&user.username)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(StoreError::AlreadyExists {
                username: user.username.clone(),
            });
        }

        let created_at = Utc::now();
        let inserted = sqlx::query(
            "INSERT INTO dash_users (username, password_hash, full_name, email, is_active, created_at) \
             VALUES (?, ?, ?, ?, 1, ?)",
        )
        .bind(&user.username)
        .bind(password_hash)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::AlreadyExists {
                username: user.username.clone(),
            },
            other => StoreError::from(other),
        })?;
        let user_id = inserted.last_insert_rowid();

        for role in &user.roles {
            sqlx::query("INSERT INTO dash_roles (name, description) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
                .bind(role.as_str())
                .bind(role.description())
                .execute(&mut *tx)
                .await?;
            sqlx::query(
                "INSERT OR IGNORE INTO dash_user_roles (user_id, role_id) \
                 SELECT ?, id FROM dash_roles WHERE name = ?",
            )
            .bind(user_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(UserRecord {
            id: user_id,
            username: user.username.clone(),
            password_hash: password_hash.to_string(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            is_active: true,
            created_at,
        })
    }

    async fn seed_roles(&self) -> Result<(), StoreError> {
        for role in Role::ALL {
            sqlx::query("INSERT INTO dash_roles (name, description) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
                .bind(role.as_str())
                .bind(role.description())
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM dash_roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

fn sqlite_url(path: &Path) -> String {
    // sqlite://relative/path.db or sqlite:/abs/path.db
    if path.is_absolute() {
        format!("sqlite:{}", path.display())
    } else {
        format!("sqlite://{}", path.display())
    }
}

fn ensure_parent_dir(file_path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::hash_password;

    fn medico(username: &str) -> NewUser {
        NewUser::new(username, "pw")
            .with_full_name(Some("Laura Pérez".to_string()))
            .with_roles([Role::Medico].into_iter().collect())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let hash = hash_password("pw").unwrap();

        let created = store.insert_user(&medico("laura"), &hash).await.unwrap();
        let found = store.find_user("laura").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, hash);
        assert_eq!(found.full_name.as_deref(), Some("Laura Pérez"));
        assert!(found.is_active);
        assert_eq!(
            store.user_roles(found.id).await.unwrap(),
            [Role::Medico].into_iter().collect::<RoleSet>()
        );
    }

    #[tokio::test]
    async fn test_find_unknown_user() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        assert!(store.find_user("nadie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_leaves_existing_untouched() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let first = store.insert_user(&medico("laura"), "hash-1").await.unwrap();

        let dup = NewUser::new("laura", "other").with_roles([Role::Admin].into_iter().collect());
        let err = store.insert_user(&dup, "hash-2").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { ref username } if username == "laura"));

        let found = store.find_user("laura").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash-1");
        assert_eq!(
            store.user_roles(first.id).await.unwrap(),
            [Role::Medico].into_iter().collect::<RoleSet>()
        );
    }

    #[tokio::test]
    async fn test_roleless_user() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let created = store.insert_user(&NewUser::new("sinrol", "pw"), "h").await.unwrap();
        assert!(store.user_roles(created.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_roles_idempotent() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        store.seed_roles().await.unwrap();
        store.seed_roles().await.unwrap();

        let roles = store.list_roles().await.unwrap();
        assert_eq!(
            roles,
            vec!["admin", "analista", "direccion", "medico", "nutricion", "preparador", "psicologo"]
        );
    }

    #[tokio::test]
    async fn test_unknown_role_rows_are_skipped() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let created = store.insert_user(&medico("laura"), "h").await.unwrap();

        sqlx::query("INSERT INTO dash_roles (name, description) VALUES ('utillero', 'Rol utillero')")
            .execute(store.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO dash_user_roles (user_id, role_id) SELECT ?, id FROM dash_roles WHERE name = 'utillero'",
        )
        .bind(created.id)
        .execute(store.pool())
        .await
        .unwrap();

        assert_eq!(
            store.user_roles(created.id).await.unwrap(),
            [Role::Medico].into_iter().collect::<RoleSet>()
        );
    }

    #[tokio::test]
    async fn test_set_active() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        store.insert_user(&medico("laura"), "h").await.unwrap();

        assert!(store.set_active("laura", false).await.unwrap());
        assert!(!store.find_user("laura").await.unwrap().unwrap().is_active);
        assert!(!store.set_active("nadie", false).await.unwrap());
    }

    #[tokio::test]
    async fn test_open_creates_file_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            sqlite_path: dir.path().join("nested").join("auth.sqlite"),
            max_connections: 2,
        };

        let store = SqliteCredentialStore::open(&config).await.unwrap();
        store.insert_user(&medico("laura"), "h").await.unwrap();
        drop(store);

        assert!(config.sqlite_path.exists());
        let reopened = SqliteCredentialStore::open(&config).await.unwrap();
        assert!(reopened.find_user("laura").await.unwrap().is_some());
    }

    #[test]
    fn test_sqlite_url() {
        assert_eq!(sqlite_url(Path::new("data/a.sqlite")), "sqlite://data/a.sqlite");
        assert_eq!(sqlite_url(Path::new("/var/a.sqlite")), "sqlite:/var/a.sqlite");
    }
}
