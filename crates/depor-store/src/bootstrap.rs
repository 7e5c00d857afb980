//! First-run setup: role catalog and default administrator.

use crate::error::StoreError;
use crate::models::NewUser;
use crate::store::CredentialStore;
use crate::users::create_user;
use depor_core::{BootstrapConfig, Role};

/// What [`bootstrap`] changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// `Some(username)` when the administrator account was created.
    pub admin_created: Option<String>,
}

/// Seed the role catalog and create the administrator if it does not exist.
///
/// Safe to run on every start. An existing administrator account is never
/// modified.
pub async fn bootstrap(
    store: &dyn CredentialStore,
    config: &BootstrapConfig,
) -> Result<BootstrapReport, StoreError> {
    store.seed_roles().await?;

    if store.find_user(&config.admin_username).await?.is_some() {
        return Ok(BootstrapReport {
            admin_created: None,
        });
    }

    let password = config.resolve_admin_password();
    if password.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!(
            "admin password is empty (set {} or bootstrap.admin_password)",
            config
                .admin_password_env
                .as_deref()
                .unwrap_or("bootstrap.admin_password_env")
        )));
    }

    let admin = NewUser::new(config.admin_username.clone(), password)
        .with_full_name(config.admin_full_name.clone())
        .with_roles([Role::Admin].into_iter().collect());
    create_user(store, admin).await?;

    tracing::warn!(
        username = %config.admin_username,
        "bootstrapped admin user (password taken from env/config)"
    );

    Ok(BootstrapReport {
        admin_created: Some(config.admin_username.clone()),
    })
}
