//! Default administrator account.

use serde::{Deserialize, Serialize};

/// Account created by `depor init` / `depor serve` when it does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Default admin password. Prefer setting the env var named by
    /// `admin_password_env`.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    #[serde(default = "default_admin_password_env")]
    pub admin_password_env: Option<String>,

    #[serde(default = "default_admin_full_name")]
    pub admin_full_name: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_password_env: default_admin_password_env(),
            admin_full_name: default_admin_full_name(),
        }
    }
}

impl BootstrapConfig {
    /// Password source, highest precedence first: env var, then config value.
    pub fn resolve_admin_password(&self) -> String {
        if let Some(env_var) = &self.admin_password_env
            && let Ok(password) = std::env::var(env_var)
            && !password.is_empty()
        {
            return password;
        }
        self.admin_password.clone()
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_admin_password_env() -> Option<String> {
    Some("DEPOR_ADMIN_PASSWORD".to_string())
}

fn default_admin_full_name() -> Option<String> {
    Some("Administrador".to_string())
}
