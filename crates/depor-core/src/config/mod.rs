//! Configuration types for the Depor dashboard.
//!
//! Everything is loaded from a single YAML file (`depor.yaml` by default).
//! Every section has defaults, so an absent file yields a runnable local setup.

pub mod bootstrap;
pub mod dashboard;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use bootstrap::BootstrapConfig;
pub use dashboard::DashboardConfig;
pub use session::SessionConfig;
pub use store::StoreConfig;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "DEPOR_CONFIG";

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "depor.yaml";

/// Complete Depor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeporConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Session cookie and signing key settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Credential store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Default account created on first start.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeporConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, `$DEPOR_CONFIG`, or `./depor.yaml`.
    ///
    /// An explicit path must exist. The implicit locations fall back to
    /// defaults when the file is missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.lifetime()? < std::time::Duration::from_secs(1) {
            return Err(ConfigError::Config(format!(
                "session.lifetime '{}' must be at least 1s",
                self.session.lifetime
            )));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::Config(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        if self.store.max_connections == 0 {
            return Err(ConfigError::Config(
                "store.max_connections must be at least 1".to_string(),
            ));
        }
        if self.bootstrap.admin_username.trim().is_empty() {
            return Err(ConfigError::Config(
                "bootstrap.admin_username must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
