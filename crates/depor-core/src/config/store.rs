//! Credential store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the user/role tables live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite file. Parent directories are created on startup.
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: PathBuf,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sqlite_path: default_sqlite_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("data/depor-auth.sqlite")
}

fn default_max_connections() -> u32 {
    5
}
