//! Session cookie and signing key configuration.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the signed session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Add the `Secure` attribute to the cookie (HTTPS deployments).
    #[serde(default)]
    pub secure_cookie: bool,

    /// How long a session stays valid after login (e.g., "12h", "30m").
    #[serde(default = "default_lifetime")]
    pub lifetime: String,

    /// Environment variable containing the private signing key (hex-encoded).
    #[serde(default = "default_private_key_env")]
    pub private_key_env: Option<String>,

    /// Path to the private signing key file.
    #[serde(default)]
    pub private_key_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: false,
            lifetime: default_lifetime(),
            private_key_env: default_private_key_env(),
            private_key_file: None,
        }
    }
}

impl SessionConfig {
    /// Parsed session lifetime.
    pub fn lifetime(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.lifetime).map_err(|e| {
            ConfigError::Config(format!(
                "session.lifetime '{}' is not a duration: {}",
                self.lifetime, e
            ))
        })
    }

    /// Resolve the private key from environment or file.
    ///
    /// `Ok(None)` only when neither source is configured. A configured key
    /// file that cannot be read is an error.
    pub fn resolve_private_key(&self) -> Result<Option<String>, std::io::Error> {
        if let Some(env_var) = &self.private_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.trim().is_empty()
        {
            return Ok(Some(key.trim().to_string()));
        }

        if let Some(path) = &self.private_key_file {
            let key = std::fs::read_to_string(path).map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!("session.private_key_file {}: {}", path.display(), e),
                )
            })?;
            return Ok(Some(key.trim().to_string()));
        }

        Ok(None)
    }
}

fn default_cookie_name() -> String {
    "depor_session".to_string()
}

fn default_lifetime() -> String {
    "12h".to_string()
}

fn default_private_key_env() -> Option<String> {
    Some("DEPOR_SESSION_PRIVATE_KEY".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_private_key_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  abcdef  ").unwrap();

        let config = SessionConfig {
            private_key_env: None,
            private_key_file: Some(file.path().to_path_buf()),
            ..SessionConfig::default()
        };
        assert_eq!(config.resolve_private_key().unwrap(), Some("abcdef".to_string()));
    }

    #[test]
    fn test_missing_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            private_key_env: None,
            private_key_file: Some(dir.path().join("session.key")),
            ..SessionConfig::default()
        };
        let err = config.resolve_private_key().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("session.key"));
    }

    #[test]
    fn test_resolve_private_key_none() {
        let config = SessionConfig {
            private_key_env: None,
            private_key_file: None,
            ..SessionConfig::default()
        };
        assert_eq!(config.resolve_private_key().unwrap(), None);
    }
}
