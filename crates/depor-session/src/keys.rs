//! Ed25519 keypair used to sign session tokens.

use crate::error::SessionError;
use biscuit_auth::{Algorithm, KeyPair as BiscuitKeyPair, PrivateKey, PublicKey};
use depor_core::SessionConfig;
use rand::RngCore;
use std::path::Path;

/// An Ed25519 keypair for signing and verifying session tokens.
pub struct KeyPair {
    inner: BiscuitKeyPair,
}

impl KeyPair {
    /// Generate a new random keypair.
    pub fn generate() -> Result<Self, SessionError> {
        let mut rng = rand::rng();
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        let private_key = PrivateKey::from_bytes(&bytes, Algorithm::Ed25519)
            .map_err(|e| SessionError::KeyGenerationFailed(e.to_string()))?;
        Ok(Self::from_private_key(private_key))
    }

    /// Create a keypair from an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        Self {
            inner: BiscuitKeyPair::from(&private_key),
        }
    }

    /// Load a keypair from a hex-encoded private key string.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, SessionError> {
        let private_key = PrivateKey::from_bytes_hex(hex.trim(), Algorithm::Ed25519)
            .map_err(|e| SessionError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_private_key(private_key))
    }

    /// Use the configured key, or generate an ephemeral one when no key
    /// source is configured at all.
    ///
    /// Sessions signed with an ephemeral key do not survive a restart. A
    /// configured key file that is missing fails instead.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        match config.resolve_private_key()? {
            Some(hex) => Self::from_private_key_hex(&hex),
            None => {
                tracing::warn!(
                    "no session signing key configured; generated an ephemeral key (sessions end on restart)"
                );
                Self::generate()
            }
        }
    }

    /// Load a keypair from a private key file.
    pub fn load_from_file(private_key_path: &Path) -> Result<Self, SessionError> {
        let hex = std::fs::read_to_string(private_key_path)?;
        Self::from_private_key_hex(&hex)
    }

    /// Get the inner biscuit keypair.
    pub fn inner(&self) -> &BiscuitKeyPair {
        &self.inner
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        self.inner.public()
    }

    /// Get the private key as hex string.
    pub fn private_key_hex(&self) -> String {
        self.inner.private().to_bytes_hex()
    }

    /// Get the public key as hex string.
    pub fn public_key_hex(&self) -> String {
        self.inner.public().to_bytes_hex()
    }

    /// Save the keypair to files.
    pub fn save_to_files(
        &self,
        private_key_path: &Path,
        public_key_path: &Path,
    ) -> Result<(), SessionError> {
        std::fs::write(private_key_path, self.private_key_hex())?;
        std::fs::write(public_key_path, self.public_key_hex())?;
        Ok(())
    }
}
