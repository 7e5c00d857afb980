//! Error types for session tokens.

use thiserror::Error;

/// Errors that can occur while minting or verifying session tokens.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to generate keypair.
    #[error("failed to generate keypair: {0}")]
    KeyGenerationFailed(String),

    /// Failed to parse private key.
    #[error("failed to parse private key: {0}")]
    InvalidPrivateKey(String),


    /// Session lifetime outside the range a token can carry.
    #[error("invalid session lifetime: {0}")]
    InvalidLifetime(String),

    /// Failed to create token.
    #[error("failed to create session token: {0}")]
    TokenCreationFailed(String),

    /// Failed to parse token (bad encoding or bad signature).
    #[error("failed to parse session token: {0}")]
    TokenParseFailed(String),

    /// Token checks failed (e.g. past its expiry).
    #[error("session token rejected: {0}")]
    Rejected(String),

    /// Token is missing a required claim.
    #[error("session token missing required claim: {claim}")]
    MissingClaim { claim: String },

    /// Token carries a role label outside the catalog.
    #[error("session token has unknown role: {0}")]
    UnknownRole(String),

    /// IO error (reading/writing keys).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
