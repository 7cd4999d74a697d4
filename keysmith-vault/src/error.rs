//! Key custody error types.

use keysmith_crypto::ValidationError;
use thiserror::Error;

/// Result type for custody and provisioning operations.
pub type VaultResult<T> = Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    /// A supplied key failed validation. Fatal at startup.
    #[error("supplied key rejected: {}", join_errors(.errors))]
    InvalidKey { errors: Vec<ValidationError> },

    #[error("development key {fingerprint} is not allowed outside development mode")]
    DevelopmentKeyRejected { fingerprint: String },

    #[error("crypto error: {0}")]
    Crypto(#[from] keysmith_crypto::CryptoError),

    #[error("key store error: {0}")]
    Storage(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
