//! Error types for key material handling.

use thiserror::Error;

/// Result type for key material operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors raised while converting or generating key material.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Input was handed to a conversion without being well-formed hex.
    #[error("malformed hex key material: {0}")]
    InvalidHex(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("random source failure: {0}")]
    RandomSource(String),
}
