//! Key material layer for Keysmith.
//!
//! Provides the primitives the key lifecycle is built from:
//! - Secure 256-bit key generation from the OS CSPRNG, with an explicit
//!   degraded result when no CSPRNG is available
//! - Deterministic development keys for reproducible non-production setups
//! - Strength validation of externally supplied hex keys (length bands,
//!   Shannon entropy, weak-pattern detection)
//!
//! # Key records
//!
//! [`EncryptionKey`] owns its material and zeroes it on drop. Its `Debug`
//! output is redacted; log [`EncryptionKey::fingerprint`] or
//! [`EncryptionKey::redacted_hex`] instead of the hex itself.
//!
//! This crate does not encrypt anything. The key bytes are handed to an
//! AES-256-GCM implementation elsewhere.

pub mod entropy;
mod error;
pub mod generator;
mod key;
pub mod patterns;
mod policy;
pub mod validator;

pub use error::{CryptoError, CryptoResult};
pub use generator::{DEFAULT_DEVELOPMENT_SEED, GeneratedKey, KeyGenerator, hex_to_bytes};
pub use key::{EncryptionKey, KEY_SIZE, KeyAlgorithm};
pub use patterns::PatternKind;
pub use policy::ValidationPolicy;
pub use validator::{
    KeyStrength, KeyValidationResult, KeyValidator, ValidationError, ValidationWarning,
    validate_hex_key,
};
