//! The canonical encryption key record.

use crate::error::{CryptoError, CryptoResult};
use crate::generator::hex_to_bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key size in bytes for the 256-bit algorithm.
pub const KEY_SIZE: usize = 32;

/// Cipher and mode a key is intended for.
///
/// Informational only: nothing in this crate encrypts with the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[default]
    #[serde(rename = "AES-256-GCM")]
    Aes256Gcm,
}

impl KeyAlgorithm {
    /// Returns the symbolic tag, e.g. `"AES-256-GCM"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Aes256Gcm => "AES-256-GCM",
        }
    }

    /// Key size the algorithm expects, in bytes.
    pub fn key_size(&self) -> usize {
        match self {
            KeyAlgorithm::Aes256Gcm => KEY_SIZE,
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symmetric key material plus its audit metadata.
///
/// The record is immutable after construction. `bytes` and `hex` always
/// encode the same value and both are zeroed when the record is dropped.
/// `Clone` produces an independent copy that is zeroed on its own drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: Vec<u8>,
    hex: String,
    #[zeroize(skip)]
    algorithm: KeyAlgorithm,
    #[zeroize(skip)]
    created_at: DateTime<Utc>,
    #[zeroize(skip)]
    is_default: bool,
}

impl EncryptionKey {
    /// Wraps caller-owned key material. The record takes ownership of the buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::with_origin(bytes, false)
    }

    /// Converts well-formed hex into a key record with `is_default = false`.
    pub fn from_hex(hex: &str) -> CryptoResult<Self> {
        let mut decoded = hex_to_bytes(hex)?;
        Ok(Self::from_bytes(std::mem::take(&mut *decoded)))
    }

    pub(crate) fn with_origin(bytes: Vec<u8>, is_default: bool) -> Self {
        let hex = hex::encode(&bytes);
        Self {
            bytes,
            hex,
            algorithm: KeyAlgorithm::default(),
            created_at: Utc::now(),
            is_default,
        }
    }

    /// Raw key material.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex of the key material. Do not log this in production.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True for keys from the deterministic development derivation.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the material as a fixed 256-bit array for the cipher.
    pub fn as_key_256(&self) -> CryptoResult<&[u8; KEY_SIZE]> {
        <&[u8; KEY_SIZE]>::try_from(self.bytes.as_slice()).map_err(|_| {
            CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: self.bytes.len(),
            }
        })
    }

    /// SHA-256 digest of the key material, hex encoded. Safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Checks the key against a previously recorded fingerprint.
    pub fn verify_fingerprint(&self, expected: &str) -> bool {
        self.fingerprint().eq_ignore_ascii_case(expected.trim())
    }

    /// First four hex characters and the total length, for diagnostics.
    pub fn redacted_hex(&self) -> String {
        let prefix = self.hex.get(..4).unwrap_or(&self.hex);
        format!("{prefix}…({} hex chars)", self.hex.len())
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &format_args!("[REDACTED, {} bytes]", self.bytes.len()))
            .field("algorithm", &self.algorithm)
            .field("created_at", &self.created_at)
            .field("is_default", &self.is_default)
            .finish()
    }
}
