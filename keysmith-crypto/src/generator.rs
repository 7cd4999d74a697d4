//! Key material generation.
//!
//! Two paths:
//!
//! - **Secure**: 32 bytes from the platform CSPRNG. If the CSPRNG fails the
//!   generator falls back to a clock-seeded [`SmallRng`] and says so through
//!   [`GeneratedKey::Degraded`]; the fallback is never silent.
//! - **Development**: 32 bytes derived deterministically from a textual seed,
//!   flagged `is_default` so production callers can refuse them.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{EncryptionKey, KEY_SIZE};
use crate::validator::well_formedness_errors;
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng, TryCryptoRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;
use zeroize::Zeroizing;

/// Seed for [`KeyGenerator::create_development_key`] unless overridden.
pub const DEFAULT_DEVELOPMENT_SEED: &str = "keysmith-development-seed-v1";

/// Outcome of secure generation. The degraded variant must be handled.
#[must_use = "a degraded key must be acknowledged before use"]
#[derive(Debug)]
pub enum GeneratedKey {
    /// Material came from the CSPRNG.
    Secure(EncryptionKey),
    /// The CSPRNG was unavailable; material came from a non-cryptographic PRNG.
    Degraded { key: EncryptionKey, reason: String },
}

impl GeneratedKey {
    pub fn is_degraded(&self) -> bool {
        matches!(self, GeneratedKey::Degraded { .. })
    }

    pub fn key(&self) -> &EncryptionKey {
        match self {
            GeneratedKey::Secure(key) | GeneratedKey::Degraded { key, .. } => key,
        }
    }

    /// Why the key is degraded, if it is.
    pub fn degradation(&self) -> Option<&str> {
        match self {
            GeneratedKey::Secure(_) => None,
            GeneratedKey::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn into_key(self) -> EncryptionKey {
        match self {
            GeneratedKey::Secure(key) | GeneratedKey::Degraded { key, .. } => key,
        }
    }
}

/// Produces fresh or development key material.
#[derive(Debug)]
pub struct KeyGenerator<R = OsRng> {
    rng: R,
    development_seed: String,
}

impl KeyGenerator {
    /// Generator backed by the operating system CSPRNG.
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TryCryptoRng> KeyGenerator<R> {
    /// Generator backed by a caller-supplied cryptographic source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            development_seed: DEFAULT_DEVELOPMENT_SEED.to_string(),
        }
    }

    /// Replaces the seed used for development keys.
    pub fn with_development_seed(mut self, seed: impl Into<String>) -> Self {
        self.development_seed = seed.into();
        self
    }

    pub fn development_seed(&self) -> &str {
        &self.development_seed
    }

    /// Fills a 256-bit key from the CSPRNG, degrading to a PRNG on failure.
    pub fn generate_secure_key(&mut self) -> GeneratedKey {
        let mut bytes = vec![0u8; KEY_SIZE];
        match self.rng.try_fill_bytes(&mut bytes) {
            Ok(()) => GeneratedKey::Secure(EncryptionKey::with_origin(bytes, false)),
            Err(e) => {
                let reason = format!("secure random source unavailable: {e}");
                warn!("{reason}; falling back to a non-cryptographic PRNG");
                fallback_rng().fill_bytes(&mut bytes);
                GeneratedKey::Degraded {
                    key: EncryptionKey::with_origin(bytes, false),
                    reason,
                }
            }
        }
    }

    /// Derives the deterministic development key from the configured seed.
    pub fn create_development_key(&self) -> EncryptionKey {
        EncryptionKey::with_origin(derive_development_bytes(&self.development_seed), true)
    }
}

/// Clock-seeded PRNG for the degraded path. Not suitable for production keys.
fn fallback_rng() -> SmallRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    SmallRng::seed_from_u64(nanos ^ u64::from(std::process::id()).rotate_left(32))
}

/// Per-byte rolling hash of `seed + index`, reduced modulo 256.
///
/// The hash walks the UTF-16 code units with `h = h * 31 + unit` in wrapping
/// 32-bit signed arithmetic; the byte is `|h| mod 256`.
fn derive_development_bytes(seed: &str) -> Vec<u8> {
    (0..KEY_SIZE)
        .map(|index| {
            let input = format!("{seed}{index}");
            let hash = input.encode_utf16().fold(0i32, |h, unit| {
                (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit))
            });
            (hash.unsigned_abs() % 256) as u8
        })
        .collect()
}

/// Decodes well-formed hex into key bytes.
///
/// Input is checked against the validator's alphabet and parity rules first;
/// passing unvalidated material here is a programming error.
pub fn hex_to_bytes(hex: &str) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let errors = well_formedness_errors(hex);
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CryptoError::InvalidHex(details));
    }

    hex::decode(hex)
        .map(Zeroizing::new)
        .map_err(|e| CryptoError::InvalidHex(e.to_string()))
}
