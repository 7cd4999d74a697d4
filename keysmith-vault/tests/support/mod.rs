//! Shared helpers for key manager integration tests.
#![allow(dead_code)]

use keysmith_crypto::KeyGenerator;
use keysmith_vault::{KeyManager, KeyManagerConfig, MemoryKeyStore};
use rand::{TryCryptoRng, TryRngCore};
use std::io;

/// 64 hex chars sampled from a CSPRNG; validates strong with no warnings.
pub const STRONG_KEY: &str = "40ff6cfd6af52212eb2815a3dc91f09e9412047d300cd6406571acdae3961de8";

/// 40 hex chars (160 bits); valid with a length warning.
pub const SHORT_KEY: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("keysmith_vault=debug"))
        .with_test_writer()
        .try_init();
}

/// Random source that always fails, as on a host without a CSPRNG.
pub struct UnavailableRng;

impl TryRngCore for UnavailableRng {
    type Error = io::Error;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Err(io::Error::other("entropy pool offline"))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Err(io::Error::other("entropy pool offline"))
    }

    fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
        Err(io::Error::other("entropy pool offline"))
    }
}

impl TryCryptoRng for UnavailableRng {}

/// Manager whose CSPRNG is unavailable.
pub fn degraded_manager() -> KeyManager<MemoryKeyStore, UnavailableRng> {
    KeyManager::with_parts(
        KeyManagerConfig::default(),
        KeyGenerator::with_rng(UnavailableRng),
        MemoryKeyStore::new(),
    )
}
