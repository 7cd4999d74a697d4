//! Key custody and provisioning for Keysmith.
//!
//! Sits on top of `keysmith-crypto` and answers one question at startup:
//! which key does this process use? The host supplies an optional hex key
//! (usually from `KEYSMITH_MASTER_KEY`) and a development flag; the
//! [`KeyManager`] validates and adopts the supplied key, derives the
//! development key, or generates a fresh one.
//!
//! Keys that several subsystems share are registered in a [`KeyStore`]
//! under caller-chosen ids. Listings expose [`KeyMetadata`] only.
//!
//! Nothing here is async or locks internally. Wrap the manager in a
//! `Mutex` when it is shared across threads.

mod config;
mod error;
pub mod manager;
pub mod store;

pub use config::{DEFAULT_KEY_ENV_VAR, KeyManagerConfig};
pub use error::{VaultError, VaultResult};
pub use manager::{KeyManager, KeyOrigin, ProvisionedKey};
pub use store::{KeyMetadata, KeyStore, MemoryKeyStore};
