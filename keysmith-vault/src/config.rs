//! Key manager configuration.

use keysmith_crypto::{DEFAULT_DEVELOPMENT_SEED, ValidationPolicy};
use serde::{Deserialize, Serialize};

/// Environment variable holding the master key unless overridden.
pub const DEFAULT_KEY_ENV_VAR: &str = "KEYSMITH_MASTER_KEY";

/// Configuration for a [`KeyManager`](crate::KeyManager).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyManagerConfig {
    /// Environment variable read by `create_from_env`.
    pub key_env_var: String,

    /// Development mode: derive the deterministic key when none is supplied.
    pub development: bool,

    /// Seed for the development key derivation.
    pub development_seed: String,

    /// Thresholds applied to supplied keys.
    pub policy: ValidationPolicy,
}

impl Default for KeyManagerConfig {
    fn default() -> Self {
        Self {
            key_env_var: DEFAULT_KEY_ENV_VAR.to_string(),
            development: false,
            development_seed: DEFAULT_DEVELOPMENT_SEED.to_string(),
            policy: ValidationPolicy::default(),
        }
    }
}

impl KeyManagerConfig {
    /// Development-mode config with default thresholds.
    pub fn development() -> Self {
        Self {
            development: true,
            ..Self::default()
        }
    }
}
