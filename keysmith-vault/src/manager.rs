//! Key provisioning façade.
//!
//! [`KeyManager`] decides where a process's key comes from:
//!
//! | supplied hex | development | outcome                                   |
//! |--------------|-------------|-------------------------------------------|
//! | yes          | any         | validate, then adopt or fail              |
//! | no           | yes         | deterministic development key             |
//! | no           | no          | fresh key from the CSPRNG                 |
//!
//! An invalid supplied key is a configuration error and is never replaced
//! by a generated one. Managers are ordinary values: construct one per
//! process (or per test) and pass it where it is needed.

use crate::config::KeyManagerConfig;
use crate::error::{VaultError, VaultResult};
use crate::store::{KeyMetadata, KeyStore, MemoryKeyStore};
use keysmith_crypto::{
    EncryptionKey, GeneratedKey, KeyGenerator, KeyValidationResult, KeyValidator,
};
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

const DEVELOPMENT_KEY_NOTICE: &str = "deterministic development key; not for production use";

/// Where a provisioned key came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Supplied by the host and validated.
    Supplied,
    /// Derived from the development seed.
    Development,
    /// Generated from the CSPRNG.
    SecureRandom,
    /// Generated from the fallback PRNG because the CSPRNG failed.
    DegradedRandom,
}

/// A key plus the non-fatal findings gathered while producing it.
#[must_use]
#[derive(Debug)]
pub struct ProvisionedKey {
    pub key: EncryptionKey,
    pub origin: KeyOrigin,
    pub warnings: Vec<String>,
}

impl ProvisionedKey {
    pub fn is_degraded(&self) -> bool {
        self.origin == KeyOrigin::DegradedRandom
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_key(self) -> EncryptionKey {
        self.key
    }
}

/// Orchestrates validation, generation and custody of keys.
pub struct KeyManager<S = MemoryKeyStore, R = OsRng> {
    config: KeyManagerConfig,
    validator: KeyValidator,
    generator: KeyGenerator<R>,
    store: S,
}

impl KeyManager {
    /// Manager with the OS CSPRNG and an in-memory store.
    pub fn new(config: KeyManagerConfig) -> Self {
        Self::with_parts(config, KeyGenerator::new(), MemoryKeyStore::new())
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::new(KeyManagerConfig::default())
    }
}

impl<S: KeyStore, R: TryCryptoRng> KeyManager<S, R> {
    /// Manager over a caller-supplied generator and store.
    ///
    /// The generator's development seed is replaced by the config's.
    pub fn with_parts(config: KeyManagerConfig, generator: KeyGenerator<R>, store: S) -> Self {
        Self {
            validator: KeyValidator::new(config.policy.clone()),
            generator: generator.with_development_seed(config.development_seed.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &KeyManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Adopts `hex_key` if supplied, otherwise derives or generates a key.
    pub fn create_or_generate_key(
        &mut self,
        hex_key: Option<&str>,
        is_development: bool,
    ) -> VaultResult<ProvisionedKey> {
        match hex_key {
            Some(hex) => self.adopt_supplied_key(hex),
            None if is_development => {
                let key = self.generator.create_development_key();
                warn!(
                    "using deterministic development key {}; never deploy it",
                    key.fingerprint()
                );
                Ok(ProvisionedKey {
                    key,
                    origin: KeyOrigin::Development,
                    warnings: vec![DEVELOPMENT_KEY_NOTICE.to_string()],
                })
            }
            None => match self.generator.generate_secure_key() {
                GeneratedKey::Secure(key) => {
                    info!("generated secure key {}", key.fingerprint());
                    Ok(ProvisionedKey {
                        key,
                        origin: KeyOrigin::SecureRandom,
                        warnings: Vec::new(),
                    })
                }
                GeneratedKey::Degraded { key, reason } => {
                    warn!(
                        "generated key {} with degraded randomness: {reason}",
                        key.fingerprint()
                    );
                    Ok(ProvisionedKey {
                        key,
                        origin: KeyOrigin::DegradedRandom,
                        warnings: vec![reason],
                    })
                }
            },
        }
    }

    fn adopt_supplied_key(&self, hex: &str) -> VaultResult<ProvisionedKey> {
        let result = self.validator.validate_hex_key(hex);
        if !result.is_valid {
            warn!("supplied key rejected: {}", result.error_summary());
            return Err(VaultError::InvalidKey {
                errors: result.errors,
            });
        }

        let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();
        for warning in &warnings {
            warn!("supplied key accepted with warning: {warning}");
        }

        let key = EncryptionKey::from_hex(hex)?;
        info!(
            "adopted supplied key {} ({} bytes, {} strength)",
            key.fingerprint(),
            result.key_length,
            result.key_strength
        );
        Ok(ProvisionedKey {
            key,
            origin: KeyOrigin::Supplied,
            warnings,
        })
    }

    /// Reads the configured environment variable and provisions a key.
    ///
    /// A blank value counts as absent.
    pub fn create_from_env(&mut self) -> VaultResult<ProvisionedKey> {
        self.create_from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`create_from_env`](Self::create_from_env) with a custom variable source.
    pub fn create_from_lookup<F>(&mut self, lookup: F) -> VaultResult<ProvisionedKey>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let raw = lookup(&self.config.key_env_var).map(Zeroizing::new);
        let supplied = raw
            .as_deref()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty());
        if supplied.is_none() {
            debug!(
                "{} not set; falling back to {} key",
                self.config.key_env_var,
                if self.config.development {
                    "development"
                } else {
                    "generated"
                }
            );
        }
        let development = self.config.development;
        self.create_or_generate_key(supplied, development)
    }

    /// Diagnostic validation that adopts nothing.
    pub fn validate(&self, hex: &str) -> KeyValidationResult {
        self.validator.validate_hex_key(hex)
    }

    /// Refuses development keys unless the manager runs in development mode.
    pub fn ensure_production_ready(&self, key: &EncryptionKey) -> VaultResult<()> {
        if key.is_default() && !self.config.development {
            return Err(VaultError::DevelopmentKeyRejected {
                fingerprint: key.fingerprint(),
            });
        }
        Ok(())
    }

    pub fn register_key(&mut self, id: &str, key: EncryptionKey) -> VaultResult<()> {
        debug!("registering key {id} ({})", key.fingerprint());
        self.store.store_key(id, key)
    }

    /// Provisions a key and registers a copy of it under `id`.
    pub fn provision(
        &mut self,
        id: &str,
        hex_key: Option<&str>,
        is_development: bool,
    ) -> VaultResult<ProvisionedKey> {
        let provisioned = self.create_or_generate_key(hex_key, is_development)?;
        self.register_key(id, provisioned.key.clone())?;
        Ok(provisioned)
    }

    pub fn get_key(&self, id: &str) -> VaultResult<Option<EncryptionKey>> {
        self.store.get_key(id)
    }

    pub fn remove_key(&mut self, id: &str) -> VaultResult<bool> {
        let removed = self.store.remove_key(id)?;
        if removed {
            debug!("removed key {id}");
        }
        Ok(removed)
    }

    pub fn list_keys(&self) -> VaultResult<Vec<KeyMetadata>> {
        self.store.list_keys()
    }
}
