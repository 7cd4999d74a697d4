//! Registry of key records shared between subsystems.
//!
//! [`KeyStore`] is the seam for custody backends; [`MemoryKeyStore`] is the
//! in-process implementation. Stores do no locking of their own: mutation
//! takes `&mut self`, so a multi-threaded host wraps the store (or the
//! owning [`KeyManager`](crate::KeyManager)) in a `Mutex`.

use crate::error::VaultResult;
use chrono::{DateTime, Utc};
use keysmith_crypto::{EncryptionKey, KeyAlgorithm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Non-sensitive description of a stored key. Never carries key material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetadata {
    pub id: String,
    pub algorithm: KeyAlgorithm,
    pub created_at: DateTime<Utc>,
    pub is_default: bool,
    /// SHA-256 of the key material, hex encoded.
    pub fingerprint: String,
}

impl KeyMetadata {
    pub fn describe(id: &str, key: &EncryptionKey) -> Self {
        Self {
            id: id.to_string(),
            algorithm: key.algorithm(),
            created_at: key.created_at(),
            is_default: key.is_default(),
            fingerprint: key.fingerprint(),
        }
    }
}

/// Custody backend mapping caller-chosen ids to key records.
pub trait KeyStore {
    /// Stores `key` under `id`, fully replacing any existing entry.
    fn store_key(&mut self, id: &str, key: EncryptionKey) -> VaultResult<()>;

    /// Returns a copy of the key stored under `id`.
    fn get_key(&self, id: &str) -> VaultResult<Option<EncryptionKey>>;

    /// Removes the entry. Returns whether one existed.
    fn remove_key(&mut self, id: &str) -> VaultResult<bool>;

    /// Metadata for every entry, without key material.
    fn list_keys(&self) -> VaultResult<Vec<KeyMetadata>>;
}

/// In-memory key store. Listings are ordered by id.
///
/// Replaced and removed records are dropped immediately, which zeroes them.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: BTreeMap<String, EncryptionKey>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains_key(id)
    }

    /// Drops (and zeroes) every stored key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl KeyStore for MemoryKeyStore {
    fn store_key(&mut self, id: &str, key: EncryptionKey) -> VaultResult<()> {
        self.keys.insert(id.to_string(), key);
        Ok(())
    }

    fn get_key(&self, id: &str) -> VaultResult<Option<EncryptionKey>> {
        Ok(self.keys.get(id).cloned())
    }

    fn remove_key(&mut self, id: &str) -> VaultResult<bool> {
        Ok(self.keys.remove(id).is_some())
    }

    fn list_keys(&self) -> VaultResult<Vec<KeyMetadata>> {
        Ok(self
            .keys
            .iter()
            .map(|(id, key)| KeyMetadata::describe(id, key))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fill: u8) -> EncryptionKey {
        EncryptionKey::from_bytes(vec![fill; 32])
    }

    #[test]
    fn store_then_get_returns_same_material() {
        let mut store = MemoryKeyStore::new();
        store.store_key("a", key(1)).unwrap();
        let fetched = store.get_key("a").unwrap().unwrap();
        assert_eq!(fetched.bytes(), &[1u8; 32]);
    }

    #[test]
    fn later_store_replaces_entry() {
        let mut store = MemoryKeyStore::new();
        store.store_key("a", key(1)).unwrap();
        store.store_key("a", key(2)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_key("a").unwrap().unwrap().bytes(), &[2u8; 32]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut store = MemoryKeyStore::new();
        store.store_key("a", key(1)).unwrap();
        assert!(store.remove_key("a").unwrap());
        assert!(!store.remove_key("a").unwrap());
        assert!(store.get_key("a").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn listing_is_sorted_by_id() {
        let mut store = MemoryKeyStore::new();
        store.store_key("zeta", key(1)).unwrap();
        store.store_key("alpha", key(2)).unwrap();
        let ids: Vec<String> = store
            .list_keys()
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = MemoryKeyStore::new();
        store.store_key("a", key(1)).unwrap();
        store.store_key("b", key(2)).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains("a"));
    }
}
