//! KeyStore contract tests.
//!
//! Covers replacement semantics, metadata-only listings, and a custom
//! backend plugged into the manager.

mod support;

use keysmith_crypto::{EncryptionKey, KeyAlgorithm, KeyGenerator};
use keysmith_vault::{
    KeyManager, KeyManagerConfig, KeyMetadata, KeyStore, MemoryKeyStore, VaultError, VaultResult,
};
use pretty_assertions::assert_eq;
use support::STRONG_KEY;

fn fresh_key() -> EncryptionKey {
    KeyGenerator::new().generate_secure_key().into_key()
}

/// Behaviour every backend must share.
fn exercise_store<S: KeyStore>(store: &mut S) {
    let key = fresh_key();
    let bytes = key.bytes().to_vec();

    store.store_key("a", key).unwrap();
    let fetched = store.get_key("a").unwrap().expect("stored key must be retrievable");
    assert_eq!(fetched.bytes(), bytes.as_slice());

    assert!(store.remove_key("a").unwrap());
    assert!(store.get_key("a").unwrap().is_none());
    assert!(!store.remove_key("a").unwrap());
}

#[test]
fn memory_store_satisfies_contract() {
    let mut store = MemoryKeyStore::new();
    exercise_store(&mut store);
    assert!(store.is_empty());
}

#[test]
fn listing_exposes_metadata_only() {
    let mut store = MemoryKeyStore::new();
    let key = EncryptionKey::from_hex(STRONG_KEY).unwrap();
    let fingerprint = key.fingerprint();
    let created_at = key.created_at();
    store.store_key("records", key).unwrap();

    let listing = store.list_keys().unwrap();
    assert_eq!(
        listing,
        vec![KeyMetadata {
            id: "records".to_string(),
            algorithm: KeyAlgorithm::Aes256Gcm,
            created_at,
            is_default: false,
            fingerprint,
        }]
    );

    let json = serde_json::to_string(&listing).unwrap();
    assert!(!json.contains(STRONG_KEY), "listing leaked key material: {json}");
    assert!(json.contains("AES-256-GCM"));
}

#[test]
fn replacing_entry_does_not_merge() {
    let mut store = MemoryKeyStore::new();
    let dev = KeyGenerator::new().create_development_key();
    let dev_fingerprint = dev.fingerprint();
    store.store_key("a", dev).unwrap();

    let secure = fresh_key();
    let secure_fingerprint = secure.fingerprint();
    store.store_key("a", secure).unwrap();

    let listing = store.list_keys().unwrap();
    assert_eq!(listing.len(), 1);
    assert!(!listing[0].is_default);
    assert_eq!(listing[0].fingerprint, secure_fingerprint);
    assert_ne!(listing[0].fingerprint, dev_fingerprint);
}

#[test]
fn retrieved_copy_is_independent_of_store() {
    let mut store = MemoryKeyStore::new();
    store.store_key("a", fresh_key()).unwrap();
    let copy = store.get_key("a").unwrap().unwrap();
    store.remove_key("a").unwrap();
    assert_eq!(copy.len(), 32);
}

/// Backend that rejects writes, standing in for an unavailable secret service.
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryKeyStore,
}

impl KeyStore for ReadOnlyStore {
    fn store_key(&mut self, id: &str, _key: EncryptionKey) -> VaultResult<()> {
        Err(VaultError::Storage(format!("read-only backend refused {id}")))
    }

    fn get_key(&self, id: &str) -> VaultResult<Option<EncryptionKey>> {
        self.inner.get_key(id)
    }

    fn remove_key(&mut self, id: &str) -> VaultResult<bool> {
        self.inner.remove_key(id)
    }

    fn list_keys(&self) -> VaultResult<Vec<KeyMetadata>> {
        self.inner.list_keys()
    }
}

#[test]
fn manager_propagates_backend_errors() {
    let mut manager = KeyManager::with_parts(
        KeyManagerConfig::default(),
        KeyGenerator::new(),
        ReadOnlyStore::default(),
    );

    let err = manager.provision("records", Some(STRONG_KEY), false).unwrap_err();
    match err {
        VaultError::Storage(msg) => assert!(msg.contains("records"), "{msg}"),
        other => panic!("expected VaultError::Storage, got: {other:?}"),
    }
    assert!(manager.list_keys().unwrap().is_empty());
}
