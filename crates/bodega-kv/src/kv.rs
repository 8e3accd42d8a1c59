//! Key-Value store wrapper with automatic serialization.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Mutex, MutexGuard, OnceLock};

#[cfg(not(target_arch = "wasm32"))]
type Namespace = HashMap<String, Vec<u8>>;

/// Process-wide registry of named stores, mirroring how the deployed
/// storefront sees one key-value namespace per origin.
#[cfg(not(target_arch = "wasm32"))]
fn registry() -> &'static Mutex<HashMap<String, Namespace>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, Namespace>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

#[cfg(not(target_arch = "wasm32"))]
fn lock_registry() -> Result<MutexGuard<'static, HashMap<String, Namespace>>, StoreError> {
    registry()
        .lock()
        .map_err(|_| StoreError::Backend("store registry poisoned".to_string()))
}

/// Persistent blob store keyed by name.
///
/// Every value is serialized to JSON on `set` and deserialized on `get`, so
/// any type implementing `Serialize`/`DeserializeOwned` round-trips as a
/// single named blob. Whatever was last written is authoritative on the next
/// open of the same store name.
#[derive(Clone)]
pub struct Store {
    #[cfg(target_arch = "wasm32")]
    store: std::sync::Arc<spin_sdk::key_value::Store>,
    #[cfg(not(target_arch = "wasm32"))]
    name: String,
}

impl Store {
    /// Open the default store.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open("default")
    }

    /// Open a named store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = Store::open("shop")?;
    /// ```
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Ok(Self {
            store: std::sync::Arc::new(store),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let mut registry = lock_registry()?;
        registry.entry(name.to_string()).or_default();
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Get a blob from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let catalog: Option<Vec<Product>> = store.get("catalog")?;
    /// ```
    #[cfg(target_arch = "wasm32")]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let registry = lock_registry()?;
        match registry.get(&self.name).and_then(|ns| ns.get(key)) {
            Some(bytes) => {
                let value: T = serde_json::from_slice(bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a blob in the store, replacing any previous value.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("theme", &theme)?;
    /// ```
    #[cfg(target_arch = "wasm32")]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.store
            .set(key, &bytes)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        let mut registry = lock_registry()?;
        registry
            .entry(self.name.clone())
            .or_default()
            .insert(key.to_string(), bytes);
        Ok(())
    }

    /// Delete a blob from the store.
    #[cfg(target_arch = "wasm32")]
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store
            .delete(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut registry = lock_registry()?;
        if let Some(ns) = registry.get_mut(&self.name) {
            ns.remove(key);
        }
        Ok(())
    }

    /// Check if a key exists in the store.
    #[cfg(target_arch = "wasm32")]
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.store
            .exists(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let registry = lock_registry()?;
        Ok(registry
            .get(&self.name)
            .is_some_and(|ns| ns.contains_key(key)))
    }

    /// Get all keys in the store.
    #[cfg(target_arch = "wasm32")]
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.store
            .get_keys()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let registry = lock_registry()?;
        Ok(registry
            .get(&self.name)
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Blob {
        label: String,
        count: i64,
    }

    #[test]
    fn test_get_missing_key() {
        let store = Store::open("kv-test-missing").unwrap();
        let value: Option<Blob> = store.get("nope").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let store = Store::open("kv-test-roundtrip").unwrap();
        let blob = Blob {
            label: "catalog".to_string(),
            count: 5,
        };
        store.set("blob", &blob).unwrap();

        let loaded: Option<Blob> = store.get("blob").unwrap();
        assert_eq!(loaded, Some(blob));
    }

    #[test]
    fn test_reopen_same_name_shares_data() {
        let store = Store::open("kv-test-reopen").unwrap();
        store.set("key", &42_i64).unwrap();

        let reopened = Store::open("kv-test-reopen").unwrap();
        let value: Option<i64> = reopened.get("key").unwrap();
        assert_eq!(value, Some(42));
    }

    #[test]
    fn test_stores_are_isolated_by_name() {
        let a = Store::open("kv-test-iso-a").unwrap();
        let b = Store::open("kv-test-iso-b").unwrap();
        a.set("key", &1_i64).unwrap();

        let value: Option<i64> = b.get("key").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_delete_and_exists() {
        let store = Store::open("kv-test-delete").unwrap();
        store.set("key", &"value").unwrap();
        assert!(store.exists("key").unwrap());

        store.delete("key").unwrap();
        assert!(!store.exists("key").unwrap());
    }

    #[test]
    fn test_keys() {
        let store = Store::open("kv-test-keys").unwrap();
        store.set("alpha", &1_i64).unwrap();
        store.set("beta", &2_i64).unwrap();

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["alpha".to_string(), "beta".to_string()]);
    }
}
