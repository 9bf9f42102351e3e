//! In-memory key-value store.
//!
//! This implementation is for testing and ephemeral use only.
//! Values are not encrypted and are lost when the process exits.
//!
//! # Thread Safety
//!
//! This store uses `RwLock` for thread-safe access. Lock poisoning
//! is reported as an error rather than a panic.

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{check_key, KeyValueStore, StoreResult};
use crate::errors::StoreError;

/// Process-local implementation of [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

fn lock_error(context: &str) -> StoreError {
    StoreError::unknown(format!("InMemoryStore: lock poisoned during {}", context))
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored entries.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.entries.read().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        check_key(key)?;
        let entries = self.entries.read().map_err(|_| lock_error("get"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()> {
        check_key(key)?;
        let mut entries = self.entries.write().map_err(|_| lock_error("set"))?;
        match value {
            Some(bytes) => {
                entries.insert(key.to_string(), bytes.to_vec());
            }
            None => {
                entries.remove(key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreErrorCode;

    #[test]
    fn test_set_and_get() {
        let store = InMemoryStore::new();

        store.set("token", Some(b"secret")).unwrap();
        assert_eq!(store.get("token").unwrap(), Some(b"secret".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let store = InMemoryStore::new();
        store.delete("nonexistent").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = InMemoryStore::new();

        let err = store.set("", Some(b"v")).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::EncodingFailure);
        assert!(store.get("").is_err());
        assert!(store.delete("").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_value_is_present() {
        let store = InMemoryStore::new();

        store.set("empty", Some(&[])).unwrap();
        assert_eq!(store.get("empty").unwrap(), Some(Vec::new()));
    }
}
