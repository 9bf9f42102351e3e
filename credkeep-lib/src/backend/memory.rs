//! Scope-aware in-memory backend.
//!
//! Entries are keyed by (service, access group, key), mirroring how the
//! platform stores partition their items. Nothing is persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{CredentialBackend, FailureKind};
use crate::scope::StoreScope;

type EntryId = (String, Option<String>, String);

/// Error returned by [`MemoryBackend`].
#[derive(Debug, thiserror::Error)]
#[error("memory backend lock poisoned during {0}")]
pub struct MemoryBackendError(&'static str);

/// Process-local [`CredentialBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<EntryId, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all scopes.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if no scope holds any entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn entry_id(scope: &StoreScope, key: &str) -> EntryId {
    (
        scope.service().to_string(),
        scope.access_group().map(str::to_string),
        key.to_string(),
    )
}

impl CredentialBackend for MemoryBackend {
    type Error = MemoryBackendError;

    fn read(&self, scope: &StoreScope, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let entries = self
            .entries
            .read()
            .map_err(|_| MemoryBackendError("read"))?;
        Ok(entries.get(&entry_id(scope, key)).cloned())
    }

    fn write(&self, scope: &StoreScope, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| MemoryBackendError("write"))?;
        entries.insert(entry_id(scope, key), value.to_vec());
        Ok(())
    }

    fn delete(&self, scope: &StoreScope, key: &str) -> Result<(), Self::Error> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| MemoryBackendError("delete"))?;
        entries.remove(&entry_id(scope, key));
        Ok(())
    }

    fn classify(_error: &Self::Error) -> FailureKind {
        FailureKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_partitioned_by_scope() {
        let backend = MemoryBackend::new();
        let a = StoreScope::new("a");
        let b = StoreScope::new("b");
        let a_grouped = StoreScope::new("a").with_access_group("g");

        backend.write(&a, "key", b"one").unwrap();

        assert_eq!(backend.read(&a, "key").unwrap(), Some(b"one".to_vec()));
        assert_eq!(backend.read(&b, "key").unwrap(), None);
        assert_eq!(backend.read(&a_grouped, "key").unwrap(), None);
    }

    #[test]
    fn test_delete_absent_succeeds() {
        let backend = MemoryBackend::new();
        backend.delete(&StoreScope::new("a"), "missing").unwrap();
        assert!(backend.is_empty());
    }
}
