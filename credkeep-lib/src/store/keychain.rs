//! Keychain-backed key-value store.
//!
//! [`KeychainStore`] binds a [`StoreScope`] to a [`CredentialBackend`] and
//! forwards each call as exactly one backend operation: no caching, no
//! batching, no retry. Native backend errors are wrapped into [`StoreError`]
//! with the original error kept as the source.

use tracing::debug;

use super::traits::{check_key, KeyValueStore, StoreResult};
use crate::backend::{CredentialBackend, FailureKind, PlatformBackend};
use crate::errors::StoreError;
use crate::scope::StoreScope;

/// [`KeyValueStore`] over a platform credential store.
///
/// ```ignore
/// use credkeep_lib::{KeychainStore, KeyValueStore, StoreScope};
///
/// let store = KeychainStore::platform(
///     StoreScope::new("com.example.app").with_access_group("TEAMID.shared"),
/// );
/// store.set("refresh-token", Some(b"opaque"))?;
/// assert_eq!(store.get("refresh-token")?, Some(b"opaque".to_vec()));
/// ```
#[derive(Debug)]
pub struct KeychainStore<B = PlatformBackend> {
    scope: StoreScope,
    backend: B,
}

impl KeychainStore<PlatformBackend> {
    /// Create a store on the platform's default credential backend.
    pub fn platform(scope: StoreScope) -> Self {
        Self::with_backend(scope, PlatformBackend::default())
    }
}

impl<B: CredentialBackend> KeychainStore<B> {
    /// Create a store on an explicit backend.
    pub fn with_backend(scope: StoreScope, backend: B) -> Self {
        Self { scope, backend }
    }

    /// Get the scope all entries of this store live in.
    pub fn scope(&self) -> &StoreScope {
        &self.scope
    }

    /// Get the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn wrap(&self, operation: &'static str, key: &str, error: B::Error) -> StoreError {
        let kind = B::classify(&error);
        debug!(
            scope = %self.scope,
            key,
            operation,
            ?kind,
            error = %error,
            "credential backend call failed"
        );
        match kind {
            FailureKind::Unavailable => StoreError::unavailable(error),
            FailureKind::Encoding => StoreError::encoding(error),
            FailureKind::Other => StoreError::unknown(error),
        }
    }
}

impl<B: CredentialBackend> KeyValueStore for KeychainStore<B> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        check_key(key)?;
        let value = self
            .backend
            .read(&self.scope, key)
            .map_err(|e| self.wrap("read", key, e))?;
        debug!(
            scope = %self.scope,
            key,
            found = value.is_some(),
            "read credential"
        );
        Ok(value)
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()> {
        check_key(key)?;
        match value {
            Some(bytes) => {
                self.backend
                    .write(&self.scope, key, bytes)
                    .map_err(|e| self.wrap("write", key, e))?;
                debug!(scope = %self.scope, key, len = bytes.len(), "wrote credential");
            }
            None => {
                self.backend
                    .delete(&self.scope, key)
                    .map_err(|e| self.wrap("delete", key, e))?;
                debug!(scope = %self.scope, key, "deleted credential");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::errors::StoreErrorCode;

    fn store(service: &str) -> KeychainStore<MemoryBackend> {
        KeychainStore::with_backend(StoreScope::new(service), MemoryBackend::new())
    }

    #[test]
    fn test_round_trip() {
        let store = store("svc");

        store.set("token", Some(b"abc")).unwrap();
        assert_eq!(store.get("token").unwrap(), Some(b"abc".to_vec()));

        store.set("token", None).unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = store("svc");

        let err = store.get("").unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::EncodingFailure);
        assert!(store.set("", Some(b"v")).is_err());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_scope_accessor() {
        let store = KeychainStore::with_backend(
            StoreScope::new("svc").with_access_group("grp"),
            MemoryBackend::new(),
        );
        assert_eq!(store.scope().access_group(), Some("grp"));
    }
}
