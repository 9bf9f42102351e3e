//! freedesktop Secret Service backend (GNOME Keyring, KWallet).
//!
//! Items live in the default collection and are looked up by their `service`,
//! `has_access_group`, `access_group` and `key` attributes.
//!
//! Each operation opens its own session on the D-Bus session bus.

use secret_service::blocking::{Collection, SecretService};
use secret_service::{EncryptionType, Error as SsError};

use super::address::secret_attributes;
use super::{CredentialBackend, FailureKind};
use crate::scope::StoreScope;

const CONTENT_TYPE: &str = "application/octet-stream";

/// Error returned by [`SecretServiceBackend`].
#[derive(Debug, thiserror::Error)]
#[error("secret service {operation} failed: {source}")]
pub struct SecretServiceError {
    operation: &'static str,
    kind: FailureKind,
    #[source]
    source: SsError,
}

impl SecretServiceError {
    fn new(operation: &'static str, source: SsError) -> Self {
        let kind = match &source {
            SsError::Locked | SsError::Prompt | SsError::Unavailable => FailureKind::Unavailable,
            SsError::Crypto(_) => FailureKind::Encoding,
            // No session bus or no daemon answering it
            _ if operation == "connect" => FailureKind::Unavailable,
            _ => FailureKind::Other,
        };
        Self {
            operation,
            kind,
            source,
        }
    }

    /// The step that failed (`connect`, `unlock`, `search`, ...).
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Secret Service-backed [`CredentialBackend`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretServiceBackend;

fn connect() -> Result<SecretService<'static>, SecretServiceError> {
    SecretService::connect(EncryptionType::Dh).map_err(|e| SecretServiceError::new("connect", e))
}

fn unlocked_collection<'a>(
    service: &'a SecretService<'_>,
) -> Result<Collection<'a>, SecretServiceError> {
    let collection = service
        .get_default_collection()
        .map_err(|e| SecretServiceError::new("open collection", e))?;

    if collection.is_locked().unwrap_or(true) {
        collection
            .unlock()
            .map_err(|e| SecretServiceError::new("unlock", e))?;
    }

    Ok(collection)
}

impl CredentialBackend for SecretServiceBackend {
    type Error = SecretServiceError;

    fn read(&self, scope: &StoreScope, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let service = connect()?;
        let collection = unlocked_collection(&service)?;

        let items = collection
            .search_items(secret_attributes(scope, key))
            .map_err(|e| SecretServiceError::new("search", e))?;
        let Some(item) = items.first() else {
            return Ok(None);
        };

        if item.is_locked().unwrap_or(true) {
            item.unlock()
                .map_err(|e| SecretServiceError::new("unlock", e))?;
        }

        item.get_secret()
            .map(Some)
            .map_err(|e| SecretServiceError::new("get secret", e))
    }

    fn write(&self, scope: &StoreScope, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let service = connect()?;
        let collection = unlocked_collection(&service)?;

        let label = format!("{}/{}", scope, key);
        // replace = true swaps the matching item in a single daemon call
        collection
            .create_item(&label, secret_attributes(scope, key), value, true, CONTENT_TYPE)
            .map_err(|e| SecretServiceError::new("create item", e))?;

        Ok(())
    }

    fn delete(&self, scope: &StoreScope, key: &str) -> Result<(), Self::Error> {
        let service = connect()?;
        let collection = unlocked_collection(&service)?;

        let items = collection
            .search_items(secret_attributes(scope, key))
            .map_err(|e| SecretServiceError::new("search", e))?;

        for item in items {
            item.delete()
                .map_err(|e| SecretServiceError::new("delete", e))?;
        }

        Ok(())
    }

    fn classify(error: &Self::Error) -> FailureKind {
        error.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_unavailable_at_any_step() {
        for operation in ["connect", "open collection", "search", "create item", "delete"] {
            let err = SecretServiceError::new(operation, SsError::Unavailable);
            assert_eq!(
                SecretServiceBackend::classify(&err),
                FailureKind::Unavailable,
                "{}",
                operation
            );
        }
    }

    #[test]
    fn test_locked_is_unavailable() {
        let err = SecretServiceError::new("unlock", SsError::Locked);
        assert_eq!(SecretServiceBackend::classify(&err), FailureKind::Unavailable);
        assert_eq!(err.operation(), "unlock");
    }

    #[test]
    fn test_missing_result_is_other() {
        let err = SecretServiceError::new("search", SsError::NoResult);
        assert_eq!(SecretServiceBackend::classify(&err), FailureKind::Other);
    }
}
