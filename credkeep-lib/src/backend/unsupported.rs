//! Backend for targets without a supported credential manager.

use super::{CredentialBackend, FailureKind};
use crate::scope::StoreScope;

/// Error returned by every [`UnsupportedBackend`] call.
#[derive(Debug, thiserror::Error)]
#[error("no secure credential store on this platform ({operation})")]
pub struct UnsupportedPlatform {
    operation: &'static str,
}

/// Backend that reports the platform store as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBackend;

impl CredentialBackend for UnsupportedBackend {
    type Error = UnsupportedPlatform;

    fn read(&self, _scope: &StoreScope, _key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Err(UnsupportedPlatform { operation: "read" })
    }

    fn write(&self, _scope: &StoreScope, _key: &str, _value: &[u8]) -> Result<(), Self::Error> {
        Err(UnsupportedPlatform { operation: "write" })
    }

    fn delete(&self, _scope: &StoreScope, _key: &str) -> Result<(), Self::Error> {
        Err(UnsupportedPlatform { operation: "delete" })
    }

    fn classify(_error: &Self::Error) -> FailureKind {
        FailureKind::Unavailable
    }
}
