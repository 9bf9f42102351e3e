//! Platform credential backends.
//!
//! A backend is the narrow primitive layer under [`KeychainStore`]: read,
//! write and delete of a single entry addressed by (scope, key). Backends
//! report their native errors unchanged and classify them; the store turns
//! the classification into a [`StoreError`] variant.
//!
//! | Target        | Backend                       | Platform API          |
//! |---------------|-------------------------------|-----------------------|
//! | macOS / iOS   | `AppleKeychainBackend`        | Keychain Services     |
//! | Linux         | `SecretServiceBackend`        | freedesktop Secret Service |
//! | Windows       | `CredentialManagerBackend`    | Credential Manager    |
//! | anything else | `UnsupportedBackend`          | none                  |
//!
//! [`MemoryBackend`] is available everywhere for tests.
//!
//! [`KeychainStore`]: crate::store::KeychainStore
//! [`StoreError`]: crate::errors::StoreError

mod address;
mod memory;
mod unsupported;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod apple;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "windows")]
mod credential_manager;

use crate::scope::StoreScope;

pub use memory::{MemoryBackend, MemoryBackendError};
pub use unsupported::{UnsupportedBackend, UnsupportedPlatform};

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use apple::AppleKeychainBackend;

#[cfg(target_os = "linux")]
pub use linux::{SecretServiceBackend, SecretServiceError};

#[cfg(target_os = "windows")]
pub use credential_manager::CredentialManagerBackend;

/// Default backend for the compilation target.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type PlatformBackend = AppleKeychainBackend;

/// Default backend for the compilation target.
#[cfg(target_os = "linux")]
pub type PlatformBackend = SecretServiceBackend;

/// Default backend for the compilation target.
#[cfg(target_os = "windows")]
pub type PlatformBackend = CredentialManagerBackend;

/// Default backend for the compilation target.
#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "linux",
    target_os = "windows"
)))]
pub type PlatformBackend = UnsupportedBackend;

/// How a backend failure maps onto the store's error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Store inaccessible: locked, permission denied, service missing.
    Unavailable,
    /// Value or key rejected by the backend's representation.
    Encoding,
    /// Anything else.
    Other,
}

/// Primitive operations a platform credential store must provide.
///
/// Every call addresses exactly one entry and is performed synchronously;
/// a call may block while the platform store is queried.
pub trait CredentialBackend: Send + Sync {
    /// Native error type of the platform binding.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the entry, or None if it does not exist.
    fn read(&self, scope: &StoreScope, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Create or replace the entry.
    fn write(&self, scope: &StoreScope, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Remove the entry. Removing an absent entry succeeds.
    fn delete(&self, scope: &StoreScope, key: &str) -> Result<(), Self::Error>;

    /// Classify a native error.
    fn classify(error: &Self::Error) -> FailureKind;
}
