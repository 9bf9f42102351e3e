//! Credkeep library.
//!
//! Small, synchronous key-value storage for secrets such as tokens and keys,
//! backed by the platform's credential store. Stores are plain values built
//! at the composition root and passed to whoever needs them.
//!
//! # Features
//!
//! - **Strict stores**: [`KeyValueStore`] implementations report every backend
//!   failure as a [`StoreError`]
//! - **Platform backends**: Keychain on Apple targets, Secret Service on Linux,
//!   Credential Manager on Windows
//! - **Lenient façade**: [`LenientStore`] downgrades failures to logged defaults
//! - **Push token slot**: [`PushTokenAccessor`] holds the device's push token
//! - **Encrypted files**: `EncryptedFileStore` behind the `file-storage` feature
//!
//! # Example
//!
//! ```
//! use credkeep_lib::{InMemoryStore, KeyValueStore, KeyValueStoreExt, PushTokenAccessor};
//!
//! let store = InMemoryStore::new();
//! store.set_string("session", Some("abc")).unwrap();
//! assert_eq!(store.get("session").unwrap(), Some(b"abc".to_vec()));
//!
//! let push = PushTokenAccessor::new(InMemoryStore::new());
//! assert_eq!(push.push_token(), None);
//! ```

pub mod backend;
pub mod config;
pub mod errors;
pub mod lenient;
pub mod prelude;
pub mod push_token;
pub mod scope;
pub mod store;

pub use config::{BackendKind, ConfigError, StoreConfig};
pub use errors::{StoreError, StoreErrorCode};
pub use lenient::LenientStore;
pub use push_token::{PushTokenAccessor, PUSH_TOKEN_KEY, PUSH_TOKEN_SERVICE};
pub use scope::StoreScope;
pub use store::{InMemoryStore, KeyValueStore, KeyValueStoreExt, KeychainStore};

#[cfg(feature = "file-storage")]
pub use store::EncryptedFileStore;

/// Common result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
