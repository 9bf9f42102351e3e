//! Key-value store abstraction for credential persistence.
//!
//! This module provides a backend-agnostic trait for storing opaque byte
//! buffers by key, with implementations for:
//! - The platform credential store (Keychain, Secret Service, Credential Manager)
//! - In-memory storage (for testing)
//! - Encrypted files (with the `file-storage` feature)
//!
//! ## Usage
//!
//! ```rust
//! use credkeep_lib::store::{InMemoryStore, KeyValueStore};
//!
//! let store = InMemoryStore::new();
//!
//! store.set("my-key", Some(b"secret-data")).unwrap();
//! assert_eq!(store.get("my-key").unwrap(), Some(b"secret-data".to_vec()));
//!
//! store.delete("my-key").unwrap();
//! assert_eq!(store.get("my-key").unwrap(), None);
//! ```
//!
//! ## Security Considerations
//!
//! - Values are never logged, only their length
//! - Platform stores encrypt at rest and may require the device to be unlocked
//! - The in-memory store keeps plaintext and is not meant for production

mod keychain;
mod memory;
mod traits;

#[cfg(feature = "file-storage")]
mod encryption;
#[cfg(feature = "file-storage")]
mod file;

pub use keychain::KeychainStore;
pub use memory::InMemoryStore;
pub use traits::{KeyValueStore, KeyValueStoreExt, StoreResult};

#[cfg(feature = "file-storage")]
pub use encryption::{generate_key, EncryptionError};
#[cfg(feature = "file-storage")]
pub use file::EncryptedFileStore;
