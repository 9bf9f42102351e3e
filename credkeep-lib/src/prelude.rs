//! Prelude module for convenient imports.
//!
//! ```rust
//! use credkeep_lib::prelude::*;
//!
//! let store = InMemoryStore::new();
//! store.set_bool("onboarded", Some(true)).unwrap();
//! ```

// Error handling
pub use crate::errors::{StoreError, StoreErrorCode};
pub use crate::Result;

// Store traits and implementations
pub use crate::store::{InMemoryStore, KeyValueStore, KeyValueStoreExt, KeychainStore};

#[cfg(feature = "file-storage")]
pub use crate::store::EncryptedFileStore;

// Scoping and composition
pub use crate::config::{BackendKind, StoreConfig};
pub use crate::scope::StoreScope;

// Façades
pub use crate::lenient::LenientStore;
pub use crate::push_token::PushTokenAccessor;
