//! Push notification token slot.
//!
//! [`PushTokenAccessor`] exposes the device's push-registration token as a
//! single optional byte buffer. It sits on a [`LenientStore`]: a locked or
//! broken credential store makes the token look absent and drops writes, and
//! the application carries on as if no token had been registered yet.
//!
//! The accessor owns no global state. Build one at the composition root and
//! hand it to whatever needs it:
//!
//! ```rust
//! use credkeep_lib::push_token::PushTokenAccessor;
//! use credkeep_lib::store::InMemoryStore;
//!
//! let accessor = PushTokenAccessor::new(InMemoryStore::new());
//! accessor.set_push_token(Some(b"apns-device-token"));
//! assert_eq!(accessor.push_token(), Some(b"apns-device-token".to_vec()));
//! ```

use crate::lenient::LenientStore;
use crate::scope::StoreScope;
use crate::store::{KeyValueStore, KeychainStore};

/// Keychain service dedicated to push notification state.
pub const PUSH_TOKEN_SERVICE: &str = "im.vector.app.pushnotification-service";

/// Key of the push token entry.
pub const PUSH_TOKEN_KEY: &str = "pushtoken";

const COMPONENT: &str = "PushTokenAccessor";

/// Best-effort accessor for the stored push token.
#[derive(Debug)]
pub struct PushTokenAccessor<S = KeychainStore> {
    store: LenientStore<S>,
}

impl PushTokenAccessor<KeychainStore> {
    /// Accessor on the platform credential store, scoped to [`PUSH_TOKEN_SERVICE`].
    pub fn platform(access_group: Option<String>) -> Self {
        Self::new(KeychainStore::platform(Self::scope(access_group)))
    }
}

impl<S: KeyValueStore> PushTokenAccessor<S> {
    /// Accessor over an injected store.
    pub fn new(store: S) -> Self {
        Self {
            store: LenientStore::new(store, COMPONENT),
        }
    }

    /// Scope used for push token storage.
    pub fn scope(access_group: Option<String>) -> StoreScope {
        let scope = StoreScope::new(PUSH_TOKEN_SERVICE);
        match access_group {
            Some(group) => scope.with_access_group(group),
            None => scope,
        }
    }

    /// The saved push token, or None if absent or unreadable.
    pub fn push_token(&self) -> Option<Vec<u8>> {
        self.store.get(PUSH_TOKEN_KEY)
    }

    /// Save a new push token, or remove it on `None`.
    ///
    /// Failures are logged; callers cannot observe them here.
    pub fn set_push_token(&self, token: Option<&[u8]>) {
        self.store.set(PUSH_TOKEN_KEY, token);
    }

    /// Remove the saved push token.
    pub fn clear_push_token(&self) {
        self.set_push_token(None);
    }

    /// Borrow the underlying strict store.
    pub fn store(&self) -> &S {
        self.store.inner()
    }
}
