//! Keychain Services backend for macOS and iOS.
//!
//! Entries are generic passwords: the scope's service identifier is the
//! item's service, the key is its account, and the optional access group is
//! set on every query so shared items live in the team's keychain group.

use security_framework::base::Error as SecurityError;
use security_framework::passwords::{
    delete_generic_password_options, generic_password, set_generic_password_options,
};
use security_framework::passwords_options::PasswordOptions;

use super::{CredentialBackend, FailureKind};
use crate::scope::StoreScope;

// OSStatus values from <Security/SecBase.h>
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;
const ERR_SEC_INTERACTION_NOT_ALLOWED: i32 = -25308;
const ERR_SEC_AUTH_FAILED: i32 = -25293;
const ERR_SEC_NOT_AVAILABLE: i32 = -25291;
const ERR_SEC_NO_SUCH_KEYCHAIN: i32 = -25294;
const ERR_SEC_MISSING_ENTITLEMENT: i32 = -34018;
const ERR_SEC_USER_CANCELED: i32 = -128;
const ERR_SEC_PARAM: i32 = -50;
const ERR_SEC_DECODE: i32 = -26275;

/// Keychain-backed [`CredentialBackend`].
///
/// Keychain operations are thread-safe; no extra locking is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppleKeychainBackend;

fn options(scope: &StoreScope, key: &str) -> PasswordOptions {
    let mut options = PasswordOptions::new_generic_password(scope.service(), key);
    if let Some(group) = scope.access_group() {
        options.set_access_group(group);
    }
    options
}

impl CredentialBackend for AppleKeychainBackend {
    type Error = SecurityError;

    fn read(&self, scope: &StoreScope, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        match generic_password(options(scope, key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, scope: &StoreScope, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        // Updates the existing item in place when one matches
        set_generic_password_options(value, options(scope, key))
    }

    fn delete(&self, scope: &StoreScope, key: &str) -> Result<(), Self::Error> {
        match delete_generic_password_options(options(scope, key)) {
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => Ok(()),
            other => other,
        }
    }

    fn classify(error: &Self::Error) -> FailureKind {
        match error.code() {
            ERR_SEC_INTERACTION_NOT_ALLOWED
            | ERR_SEC_AUTH_FAILED
            | ERR_SEC_NOT_AVAILABLE
            | ERR_SEC_NO_SUCH_KEYCHAIN
            | ERR_SEC_MISSING_ENTITLEMENT
            | ERR_SEC_USER_CANCELED => FailureKind::Unavailable,
            ERR_SEC_PARAM | ERR_SEC_DECODE => FailureKind::Encoding,
            _ => FailureKind::Other,
        }
    }
}
