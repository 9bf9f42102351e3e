//! Core key-value store trait.

use std::sync::Arc;

use crate::errors::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Reject keys no store can address.
pub(crate) fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::encoding("credential key must not be empty"));
    }
    Ok(())
}

/// Backend-independent key-value store over opaque byte buffers.
///
/// Implementations must:
/// - Return `Ok(None)` for keys that were never set or were deleted
/// - Replace values atomically: a concurrent reader sees the old or the new value
/// - Surface every backend failure as a [`StoreError`], never swallow it
/// - Reject the empty key with `EncodingFailure`
pub trait KeyValueStore: Send + Sync {
    /// Read the current value for `key`.
    ///
    /// # Returns
    /// The stored bytes, or None if the key is absent.
    ///
    /// # Errors
    /// - `BackendUnavailable` if the platform store cannot be reached
    /// - `EncodingFailure` if the stored value cannot be decoded
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Create, overwrite, or delete the value for `key`.
    ///
    /// `Some(value)` writes the bytes (zero-length buffers included);
    /// `None` removes the entry.
    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()>;

    /// Remove the entry for `key`.
    ///
    /// Succeeds when the key is already absent.
    fn delete(&self, key: &str) -> StoreResult<()> {
        self.set(key, None)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Option<&[u8]>) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

/// Typed accessors layered over the byte interface.
///
/// Strings, booleans and integers are stored as UTF-8 text, so values written
/// here stay readable by other clients of the same keychain entry.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Check if a key has a value.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Read a UTF-8 string.
    ///
    /// # Errors
    /// `EncodingFailure` if the stored bytes are not valid UTF-8.
    fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        self.get(key)?
            .map(|bytes| String::from_utf8(bytes).map_err(StoreError::encoding))
            .transpose()
    }

    /// Write a UTF-8 string, or delete the entry on `None`.
    fn set_string(&self, key: &str, value: Option<&str>) -> StoreResult<()> {
        self.set(key, value.map(str::as_bytes))
    }

    /// Read a boolean stored as `"true"` or `"false"`.
    fn get_bool(&self, key: &str) -> StoreResult<Option<bool>> {
        self.get_string(key)?
            .map(|text| match text.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(StoreError::encoding(format!(
                    "expected boolean for '{}', found '{}'",
                    key, other
                ))),
            })
            .transpose()
    }

    /// Write a boolean, or delete the entry on `None`.
    fn set_bool(&self, key: &str, value: Option<bool>) -> StoreResult<()> {
        self.set_string(key, value.map(|v| if v { "true" } else { "false" }))
    }

    /// Read a signed integer stored as decimal text.
    fn get_i64(&self, key: &str) -> StoreResult<Option<i64>> {
        self.get_string(key)?
            .map(|text| text.parse::<i64>().map_err(StoreError::encoding))
            .transpose()
    }

    /// Write a signed integer, or delete the entry on `None`.
    fn set_i64(&self, key: &str, value: Option<i64>) -> StoreResult<()> {
        self.set_string(key, value.map(|v| v.to_string()).as_deref())
    }
}

// Blanket implementation
impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}
