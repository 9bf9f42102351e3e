//! Error types for credential store operations.
//!
//! Every store surfaces failures through [`StoreError`]. "Key not found" is
//! never an error: reads of an absent key return `Ok(None)`.

/// Boxed underlying cause carried by every [`StoreError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StoreErrorCode {
    /// Platform store inaccessible (device locked, permission denied, no service)
    BackendUnavailable = 2000,
    /// Value or key could not be represented in the backend's format
    EncodingFailure = 5000,
    /// Backend failure not otherwise classified
    Unknown = 9999,
}

/// Error type for key-value store operations.
///
/// Each variant keeps the backend's native error as its [`source`].
///
/// [`source`]: std::error::Error::source
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The platform store could not be reached.
    #[error("credential store unavailable: {0}")]
    BackendUnavailable(#[source] BoxError),

    /// The value could not be converted to or from the backend's representation.
    #[error("credential encoding failed: {0}")]
    EncodingFailure(#[source] BoxError),

    /// Any other backend failure.
    #[error("credential store error: {0}")]
    Unknown(#[source] BoxError),
}

impl StoreError {
    /// Create a "backend unavailable" error.
    pub fn unavailable(cause: impl Into<BoxError>) -> Self {
        Self::BackendUnavailable(cause.into())
    }

    /// Create an "encoding failure" error.
    pub fn encoding(cause: impl Into<BoxError>) -> Self {
        Self::EncodingFailure(cause.into())
    }

    /// Create an unclassified error.
    pub fn unknown(cause: impl Into<BoxError>) -> Self {
        Self::Unknown(cause.into())
    }

    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> StoreErrorCode {
        match self {
            Self::BackendUnavailable(_) => StoreErrorCode::BackendUnavailable,
            Self::EncodingFailure(_) => StoreErrorCode::EncodingFailure,
            Self::Unknown(_) => StoreErrorCode::Unknown,
        }
    }

    /// The backend's original error.
    pub fn backend_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        match self {
            Self::BackendUnavailable(cause)
            | Self::EncodingFailure(cause)
            | Self::Unknown(cause) => cause.as_ref(),
        }
    }

    /// Returns true if the store could not be reached, e.g. while the device is locked.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StoreError::unavailable("locked").code(),
            StoreErrorCode::BackendUnavailable
        );
        assert_eq!(
            StoreError::encoding("bad utf-8").code(),
            StoreErrorCode::EncodingFailure
        );
        assert_eq!(StoreError::unknown("boom").code(), StoreErrorCode::Unknown);
        assert_eq!(StoreErrorCode::Unknown as i32, 9999);
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::unavailable("device locked");
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), "credential store unavailable: device locked");
    }

    #[test]
    fn test_cause_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::unavailable(io);

        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "denied");
        assert!(err.backend_error().downcast_ref::<std::io::Error>().is_some());
    }
}
