//! Best-effort façade over a strict store.
//!
//! Store implementations always report failures. [`LenientStore`] is the one
//! place where failures are downgraded: a failed read becomes "absent", a
//! failed write becomes a no-op, and each failure is logged once.

use tracing::error;

use crate::store::KeyValueStore;

/// Wrapper that logs store errors and returns defaults instead.
#[derive(Debug)]
pub struct LenientStore<S> {
    inner: S,
    component: &'static str,
}

impl<S: KeyValueStore> LenientStore<S> {
    /// Wrap `inner`; `component` tags every log event.
    pub fn new(inner: S, component: &'static str) -> Self {
        Self { inner, component }
    }

    /// Read `key`, treating any failure as absent.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.inner.get(key) {
            Ok(value) => value,
            Err(err) => {
                error!(
                    component = self.component,
                    key,
                    code = ?err.code(),
                    error = %err,
                    "failed to read from credential store"
                );
                None
            }
        }
    }

    /// Write or delete `key`; failures are logged and dropped.
    pub fn set(&self, key: &str, value: Option<&[u8]>) {
        if let Err(err) = self.inner.set(key, value) {
            error!(
                component = self.component,
                key,
                code = ?err.code(),
                error = %err,
                "failed to write to credential store"
            );
        }
    }

    /// Get the component tag used in log events.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Borrow the strict store, for callers that need to see errors.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the strict store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}
