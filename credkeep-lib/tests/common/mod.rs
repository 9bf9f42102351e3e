//! Shared test doubles for store integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use credkeep_lib::backend::{CredentialBackend, FailureKind, MemoryBackend};
use credkeep_lib::store::StoreResult;
use credkeep_lib::{KeyValueStore, StoreError, StoreScope};

/// Native error of [`ScriptedBackend`].
#[derive(Debug, thiserror::Error)]
#[error("scripted backend failure ({kind:?})")]
pub struct ScriptedError {
    pub kind: FailureKind,
}

/// Backend that counts every call and can be told to fail.
#[derive(Debug, Default)]
pub struct CountingBackend {
    inner: MemoryBackend,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub deletes: AtomicUsize,
    fail_with: Option<FailureKind>,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(kind: FailureKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.reads.load(Ordering::SeqCst),
            self.writes.load(Ordering::SeqCst),
            self.deletes.load(Ordering::SeqCst),
        )
    }

    fn check(&self) -> Result<(), ScriptedError> {
        match self.fail_with {
            Some(kind) => Err(ScriptedError { kind }),
            None => Ok(()),
        }
    }
}

impl CredentialBackend for CountingBackend {
    type Error = ScriptedError;

    fn read(&self, scope: &StoreScope, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .inner
            .read(scope, key)
            .expect("memory backend should not fail"))
    }

    fn write(&self, scope: &StoreScope, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner
            .write(scope, key, value)
            .expect("memory backend should not fail");
        Ok(())
    }

    fn delete(&self, scope: &StoreScope, key: &str) -> Result<(), Self::Error> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner
            .delete(scope, key)
            .expect("memory backend should not fail");
        Ok(())
    }

    fn classify(error: &Self::Error) -> FailureKind {
        error.kind
    }
}

/// Store whose every operation fails with the given error builder.
pub struct FailingStore {
    make_error: fn() -> StoreError,
    pub calls: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn unavailable() -> Self {
        Self {
            make_error: || StoreError::unavailable("device locked"),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn encoding() -> Self {
        Self {
            make_error: || StoreError::encoding("value too large"),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }

    fn set(&self, _key: &str, _value: Option<&[u8]>) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }
}
