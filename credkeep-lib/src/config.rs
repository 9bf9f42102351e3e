//! Store configuration and composition.
//!
//! [`StoreConfig`] picks the store variant at composition time. It loads from
//! a JSON file and/or environment variables:
//!
//! | Variable                | Field          |
//! |-------------------------|----------------|
//! | `CREDKEEP_SERVICE`      | `service`      |
//! | `CREDKEEP_ACCESS_GROUP` | `access_group` |
//! | `CREDKEEP_BACKEND`      | `backend`      |
//! | `CREDKEEP_DIR`          | `file_dir`     |

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::push_token::PUSH_TOKEN_SERVICE;
use crate::scope::StoreScope;
use crate::store::{InMemoryStore, KeyValueStore, KeychainStore};

/// Environment variable overriding the service identifier.
pub const ENV_SERVICE: &str = "CREDKEEP_SERVICE";
/// Environment variable overriding the access group.
pub const ENV_ACCESS_GROUP: &str = "CREDKEEP_ACCESS_GROUP";
/// Environment variable overriding the backend kind.
pub const ENV_BACKEND: &str = "CREDKEEP_BACKEND";
/// Environment variable overriding the file store directory.
pub const ENV_DIR: &str = "CREDKEEP_DIR";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown backend '{0}' (expected keychain, memory or file)")]
    UnknownBackend(String),
    #[error("the file backend needs a directory (file_dir or {ENV_DIR})")]
    MissingFileDir,
    #[error("the file backend needs a passphrase")]
    MissingPassphrase,
    #[error("the file backend requires the `file-storage` feature")]
    FileStorageDisabled,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store variant selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Platform credential store.
    #[default]
    Keychain,
    /// Process-local memory; nothing survives a restart.
    Memory,
    /// Encrypted files (`file-storage` feature).
    File,
}

impl BackendKind {
    /// Get the name used in config files and env vars.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keychain => "keychain",
            Self::Memory => "memory",
            Self::File => "file",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keychain" => Ok(Self::Keychain),
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Which store to build and which scope it serves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Service identifier of the scope.
    pub service: String,

    /// Optional sharing group of the scope.
    #[serde(default)]
    pub access_group: Option<String>,

    /// Store variant.
    #[serde(default)]
    pub backend: BackendKind,

    /// Root directory for the file backend.
    #[serde(default)]
    pub file_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Keychain configuration for a service.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            access_group: None,
            backend: BackendKind::default(),
            file_dir: None,
        }
    }

    /// Default configuration of the push token store.
    pub fn push_token() -> Self {
        Self::new(PUSH_TOKEN_SERVICE)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Push token defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::push_token().apply_env()
    }

    /// Apply `CREDKEEP_*` environment overrides.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_vars(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(service) = var(ENV_SERVICE) {
            self.service = service;
        }
        if let Some(group) = var(ENV_ACCESS_GROUP) {
            self.access_group = Some(group);
        }
        if let Some(backend) = var(ENV_BACKEND) {
            self.backend = backend.parse()?;
        }
        if let Some(dir) = var(ENV_DIR) {
            self.file_dir = Some(PathBuf::from(dir));
        }
        Ok(self)
    }

    /// The scope described by this configuration.
    pub fn scope(&self) -> StoreScope {
        let scope = StoreScope::new(self.service.clone());
        match &self.access_group {
            Some(group) => scope.with_access_group(group.clone()),
            None => scope,
        }
    }

    /// Build the configured store.
    ///
    /// `passphrase` is only used by the file backend.
    pub fn open(&self, passphrase: Option<&[u8]>) -> Result<Arc<dyn KeyValueStore>, ConfigError> {
        tracing::debug!(
            backend = self.backend.as_str(),
            scope = %self.scope(),
            "opening credential store"
        );
        match self.backend {
            BackendKind::Keychain => Ok(Arc::new(KeychainStore::platform(self.scope()))),
            BackendKind::Memory => Ok(Arc::new(InMemoryStore::new())),
            BackendKind::File => self.open_file(passphrase),
        }
    }

    #[cfg(feature = "file-storage")]
    fn open_file(&self, passphrase: Option<&[u8]>) -> Result<Arc<dyn KeyValueStore>, ConfigError> {
        let dir = self.file_dir.as_ref().ok_or(ConfigError::MissingFileDir)?;
        let passphrase = passphrase.ok_or(ConfigError::MissingPassphrase)?;
        let store =
            crate::store::EncryptedFileStore::open_with_passphrase(dir, self.scope(), passphrase)?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "file-storage"))]
    fn open_file(&self, _passphrase: Option<&[u8]>) -> Result<Arc<dyn KeyValueStore>, ConfigError> {
        Err(ConfigError::FileStorageDisabled)
    }
}
