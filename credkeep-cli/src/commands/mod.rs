//! CLI command implementations

pub mod config;
pub mod delete;
pub mod get;
pub mod push_token;
pub mod set;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use credkeep_lib::{BackendKind, KeyValueStore, StoreConfig};

/// Environment variable holding the file backend passphrase.
pub const PASSPHRASE_ENV: &str = "CREDKEEP_PASSPHRASE";

/// Store settings given on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub service: Option<String>,
    pub access_group: Option<String>,
    pub backend: Option<String>,
    pub dir: Option<PathBuf>,
}

/// Resolved configuration shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: StoreConfig,
    pub verbose: bool,
}

impl Context {
    /// Layer config file, environment and flags, in increasing priority.
    pub fn resolve(overrides: Overrides, verbose: bool) -> Result<Self> {
        let base = match &overrides.config {
            Some(path) => StoreConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => StoreConfig::push_token(),
        };
        let mut config = base.apply_env()?;

        if let Some(service) = overrides.service {
            config.service = service;
        }
        if let Some(group) = overrides.access_group {
            config.access_group = Some(group);
        }
        if let Some(backend) = overrides.backend {
            config.backend = backend.parse()?;
        }
        if let Some(dir) = overrides.dir {
            config.file_dir = Some(dir);
        }

        if config.backend == BackendKind::File && config.file_dir.is_none() {
            config.file_dir = dirs::data_local_dir().map(|d| d.join("credkeep"));
        }

        tracing::debug!(?config, "resolved store configuration");
        Ok(Self { config, verbose })
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let passphrase = match self.config.backend {
            BackendKind::File => Some(passphrase()?),
            BackendKind::Memory => {
                crate::ui::warning("memory backend: nothing is kept after this command exits");
                None
            }
            BackendKind::Keychain => None,
        };

        self.config
            .open(passphrase.as_deref().map(str::as_bytes))
            .context("opening credential store")
    }
}

/// Passphrase from the environment, or prompted for on the terminal.
fn passphrase() -> Result<String> {
    match std::env::var(PASSPHRASE_ENV) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => rpassword::prompt_password("Store passphrase: ")
            .with_context(|| format!("no passphrase given (set {})", PASSPHRASE_ENV)),
    }
}

/// Decode a command-line value as hex or UTF-8 text.
pub fn parse_value(value: &str, text: bool) -> Result<Vec<u8>> {
    if text {
        return Ok(value.as_bytes().to_vec());
    }
    hex::decode(value.trim()).context("value must be hex (use --text for UTF-8)")
}
