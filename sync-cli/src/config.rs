//! Configuration resolution for sync-cli.
//!
//! The engine configuration comes from, in order of precedence:
//! 1. command-line flags (`--embedded`, `--base-url`)
//! 2. the file named by `--config`
//! 3. `sync.toml` in the working directory, if present
//! 4. built-in defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use sync_client::ClientConfig;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "sync.toml";

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// Remote endpoint base URL.
    pub base_url: Option<String>,
    /// Force the embedded engine.
    pub embedded: bool,
}

/// Resolve the client configuration.
///
/// `cwd` is the directory searched for [`DEFAULT_CONFIG_FILE`].
pub fn resolve(overrides: &Overrides, cwd: &Path) -> Result<ClientConfig> {
    let mut config = match &overrides.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let fallback = cwd.join(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                ClientConfig::from_file(&fallback).context("Invalid sync.toml")?
            } else {
                ClientConfig::default()
            }
        }
    };

    if let Some(base_url) = &overrides.base_url {
        config = config.remote(base_url);
    }
    if overrides.embedded {
        config = config.embedded();
    }

    Ok(config)
}
