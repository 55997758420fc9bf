//! Configuration loading for sync-backend.
//!
//! Configuration is loaded from a TOML file (default: `backend.toml`). Every
//! section and key is optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for sync-backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Sync engine configuration.
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server (default: 0.0.0.0:8081).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Path prefix the sync routes are mounted under (default: /api).
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

/// Sync engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncConfig {
    /// Start with connectivity reported as unavailable (default: false).
    ///
    /// Every trigger is then queued and answered with 502 until
    /// connectivity is restored.
    #[serde(default)]
    pub start_offline: bool,
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0:8081".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:8081");
        assert_eq!(config.server.api_prefix, "/api");
        assert!(!config.sync.start_offline);
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[server]
bind_address = "127.0.0.1:9000"
api_prefix = "/v2"

[sync]
start_offline = true
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.api_prefix, "/v2");
        assert!(config.sync.start_offline);
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let config: Config = toml::from_str("[server]\n").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8081");
        assert_eq!(config.server.api_prefix, "/api");

        let config: Config = toml::from_str("").unwrap();
        assert!(!config.sync.start_offline);
    }

    #[test]
    fn config_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sync]\nstart_offline = true").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.sync.start_offline);
    }

    #[test]
    fn unreadable_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
