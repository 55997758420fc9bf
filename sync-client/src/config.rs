//! Client configuration.
//!
//! Configuration is loaded from a TOML file; every key is optional:
//!
//! ```toml
//! mode = "remote"                       # or "embedded"
//! base_url = "http://localhost:8081/api"
//! poll_interval_ms = 1000
//! connect_timeout_ms = 3000
//! request_timeout_ms = 10000
//! ```

use crate::factory::EngineMode;
use crate::remote::MIN_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default base URL of the remote coordination endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

/// Which engine a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    /// In-process engine with an offline queue.
    Embedded,
    /// Engine delegating to the remote coordination endpoint.
    #[default]
    Remote,
}

/// Configuration for engines and transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Engine selection.
    #[serde(default)]
    pub mode: ModeKind,
    /// Base URL of the remote coordination endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Delay between state polls in milliseconds (default: 1000).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Connect timeout in milliseconds (default: 3000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds (default: 10000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_connect_timeout_ms() -> u64 {
    3000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::default(),
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
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

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        if config.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                message: "poll_interval_ms must be greater than 0".to_string(),
            });
        }

        Ok(config)
    }

    /// Select the embedded engine.
    pub fn embedded(mut self) -> Self {
        self.mode = ModeKind::Embedded;
        self
    }

    /// Select the remote engine at `base_url`.
    pub fn remote(mut self, base_url: &str) -> Self {
        self.mode = ModeKind::Remote;
        self.base_url = base_url.to_string();
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = duration_ms(interval);
        self
    }

    /// Set the connect and whole-request timeouts.
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout_ms = duration_ms(connect);
        self.request_timeout_ms = duration_ms(request);
        self
    }

    /// Delay between state polls, never shorter than [`MIN_POLL_INTERVAL`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms).max(MIN_POLL_INTERVAL)
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Whole-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// The engine mode this configuration selects.
    pub fn engine_mode(&self) -> EngineMode {
        match self.mode {
            ModeKind::Embedded => EngineMode::Embedded,
            ModeKind::Remote => EngineMode::Remote {
                base_url: self.base_url.clone(),
            },
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
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
    /// A setting is out of range.
    #[error("invalid value in config file {path}: {message}")]
    InvalidValue {
        /// Path to the configuration file.
        path: PathBuf,
        /// What is wrong with the value.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.mode, ModeKind::Remote);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
mode = "embedded"
base_url = "https://sync.example.com/api"
poll_interval_ms = 250
connect_timeout_ms = 500
request_timeout_ms = 2000
"#;

        let config: ClientConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.mode, ModeKind::Embedded);
        assert_eq!(config.base_url, "https://sync.example.com/api");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.connect_timeout(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(toml::from_str::<ClientConfig>(r#"mode = "hybrid""#).is_err());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ClientConfig::default()
            .embedded()
            .with_poll_interval(Duration::from_millis(50))
            .with_timeouts(Duration::from_millis(100), Duration::from_millis(900));

        assert_eq!(config.engine_mode(), EngineMode::Embedded);
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.connect_timeout_ms, 100);
        assert_eq!(config.request_timeout_ms, 900);

        let config = config.remote("http://10.0.0.2:8081/api");
        assert_eq!(
            config.engine_mode(),
            EngineMode::Remote {
                base_url: "http://10.0.0.2:8081/api".into()
            }
        );
    }

    #[test]
    fn config_loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_ms = 42").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.poll_interval_ms, 42);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_ms = 0").unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn poll_interval_has_floor() {
        let config = ClientConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.poll_interval(), MIN_POLL_INTERVAL);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_ms = \"soon\"").unwrap();

        let result = ClientConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
