//! Error types for sync-client setup.

use crate::config::ConfigError;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors raised while building engines and transports.
///
/// Sync attempts themselves report [`sync_types::SyncError`]; this type only
/// covers getting an engine ready.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration (bad base URL, unreadable config file, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport construction failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}
