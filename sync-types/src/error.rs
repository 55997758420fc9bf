//! Error types for sync coordination.

use thiserror::Error;

/// Message used when a sync attempt is skipped for lack of connectivity.
pub const OFFLINE_MESSAGE: &str = "Device is offline; sync skipped";

/// Errors returned by sync engines.
///
/// Messages are already human-readable and are shown to users as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A collaborator outside the engine failed: connectivity is gone, the
    /// transport threw, or the remote endpoint reported a failure.
    #[error("{0}")]
    ExternalService(String),
}

impl SyncError {
    /// Create an external-service error.
    pub fn external(message: impl Into<String>) -> Self {
        SyncError::ExternalService(message.into())
    }

    /// The error returned when connectivity is unavailable.
    pub fn offline() -> Self {
        Self::external(OFFLINE_MESSAGE)
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            SyncError::ExternalService(message) => message,
        }
    }
}
