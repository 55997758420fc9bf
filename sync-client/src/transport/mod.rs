//! Transport abstraction for the remote-delegating engine.
//!
//! This module provides a pluggable transport layer that abstracts the
//! mechanism used to reach the remote coordination endpoint.
//!
//! # Design
//!
//! The transport trait is async and request-oriented:
//! - `trigger()` asks the endpoint to sync a scope
//! - `state()` asks the endpoint for a scope's current state
//!
//! Every implementation builds its requests with [`sync_types::wire`] and
//! hands responses back to it for parsing, so two transports given the same
//! scope send byte-identical requests. No retries happen at this layer.
//!
//! # Example
//!
//! ```ignore
//! let transport = HttpTransport::new("http://localhost:8081/api", connect, request)?;
//! let response = transport.trigger(&SyncScope::new("feature_flag")).await?;
//! ```

mod http;
mod mock;
mod service;

pub use http::HttpTransport;
pub use mock::MockTransport;
pub use service::ServiceTransport;

use async_trait::async_trait;
use sync_types::{SyncScope, SyncState, TriggerResponse};
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The call did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("invalid response body: {0}")]
    Body(String),
}

/// Transport trait for reaching the remote coordination endpoint.
///
/// Implementations handle the underlying call mechanism (native HTTP,
/// in-process service, mock).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Ask the endpoint to sync `scope`.
    ///
    /// A failure reported by the endpoint is a successful call returning
    /// [`TriggerResponse::Failure`]; `Err` means the call itself failed.
    async fn trigger(&self, scope: &SyncScope) -> Result<TriggerResponse, TransportError>;

    /// Ask the endpoint for the current state of `scope`.
    async fn state(&self, scope: &SyncScope) -> Result<SyncState, TransportError>;
}
