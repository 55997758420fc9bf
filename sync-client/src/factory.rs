//! Engine factory.
//!
//! The composition root: picks the embedded or the remote engine and wires
//! it with the right transport or connectivity probe. Nothing else happens
//! here.

use crate::config::ClientConfig;
use crate::connectivity::Connectivity;
use crate::embedded::EmbeddedEngine;
use crate::engine::SyncEngine;
use crate::error::ClientError;
use crate::remote::RemoteEngine;
use crate::transport::{HttpTransport, TransportError};
use std::sync::Arc;
use tracing::info;

/// Which engine to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMode {
    /// Sync in-process, queueing attempts made while offline.
    Embedded,
    /// Delegate to the coordination endpoint at `base_url`.
    Remote {
        /// Base URL of the endpoint (e.g. `http://localhost:8081/api`).
        base_url: String,
    },
}

/// Build an engine for `mode`.
///
/// The embedded engine considers the device always online; use
/// [`create_engine_with_probe`] to supply a connectivity probe.
///
/// # Errors
///
/// Returns [`ClientError::Config`] if the remote base URL is invalid or the
/// HTTP client cannot be built.
pub fn create_engine(
    mode: EngineMode,
    config: &ClientConfig,
) -> Result<Arc<dyn SyncEngine>, ClientError> {
    create_engine_with_probe(mode, config, Arc::new(|| true))
}

/// Build an engine for `mode`, with `connectivity` backing the embedded
/// engine's offline detection.
///
/// The probe is ignored in remote mode; the endpoint owns connectivity there.
pub fn create_engine_with_probe(
    mode: EngineMode,
    config: &ClientConfig,
    connectivity: Arc<dyn Connectivity>,
) -> Result<Arc<dyn SyncEngine>, ClientError> {
    match mode {
        EngineMode::Embedded => {
            info!("Using embedded sync engine");
            Ok(Arc::new(EmbeddedEngine::new(connectivity)))
        }
        EngineMode::Remote { base_url } => {
            let transport = HttpTransport::new(
                &base_url,
                config.connect_timeout(),
                config.request_timeout(),
            )
            .map_err(|e| match e {
                TransportError::Request(reason) => ClientError::Config(reason),
                other => ClientError::Transport(other),
            })?;

            info!("Using remote sync engine at {}", transport.base_url());
            Ok(Arc::new(
                RemoteEngine::new(transport).with_poll_interval(config.poll_interval()),
            ))
        }
    }
}
