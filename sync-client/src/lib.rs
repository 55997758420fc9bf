//! # sync-client
//!
//! Sync engines for AppFactory applications.
//!
//! This is the library that applications use to run and observe sync.
//!
//! ## Features
//!
//! - **Embedded engine**: in-process sync with an offline queue that is
//!   flushed as one batch when connectivity returns
//! - **Remote engine**: delegates to a coordination endpoint and polls it
//!   for state
//! - **Transport Abstraction**: Pluggable transport layer (HTTP, in-process
//!   service, mock)
//! - **Factory**: picks an engine from configuration
//!
//! ## Example
//!
//! ```ignore
//! use sync_client::{create_engine, ClientConfig};
//! use sync_types::SyncScope;
//!
//! let config = ClientConfig::from_file(Path::new("sync.toml"))?;
//! let engine = create_engine(config.engine_mode(), &config)?;
//!
//! // Run a sync
//! let result = engine.sync_now(&SyncScope::new("feature_flag")).await?;
//!
//! // Watch its state
//! let mut states = engine.observe_sync_state(&SyncScope::new("feature_flag"));
//! while let Some(state) = states.next().await { /* ... */ }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connectivity;
pub mod embedded;
pub mod engine;
pub mod error;
pub mod factory;
pub mod remote;
pub mod transport;

pub use config::{ClientConfig, ConfigError, ModeKind, DEFAULT_BASE_URL};
pub use connectivity::{Connectivity, ManualConnectivity};
pub use embedded::EmbeddedEngine;
pub use engine::SyncEngine;
pub use error::ClientError;
pub use factory::{create_engine, create_engine_with_probe, EngineMode};
pub use remote::{RemoteEngine, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
pub use transport::{HttpTransport, MockTransport, ServiceTransport, Transport, TransportError};
