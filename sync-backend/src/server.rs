//! Server assembly and startup.

use crate::config::Config;
use crate::error::Result;
use crate::http::{build_router, health, AppState};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use sync_client::{EmbeddedEngine, ManualConnectivity};
use tracing::info;

/// A configured backend: the router plus the handle controlling the
/// engine's connectivity.
pub struct Backend {
    config: Config,
    connectivity: Arc<ManualConnectivity>,
    engine: Arc<EmbeddedEngine>,
}

impl Backend {
    /// Build the backend described by `config`.
    pub fn new(config: Config) -> Self {
        let connectivity = Arc::new(ManualConnectivity::new(!config.sync.start_offline));
        let engine = Arc::new(EmbeddedEngine::new(connectivity.clone()));
        Self {
            config,
            connectivity,
            engine,
        }
    }

    /// Connectivity reported to the engine.
    pub fn connectivity(&self) -> &Arc<ManualConnectivity> {
        &self.connectivity
    }

    /// The engine serving requests.
    pub fn engine(&self) -> &Arc<EmbeddedEngine> {
        &self.engine
    }

    /// The HTTP router for this backend.
    pub fn router(&self) -> Router {
        build_router(
            AppState::new(self.engine.clone()),
            &self.config.server.api_prefix,
        )
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        health::init_start_time();

        let listener = tokio::net::TcpListener::bind(&self.config.server.bind_address).await?;
        info!(
            "sync-backend listening on {} (routes under {})",
            listener.local_addr()?,
            self.config.server.api_prefix
        );
        if self.config.sync.start_offline {
            info!("Starting with connectivity unavailable; triggers will be queued");
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server shutdown complete");
        Ok(())
    }
}
