//! HTTP endpoints for sync-backend.
//!
//! Serves the sync wire contract under a configurable prefix, plus a health
//! check at the root.

pub mod health;
pub mod sync;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use sync_client::SyncEngine;
use sync_types::wire;
use tower_http::trace::TraceLayer;

pub use health::HealthStatus;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<dyn SyncEngine>,
}

impl AppState {
    /// Serve requests from `engine`.
    pub fn new(engine: Arc<dyn SyncEngine>) -> Self {
        Self { engine }
    }

    /// The engine behind the routes.
    pub fn engine(&self) -> &Arc<dyn SyncEngine> {
        &self.engine
    }
}

/// Build the HTTP router with all endpoints.
///
/// Sync routes are mounted under `api_prefix`; an empty prefix (or `/`)
/// mounts them at the root.
pub fn build_router(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new()
        .route(wire::TRIGGER_PATH, post(sync::trigger_handler))
        .route(wire::STATE_PATH, get(sync::state_handler));

    let prefix = api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        api
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, api)
    } else {
        Router::new().nest(&format!("/{}", prefix), api)
    };

    router
        .route("/health", get(health::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
