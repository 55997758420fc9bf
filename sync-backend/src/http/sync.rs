//! Sync trigger and state endpoints.
//!
//! The server side of the wire contract in [`sync_types::wire`]:
//! - `POST /sync/trigger` runs a sync and answers 200 or 502
//! - `GET /sync/state` reports the current state label of a scope

use super::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sync_client::SyncEngine;
use sync_types::wire::{StateBody, TriggerFailureBody, TriggerRequest, TriggerSuccessBody};
use sync_types::SyncScope;
use tracing::{debug, info, warn};

/// Query parameters of a state request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateQuery {
    /// Entity type to report; absent or blank means everything.
    pub entity_type: Option<String>,
}

/// Trigger handler.
///
/// A missing or unparseable body syncs everything rather than failing.
pub async fn trigger_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = if body.is_empty() {
        TriggerRequest::default()
    } else {
        serde_json::from_slice::<TriggerRequest>(&body).unwrap_or_else(|e| {
            debug!("Ignoring unparseable trigger body: {}", e);
            TriggerRequest::default()
        })
    };
    let scope = request.into_scope();

    match state.engine().sync_now(&scope).await {
        Ok(result) => {
            info!(
                "Synced {}: {} records, {} conflicts",
                scope, result.records_synced, result.conflicts_resolved
            );
            (StatusCode::OK, Json(TriggerSuccessBody::from(&result))).into_response()
        }
        Err(e) => {
            warn!("Sync trigger failed for {}: {}", scope, e);
            (StatusCode::BAD_GATEWAY, Json(TriggerFailureBody::new(e.message()))).into_response()
        }
    }
}

/// State handler.
///
/// Reports the latest known state of the scope. Asking about a scope never
/// seen before answers `Idle` without the engine starting to track it.
pub async fn state_handler(
    State(state): State<AppState>,
    Query(query): Query<StateQuery>,
) -> Json<StateBody> {
    let scope = SyncScope::from_label(query.entity_type.as_deref());
    let current = state.engine().latest_state(&scope).await;

    Json(StateBody::from(&current))
}
