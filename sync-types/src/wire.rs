//! Wire contract between a remote-delegating client and the coordination
//! endpoint.
//!
//! The contract is deliberately small:
//!
//! ```text
//! POST /sync/trigger          {} | {"entityType": "<label>"}
//!   2xx  {"scope": "<label>", "recordsSynced": n, "conflictsResolved": n}
//!   else {"message": "<reason>"}
//!
//! GET  /sync/state[?entityType=<label>]
//!   2xx  {"state": "Idle" | "Syncing" | "Synced" | "Offline" | <other>}
//! ```
//!
//! Both request builders and both response parsers live here so that every
//! transport produces byte-identical requests and interprets responses the
//! same way. Filters are a client-local concept and never go on the wire.
//!
//! Parsing is lenient: a malformed or missing field degrades to its default
//! instead of failing, because a half-understood success is still a success.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{SyncResult, SyncScope, SyncState};

/// Path of the trigger endpoint, relative to the base address.
pub const TRIGGER_PATH: &str = "/sync/trigger";

/// Path of the state endpoint, relative to the base address.
pub const STATE_PATH: &str = "/sync/state";

/// Query parameter carrying the entity type on state requests.
pub const ENTITY_TYPE_PARAM: &str = "entityType";

/// Interpreted response to a trigger request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResponse {
    /// The endpoint accepted and completed the sync.
    Success {
        /// Entity type the endpoint reports having synced (may be blank).
        scope: String,
        /// Number of records synced.
        records_synced: u32,
        /// Number of conflicts resolved.
        conflicts_resolved: u32,
    },
    /// The endpoint reported a failure.
    Failure {
        /// Reason reported by the endpoint (may be blank).
        message: String,
    },
}

/// Body of a trigger request.
pub fn trigger_request_body(scope: &SyncScope) -> String {
    if scope.is_all() {
        return "{}".to_string();
    }
    let mut body = Map::new();
    body.insert(
        ENTITY_TYPE_PARAM.to_string(),
        Value::String(scope.entity_type().to_string()),
    );
    Value::Object(body).to_string()
}

/// Path (with query) of a state request.
pub fn state_path(scope: &SyncScope) -> String {
    if scope.is_all() {
        return STATE_PATH.to_string();
    }
    format!(
        "{}?{}={}",
        STATE_PATH,
        ENTITY_TYPE_PARAM,
        urlencoding::encode(scope.entity_type())
    )
}

/// Interpret a trigger response.
///
/// `requested` supplies the default scope label when the body omits one.
pub fn parse_trigger_response(status: u16, body: &str, requested: &SyncScope) -> TriggerResponse {
    let root = parse_object(body);

    if is_success(status) {
        return TriggerResponse::Success {
            scope: string_field(root.as_ref(), "scope")
                .unwrap_or_else(|| requested.entity_type().to_string()),
            records_synced: count_field(root.as_ref(), "recordsSynced"),
            conflicts_resolved: count_field(root.as_ref(), "conflictsResolved"),
        };
    }

    TriggerResponse::Failure {
        message: string_field(root.as_ref(), "message").unwrap_or_else(|| format!("HTTP {}", status)),
    }
}

/// Interpret a state response.
///
/// Poll responses never carry counts, so `Synced` maps to a zero-valued
/// result for the polled scope.
pub fn parse_state_response(status: u16, body: &str, scope: &SyncScope) -> SyncState {
    if !is_success(status) {
        return SyncState::Error(format!("HTTP {}", status));
    }

    let label = string_field(parse_object(body).as_ref(), "state")
        .unwrap_or_else(|| SyncState::Error(String::new()).label().to_string());

    match label.as_str() {
        "Idle" => SyncState::Idle,
        "Syncing" => SyncState::Syncing,
        "Synced" => SyncState::Synced(SyncResult::empty(scope.clone())),
        "Offline" => SyncState::Offline,
        other => SyncState::Error(format!("Backend reported state={}", other)),
    }
}

fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

fn parse_object(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn string_field(root: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    match root?.get(key)? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn count_field(root: Option<&Map<String, Value>>, key: &str) -> u32 {
    let value = match root.and_then(|r| r.get(key)) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

/// Trigger request body as received by the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    /// Entity type to sync; absent or blank means everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl TriggerRequest {
    /// Resolve the requested scope.
    pub fn into_scope(self) -> SyncScope {
        SyncScope::from_label(self.entity_type.as_deref())
    }
}

/// Success body sent by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSuccessBody {
    /// Always `"ok"`.
    pub status: String,
    /// Entity type that was synced.
    pub scope: String,
    /// Number of records synced.
    pub records_synced: u32,
    /// Number of conflicts resolved.
    pub conflicts_resolved: u32,
}

impl From<&SyncResult> for TriggerSuccessBody {
    fn from(result: &SyncResult) -> Self {
        Self {
            status: "ok".to_string(),
            scope: result.scope.entity_type().to_string(),
            records_synced: result.records_synced,
            conflicts_resolved: result.conflicts_resolved,
        }
    }
}

/// Failure body sent by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFailureBody {
    /// Always `"error"`.
    pub status: String,
    /// Human-readable reason.
    pub message: String,
}

impl TriggerFailureBody {
    /// Create a failure body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// State body sent by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBody {
    /// Wire label of the state.
    pub state: String,
}

impl From<&SyncState> for StateBody {
    fn from(state: &SyncState) -> Self {
        Self {
            state: state.label().to_string(),
        }
    }
}
