//! CLI command implementations.

pub mod state;
pub mod trigger;
pub mod watch;

use sync_types::SyncState;

/// One-line human-readable rendering of a state.
pub fn describe(state: &SyncState) -> String {
    match state {
        SyncState::Idle => "idle".to_string(),
        SyncState::Syncing => "syncing".to_string(),
        SyncState::Synced(result) => format!(
            "synced ({} records, {} conflicts resolved)",
            result.records_synced, result.conflicts_resolved
        ),
        SyncState::Error(message) => format!("error: {}", message),
        SyncState::Offline => "offline".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_types::{SyncResult, SyncScope};

    #[test]
    fn describe_states() {
        assert_eq!(describe(&SyncState::Idle), "idle");
        assert_eq!(describe(&SyncState::Syncing), "syncing");
        assert_eq!(describe(&SyncState::Offline), "offline");
        assert_eq!(
            describe(&SyncState::Error("upstream failed".into())),
            "error: upstream failed"
        );
        assert_eq!(
            describe(&SyncState::Synced(SyncResult::new(SyncScope::all(), 3, 1))),
            "synced (3 records, 1 conflicts resolved)"
        );
    }
}
