//! Observable sync status values.

use crate::SyncScope;

/// Outcome of a completed sync attempt.
///
/// Only produced on success; failures are reported through
/// [`SyncState::Error`] and [`crate::SyncError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncResult {
    /// The scope that was synchronized.
    pub scope: SyncScope,
    /// Number of records moved in this attempt.
    pub records_synced: u32,
    /// Number of conflicts resolved in this attempt.
    pub conflicts_resolved: u32,
}

impl SyncResult {
    /// Create a new result.
    pub fn new(scope: SyncScope, records_synced: u32, conflicts_resolved: u32) -> Self {
        Self {
            scope,
            records_synced,
            conflicts_resolved,
        }
    }

    /// A zero-valued result for a scope.
    pub fn empty(scope: SyncScope) -> Self {
        Self::new(scope, 0, 0)
    }
}

/// Latest known sync status of a scope.
///
/// Exactly one state exists per scope at any instant; this is the latest
/// status, not a history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SyncState {
    /// Untouched or reset.
    #[default]
    Idle,
    /// An attempt is in progress.
    Syncing,
    /// The last attempt succeeded.
    Synced(SyncResult),
    /// The last attempt failed, with a human-readable reason.
    Error(String),
    /// Connectivity is unavailable; the scope may be queued for retry.
    Offline,
}

impl SyncState {
    /// Wire label for this state.
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Idle => "Idle",
            SyncState::Syncing => "Syncing",
            SyncState::Synced(_) => "Synced",
            SyncState::Error(_) => "Error",
            SyncState::Offline => "Offline",
        }
    }

    /// True for the snapshot states left behind by a finished attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncState::Synced(_) | SyncState::Error(_))
    }
}
