//! The engine abstraction shared by the embedded and remote engines.

use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt};
use sync_types::{SyncError, SyncResult, SyncScope, SyncState};

/// A synchronization engine.
///
/// Callers use this trait without knowing whether sync runs in-process or
/// is delegated to a remote coordination endpoint.
#[async_trait]
pub trait SyncEngine: Send + Sync {
    /// Run a sync attempt for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ExternalService`] when connectivity is
    /// unavailable or the remote endpoint cannot complete the attempt.
    async fn sync_now(&self, scope: &SyncScope) -> Result<SyncResult, SyncError>;

    /// Observe the state of `scope`.
    ///
    /// The stream yields the last known state immediately and then each
    /// update. Dropping the stream ends the observation.
    fn observe_sync_state(&self, scope: &SyncScope) -> BoxStream<'static, SyncState>;

    /// Latest known state of `scope`: the value an observation yields first.
    ///
    /// Engines that can answer without registering an observer override
    /// this.
    async fn latest_state(&self, scope: &SyncScope) -> SyncState {
        self.observe_sync_state(scope)
            .next()
            .await
            .unwrap_or_default()
    }

    /// Scopes waiting for connectivity, in flush order.
    ///
    /// Engines without an offline queue report none.
    fn pending_scopes(&self) -> Vec<SyncScope> {
        Vec::new()
    }
}
