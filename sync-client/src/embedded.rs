//! Embedded (in-process) sync engine.
//!
//! Best-effort sync for a single process. Attempts made while connectivity
//! is unavailable are parked in a pending queue and flushed together with
//! the next attempt that finds the device online.
//!
//! # State
//!
//! Each scope's state lives in a `tokio::sync::watch` channel, so a new
//! observer immediately sees the latest value and then every later one.
//! Channels are created lazily on first touch and never removed.
//!
//! All mutation (the connectivity check, the pending queue and state
//! publication) happens under one lock, so a flush never interleaves with
//! another attempt being queued.

use crate::connectivity::Connectivity;
use crate::engine::SyncEngine;
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use sync_core::PendingScopes;
use sync_types::{SyncError, SyncResult, SyncScope, SyncState};
use tokio::sync::watch;
use tracing::{debug, info};

/// In-process engine with an offline queue.
pub struct EmbeddedEngine {
    connectivity: Arc<dyn Connectivity>,
    inner: Mutex<EngineInner>,
}

#[derive(Default)]
struct EngineInner {
    states: HashMap<SyncScope, watch::Sender<SyncState>>,
    pending: PendingScopes,
}

impl EngineInner {
    fn channel(&mut self, scope: &SyncScope) -> &watch::Sender<SyncState> {
        self.states
            .entry(scope.clone())
            .or_insert_with(|| watch::channel(SyncState::Idle).0)
    }

    fn publish(&mut self, scope: &SyncScope, state: SyncState) {
        self.channel(scope).send_replace(state);
    }
}

impl EmbeddedEngine {
    /// Create an engine consulting `connectivity` before every attempt.
    pub fn new(connectivity: Arc<dyn Connectivity>) -> Self {
        Self {
            connectivity,
            inner: Mutex::new(EngineInner::default()),
        }
    }

    /// Create an engine that always considers the device online.
    pub fn always_online() -> Self {
        Self::new(Arc::new(|| true))
    }

    /// Stored state of `scope`, without the offline override applied by
    /// observation.
    pub fn current_state(&self, scope: &SyncScope) -> SyncState {
        self.inner
            .lock()
            .states
            .get(scope)
            .map(|tx| tx.borrow().clone())
            .unwrap_or_default()
    }

    fn run(&self, scope: &SyncScope) -> Result<SyncResult, SyncError> {
        let mut inner = self.inner.lock();

        if !self.connectivity.is_online() {
            if inner.pending.enqueue(scope.clone()) {
                info!("Device offline, queued {} for retry", scope);
            }
            inner.publish(scope, SyncState::Offline);
            return Err(SyncError::offline());
        }

        let batch = inner.pending.drain_with(scope.clone());
        if batch.len() > 1 {
            info!("Flushing {} pending scopes with {}", batch.len() - 1, scope);
        }

        for member in batch.scopes() {
            inner.publish(member, SyncState::Syncing);
        }
        for member in batch.scopes() {
            inner.publish(member, SyncState::Synced(batch.result_for(member)));
        }

        debug!("Synced {} ({} in batch)", scope, batch.len());
        Ok(batch.requested_result())
    }
}

impl Default for EmbeddedEngine {
    fn default() -> Self {
        Self::always_online()
    }
}

impl std::fmt::Debug for EmbeddedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("EmbeddedEngine")
            .field("scopes", &inner.states.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

#[async_trait]
impl SyncEngine for EmbeddedEngine {
    async fn sync_now(&self, scope: &SyncScope) -> Result<SyncResult, SyncError> {
        self.run(scope)
    }

    fn observe_sync_state(&self, scope: &SyncScope) -> BoxStream<'static, SyncState> {
        let mut rx = self.inner.lock().channel(scope).subscribe();

        let mut first = rx.borrow_and_update().clone();
        if !self.connectivity.is_online() {
            first = SyncState::Offline;
        }

        let updates = stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let state = rx.borrow_and_update().clone();
            Some((state, rx))
        });

        stream::once(async move { first }).chain(updates).boxed()
    }

    async fn latest_state(&self, scope: &SyncScope) -> SyncState {
        if !self.connectivity.is_online() {
            return SyncState::Offline;
        }
        self.current_state(scope)
    }

    fn pending_scopes(&self) -> Vec<SyncScope> {
        self.inner.lock().pending.snapshot()
    }
}
