//! Remote-delegating sync engine.
//!
//! Delegates both operations to a remote coordination endpoint through a
//! [`Transport`], caching the last known state of each scope locally.
//!
//! # Polling
//!
//! ```text
//! observe ──► cached state ──► poll ──► (changed?) emit ──► sleep ──► poll ...
//!                                │
//!                                └──► cache
//! ```
//!
//! The loop is driven by the subscriber: it only runs while the stream is
//! polled and stops issuing transport calls as soon as the stream is dropped.
//! Transport failures while polling become [`SyncState::Error`] values and
//! never end the stream.

use crate::engine::SyncEngine;
use crate::transport::Transport;
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use sync_types::{SyncError, SyncResult, SyncScope, SyncState, TriggerResponse, ALL_ENTITY_TYPE};
use tracing::{debug, warn};

/// Default delay between state polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest delay allowed between state polls.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

const TRIGGER_FAILED: &str = "Failed to trigger sync";
const TRIGGER_REJECTED: &str = "Sync trigger failed";

/// Engine that delegates to a remote coordination endpoint.
pub struct RemoteEngine<T: Transport> {
    transport: Arc<T>,
    cache: Arc<DashMap<SyncScope, SyncState>>,
    poll_interval: Duration,
}

impl<T: Transport + 'static> RemoteEngine<T> {
    /// Create an engine over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            cache: Arc::new(DashMap::new()),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the delay between state polls, raised to [`MIN_POLL_INTERVAL`]
    /// if shorter.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Last known state of `scope` (`Idle` if never seen).
    pub fn cached_state(&self, scope: &SyncScope) -> SyncState {
        self.cache
            .get(scope)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Get the transport (for testing).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn fail(&self, scope: &SyncScope, message: String, fallback: &str) -> SyncError {
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        warn!("Sync trigger failed for {}: {}", scope, message);
        self.cache.insert(scope.clone(), SyncState::Error(message.clone()));
        SyncError::external(message)
    }
}

/// Scope a trigger result is reported for, given the label the endpoint
/// echoed back.
fn result_scope(requested: &SyncScope, label: &str) -> SyncScope {
    if label.trim().is_empty() || label == requested.entity_type() {
        requested.clone()
    } else if label == ALL_ENTITY_TYPE {
        SyncScope::all()
    } else {
        SyncScope::new(label)
    }
}

#[async_trait]
impl<T: Transport + 'static> SyncEngine for RemoteEngine<T> {
    async fn sync_now(&self, scope: &SyncScope) -> Result<SyncResult, SyncError> {
        self.cache.insert(scope.clone(), SyncState::Syncing);

        match self.transport.trigger(scope).await {
            Err(e) => Err(self.fail(scope, e.to_string(), TRIGGER_FAILED)),
            Ok(TriggerResponse::Failure { message }) => {
                Err(self.fail(scope, message, TRIGGER_REJECTED))
            }
            Ok(TriggerResponse::Success {
                scope: label,
                records_synced,
                conflicts_resolved,
            }) => {
                let result = SyncResult::new(
                    result_scope(scope, &label),
                    records_synced,
                    conflicts_resolved,
                );
                debug!("Remote sync of {} moved {} records", scope, records_synced);
                self.cache
                    .insert(scope.clone(), SyncState::Synced(result.clone()));
                Ok(result)
            }
        }
    }

    fn observe_sync_state(&self, scope: &SyncScope) -> BoxStream<'static, SyncState> {
        let initial = self
            .cache
            .entry(scope.clone())
            .or_insert(SyncState::Idle)
            .value()
            .clone();

        let poller = Poller {
            transport: Arc::clone(&self.transport),
            cache: Arc::clone(&self.cache),
            scope: scope.clone(),
            interval: self.poll_interval,
            last: initial.clone(),
            polled: false,
        };

        stream::once(async move { initial })
            .chain(stream::unfold(poller, Poller::next_change))
            .boxed()
    }

    async fn latest_state(&self, scope: &SyncScope) -> SyncState {
        self.cached_state(scope)
    }
}

/// State carried between iterations of the poll loop.
struct Poller<T> {
    transport: Arc<T>,
    cache: Arc<DashMap<SyncScope, SyncState>>,
    scope: SyncScope,
    interval: Duration,
    last: SyncState,
    polled: bool,
}

impl<T: Transport> Poller<T> {
    /// Poll until the reported state differs from the last emission.
    async fn next_change(mut self) -> Option<(SyncState, Self)> {
        loop {
            if self.polled {
                tokio::time::sleep(self.interval).await;
            }
            self.polled = true;

            let state = match self.transport.state(&self.scope).await {
                Ok(state) => state,
                Err(e) => {
                    debug!("State poll for {} failed: {}", self.scope, e);
                    SyncState::Error(format!("Failed to poll sync state: {}", e))
                }
            };
            self.cache.insert(self.scope.clone(), state.clone());

            if state != self.last {
                self.last = state.clone();
                return Some((state, self));
            }
        }
    }
}

impl<T: Transport> std::fmt::Debug for RemoteEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEngine")
            .field("cached_scopes", &self.cache.len())
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, TransportError};

    fn flags() -> SyncScope {
        SyncScope::new("feature_flag")
    }

    fn engine() -> RemoteEngine<MockTransport> {
        RemoteEngine::new(MockTransport::new()).with_poll_interval(Duration::from_millis(100))
    }

    fn success(label: &str, records: u32, conflicts: u32) -> TriggerResponse {
        TriggerResponse::Success {
            scope: label.into(),
            records_synced: records,
            conflicts_resolved: conflicts,
        }
    }

    // ===========================================
    // Trigger Tests
    // ===========================================

    #[tokio::test]
    async fn trigger_success_returns_endpoint_counts() {
        let engine = engine();
        engine.transport().queue_trigger(success("feature_flag", 5, 2));

        let result = engine.sync_now(&flags()).await.unwrap();

        assert_eq!(result, SyncResult::new(flags(), 5, 2));
        assert_eq!(engine.transport().trigger_calls(), vec![flags()]);

        let first = engine.observe_sync_state(&flags()).next().await;
        assert_eq!(first, Some(SyncState::Synced(result)));
    }

    #[tokio::test]
    async fn trigger_failure_is_cached_and_returned() {
        let engine = engine();
        engine.transport().queue_trigger(TriggerResponse::Failure {
            message: "upstream failed".into(),
        });

        let err = engine.sync_now(&flags()).await.unwrap_err();

        assert_eq!(err, SyncError::external("upstream failed"));
        let first = engine.observe_sync_state(&flags()).next().await;
        assert_eq!(first, Some(SyncState::Error("upstream failed".into())));
    }

    #[tokio::test]
    async fn blank_failure_message_gets_default() {
        let engine = engine();
        engine.transport().queue_trigger(TriggerResponse::Failure {
            message: "  ".into(),
        });

        let err = engine.sync_now(&flags()).await.unwrap_err();
        assert_eq!(err.message(), "Sync trigger failed");
    }

    #[tokio::test]
    async fn transport_error_is_converted() {
        let engine = engine();
        engine
            .transport()
            .fail_next_trigger(TransportError::Connection("refused".into()));

        let err = engine.sync_now(&flags()).await.unwrap_err();

        assert_eq!(err.message(), "connection failed: refused");
        assert_eq!(
            engine.cached_state(&flags()),
            SyncState::Error("connection failed: refused".into())
        );
    }

    #[tokio::test]
    async fn result_scope_follows_endpoint_label() {
        let engine = engine();
        let filtered = SyncScope::filtered("note", sync_types::SyncFilter::new("owner", "alice"));

        engine.transport().queue_trigger(success("", 1, 0));
        assert_eq!(engine.sync_now(&filtered).await.unwrap().scope, filtered);

        engine.transport().queue_trigger(success("note", 1, 0));
        assert_eq!(engine.sync_now(&filtered).await.unwrap().scope, filtered);

        engine.transport().queue_trigger(success("*", 1, 0));
        assert_eq!(
            engine.sync_now(&flags()).await.unwrap().scope,
            SyncScope::all()
        );

        engine.transport().queue_trigger(success("team", 1, 0));
        assert_eq!(
            engine.sync_now(&flags()).await.unwrap().scope,
            SyncScope::new("team")
        );
    }

    // ===========================================
    // Polling Tests
    // ===========================================

    #[tokio::test(start_paused = true)]
    async fn observation_starts_idle_then_follows_endpoint() {
        let engine = engine();
        engine.transport().queue_state(SyncState::Syncing);
        engine
            .transport()
            .queue_state(SyncState::Synced(SyncResult::empty(flags())));

        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(3).collect().await;

        assert_eq!(
            states,
            vec![
                SyncState::Idle,
                SyncState::Syncing,
                SyncState::Synced(SyncResult::empty(flags())),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_reports_are_not_re_emitted() {
        let engine = engine();
        engine.transport().queue_state(SyncState::Syncing);
        engine.transport().queue_state(SyncState::Syncing);
        engine.transport().queue_state(SyncState::Syncing);
        engine.transport().queue_state(SyncState::Offline);

        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(3).collect().await;

        assert_eq!(
            states,
            vec![SyncState::Idle, SyncState::Syncing, SyncState::Offline]
        );
        assert_eq!(engine.transport().state_call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_report_after_idle_cache_is_suppressed() {
        let engine = engine();
        engine.transport().queue_state(SyncState::Idle);
        engine.transport().queue_state(SyncState::Offline);

        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(2).collect().await;

        assert_eq!(states, vec![SyncState::Idle, SyncState::Offline]);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_failure_becomes_error_state() {
        let engine = engine();
        engine
            .transport()
            .fail_next_state(TransportError::Connection("refused".into()));
        engine.transport().queue_state(SyncState::Idle);

        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(3).collect().await;

        assert_eq!(
            states,
            vec![
                SyncState::Idle,
                SyncState::Error("Failed to poll sync state: connection failed: refused".into()),
                SyncState::Idle,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn polled_state_is_cached_before_emission() {
        let engine = engine();
        engine.transport().queue_state(SyncState::Offline);

        let mut states = engine.observe_sync_state(&flags());
        assert_eq!(states.next().await, Some(SyncState::Idle));
        assert_eq!(states.next().await, Some(SyncState::Offline));

        assert_eq!(engine.cached_state(&flags()), SyncState::Offline);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_stream_stops_polling() {
        let engine = engine();
        engine.transport().queue_state(SyncState::Syncing);

        let mut states = engine.observe_sync_state(&flags());
        states.next().await;
        states.next().await;
        drop(states);

        let calls = engine.transport().state_call_count();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(engine.transport().state_call_count(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn first_poll_runs_without_waiting() {
        let engine = RemoteEngine::new(MockTransport::new()).with_poll_interval(Duration::from_secs(60));
        engine.transport().queue_state(SyncState::Syncing);

        let start = tokio::time::Instant::now();
        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(2).collect().await;

        assert_eq!(states, vec![SyncState::Idle, SyncState::Syncing]);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_are_spaced_by_interval() {
        let engine = engine();
        engine.transport().queue_state(SyncState::Syncing);
        engine.transport().queue_state(SyncState::Offline);

        let start = tokio::time::Instant::now();
        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(3).collect().await;

        assert_eq!(states.len(), 3);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_raised_to_minimum() {
        let engine = RemoteEngine::new(MockTransport::new()).with_poll_interval(Duration::ZERO);
        engine.transport().queue_state(SyncState::Syncing);
        engine.transport().queue_state(SyncState::Offline);

        let start = tokio::time::Instant::now();
        let states: Vec<SyncState> = engine.observe_sync_state(&flags()).take(3).collect().await;

        assert_eq!(states.len(), 3);
        assert!(start.elapsed() >= MIN_POLL_INTERVAL);
        assert_eq!(engine.transport().state_call_count(), 2);
    }

    #[tokio::test]
    async fn latest_state_reads_cache_without_polling() {
        let engine = engine();
        engine.transport().queue_trigger(success("feature_flag", 3, 0));
        let result = engine.sync_now(&flags()).await.unwrap();

        assert_eq!(engine.latest_state(&flags()).await, SyncState::Synced(result));
        assert_eq!(engine.latest_state(&SyncScope::new("other")).await, SyncState::Idle);
        assert_eq!(engine.transport().state_call_count(), 0);
    }
}
