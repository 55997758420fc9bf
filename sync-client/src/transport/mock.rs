//! Mock transport for testing.
//!
//! Allows queueing endpoint responses and capturing requested scopes for
//! verification.

use super::{Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use sync_types::{SyncScope, SyncState, TriggerResponse};

/// Mock transport for testing.
///
/// Trigger responses are consumed in order. State responses are consumed in
/// order too, except the last one, which keeps being reported once the queue
/// runs dry (an endpoint whose state has settled). With nothing queued,
/// `state()` reports `Idle`.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    trigger_queue: VecDeque<TriggerResponse>,
    state_queue: VecDeque<SyncState>,
    settled_state: Option<SyncState>,
    trigger_calls: Vec<SyncScope>,
    state_calls: Vec<SyncScope>,
    fail_next_trigger: Option<TransportError>,
    fail_next_state: Option<TransportError>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next `trigger()` call.
    pub fn queue_trigger(&self, response: TriggerResponse) {
        self.inner.lock().trigger_queue.push_back(response);
    }

    /// Queue a state for the next `state()` call.
    pub fn queue_state(&self, state: SyncState) {
        self.inner.lock().state_queue.push_back(state);
    }

    /// Scopes passed to `trigger()`, in call order.
    pub fn trigger_calls(&self) -> Vec<SyncScope> {
        self.inner.lock().trigger_calls.clone()
    }

    /// Scopes passed to `state()`, in call order.
    pub fn state_calls(&self) -> Vec<SyncScope> {
        self.inner.lock().state_calls.clone()
    }

    /// Number of `state()` calls so far.
    pub fn state_call_count(&self) -> usize {
        self.inner.lock().state_calls.len()
    }

    /// Cause the next trigger() to fail with the given error.
    pub fn fail_next_trigger(&self, error: TransportError) {
        self.inner.lock().fail_next_trigger = Some(error);
    }

    /// Cause the next state() to fail with the given error.
    pub fn fail_next_state(&self, error: TransportError) {
        self.inner.lock().fail_next_state = Some(error);
    }

    /// Clear all state (queues, recorded calls, forced failures).
    pub fn reset(&self) {
        *self.inner.lock() = MockTransportInner::default();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn trigger(&self, scope: &SyncScope) -> Result<TriggerResponse, TransportError> {
        let mut inner = self.inner.lock();
        inner.trigger_calls.push(scope.clone());

        // Check for forced failure
        if let Some(error) = inner.fail_next_trigger.take() {
            return Err(error);
        }

        inner
            .trigger_queue
            .pop_front()
            .ok_or_else(|| TransportError::Connection("no trigger response queued".into()))
    }

    async fn state(&self, scope: &SyncScope) -> Result<SyncState, TransportError> {
        let mut inner = self.inner.lock();
        inner.state_calls.push(scope.clone());

        // Check for forced failure
        if let Some(error) = inner.fail_next_state.take() {
            return Err(error);
        }

        if let Some(state) = inner.state_queue.pop_front() {
            inner.settled_state = Some(state.clone());
            return Ok(state);
        }

        Ok(inner.settled_state.clone().unwrap_or_default())
    }
}
