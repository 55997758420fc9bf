//! Pending-scope queue for offline batching.
//!
//! Scopes that attempt to sync while connectivity is unavailable are parked
//! here. The queue:
//! - keeps insertion order, so the oldest request is flushed first
//! - holds each scope at most once, however many times it was requested
//! - drains completely into a [`FlushBatch`] when connectivity returns

use std::collections::{HashSet, VecDeque};
use sync_types::{SyncResult, SyncScope};

/// Insertion-ordered, deduplicated set of scopes awaiting a retry.
#[derive(Debug, Default, Clone)]
pub struct PendingScopes {
    /// Scopes in the order they were first queued.
    order: VecDeque<SyncScope>,
    /// Membership index for `order`.
    members: HashSet<SyncScope>,
}

impl PendingScopes {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scope to the queue.
    ///
    /// Returns `false` if the scope was already queued; its position is kept.
    pub fn enqueue(&mut self, scope: SyncScope) -> bool {
        if !self.members.insert(scope.clone()) {
            return false;
        }
        self.order.push_back(scope);
        true
    }

    /// Check if a scope is queued.
    pub fn contains(&self, scope: &SyncScope) -> bool {
        self.members.contains(scope)
    }

    /// Number of queued scopes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Queued scopes in flush order.
    pub fn snapshot(&self) -> Vec<SyncScope> {
        self.order.iter().cloned().collect()
    }

    /// Empty the queue into a batch that also covers `requested`.
    ///
    /// Queued scopes come first, in insertion order; `requested` is appended
    /// unless it was already queued.
    pub fn drain_with(&mut self, requested: SyncScope) -> FlushBatch {
        let mut scopes: Vec<SyncScope> = self.order.drain(..).collect();
        self.members.clear();

        if !scopes.contains(&requested) {
            scopes.push(requested.clone());
        }

        FlushBatch { scopes, requested }
    }
}

/// The set of scopes synchronized together by one flush.
///
/// Every member of a batch reports the same result counts: the batch size as
/// records synced and no conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushBatch {
    scopes: Vec<SyncScope>,
    requested: SyncScope,
}

impl FlushBatch {
    /// Scopes in the batch, in flush order.
    pub fn scopes(&self) -> &[SyncScope] {
        &self.scopes
    }

    /// The scope whose request triggered the flush.
    pub fn requested(&self) -> &SyncScope {
        &self.requested
    }

    /// Number of scopes in the batch (never zero).
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always `false`; a batch contains at least the requested scope.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// The result recorded for one member of the batch.
    pub fn result_for(&self, scope: &SyncScope) -> SyncResult {
        let records = u32::try_from(self.scopes.len()).unwrap_or(u32::MAX);
        SyncResult::new(scope.clone(), records, 0)
    }

    /// The result returned to the caller that triggered the flush.
    pub fn requested_result(&self) -> SyncResult {
        self.result_for(&self.requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_types::SyncFilter;

    fn scope(name: &str) -> SyncScope {
        SyncScope::new(name)
    }

    #[test]
    fn queue_starts_empty() {
        let queue = PendingScopes::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.snapshot().is_empty());
    }

    #[test]
    fn enqueue_deduplicates() {
        let mut queue = PendingScopes::new();

        assert!(queue.enqueue(scope("a")));
        assert!(!queue.enqueue(scope("a")));

        assert_eq!(queue.len(), 1);
        assert!(queue.contains(&scope("a")));
    }

    #[test]
    fn enqueue_keeps_first_position() {
        let mut queue = PendingScopes::new();
        queue.enqueue(scope("a"));
        queue.enqueue(scope("b"));
        queue.enqueue(scope("a"));

        assert_eq!(queue.snapshot(), vec![scope("a"), scope("b")]);
    }

    #[test]
    fn filtered_scopes_are_distinct_members() {
        let mut queue = PendingScopes::new();
        queue.enqueue(scope("note"));
        queue.enqueue(SyncScope::filtered("note", SyncFilter::new("owner", "alice")));

        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn drain_appends_requested_scope() {
        let mut queue = PendingScopes::new();
        queue.enqueue(scope("a"));
        queue.enqueue(scope("b"));

        let batch = queue.drain_with(scope("c"));

        assert_eq!(batch.scopes(), &[scope("a"), scope("b"), scope("c")]);
        assert_eq!(batch.requested(), &scope("c"));
        assert!(queue.is_empty());
        assert!(!queue.contains(&scope("a")));
    }

    #[test]
    fn drain_does_not_duplicate_queued_request() {
        let mut queue = PendingScopes::new();
        queue.enqueue(scope("a"));
        queue.enqueue(scope("b"));

        let batch = queue.drain_with(scope("a"));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.scopes(), &[scope("a"), scope("b")]);
    }

    #[test]
    fn drain_of_empty_queue_is_single_scope_batch() {
        let mut queue = PendingScopes::new();
        let batch = queue.drain_with(scope("solo"));

        assert_eq!(batch.len(), 1);
        assert!(!batch.is_empty());
        assert_eq!(batch.requested_result(), SyncResult::new(scope("solo"), 1, 0));
    }

    #[test]
    fn every_member_reports_batch_size() {
        let mut queue = PendingScopes::new();
        queue.enqueue(scope("a"));
        queue.enqueue(scope("b"));
        let batch = queue.drain_with(scope("a"));

        for member in batch.scopes() {
            let result = batch.result_for(member);
            assert_eq!(&result.scope, member);
            assert_eq!(result.records_synced, 2);
            assert_eq!(result.conflicts_resolved, 0);
        }
    }

    #[test]
    fn queue_is_reusable_after_drain() {
        let mut queue = PendingScopes::new();
        queue.enqueue(scope("a"));
        let _ = queue.drain_with(scope("a"));

        assert!(queue.enqueue(scope("a")));
        assert_eq!(queue.len(), 1);
    }
}
