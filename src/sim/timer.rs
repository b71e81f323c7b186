//! One-shot timer queue for deferred round work
//!
//! Replaces name-based deferred invocation with an explicit min-heap of
//! (deadline, token, kind) entries. An entry fires at most once; cancelling
//! invalidates its token, and stale entries are discarded lazily when they
//! reach the front of the heap.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// What a fired timer means to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// The spawner's next pickup is due
    SpawnPickup,
    /// A won round is ready to advance the campaign
    AdvanceLevel,
}

/// Generation token identifying one scheduled entry. Tokens are never
/// reused, so a stale token cancels nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone)]
struct Entry {
    deadline: f32,
    token: TimerToken,
    kind: TimerKind,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // BinaryHeap is a max-heap; invert so the earliest deadline surfaces
    // first, with schedule order breaking ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .total_cmp(&self.deadline)
            .then_with(|| other.token.0.cmp(&self.token.0))
    }
}

/// Pending one-shot timers for a round
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    cancelled: HashSet<TimerToken>,
    next_token: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once `delay` seconds after `now`
    pub fn schedule(&mut self, now: f32, delay: f32, kind: TimerKind) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.heap.push(Entry {
            deadline: now + delay,
            token,
            kind,
        });
        log::debug!("scheduled {kind:?} at t+{delay:.2}s");
        token
    }

    /// Invalidate a pending entry. Idempotent; cancelling an already-fired
    /// token has no effect.
    pub fn cancel(&mut self, token: TimerToken) {
        if self.heap.iter().any(|e| e.token == token) {
            self.cancelled.insert(token);
        }
    }

    /// Pop the earliest entry whose deadline has passed, skipping cancelled
    /// entries. Returns `None` once nothing further is due at `now`.
    pub fn pop_due(&mut self, now: f32) -> Option<TimerKind> {
        while self.heap.peek().is_some_and(|e| e.deadline <= now) {
            if let Some(entry) = self.heap.pop() {
                if self.cancelled.remove(&entry.token) {
                    continue;
                }
                return Some(entry.kind);
            }
        }
        None
    }

    /// Earliest live deadline, if any
    pub fn next_deadline(&self) -> Option<f32> {
        self.heap
            .iter()
            .filter(|e| !self.cancelled.contains(&e.token))
            .map(|e| e.deadline)
            .min_by(f32::total_cmp)
    }

    /// Number of live (non-cancelled) entries
    pub fn pending(&self) -> usize {
        self.heap.len() - self.cancelled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 3.0, TimerKind::AdvanceLevel);
        timers.schedule(0.0, 1.0, TimerKind::SpawnPickup);

        assert_eq!(timers.pop_due(0.5), None);
        assert_eq!(timers.pop_due(1.0), Some(TimerKind::SpawnPickup));
        assert_eq!(timers.pop_due(1.0), None);
        assert_eq!(timers.pop_due(10.0), Some(TimerKind::AdvanceLevel));
        assert_eq!(timers.pop_due(10.0), None);
    }

    #[test]
    fn test_entry_fires_at_most_once() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 1.0, TimerKind::SpawnPickup);
        assert_eq!(timers.pop_due(2.0), Some(TimerKind::SpawnPickup));
        assert_eq!(timers.pop_due(100.0), None);
    }

    #[test]
    fn test_cancelled_entry_never_fires() {
        let mut timers = TimerQueue::new();
        let token = timers.schedule(0.0, 1.0, TimerKind::SpawnPickup);
        timers.schedule(0.0, 2.0, TimerKind::AdvanceLevel);

        timers.cancel(token);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.pop_due(5.0), Some(TimerKind::AdvanceLevel));
        assert_eq!(timers.pop_due(5.0), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timers = TimerQueue::new();
        let token = timers.schedule(0.0, 1.0, TimerKind::SpawnPickup);
        timers.cancel(token);
        timers.cancel(token);
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.pop_due(5.0), None);
        // Cancelling after the heap drained is also a no-op
        timers.cancel(token);
    }

    #[test]
    fn test_cancel_after_fire_does_not_poison_new_entries() {
        let mut timers = TimerQueue::new();
        let token = timers.schedule(0.0, 1.0, TimerKind::SpawnPickup);
        assert_eq!(timers.pop_due(1.0), Some(TimerKind::SpawnPickup));

        // Stale cancel, then a fresh entry: the fresh one must still fire
        timers.cancel(token);
        timers.schedule(1.0, 1.0, TimerKind::SpawnPickup);
        assert_eq!(timers.pop_due(2.0), Some(TimerKind::SpawnPickup));
    }

    #[test]
    fn test_next_deadline_ignores_cancelled() {
        let mut timers = TimerQueue::new();
        let early = timers.schedule(0.0, 1.0, TimerKind::SpawnPickup);
        timers.schedule(0.0, 4.0, TimerKind::AdvanceLevel);

        assert_eq!(timers.next_deadline(), Some(1.0));
        timers.cancel(early);
        assert_eq!(timers.next_deadline(), Some(4.0));
    }
}
