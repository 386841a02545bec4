//! Event scheduler with deterministic ordering.
//!
//! A priority queue that ensures:
//! - Events fire in time order
//! - Ties are broken by insertion order (sequence number)
//!
//! The tie-break is what keeps playback in trace order even when the delay is
//! so small that several steps land on the same millisecond.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::engine::PlayTime;

/// A scheduled event with time and sequence number.
#[derive(Debug, Clone)]
pub struct ScheduledEvent<E> {
    /// Scheduled time.
    pub time: PlayTime,
    /// Sequence number for deterministic tie-breaking.
    pub sequence: u64,
    /// The event payload.
    pub event: E,
}

impl<E> ScheduledEvent<E> {
    /// Create a new scheduled event.
    #[must_use]
    pub const fn new(time: PlayTime, sequence: u64, event: E) -> Self {
        Self {
            time,
            sequence,
            event,
        }
    }
}

// Custom ordering for BinaryHeap (min-heap by time, then sequence)
impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl<E> Eq for ScheduledEvent<E> {}

impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for ScheduledEvent<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Priority-ordered event queue.
///
/// # Example
///
/// ```rust
/// use sortscope::engine::scheduler::EventScheduler;
/// use sortscope::engine::PlayTime;
///
/// let mut scheduler = EventScheduler::new();
/// scheduler.schedule(PlayTime::from_millis(20), "second");
/// scheduler.schedule(PlayTime::from_millis(10), "first");
///
/// assert_eq!(scheduler.next().map(|e| e.event), Some("first"));
/// ```
#[derive(Debug)]
pub struct EventScheduler<E> {
    /// Min-heap ordered by (time, sequence).
    queue: BinaryHeap<Reverse<ScheduledEvent<E>>>,
    /// Monotonic sequence counter for tie-breaking.
    sequence: u64,
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }
}

impl<E> EventScheduler<E> {
    /// Create a new event scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event at the given time.
    pub fn schedule(&mut self, time: PlayTime, event: E) {
        let seq = self.sequence;
        self.sequence += 1;

        self.queue.push(Reverse(ScheduledEvent::new(time, seq, event)));
    }

    /// Get the next event (removes from queue).
    #[must_use]
    #[allow(clippy::should_implement_trait)] // Not an Iterator, different semantics
    pub fn next(&mut self) -> Option<ScheduledEvent<E>> {
        self.queue.pop().map(|Reverse(e)| e)
    }

    /// Peek at the next event without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&ScheduledEvent<E>> {
        self.queue.peek().map(|Reverse(e)| e)
    }

    /// Get the next event if its time is before or at the given time.
    #[must_use]
    pub fn next_before(&mut self, time: PlayTime) -> Option<ScheduledEvent<E>> {
        if self.peek().is_some_and(|e| e.time <= time) {
            return self.next();
        }
        None
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Clear all pending events.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
