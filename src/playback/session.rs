//! A single playback session and its per-record dispatch.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::sink::{BarSink, ColorTag};
use crate::engine::PlayTime;
use crate::trace::{OpKind, Operation, Trace};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Session identifier.
    pub session: u64,
    /// Time the completion signal fired.
    pub finished_at: PlayTime,
    /// Records dispatched to the sink.
    pub steps_applied: usize,
    /// Whether the session was cancelled before its last record.
    pub cancelled: bool,
}

/// Completion signal shared between the player and a [`super::PlaybackHandle`].
///
/// Set exactly once per session.
#[derive(Debug, Clone, Default)]
pub struct CompletionSignal(Rc<Cell<Option<SessionOutcome>>>);

impl CompletionSignal {
    /// Whether the session has ended.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.get().is_some()
    }

    /// Outcome, once the session has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.0.get()
    }

    pub(super) fn fire(&self, outcome: SessionOutcome) {
        assert!(
            self.0.get().is_none(),
            "session {} signaled completion twice",
            outcome.session
        );
        self.0.set(Some(outcome));
    }
}

/// Cancellation flag threaded through every pending callback of a session.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Ephemeral replay state: trace, delay, cursor.
#[derive(Debug)]
pub(super) struct PlaybackSession {
    pub(super) id: u64,
    trace: Trace,
    delay_ms: u64,
    started_at: PlayTime,
    cursor: usize,
    key: Option<u32>,
    pub(super) cancel: CancelToken,
    pub(super) signal: CompletionSignal,
}

impl PlaybackSession {
    pub(super) fn new(id: u64, trace: Trace, delay_ms: u64, started_at: PlayTime) -> Self {
        Self {
            id,
            trace,
            delay_ms,
            started_at,
            cursor: 0,
            key: None,
            cancel: CancelToken::default(),
            signal: CompletionSignal::default(),
        }
    }

    pub(super) fn trace(&self) -> &Trace {
        &self.trace
    }

    pub(super) const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Offset of record `k` (or of the terminal callback when `k == len`).
    pub(super) fn offset(&self, k: usize) -> PlayTime {
        self.started_at
            .add_millis((k as u64).saturating_mul(self.delay_ms))
    }

    /// Time of the terminal callback.
    pub(super) fn ends_at(&self) -> PlayTime {
        self.offset(self.trace.len())
    }

    /// Dispatch record `k` to the sink.
    ///
    /// Records must arrive in trace order; the scheduler guarantees it.
    #[allow(clippy::panic)]
    pub(super) fn dispatch<S: BarSink + ?Sized>(&mut self, k: usize, sink: &mut S) {
        assert_eq!(k, self.cursor, "session {} step {k} fired out of order", self.id);
        let op = self.trace.operations()[k];

        let bars = sink.bar_count();
        assert!(
            op.max_index() < bars,
            "record {k} ({op}) out of range for {bars} bars"
        );

        match op.kind {
            OpKind::Compare => {
                sink.set_color(op.primary, ColorTag::Compare);
                if let Some(secondary) = op.secondary {
                    sink.set_color(secondary, ColorTag::Compare);
                }
            }
            OpKind::Swap => {
                let secondary = secondary_of(&op);
                sink.swap_heights(op.primary, secondary);
                sink.set_color(op.primary, ColorTag::Swapped);
                sink.set_color(secondary, ColorTag::Swapped);
            }
            OpKind::MarkKey => {
                self.key = Some(sink.height(op.primary));
                sink.set_color(op.primary, ColorTag::Key);
            }
            OpKind::Overwrite => {
                let secondary = secondary_of(&op);
                let height = sink.height(op.primary);
                sink.set_height(secondary, height);
                sink.set_color(op.primary, ColorTag::Shift);
                sink.set_color(secondary, ColorTag::Shift);
            }
            OpKind::Insert => {
                let Some(key) = self.key.take() else {
                    panic!("record {k} ({op}) has no marked key to insert");
                };
                sink.set_height(op.primary, key);
                sink.set_color(op.primary, ColorTag::Shift);
            }
        }

        self.cursor += 1;
    }
}

#[allow(clippy::panic)]
fn secondary_of(op: &Operation) -> usize {
    let Some(secondary) = op.secondary else {
        panic!("{op} is missing its secondary index");
    };
    secondary
}
