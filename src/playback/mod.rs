//! Timed playback of traces.
//!
//! [`Player::play`] schedules one callback per record at `k * delay_ms` and a
//! terminal callback at `len * delay_ms`, all relative to the player's clock
//! at the moment of the call. The event loop drives time forward with
//! [`Player::advance_to`], which fires every due callback in order against the
//! supplied [`BarSink`].
//!
//! # Example
//!
//! ```rust
//! use sortscope::playback::{BarChart, Player};
//! use sortscope::trace::{generate, Algorithm};
//! use sortscope::engine::PlayTime;
//!
//! let values = [3, 1, 2];
//! let mut chart = BarChart::from_values(&values);
//! let mut player = Player::new();
//!
//! let handle = player.play(generate(Algorithm::Bubble, &values), 50).unwrap();
//! player.advance_to(PlayTime::from_millis(250), &mut chart);
//!
//! assert!(handle.is_complete());
//! assert_eq!(chart.heights(), vec![1, 2, 3]);
//! ```

mod session;
pub mod sink;

use serde::{Deserialize, Serialize};

use crate::engine::{EventScheduler, PlayClock, PlayTime};
use crate::error::{SortError, SortResult};
use crate::trace::Trace;

pub use session::{CancelToken, CompletionSignal, SessionOutcome};
use session::PlaybackSession;
pub use sink::{Bar, BarChart, BarSink, ColorTag, RecordingSink, SinkCall};

/// Callback payloads held by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackEvent {
    /// Dispatch record `index` of `session`.
    Step { session: u64, index: usize },
    /// Terminal callback of `session`.
    Finish { session: u64 },
}

/// Player state: `Idle → Running → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No session; `play` is accepted.
    Idle,
    /// A session is in flight.
    Running {
        /// Session identifier.
        session: u64,
    },
}

/// Caller's view of a running session.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    session: u64,
    ends_at: PlayTime,
    signal: CompletionSignal,
    cancel: CancelToken,
}

impl PlaybackHandle {
    /// Session identifier.
    #[must_use]
    pub const fn session(&self) -> u64 {
        self.session
    }

    /// Scheduled time of the terminal callback.
    #[must_use]
    pub const fn ends_at(&self) -> PlayTime {
        self.ends_at
    }

    /// Whether the completion signal has fired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.signal.is_complete()
    }

    /// Outcome, once complete.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.signal.outcome()
    }

    /// Request cancellation.
    ///
    /// Pending callbacks become no-ops; the player signals completion on its
    /// next advance.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Result of one [`Player::advance_to`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Records dispatched to the sink.
    pub steps: usize,
    /// Set when a session completed during this advance.
    pub completed: Option<SessionOutcome>,
}

/// Single-threaded playback scheduler.
#[derive(Debug, Default)]
pub struct Player {
    clock: PlayClock,
    scheduler: EventScheduler<PlaybackEvent>,
    session: Option<PlaybackSession>,
    next_session: u64,
}

impl Player {
    /// Create an idle player at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current player time.
    #[must_use]
    pub const fn now(&self) -> PlayTime {
        self.clock.current_time()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PlayerState {
        match &self.session {
            Some(session) => PlayerState::Running {
                session: session.id,
            },
            None => PlayerState::Idle,
        }
    }

    /// Whether a session is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Records dispatched so far by the running session.
    #[must_use]
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .map(|session| (session.cursor(), session.trace().len()))
    }

    /// Number of callbacks still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    /// Schedule `trace` for playback at `delay_ms` per record.
    ///
    /// The delay is captured now; later changes to the caller's speed setting
    /// do not affect this session. An empty trace schedules only its terminal
    /// callback, at the current time, so completion is signaled by the next
    /// [`Player::advance_to`].
    ///
    /// # Errors
    ///
    /// - [`SortError::SessionActive`] if a session is still running and has
    ///   not been cancelled.
    /// - [`SortError::Config`] if `delay_ms` is zero, or if the session would
    ///   end past the last representable millisecond.
    pub fn play(&mut self, trace: Trace, delay_ms: u64) -> SortResult<PlaybackHandle> {
        if delay_ms == 0 {
            return Err(SortError::config("playback delay must be positive"));
        }
        if let Some(active) = &self.session {
            if !active.cancel.is_cancelled() {
                return Err(SortError::SessionActive { session: active.id });
            }
            self.finish(true);
        }

        let start = self.now();
        let len = trace.len();
        let Some(ends_at) = (len as u64)
            .checked_mul(delay_ms)
            .and_then(|span| start.checked_add_millis(span))
        else {
            return Err(SortError::config(format!(
                "{len} steps at {delay_ms}ms from {start} overflow the playback clock"
            )));
        };

        let id = self.next_session;
        self.next_session += 1;

        let session = PlaybackSession::new(id, trace, delay_ms, start);
        for index in 0..len {
            self.scheduler
                .schedule(session.offset(index), PlaybackEvent::Step { session: id, index });
        }
        self.scheduler
            .schedule(ends_at, PlaybackEvent::Finish { session: id });

        tracing::info!(
            target: "sortscope.playback",
            session = id,
            algorithm = %session.trace().algorithm(),
            steps = len,
            delay_ms,
            ends_at = %ends_at,
            "playback started"
        );

        let handle = PlaybackHandle {
            session: id,
            ends_at,
            signal: session.signal.clone(),
            cancel: session.cancel.clone(),
        };
        self.session = Some(session);
        Ok(handle)
    }

    /// Cancel the running session (if any) and signal completion now.
    pub fn stop(&mut self) -> Option<SessionOutcome> {
        let session = self.session.as_ref()?;
        session.cancel.cancel();
        Some(self.finish(true))
    }

    /// Advance time to `now` and fire every callback due by then.
    pub fn advance_to<S: BarSink + ?Sized>(&mut self, now: PlayTime, sink: &mut S) -> AdvanceReport {
        let now = self.clock.advance_to(now);
        let mut report = AdvanceReport::default();

        if self
            .session
            .as_ref()
            .is_some_and(|session| session.cancel.is_cancelled())
        {
            report.completed = Some(self.finish(true));
            return report;
        }

        while let Some(scheduled) = self.scheduler.next_before(now) {
            match scheduled.event {
                PlaybackEvent::Step { session, index } => {
                    if let Some(active) = self.session.as_mut().filter(|s| s.id == session) {
                        active.dispatch(index, &mut *sink);
                        report.steps += 1;
                    }
                }
                PlaybackEvent::Finish { session } => {
                    if self.session.as_ref().is_some_and(|s| s.id == session) {
                        report.completed = Some(self.finish(false));
                    }
                }
            }
        }

        report
    }

    /// Advance to the terminal callback of the running session.
    ///
    /// Returns `None` when idle.
    pub fn run_to_completion<S: BarSink + ?Sized>(&mut self, sink: &mut S) -> Option<SessionOutcome> {
        let end = self.session.as_ref()?.ends_at();
        self.advance_to(end, sink).completed
    }

    /// End the running session, firing its completion signal.
    #[allow(clippy::panic)]
    fn finish(&mut self, cancelled: bool) -> SessionOutcome {
        let Some(session) = self.session.take() else {
            panic!("finish called without a running session");
        };
        if cancelled {
            // Stale callbacks of this session are dropped wholesale
            self.scheduler.clear();
        }

        let outcome = SessionOutcome {
            session: session.id,
            finished_at: self.now(),
            steps_applied: session.cursor(),
            cancelled,
        };
        session.signal.fire(outcome);

        tracing::info!(
            target: "sortscope.playback",
            session = outcome.session,
            steps = outcome.steps_applied,
            finished_at = %outcome.finished_at,
            cancelled,
            "playback finished"
        );
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::trace::{generate, Algorithm};

    fn ms(millis: u64) -> PlayTime {
        PlayTime::from_millis(millis)
    }

    #[test]
    fn test_play_schedules_every_record() {
        let mut player = Player::new();
        let trace = generate(Algorithm::Selection, &[3, 1, 2]);
        let len = trace.len();

        let handle = player.play(trace, 40).unwrap();
        assert_eq!(player.pending(), len + 1);
        assert_eq!(handle.ends_at(), ms(40 * len as u64));
        assert_eq!(player.state(), PlayerState::Running { session: 0 });
    }

    #[test]
    fn test_steps_fire_at_offsets() {
        let values = [3, 1, 2];
        let mut player = Player::new();
        let mut chart = BarChart::from_values(&values);
        let _handle = player.play(generate(Algorithm::Bubble, &values), 10).unwrap();

        // Step 0 fires at t=0
        assert_eq!(player.advance_to(ms(0), &mut chart).steps, 1);
        // Nothing new before t=10
        assert_eq!(player.advance_to(ms(9), &mut chart).steps, 0);
        // Steps 1 and 2 at t=10, t=20
        assert_eq!(player.advance_to(ms(20), &mut chart).steps, 2);
        assert_eq!(player.progress(), Some((3, 5)));
    }

    #[test]
    fn test_completion_at_exact_end() {
        let values = [4, 3, 2, 1];
        let trace = generate(Algorithm::Insertion, &values);
        let len = trace.len() as u64;
        let mut player = Player::new();
        let mut chart = BarChart::from_values(&values);
        let handle = player.play(trace, 30).unwrap();

        let report = player.advance_to(ms(len * 30 - 1), &mut chart);
        assert!(report.completed.is_none());
        assert!(!handle.is_complete());

        let report = player.advance_to(ms(len * 30), &mut chart);
        let outcome = report.completed.unwrap();
        assert_eq!(outcome.finished_at, ms(len * 30));
        assert!(!outcome.cancelled);
        assert_eq!(handle.outcome(), Some(outcome));
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(chart.heights(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_trace_completes_without_sink_calls() {
        let mut player = Player::new();
        let mut sink = RecordingSink::new(&[]);
        let handle = player.play(generate(Algorithm::Bubble, &[]), 50).unwrap();
        assert_eq!(handle.ends_at(), PlayTime::ZERO);

        let report = player.advance_to(PlayTime::ZERO, &mut sink);
        assert_eq!(report.steps, 0);
        assert!(report.completed.is_some());
        assert!(handle.is_complete());
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn test_overflowing_delay_rejected() {
        let mut player = Player::new();
        let err = player
            .play(generate(Algorithm::Bubble, &[3, 1, 2]), u64::MAX / 2)
            .unwrap_err();
        assert!(matches!(err, SortError::Config { .. }));
        assert!(!player.is_running());
        assert_eq!(player.pending(), 0);

        // Rejection consumes no session id
        let handle = player.play(generate(Algorithm::Bubble, &[2, 1]), 10).unwrap();
        assert_eq!(handle.session(), 0);
    }

    #[test]
    fn test_largest_fitting_delay_accepted() {
        let values = [2, 1];
        let trace = generate(Algorithm::Bubble, &values);
        let delay = u64::MAX / trace.len() as u64;
        let mut player = Player::new();
        let mut chart = BarChart::from_values(&values);

        let handle = player.play(trace, delay).unwrap();
        assert_eq!(handle.ends_at(), ms(delay * 2));
        let outcome = player.run_to_completion(&mut chart).unwrap();
        assert!(!outcome.cancelled);
        assert_eq!(chart.heights(), vec![1, 2]);
    }

    #[test]
    fn test_play_rejected_while_running() {
        let mut player = Player::new();
        let _first = player.play(generate(Algorithm::Bubble, &[2, 1]), 10).unwrap();
        let err = player.play(generate(Algorithm::Bubble, &[2, 1]), 10).unwrap_err();
        assert!(matches!(err, SortError::SessionActive { session: 0 }));
    }

    #[test]
    fn test_zero_delay_rejected() {
        let mut player = Player::new();
        assert!(player.play(generate(Algorithm::Bubble, &[2, 1]), 0).is_err());
        assert!(!player.is_running());
    }

    #[test]
    fn test_sessions_are_relative_to_play_time() {
        let values = [2, 1];
        let mut player = Player::new();
        let mut chart = BarChart::from_values(&values);

        let first = player.play(generate(Algorithm::Bubble, &values), 10).unwrap();
        player.run_to_completion(&mut chart);
        assert!(first.is_complete());

        player.advance_to(ms(1_000), &mut chart);
        let second = player.play(generate(Algorithm::Bubble, &[1, 2]), 10).unwrap();
        assert_eq!(second.session(), 1);
        assert_eq!(second.ends_at(), ms(1_010));
    }

    #[test]
    fn test_cancel_noops_pending_callbacks() {
        let values = [5, 4, 3, 2, 1];
        let mut player = Player::new();
        let mut sink = RecordingSink::new(&values);
        let handle = player.play(generate(Algorithm::Bubble, &values), 10).unwrap();

        player.advance_to(ms(20), &mut sink);
        let calls_before = sink.calls().len();
        handle.cancel();

        let report = player.advance_to(ms(10_000), &mut sink);
        let outcome = report.completed.unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.steps_applied, 3);
        assert_eq!(sink.calls().len(), calls_before);
        assert_eq!(player.pending(), 0);
        assert!(handle.is_complete());
    }

    #[test]
    fn test_cancelled_session_allows_new_play() {
        let mut player = Player::new();
        let first = player.play(generate(Algorithm::Bubble, &[3, 2, 1]), 10).unwrap();
        first.cancel();

        let second = player.play(generate(Algorithm::Selection, &[3, 2, 1]), 10).unwrap();
        assert!(first.outcome().is_some_and(|o| o.cancelled));
        assert_eq!(player.state(), PlayerState::Running { session: second.session() });
        // Only the new session's callbacks remain
        assert_eq!(player.pending(), second_len(&[3, 2, 1]) + 1);
    }

    fn second_len(values: &[u32]) -> usize {
        generate(Algorithm::Selection, values).len()
    }

    #[test]
    fn test_stop_signals_immediately() {
        let mut player = Player::new();
        let mut chart = BarChart::from_values(&[2, 1]);
        let handle = player.play(generate(Algorithm::Bubble, &[2, 1]), 10).unwrap();
        player.advance_to(ms(5), &mut chart);

        let outcome = player.stop().unwrap();
        assert_eq!(outcome.finished_at, ms(5));
        assert!(handle.is_complete());
        assert!(player.stop().is_none());
    }

    #[test]
    fn test_run_to_completion_idle() {
        let mut player = Player::new();
        let mut chart = BarChart::default();
        assert!(player.run_to_completion(&mut chart).is_none());
    }
}
