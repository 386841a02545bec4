//! Playback clock.
//!
//! A virtual monotonic clock. The event loop (terminal UI, CLI replay, tests)
//! decides how fast it advances; playback only ever reads it.

use crate::engine::PlayTime;
use serde::{Deserialize, Serialize};

/// Virtual monotonic clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayClock {
    /// Current time.
    current: PlayTime,
}

impl PlayClock {
    /// Create a clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: PlayTime::ZERO,
        }
    }

    /// Get current time.
    #[must_use]
    pub const fn current_time(&self) -> PlayTime {
        self.current
    }

    /// Move the clock to `target`. Earlier targets are ignored.
    ///
    /// Returns the (possibly unchanged) current time.
    pub fn advance_to(&mut self, target: PlayTime) -> PlayTime {
        if target > self.current {
            self.current = target;
        }
        self.current
    }
}
