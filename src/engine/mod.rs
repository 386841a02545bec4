//! Timer facility for playback.
//!
//! Provides the pieces a single-threaded event loop needs:
//! - Millisecond playback time
//! - Event scheduling with deterministic ordering
//! - A virtual monotonic clock
//! - Seeded snapshot generation

pub mod clock;
pub mod rng;
pub mod scheduler;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use clock::PlayClock;
pub use rng::SnapshotRng;
pub use scheduler::{EventScheduler, ScheduledEvent};

/// Playback time representation.
///
/// Integer milliseconds from the player's epoch. Trace offsets are computed as
/// `k * delay_ms`, so integer time keeps every offset exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PlayTime {
    /// Milliseconds from the player's epoch.
    millis: u64,
}

impl PlayTime {
    /// Zero time (player epoch).
    pub const ZERO: Self = Self { millis: 0 };

    /// Create time from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Get time as milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Add a millisecond offset, saturating at the end of time.
    #[must_use]
    pub const fn add_millis(self, millis: u64) -> Self {
        Self {
            millis: self.millis.saturating_add(millis),
        }
    }

    /// Add a millisecond offset, or `None` if it does not fit.
    #[must_use]
    pub const fn checked_add_millis(self, millis: u64) -> Option<Self> {
        match self.millis.checked_add(millis) {
            Some(millis) => Some(Self { millis }),
            None => None,
        }
    }
}

impl From<Duration> for PlayTime {
    fn from(duration: Duration) -> Self {
        Self {
            millis: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl std::ops::Sub for PlayTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            millis: self.millis.saturating_sub(rhs.millis),
        }
    }
}

impl std::fmt::Display for PlayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
