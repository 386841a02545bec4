//! # sortscope
//!
//! Sorting algorithm visualizer built around two decoupled stages:
//! - Trace generation: an algorithm runs to completion instantly and records
//!   every compare, swap, key mark, shift and insert as a positional trace
//! - Playback: the trace is replayed against bar state at a fixed per-step
//!   delay, independent of how fast the algorithm ran
//!
//! ## Example
//!
//! ```rust
//! use sortscope::prelude::*;
//!
//! let values = [3, 1, 2];
//! let trace = generate(Algorithm::Insertion, &values);
//!
//! let mut chart = BarChart::from_values(&values);
//! let mut player = Player::new();
//! let handle = player.play(trace, 50).unwrap();
//! player.run_to_completion(&mut chart);
//!
//! assert!(handle.is_complete());
//! assert_eq!(chart.heights(), vec![1, 2, 3]);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::missing_panics_doc,    // Panics are index assertions, documented where public
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod playback;
pub mod trace;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::engine::{PlayTime, SnapshotRng};
    pub use crate::error::{SortError, SortResult};
    pub use crate::playback::{
        BarChart, BarSink, ColorTag, PlaybackHandle, Player, PlayerState, SessionOutcome,
    };
    pub use crate::trace::{generate, generate_by_id, Algorithm, OpKind, Operation, Trace};
}

/// Re-export for public API
pub use error::{SortError, SortResult};
