//! Deterministic snapshot generation.
//!
//! Random bar heights come from PCG seeded with a master seed, so a seed
//! printed by the CLI reproduces the same array (and therefore the same
//! trace) on any platform.

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Lowest generated bar height.
pub const DEFAULT_MIN_VALUE: u32 = 10;
/// Upper bound (exclusive) for generated bar heights.
pub const DEFAULT_MAX_VALUE: u32 = 510;

/// Seeded generator of unsorted snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRng {
    /// Master seed for reproducibility.
    seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SnapshotRng {
    /// Create a new generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate `len` heights in `[DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE)`.
    #[must_use]
    pub fn snapshot(&mut self, len: usize) -> Vec<u32> {
        self.snapshot_in(len, DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE)
    }

    /// Generate `len` heights in `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `min >= max`.
    #[must_use]
    pub fn snapshot_in(&mut self, len: usize, min: u32, max: u32) -> Vec<u32> {
        assert!(min < max, "Invalid value range: {min} >= {max}");
        (0..len).map(|_| self.rng.gen_range(min..max)).collect()
    }
}
