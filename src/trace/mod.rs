//! Trace generation.
//!
//! Each algorithm runs to completion on a private copy of the snapshot and
//! records every primitive step as an [`Operation`]. The resulting [`Trace`]
//! is positional: records name indices, never values, and indices are valid
//! against a single consistent timeline of the private copy.
//!
//! ```rust
//! use sortscope::trace::{generate, Algorithm, OpKind};
//!
//! let values = [3, 1, 2];
//! let trace = generate(Algorithm::Bubble, &values);
//!
//! assert_eq!(trace.count(OpKind::Compare), 3);
//! assert_eq!(values, [3, 1, 2]); // caller's array untouched
//! ```

mod bubble;
mod insertion;
pub mod replay;
mod selection;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SortError, SortResult};

/// Sorting algorithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Naive bubble sort, no early exit.
    #[default]
    Bubble,
    /// Selection sort, always swaps at the end of a pass.
    Selection,
    /// Insertion sort by shifting.
    Insertion,
}

impl Algorithm {
    /// All variants in menu order.
    pub const ALL: [Self; 3] = [Self::Bubble, Self::Selection, Self::Insertion];

    /// Stable identifier used by the CLI and config files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
        }
    }

    /// Next variant, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Bubble => Self::Selection,
            Self::Selection => Self::Insertion,
            Self::Insertion => Self::Bubble,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Self::ALL
            .into_iter()
            .find(|algo| algo.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| SortError::unknown_algorithm(s))
    }
}

/// Kind of a primitive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpKind {
    /// Two positions are compared.
    Compare,
    /// Two positions exchange values.
    Swap,
    /// The element at `primary` becomes the insertion key.
    MarkKey,
    /// The value at `primary` is copied into `secondary`.
    Overwrite,
    /// The insertion key is written into `primary`.
    Insert,
}

impl OpKind {
    /// Whether records of this kind carry a secondary index.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Compare | Self::Swap | Self::Overwrite)
    }
}

/// One atomic sorting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    /// Index the step acts on.
    pub primary: usize,
    /// Second index, for two-position steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<usize>,
    /// What the step does.
    pub kind: OpKind,
}

impl Operation {
    /// `compare(i, j)`
    #[must_use]
    pub const fn compare(i: usize, j: usize) -> Self {
        Self::binary(OpKind::Compare, i, j)
    }

    /// `swap(i, j)`
    #[must_use]
    pub const fn swap(i: usize, j: usize) -> Self {
        Self::binary(OpKind::Swap, i, j)
    }

    /// `markKey(i)`
    #[must_use]
    pub const fn mark_key(i: usize) -> Self {
        Self::unary(OpKind::MarkKey, i)
    }

    /// `overwrite(from, to)`
    #[must_use]
    pub const fn overwrite(from: usize, to: usize) -> Self {
        Self::binary(OpKind::Overwrite, from, to)
    }

    /// `insert(i)`
    #[must_use]
    pub const fn insert(i: usize) -> Self {
        Self::unary(OpKind::Insert, i)
    }

    const fn binary(kind: OpKind, primary: usize, secondary: usize) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            kind,
        }
    }

    const fn unary(kind: OpKind, primary: usize) -> Self {
        Self {
            primary,
            secondary: None,
            kind,
        }
    }

    /// Largest index this record touches.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.secondary.map_or(self.primary, |s| s.max(self.primary))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            OpKind::Compare => "compare",
            OpKind::Swap => "swap",
            OpKind::MarkKey => "markKey",
            OpKind::Overwrite => "overwrite",
            OpKind::Insert => "insert",
        };
        match self.secondary {
            Some(secondary) => write!(f, "{name}({}, {secondary})", self.primary),
            None => write!(f, "{name}({})", self.primary),
        }
    }
}

/// Ordered, immutable sequence of operations for one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    algorithm: Algorithm,
    snapshot_len: usize,
    operations: Vec<Operation>,
}

impl Trace {
    /// Build a trace from raw records.
    ///
    /// Indices are not checked here; see [`Trace::validate`].
    #[must_use]
    pub fn new(algorithm: Algorithm, snapshot_len: usize, operations: Vec<Operation>) -> Self {
        Self {
            algorithm,
            snapshot_len,
            operations,
        }
    }

    /// Algorithm that produced this trace.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Length of the snapshot the trace was generated from.
    #[must_use]
    pub const fn snapshot_len(&self) -> usize {
        self.snapshot_len
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the trace has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Records in execution order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate records in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Record at position `k`.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<&Operation> {
        self.operations.get(k)
    }

    /// Number of records of the given kind.
    #[must_use]
    pub fn count(&self, kind: OpKind) -> usize {
        self.operations.iter().filter(|op| op.kind == kind).count()
    }

    /// Total playback time at the given per-step delay, saturating.
    #[must_use]
    pub fn duration_ms(&self, delay_ms: u64) -> u64 {
        (self.operations.len() as u64).saturating_mul(delay_ms)
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> TraceStats {
        TraceStats::from_trace(self)
    }

    /// Check that every index is inside the snapshot and that each record
    /// carries exactly the indices its kind requires.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first bad record.
    pub fn validate(&self) -> SortResult<()> {
        for (k, op) in self.operations.iter().enumerate() {
            if op.kind.is_binary() != op.secondary.is_some() {
                return Err(SortError::config(format!(
                    "record {k} ({op}) has the wrong number of indices"
                )));
            }
            if op.max_index() >= self.snapshot_len {
                return Err(SortError::config(format!(
                    "record {k} ({op}) is out of range for {} bars",
                    self.snapshot_len
                )));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

/// Per-kind record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    /// `compare` records.
    pub compares: usize,
    /// `swap` records.
    pub swaps: usize,
    /// `markKey` records.
    pub keys: usize,
    /// `overwrite` records.
    pub shifts: usize,
    /// `insert` records.
    pub inserts: usize,
}

impl TraceStats {
    /// Count records in one pass.
    #[must_use]
    pub fn from_trace(trace: &Trace) -> Self {
        trace.iter().fold(Self::default(), |mut stats, op| {
            match op.kind {
                OpKind::Compare => stats.compares += 1,
                OpKind::Swap => stats.swaps += 1,
                OpKind::MarkKey => stats.keys += 1,
                OpKind::Overwrite => stats.shifts += 1,
                OpKind::Insert => stats.inserts += 1,
            }
            stats
        })
    }

    /// Total records.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.compares + self.swaps + self.keys + self.shifts + self.inserts
    }
}

/// Generate the trace for `algorithm` over `snapshot`.
///
/// The caller's slice is never mutated; the algorithm works on a copy.
#[must_use]
pub fn generate(algorithm: Algorithm, snapshot: &[u32]) -> Trace {
    let mut values = snapshot.to_vec();
    let operations = match algorithm {
        Algorithm::Bubble => bubble::record(&mut values),
        Algorithm::Selection => selection::record(&mut values),
        Algorithm::Insertion => insertion::record(&mut values),
    };

    debug_assert!(values.windows(2).all(|w| w[0] <= w[1]));
    tracing::debug!(
        target: "sortscope.trace",
        algorithm = %algorithm,
        len = snapshot.len(),
        operations = operations.len(),
        "trace generated"
    );

    Trace::new(algorithm, snapshot.len(), operations)
}

/// Generate a trace from a string algorithm identifier.
///
/// # Errors
///
/// Returns [`SortError::UnknownAlgorithm`] if `algorithm_id` does not name a
/// known variant.
pub fn generate_by_id(algorithm_id: &str, snapshot: &[u32]) -> SortResult<Trace> {
    let algorithm = algorithm_id.parse::<Algorithm>().inspect_err(|err| {
        tracing::warn!(target: "sortscope.trace", error = %err, "rejected algorithm id");
    })?;
    Ok(generate(algorithm, snapshot))
}
