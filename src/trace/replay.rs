//! Mutation replay against a plain value array.
//!
//! Applies what each record implies for the data, ignoring colors. Replaying
//! a generated trace over its own snapshot must end sorted; that is the main
//! correctness check for the recorders.

use super::{OpKind, Operation, Trace};

/// Step-by-step replay over an owned copy of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReplay {
    values: Vec<u32>,
    key: Option<u32>,
    applied: usize,
}

impl SnapshotReplay {
    /// Start a replay from `snapshot`.
    #[must_use]
    pub fn new(snapshot: &[u32]) -> Self {
        Self {
            values: snapshot.to_vec(),
            key: None,
            applied: 0,
        }
    }

    /// Apply one record.
    ///
    /// # Panics
    ///
    /// Panics if the record names an index outside the snapshot, lacks a
    /// required secondary index, or inserts without a preceding `markKey`.
    #[allow(clippy::panic)]
    pub fn apply(&mut self, op: &Operation) {
        let len = self.values.len();
        assert!(
            op.max_index() < len,
            "record {} ({op}) out of range for {len} values",
            self.applied
        );

        match op.kind {
            OpKind::Compare => {}
            OpKind::Swap => {
                let secondary = required_secondary(op);
                self.values.swap(op.primary, secondary);
            }
            OpKind::MarkKey => {
                self.key = Some(self.values[op.primary]);
            }
            OpKind::Overwrite => {
                let secondary = required_secondary(op);
                self.values[secondary] = self.values[op.primary];
            }
            OpKind::Insert => {
                let Some(key) = self.key.take() else {
                    panic!("insert({}) without a marked key", op.primary);
                };
                self.values[op.primary] = key;
            }
        }
        self.applied += 1;
    }

    /// Current values.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Consume the replay, returning the values.
    #[must_use]
    pub fn into_values(self) -> Vec<u32> {
        self.values
    }
}

#[allow(clippy::panic)]
fn required_secondary(op: &Operation) -> usize {
    let Some(secondary) = op.secondary else {
        panic!("{op} is missing its secondary index");
    };
    secondary
}

/// Apply every record of `trace` to a copy of `snapshot`.
///
/// # Panics
///
/// See [`SnapshotReplay::apply`].
#[must_use]
pub fn apply(trace: &Trace, snapshot: &[u32]) -> Vec<u32> {
    let mut replay = SnapshotReplay::new(snapshot);
    for op in trace {
        replay.apply(op);
    }
    replay.into_values()
}
