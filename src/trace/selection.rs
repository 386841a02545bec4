//! Selection sort recorder.

use super::Operation;

/// Sort `values` in place, returning the trace.
///
/// The closing swap of each pass is emitted even when the minimum is already
/// in place.
pub(super) fn record(values: &mut [u32]) -> Vec<Operation> {
    let n = values.len();
    let mut ops = Vec::new();

    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;
        for j in i + 1..n {
            ops.push(Operation::compare(i, j));
            if values[j] < values[min_idx] {
                min_idx = j;
            }
        }
        ops.push(Operation::swap(i, min_idx));
        values.swap(i, min_idx);
    }

    ops
}
