//! Insertion sort recorder.

use super::Operation;

/// Sort `values` in place, returning the trace.
pub(super) fn record(values: &mut [u32]) -> Vec<Operation> {
    let n = values.len();
    let mut ops = Vec::new();

    for i in 1..n {
        let key = values[i];
        ops.push(Operation::mark_key(i));

        // `hole` is j + 1: the slot the key would land in
        let mut hole = i;
        while hole > 0 && values[hole - 1] > key {
            ops.push(Operation::overwrite(hole - 1, hole));
            values[hole] = values[hole - 1];
            hole -= 1;
        }

        ops.push(Operation::insert(hole));
        values[hole] = key;
    }

    ops
}
