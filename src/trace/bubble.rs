//! Bubble sort recorder.

use super::Operation;

/// Sort `values` in place, returning the trace.
///
/// Runs every pass even when the array is already sorted, so the number of
/// compares is always `n(n-1)/2`.
pub(super) fn record(values: &mut [u32]) -> Vec<Operation> {
    let n = values.len();
    let mut ops = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            ops.push(Operation::compare(j, j + 1));
            if values[j] > values[j + 1] {
                ops.push(Operation::swap(j, j + 1));
                values.swap(j, j + 1);
            }
        }
    }

    ops
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::trace::OpKind;

    #[test]
    fn test_bubble_three_elements() {
        let mut values = [3, 1, 2];
        let ops = record(&mut values);
        assert_eq!(
            ops,
            vec![
                Operation::compare(0, 1),
                Operation::swap(0, 1),
                Operation::compare(1, 2),
                Operation::swap(1, 2),
                Operation::compare(0, 1),
            ]
        );
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn test_bubble_sorted_input_has_no_swaps() {
        let mut values = [1, 2, 3, 4, 5];
        let ops = record(&mut values);
        assert_eq!(ops.len(), 10);
        assert!(ops.iter().all(|op| op.kind == OpKind::Compare));
    }

    #[test]
    fn test_bubble_equal_values_not_swapped() {
        let mut values = [2, 2];
        assert_eq!(record(&mut values), vec![Operation::compare(0, 1)]);
    }
}
