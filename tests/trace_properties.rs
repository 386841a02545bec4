//! Trace generation properties.
//!
//! Each test states a property that must hold for every input; proptest
//! searches for counterexamples.

use proptest::prelude::*;
use sortscope::prelude::*;
use sortscope::trace::replay;

fn sorted(values: &[u32]) -> Vec<u32> {
    let mut out = values.to_vec();
    out.sort_unstable();
    out
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn bubble_three_elements() {
    let trace = generate_by_id("bubble", &[3, 1, 2]).unwrap();
    assert_eq!(
        trace.operations(),
        &[
            Operation::compare(0, 1),
            Operation::swap(0, 1),
            Operation::compare(1, 2),
            Operation::swap(1, 2),
            // second pass still runs: no early exit
            Operation::compare(0, 1),
        ]
    );
    assert_eq!(replay::apply(&trace, &[3, 1, 2]), vec![1, 2, 3]);
}

#[test]
fn selection_three_elements() {
    let trace = generate_by_id("selection", &[3, 1, 2]).unwrap();
    assert_eq!(
        trace.operations(),
        &[
            Operation::compare(0, 1),
            Operation::compare(0, 2),
            Operation::swap(0, 1),
            Operation::compare(1, 2),
            Operation::swap(1, 2),
        ]
    );
    assert_eq!(replay::apply(&trace, &[3, 1, 2]), vec![1, 2, 3]);
}

#[test]
fn insertion_three_elements() {
    let trace = generate_by_id("insertion", &[3, 1, 2]).unwrap();
    assert_eq!(
        trace.operations(),
        &[
            Operation::mark_key(1),
            Operation::overwrite(0, 1),
            Operation::insert(0),
            Operation::mark_key(2),
            Operation::overwrite(1, 2),
            Operation::insert(1),
        ]
    );
    assert_eq!(replay::apply(&trace, &[3, 1, 2]), vec![1, 2, 3]);
}

#[test]
fn unknown_algorithm_is_rejected() {
    for id in ["", "quick", "bubblesort", "merge"] {
        assert!(
            matches!(
                generate_by_id(id, &[1, 2]),
                Err(SortError::UnknownAlgorithm { .. })
            ),
            "{id:?} accepted"
        );
    }
}

#[test]
fn empty_and_single_inputs() {
    for algo in Algorithm::ALL {
        assert!(generate(algo, &[]).is_empty(), "{algo}");
    }
    assert!(generate(Algorithm::Bubble, &[7]).is_empty());
    assert!(generate(Algorithm::Selection, &[7]).is_empty());
    assert_eq!(generate(Algorithm::Insertion, &[7]).count(OpKind::Overwrite), 0);
}

#[test]
fn trace_json_round_trip_is_lossless() {
    let trace = generate(Algorithm::Insertion, &[5, 2, 4, 6, 1, 3]);
    let json = serde_json::to_string(&trace).unwrap();
    let back: Trace = serde_json::from_str(&json).unwrap();
    assert_eq!(back, trace);
}

// ============================================================================
// Properties
// ============================================================================

fn snapshot() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..600, 0..60)
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    /// Replaying a trace's implied mutations sorts the snapshot.
    #[test]
    fn prop_replay_sorts(algo in algorithm(), values in snapshot()) {
        let trace = generate(algo, &values);
        prop_assert_eq!(replay::apply(&trace, &values), sorted(&values));
    }

    /// Generation is a pure function of (algorithm, snapshot).
    #[test]
    fn prop_deterministic(algo in algorithm(), values in snapshot()) {
        prop_assert_eq!(generate(algo, &values), generate(algo, &values.clone()));
    }

    /// The caller's array is never touched.
    #[test]
    fn prop_input_untouched(algo in algorithm(), values in snapshot()) {
        let before = values.clone();
        let _ = generate(algo, &values);
        prop_assert_eq!(values, before);
    }

    /// Every index is inside the snapshot.
    #[test]
    fn prop_indices_in_range(algo in algorithm(), values in snapshot()) {
        let trace = generate(algo, &values);
        prop_assert!(trace.validate().is_ok());
        prop_assert!(trace.iter().all(|op| op.max_index() < values.len()));
    }

    /// Bubble: exactly n(n-1)/2 compares, at most that many swaps.
    #[test]
    fn prop_bubble_counts(values in snapshot()) {
        let n = values.len();
        let trace = generate(Algorithm::Bubble, &values);
        let compares = trace.count(OpKind::Compare);
        prop_assert_eq!(compares, n * n.saturating_sub(1) / 2);
        prop_assert!(trace.count(OpKind::Swap) <= compares);
        prop_assert_eq!(trace.len(), compares + trace.count(OpKind::Swap));
    }

    /// Selection: length depends only on n (compares plus one swap per pass).
    #[test]
    fn prop_selection_length(values in snapshot()) {
        let n = values.len();
        let trace = generate(Algorithm::Selection, &values);
        prop_assert_eq!(trace.count(OpKind::Compare), n * n.saturating_sub(1) / 2);
        prop_assert_eq!(trace.count(OpKind::Swap), n.saturating_sub(1));
    }

    /// Insertion: one markKey and one insert per element after the first,
    /// and one shift per inversion.
    #[test]
    fn prop_insertion_shape(values in snapshot()) {
        let n = values.len();
        let trace = generate(Algorithm::Insertion, &values);
        let inversions = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| values[i] > values[j])
            .count();

        prop_assert_eq!(trace.count(OpKind::MarkKey), n.saturating_sub(1));
        prop_assert_eq!(trace.count(OpKind::Insert), n.saturating_sub(1));
        prop_assert_eq!(trace.count(OpKind::Overwrite), inversions);
        prop_assert_eq!(trace.count(OpKind::Compare), 0);
    }
}
