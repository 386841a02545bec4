//! CLI output formatting.

use serde::Serialize;

use crate::playback::SessionOutcome;
use crate::trace::{Operation, Trace, TraceStats};

/// Print version information.
pub fn print_version() {
    let hash = env!("SORTSCOPE_GIT_HASH");
    if hash.is_empty() {
        println!("sortscope {}", env!("CARGO_PKG_VERSION"));
    } else {
        println!("sortscope {} ({hash})", env!("CARGO_PKG_VERSION"));
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"sortscope - Sorting algorithm visualizer

USAGE:
    sortscope <COMMAND> [OPTIONS]

COMMANDS:
    trace <algorithm>           Print the operation trace for an array
        --values <a,b,c>        Sort these values
        --size <N>              Random array of N values (10-100)
        --seed <N>              Seed for the random array
        --config <file.yaml>    Load defaults from a configuration file
        --json                  Emit JSON

    replay <algorithm>          Play the trace against an in-memory chart
        --delay <MS>            Per-step delay (10-500 ms)
        (plus the array options of 'trace')

    help                        Show this help message
    version                     Show version information

ALGORITHMS:
    bubble, selection, insertion

EXAMPLES:
    sortscope trace bubble --values 3,1,2
    sortscope trace insertion --size 20 --seed 7 --json
    sortscope replay selection --size 30 --delay 25

Run 'sortscope-tui' for the animated terminal view.
"
    );
}

/// JSON document emitted by `trace --json`.
#[derive(Debug, Serialize)]
pub struct TraceReport<'a> {
    /// Input values.
    pub input: &'a [u32],
    /// Summary counts.
    pub stats: TraceStats,
    /// The trace.
    pub trace: &'a Trace,
}

/// Format one record with its position.
#[must_use]
pub fn format_operation(k: usize, op: &Operation) -> String {
    format!("{k:>6}  {op}")
}

/// Format summary counts on one line.
#[must_use]
pub fn format_stats(stats: &TraceStats) -> String {
    format!(
        "{} records: {} compares, {} swaps, {} keys, {} shifts, {} inserts",
        stats.total(),
        stats.compares,
        stats.swaps,
        stats.keys,
        stats.shifts,
        stats.inserts
    )
}

/// Print a trace as text.
pub fn print_trace(trace: &Trace, input: &[u32]) {
    println!("Algorithm: {}", trace.algorithm().display_name());
    println!("Input:     {input:?}");
    println!("{}", format_stats(&trace.stats()));
    println!();
    for (k, op) in trace.iter().enumerate() {
        println!("{}", format_operation(k, op));
    }
}

/// Print the result of a virtual-time replay.
pub fn print_replay(
    trace: &Trace,
    delay_ms: u64,
    outcome: &SessionOutcome,
    final_heights: &[u32],
    sink_calls: usize,
) {
    println!("Algorithm:   {}", trace.algorithm().display_name());
    println!("Steps:       {} at {delay_ms}ms", trace.len());
    println!("Scheduled:   {}ms", trace.duration_ms(delay_ms));
    println!("Sink calls:  {sink_calls}");
    println!("Completed:   {}", outcome.finished_at);
    println!("Final bars:  {final_heights:?}");
}
