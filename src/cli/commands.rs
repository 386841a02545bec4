//! CLI command handlers.

use std::process::ExitCode;

use crate::config::VizConfig;
use crate::error::{SortError, SortResult};
use crate::playback::{Player, RecordingSink, SessionOutcome};
use crate::trace::{generate_by_id, Trace};

use super::args::{RunOptions, SnapshotSource};
use super::output::{print_help, print_replay, print_trace, print_version, TraceReport};
use super::{Args, Command};

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let result = match args.command {
        Command::Trace { options, json } => run_trace(&options, json),
        Command::Replay { options, delay_ms } => run_replay(&options, delay_ms).map(|_| ()),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_user_error() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

/// Load configuration (file or defaults) and resolve the input array.
///
/// # Errors
///
/// Returns error if the configuration file cannot be loaded.
pub fn resolve_input(options: &RunOptions) -> SortResult<(VizConfig, Vec<u32>)> {
    let config = match &options.config_path {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::default(),
    };

    let values = match &options.source {
        SnapshotSource::Values(values) => values.clone(),
        SnapshotSource::Random { size, seed } => {
            let mut config = config.clone();
            if let Some(size) = size {
                config.array_size = VizConfig::normalize_size(*size);
            }
            if let Some(seed) = seed {
                config.seed = *seed;
            }
            config.snapshot(&mut config.rng())
        }
    };

    Ok((config, values))
}

/// Generate and print a trace.
///
/// # Errors
///
/// Returns error for unknown algorithms, bad configuration or JSON failure.
pub fn run_trace(options: &RunOptions, json: bool) -> SortResult<()> {
    let (_, values) = resolve_input(options)?;
    let trace = generate_by_id(&options.algorithm, &values)?;

    if json {
        let report = TraceReport {
            input: &values,
            stats: trace.stats(),
            trace: &trace,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_trace(&trace, &values);
    }
    Ok(())
}

/// Replay a trace in virtual time against an in-memory chart.
///
/// # Errors
///
/// Returns error for unknown algorithms or bad configuration.
pub fn run_replay(options: &RunOptions, delay_ms: Option<u64>) -> SortResult<SessionOutcome> {
    let (config, values) = resolve_input(options)?;
    let trace = generate_by_id(&options.algorithm, &values)?;
    let delay_ms = delay_ms.map_or(config.delay_ms, VizConfig::normalize_delay);

    let (outcome, sink) = replay_trace(&trace, &values, delay_ms)?;
    print_replay(
        &trace,
        delay_ms,
        &outcome,
        &sink.chart().heights(),
        sink.calls().len(),
    );
    Ok(outcome)
}

/// Play `trace` over `values` to completion, returning the outcome and the
/// sink that received the calls.
///
/// # Errors
///
/// Returns error if the player rejects the session.
pub fn replay_trace(
    trace: &Trace,
    values: &[u32],
    delay_ms: u64,
) -> SortResult<(SessionOutcome, RecordingSink)> {
    let mut sink = RecordingSink::new(values);
    let mut player = Player::new();
    let handle = player.play(trace.clone(), delay_ms)?;
    player.run_to_completion(&mut sink);

    match handle.outcome() {
        Some(outcome) => Ok((outcome, sink)),
        None => Err(SortError::config(format!(
            "session {} did not complete",
            handle.session()
        ))),
    }
}
