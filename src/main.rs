//! sortscope CLI - Sorting algorithm visualizer
//!
//! Command-line interface for generating and replaying sort traces.

use std::process::ExitCode;

use sortscope::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run_cli(Args::parse())
}
