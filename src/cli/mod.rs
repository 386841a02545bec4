//! CLI module for sortscope.
//!
//! All CLI logic lives here so `main.rs` stays a two-line shim and the
//! parsing and command handlers can be tested directly.

mod args;
mod commands;
mod output;

pub use args::{parse_values, Args, Command, RunOptions, SnapshotSource};
pub use commands::{replay_trace, resolve_input, run_cli, run_replay, run_trace};
pub use output::{format_operation, format_stats, print_help, print_version, TraceReport};
