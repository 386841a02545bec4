//! CLI argument parsing.
//!
//! Parsing accepts any iterator of strings so it can be tested without
//! touching the process environment.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Where the unsorted array comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// Explicit comma-separated values.
    Values(Vec<u32>),
    /// Random values; unset fields fall back to the configuration.
    Random {
        /// Array size override.
        size: Option<usize>,
        /// Seed override.
        seed: Option<u64>,
    },
}

impl Default for SnapshotSource {
    fn default() -> Self {
        Self::Random {
            size: None,
            seed: None,
        }
    }
}

/// Options shared by `trace` and `replay`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Algorithm identifier, resolved later so unknown ids surface as errors.
    pub algorithm: String,
    /// Snapshot source.
    pub source: SnapshotSource,
    /// Optional YAML configuration file.
    pub config_path: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the operation trace for an array
    Trace {
        /// Shared options.
        options: RunOptions,
        /// Emit JSON instead of text.
        json: bool,
    },
    /// Play a trace against an in-memory chart in virtual time
    Replay {
        /// Shared options.
        options: RunOptions,
        /// Per-step delay override in milliseconds.
        delay_ms: Option<u64>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "trace" => Self::parse_trace_command(args),
            "replay" => Self::parse_replay_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_trace_command(args: &[String]) -> Command {
        let mut json = false;
        let options = Self::parse_run_options(args, "trace", |flag, _| {
            if flag == "--json" {
                json = true;
                Some(0)
            } else {
                None
            }
        });

        match options {
            Some(options) => Command::Trace { options, json },
            None => Command::Help,
        }
    }

    fn parse_replay_command(args: &[String]) -> Command {
        let mut delay_ms = None;
        let options = Self::parse_run_options(args, "replay", |flag, value| {
            if flag != "--delay" {
                return None;
            }
            match value.and_then(|v| v.parse::<u64>().ok()) {
                Some(delay) => {
                    delay_ms = Some(delay);
                    Some(1)
                }
                None => {
                    eprintln!("Warning: '--delay' needs a number of milliseconds");
                    Some(0)
                }
            }
        });

        match options {
            Some(options) => Command::Replay { options, delay_ms },
            None => Command::Help,
        }
    }

    /// Parse `<algorithm>` and the shared flags starting at `args[2]`.
    ///
    /// `extra` handles command-specific flags: it receives the flag and the
    /// following argument and returns how many values it consumed, or `None`
    /// if the flag is not its own.
    fn parse_run_options<F>(args: &[String], name: &str, mut extra: F) -> Option<RunOptions>
    where
        F: FnMut(&str, Option<&str>) -> Option<usize>,
    {
        if args.len() < 3 {
            eprintln!("Error: '{name}' command requires an algorithm (bubble, selection, insertion)");
            return None;
        }

        let mut values = None;
        let mut size = None;
        let mut seed = None;
        let mut config_path = None;

        let mut i = 3;
        while i < args.len() {
            let flag = args[i].as_str();
            let next = args.get(i + 1).map(String::as_str);

            match flag {
                "--values" => {
                    let Some(parsed) = next.and_then(parse_values) else {
                        eprintln!("Error: '--values' expects a comma-separated list of integers");
                        return None;
                    };
                    values = Some(parsed);
                    i += 2;
                }
                "--size" => {
                    size = next.and_then(|v| v.parse::<usize>().ok());
                    i += 2;
                }
                "--seed" => {
                    seed = next.and_then(|v| v.parse::<u64>().ok());
                    i += 2;
                }
                "--config" => {
                    config_path = next.map(PathBuf::from);
                    i += 2;
                }
                other => match extra(other, next) {
                    Some(consumed) => i += 1 + consumed,
                    None => {
                        eprintln!("Warning: ignoring unknown option '{other}'");
                        i += 1;
                    }
                },
            }
        }

        let source = values.map_or(SnapshotSource::Random { size, seed }, SnapshotSource::Values);

        Some(RunOptions {
            algorithm: args[2].clone(),
            source,
            config_path,
        })
    }
}

/// Parse `3,1,2` into values. Empty input is an empty array.
#[must_use]
pub fn parse_values(input: &str) -> Option<Vec<u32>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(Vec::new());
    }
    input
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect()
}
