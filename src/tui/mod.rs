//! TUI module for sortscope.
//!
//! Application state and key handling live here so they can be tested; the
//! terminal I/O stays in the `sortscope-tui` binary.

#[cfg(feature = "tui")]
pub mod app;
