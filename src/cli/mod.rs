//! Command-line interface for goear-search.

mod commands;

pub use commands::{Cli, Commands, SearchArgs, run_command};
