//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `search`: Run a catalog search and print the results
//! - `config`: Show or initialize the config file

mod config;
mod search;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

pub use config::cmd_config;
pub use search::{SearchArgs, cmd_search};

/// goear-search CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog for tracks
    Search(SearchArgs),
    /// Show the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Search(args) => {
            let rt = Runtime::new()?;
            Ok(cmd_search(&rt, args)?)
        }
        Commands::Config { init } => cmd_config(*init),
    }
}
