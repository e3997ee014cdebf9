//! Command-line interface for strictly_scorebook.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Strictly Scorebook - live play-by-play scoring for amateur baseball
#[derive(Parser, Debug)]
#[command(name = "strictly_scorebook")]
#[command(about = "Live play-by-play scorebook for amateur baseball", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration (defaults are used if it is missing)
    #[arg(short, long, global = true, default_value = "scorebook.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a game interactively on stdin/stdout
    Play,

    /// Run a file of console commands and print the result
    Script {
        /// File with one console command per line
        file: PathBuf,

        /// Output format for the final result
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List every action keyword and whether it needs confirmation
    Actions,
}

/// How `script` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Scoreboard text.
    Text,
    /// Snapshot and final record as JSON.
    Json,
}
