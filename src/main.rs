//! Strictly Scorebook - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use std::io::{BufReader, Write};
use strictly_baseball::GameAction;
use strictly_scorebook::{ScorebookConfig, Session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_scorebook=debug,strictly_baseball=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ScorebookConfig::load(Some(cli.config.as_path()))?;

    match cli.command {
        Command::Play => run_play(&config),
        Command::Script { file, format } => run_script(&config, &file, format),
        Command::Actions => run_actions(),
    }
}

/// Score a game from the terminal.
#[instrument(skip(config))]
fn run_play(config: &ScorebookConfig) -> Result<()> {
    info!("Starting interactive session");
    let mut session = Session::new(config);
    let stdin = std::io::stdin();
    session.run(stdin.lock(), std::io::stdout())?;
    info!(saved = session.store().records().len(), "Session finished");
    Ok(())
}

/// Replay a command file.
#[instrument(skip(config))]
fn run_script(config: &ScorebookConfig, file: &std::path::Path, format: OutputFormat) -> Result<()> {
    let input = std::fs::File::open(file).with_context(|| format!("Failed to open script {}", file.display()))?;
    let mut session = Session::new(config);

    match format {
        OutputFormat::Text => session.run(BufReader::new(input), std::io::stdout())?,
        OutputFormat::Json => {
            session.run(BufReader::new(input), std::io::sink())?;
            let report = serde_json::json!({
                "snapshot": session.controller().snapshot(),
                "pending": session.controller().pending_play(),
                "records": session.store().records(),
            });
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Print every action keyword.
fn run_actions() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for action in GameAction::all() {
        writeln!(stdout, "{:<18} {}", action.to_string(), action.kind())?;
    }
    Ok(())
}
