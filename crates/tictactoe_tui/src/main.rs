//! Tic Tac Toe - terminal frontend
//!
//! Plays against a second human or a random-move CPU, keeping scores in a
//! JSON file between runs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod input;
mod settings;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use settings::Settings;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli).context("Failed to load settings")?;

    init_logging(settings.log_file())?;
    info!(
        mode = %settings.game().mode,
        human = %settings.game().human_mark,
        level = %settings.game().cpu_level,
        "Starting tictactoe"
    );

    app::run(settings).await
}

/// Logs to a file so the terminal UI stays clean.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file '{}'", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")
}
