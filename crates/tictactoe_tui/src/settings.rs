//! Frontend settings loaded from TOML and overridden by flags.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_core::GameConfig;
use tracing::{debug, info, instrument};

/// Everything the binary needs before the first frame.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game configuration.
    game: GameConfig,

    /// Directory for the saved scores.
    scores_dir: PathBuf,

    /// Log destination.
    log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            scores_dir: PathBuf::from("."),
            log_file: PathBuf::from("tictactoe.log"),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(mode = %settings.game.mode, "Settings loaded successfully");
        Ok(settings)
    }

    /// Resolves settings for a command line.
    ///
    /// An explicit `--config` must exist; the default file is optional.
    #[instrument(skip(cli))]
    pub fn resolve(cli: &Cli) -> Result<Self, SettingsError> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(crate::cli::DEFAULT_CONFIG).exists() => {
                Self::from_file(crate::cli::DEFAULT_CONFIG)?
            }
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }

    /// Applies command-line flags on top of file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(mode) = cli.mode {
            self.game.mode = mode.into();
        }
        if let Some(mark) = cli.human_mark {
            self.game.human_mark = mark.into();
        }
        if let Some(level) = cli.cpu_level {
            self.game.cpu_level = level.into();
        }
        if let Some(dir) = &cli.scores_dir {
            self.scores_dir = dir.clone();
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        self
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
