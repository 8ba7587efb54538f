//! Command-line interface for the tictactoe frontend.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tictactoe_core::{CpuLevel, Mark, Mode};

/// Tic-tac-toe in the terminal, against a friend or the CPU
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with scores that survive restarts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Missing is fine unless given explicitly.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved scores
    #[arg(long)]
    pub scores_dir: Option<PathBuf>,

    /// Play against another human or the CPU
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Mark played by the human against the CPU
    #[arg(long, value_enum)]
    pub human_mark: Option<MarkArg>,

    /// CPU difficulty selector
    #[arg(long, value_enum)]
    pub cpu_level: Option<LevelArg>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Default settings file looked up when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "tictactoe.toml";

/// Game mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two humans
    Pvp,
    /// Human against CPU
    Pvcpu,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => Mode::PvP,
            ModeArg::Pvcpu => Mode::PvCpu,
        }
    }
}

/// Mark flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    /// X moves first
    X,
    /// O moves second
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

/// CPU level flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    /// Easy
    Easy,
    /// Normal
    Normal,
    /// Hard
    Hard,
}

impl From<LevelArg> for CpuLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Easy => CpuLevel::Easy,
            LevelArg::Normal => CpuLevel::Normal,
            LevelArg::Hard => CpuLevel::Hard,
        }
    }
}
