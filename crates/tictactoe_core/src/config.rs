//! Session configuration: who plays, and how the engine behaves.

use super::Mark;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Who controls each mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    #[display("Player vs Player")]
    PvP,
    /// The human plays against the CPU.
    #[display("Player vs CPU")]
    PvCpu,
}

impl Mode {
    /// Switches between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Self::PvP => Self::PvCpu,
            Self::PvCpu => Self::PvP,
        }
    }
}

/// CPU difficulty selector.
///
/// Stored and reported, but every level currently plays uniformly random
/// legal moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum CpuLevel {
    /// Easy.
    Easy,
    /// Normal.
    #[default]
    Normal,
    /// Hard.
    Hard,
}

impl CpuLevel {
    /// Next level, wrapping from the last back to the first.
    #[instrument]
    pub fn next(self) -> Self {
        use strum::IntoEnumIterator;

        Self::iter()
            .cycle()
            .skip_while(|level| *level != self)
            .nth(1)
            .unwrap_or_default()
    }
}

/// Which mark holds the turn after an undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoPolicy {
    /// The mark that owned the undone cell moves again.
    #[default]
    RestoreMover,
    /// X always moves after an undo, whoever played the undone cell.
    ResetToX,
}

/// Game configuration, read on every move.
///
/// Changing it never rewrites the board; it affects the next move or round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Who controls each mark.
    pub mode: Mode,
    /// The human's mark in [`Mode::PvCpu`].
    pub human_mark: Mark,
    /// Difficulty selector.
    pub cpu_level: CpuLevel,
    /// Turn handling after undo.
    pub undo_policy: UndoPolicy,
    /// Delay before the CPU moves, in milliseconds. Zero plays immediately.
    pub cpu_delay_ms: u64,
}

impl GameConfig {
    /// Default CPU "thinking" delay.
    pub const DEFAULT_CPU_DELAY_MS: u64 = 300;

    /// The CPU's mark: always the opposite of the human's.
    pub fn cpu_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// CPU delay as a [`Duration`].
    pub fn cpu_delay(&self) -> Duration {
        Duration::from_millis(self.cpu_delay_ms)
    }

    /// Whether `mark` is played by the CPU under this configuration.
    pub fn is_cpu_turn(&self, mark: Mark) -> bool {
        self.mode == Mode::PvCpu && mark == self.cpu_mark()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            human_mark: Mark::X,
            cpu_level: CpuLevel::default(),
            undo_policy: UndoPolicy::default(),
            cpu_delay_ms: Self::DEFAULT_CPU_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_mark_is_opposite() {
        let config = GameConfig::default().with_human_mark(Mark::O);
        assert_eq!(config.cpu_mark(), Mark::X);
    }

    #[test]
    fn test_cpu_turn_only_in_pvcpu() {
        let config = GameConfig::default();
        assert!(!config.is_cpu_turn(Mark::O));
        let config = config.with_mode(Mode::PvCpu);
        assert!(config.is_cpu_turn(Mark::O));
        assert!(!config.is_cpu_turn(Mark::X));
    }

    #[test]
    fn test_level_cycles() {
        assert_eq!(CpuLevel::Easy.next(), CpuLevel::Normal);
        assert_eq!(CpuLevel::Normal.next(), CpuLevel::Hard);
        assert_eq!(CpuLevel::Hard.next(), CpuLevel::Easy);
    }
}
