//! Computer opponent.

use super::{Board, CpuLevel};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument, warn};

/// Picks moves for the CPU seat.
///
/// Every level plays a uniformly random empty cell; the level is carried
/// so the frontend and logs can report it.
#[derive(Debug, Clone)]
pub struct CpuAgent {
    level: CpuLevel,
    rng: StdRng,
}

impl CpuAgent {
    /// Creates an agent seeded from the operating system.
    #[instrument]
    pub fn new(level: CpuLevel) -> Self {
        Self {
            level,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an agent with a fixed seed, for reproducible play.
    #[instrument]
    pub fn seeded(level: CpuLevel, seed: u64) -> Self {
        Self {
            level,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Configured level.
    pub fn level(&self) -> CpuLevel {
        self.level
    }

    /// Changes the level used for the next move.
    pub fn set_level(&mut self, level: CpuLevel) {
        self.level = level;
    }

    /// Chooses an empty cell, or `None` when the board is full.
    #[instrument(skip(self, board), fields(level = %self.level))]
    pub fn select_move(&mut self, board: &Board) -> Option<usize> {
        let available = board.empty_cells();
        let Some(&index) = available.choose(&mut self.rng) else {
            warn!("CPU asked to move on a full board");
            return None;
        };
        debug!(index, options = available.len(), "CPU chose cell");
        Some(index)
    }
}

impl Default for CpuAgent {
    fn default() -> Self {
        Self::new(CpuLevel::default())
    }
}
