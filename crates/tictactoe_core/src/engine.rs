//! Turn resolution: board ownership, turn order and round phase.

use super::rules;
use super::{Board, GameConfig, GameResult, Mark, Mode, Square, UndoPolicy, WinCombo};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Round phase. Terminal phases accept no moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    InProgress,
    /// A mark completed a line.
    Won {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        combo: WinCombo,
    },
    /// The board filled up with no line.
    Draw,
}

impl Phase {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::InProgress)
    }

    /// The phase as a [`GameResult`].
    pub fn result(&self) -> GameResult {
        match *self {
            Phase::InProgress => GameResult::InProgress,
            Phase::Won { mark, combo } => GameResult::Win { mark, combo },
            Phase::Draw => GameResult::Draw,
        }
    }
}

/// Who is asking to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Seat {
    /// A human at the board.
    Human,
    /// The computer opponent.
    Cpu,
}

/// Reason a move was refused. The engine is unchanged after any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index outside 0-8.
    #[display("Cell {} is off the board", _0)]
    OutOfRange(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),

    /// The round is already over.
    #[display("Round is already over")]
    GameOver,

    /// The seat does not control the current mark.
    #[display("{} may not move while {} is to play", seat, current)]
    WrongTurn {
        /// Seat that tried to move.
        seat: Seat,
        /// Mark holding the turn.
        current: Mark,
    },
}

impl std::error::Error for MoveError {}

/// What a successful move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The round continues with `next` to play.
    Continued {
        /// Mark now holding the turn.
        next: Mark,
    },
    /// The move ended the round.
    Finished(GameResult),
}

/// Owns the board and resolves turns.
///
/// A round starts `InProgress` on an empty board with X to play. Only
/// [`TurnEngine::play`], [`TurnEngine::undo`] and [`TurnEngine::reset`]
/// change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEngine {
    board: Board,
    current: Mark,
    phase: Phase,
    last_move: Option<usize>,
}

impl TurnEngine {
    /// Creates an engine at the start of a round.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            phase: Phase::InProgress,
            last_move: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark holding the turn. Unchanged once the round ends.
    pub fn current(&self) -> Mark {
        self.current
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Most recently played cell, if undo is available.
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Whether `seat` controls the current mark under `config`.
    pub fn seat_may_move(&self, seat: Seat, config: &GameConfig) -> bool {
        match (config.mode, seat) {
            (Mode::PvP, Seat::Human) => true,
            (Mode::PvP, Seat::Cpu) => false,
            (Mode::PvCpu, Seat::Human) => self.current == config.human_mark,
            (Mode::PvCpu, Seat::Cpu) => self.current == config.cpu_mark(),
        }
    }

    /// Places the current mark at `index` on behalf of `seat`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] without touching any state when the index is
    /// off the board, the round is over, the cell is taken, or `seat` does
    /// not hold the turn.
    #[instrument(skip(self, config), fields(current = %self.current))]
    pub fn play(
        &mut self,
        index: usize,
        seat: Seat,
        config: &GameConfig,
    ) -> Result<PlayOutcome, MoveError> {
        if index >= Board::CELLS {
            return Err(MoveError::OutOfRange(index));
        }
        if self.phase.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::Occupied(index));
        }
        if !self.seat_may_move(seat, config) {
            return Err(MoveError::WrongTurn {
                seat,
                current: self.current,
            });
        }

        let mark = self.current;
        self.board.set(index, Square::Occupied(mark));
        self.last_move = Some(index);
        debug!(index, mark = %mark, "Mark placed");

        match rules::evaluate(&self.board) {
            GameResult::Win { mark, combo } => {
                self.phase = Phase::Won { mark, combo };
                info!(winner = %mark, combo = ?combo.cells(), "Round won");
                Ok(PlayOutcome::Finished(self.phase.result()))
            }
            GameResult::Draw => {
                self.phase = Phase::Draw;
                info!("Round drawn");
                Ok(PlayOutcome::Finished(GameResult::Draw))
            }
            GameResult::InProgress => {
                self.current = mark.opponent();
                Ok(PlayOutcome::Continued { next: self.current })
            }
        }
    }

    /// Takes back the most recent move.
    ///
    /// Only one level is kept: after an undo, a second undo is a no-op until
    /// another move is played. Undoing the move that ended a round reopens
    /// it; any score already recorded for that round stays recorded.
    /// Returns the cleared index.
    #[instrument(skip(self))]
    pub fn undo(&mut self, policy: UndoPolicy) -> Option<usize> {
        let Some(index) = self.last_move.take() else {
            debug!("Nothing to undo");
            return None;
        };
        let mover = self.board.get(index).and_then(Square::mark);
        self.board.set(index, Square::Empty);
        if self.phase.is_terminal() {
            debug!(phase = ?self.phase, "Round reopened");
            self.phase = Phase::InProgress;
        }

        self.current = match policy {
            UndoPolicy::ResetToX => Mark::X,
            UndoPolicy::RestoreMover => mover.unwrap_or(self.current),
        };
        info!(index, current = %self.current, ?policy, "Move undone");
        Some(index)
    }

    /// Starts a fresh round: empty board, X to play.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}
