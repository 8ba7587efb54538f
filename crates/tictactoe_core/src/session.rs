//! A play session: one board, one scoreboard, one configuration.

use super::engine::{MoveError, Phase, PlayOutcome, Seat, TurnEngine};
use super::scores::{ScoreTracker, Scoreboard};
use super::{Board, GameConfig, GameResult, Mark, Mode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Short status line shown under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Substatus {
    /// Fresh round.
    #[display("Make your move")]
    MakeYourMove,
    /// Human to play against the CPU.
    #[display("Your move")]
    YourMove,
    /// Two humans: whose turn it is.
    #[display("{} to move", _0)]
    ToMove(Mark),
    /// CPU move pending.
    #[display("CPU thinking...")]
    CpuThinking,
    /// Round won.
    #[display("{} wins!", _0)]
    Won(Mark),
    /// Round drawn.
    #[display("Draw!")]
    Draw,
    /// A move was taken back.
    #[display("Undo successful")]
    UndoSuccessful,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderView {
    /// The board.
    pub board: Board,
    /// Mark holding the turn.
    pub current: Mark,
    /// Round outcome so far.
    pub result: GameResult,
    /// Running totals.
    pub scores: Scoreboard,
    /// Active configuration.
    pub config: GameConfig,
    /// Status line.
    pub substatus: Substatus,
    /// Cell that undo would clear.
    pub last_move: Option<usize>,
}

/// All mutable game state, owned in one place.
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: TurnEngine,
    tracker: ScoreTracker,
    config: GameConfig,
    substatus: Substatus,
}

impl GameSession {
    /// Starts a session at the beginning of a round with the given totals.
    #[instrument(skip(tracker))]
    pub fn new(config: GameConfig, tracker: ScoreTracker) -> Self {
        let mut session = Self {
            engine: TurnEngine::new(),
            tracker,
            config,
            substatus: Substatus::MakeYourMove,
        };
        session.substatus = session.opening_substatus();
        session
    }

    /// The turn engine.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Running totals.
    pub fn scores(&self) -> Scoreboard {
        self.tracker.scores()
    }

    /// The score tracker.
    pub fn tracker(&self) -> &ScoreTracker {
        &self.tracker
    }

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current status line.
    pub fn substatus(&self) -> Substatus {
        self.substatus
    }

    /// Whether the CPU should move now.
    pub fn cpu_due(&self) -> bool {
        self.engine.phase() == Phase::InProgress && self.config.is_cpu_turn(self.engine.current())
    }

    /// Plays `index` for `seat`; a finishing move is scored immediately.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`MoveError`]; the session is unchanged.
    #[instrument(skip(self))]
    pub fn play(&mut self, index: usize, seat: Seat) -> Result<PlayOutcome, MoveError> {
        let outcome = self.engine.play(index, seat, &self.config)?;
        match outcome {
            PlayOutcome::Finished(result) => {
                self.tracker.record(&result);
                self.substatus = match result {
                    GameResult::Win { mark, .. } => Substatus::Won(mark),
                    GameResult::Draw => Substatus::Draw,
                    GameResult::InProgress => {
                        debug!("Finished move reported no result");
                        self.turn_substatus()
                    }
                };
            }
            PlayOutcome::Continued { .. } => {
                self.substatus = self.turn_substatus();
            }
        }
        Ok(outcome)
    }

    /// Clears the board for another round; totals are kept.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) {
        self.engine.reset();
        self.substatus = self.opening_substatus();
        info!("New round");
    }

    /// Zeroes the totals and starts a new round.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.tracker.reset();
        self.new_round();
        info!("New game");
    }

    /// Takes back the last move. Returns whether anything changed.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        match self.engine.undo(self.config.undo_policy) {
            Some(_) => {
                self.substatus = if self.cpu_due() {
                    Substatus::CpuThinking
                } else {
                    Substatus::UndoSuccessful
                };
                true
            }
            None => {
                debug!("Nothing to undo");
                false
            }
        }
    }

    /// Replaces the configuration. The board is left as it is.
    #[instrument(skip(self))]
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
        if !self.engine.phase().is_terminal() {
            let untouched = self.engine.board().empty_cells().len() == Board::CELLS;
            self.substatus = if untouched {
                self.opening_substatus()
            } else {
                self.turn_substatus()
            };
        }
        info!(
            mode = %config.mode,
            human = %config.human_mark,
            level = %config.cpu_level,
            "Configuration changed"
        );
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> RenderView {
        RenderView {
            board: self.engine.board().clone(),
            current: self.engine.current(),
            result: self.engine.phase().result(),
            scores: self.tracker.scores(),
            config: self.config,
            substatus: self.substatus,
            last_move: self.engine.last_move(),
        }
    }

    fn opening_substatus(&self) -> Substatus {
        if self.cpu_due() {
            Substatus::CpuThinking
        } else {
            Substatus::MakeYourMove
        }
    }

    fn turn_substatus(&self) -> Substatus {
        match self.config.mode {
            _ if self.cpu_due() => Substatus::CpuThinking,
            Mode::PvCpu => Substatus::YourMove,
            Mode::PvP => Substatus::ToMove(self.engine.current()),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default(), ScoreTracker::new())
    }
}
