//! Tic-tac-toe session engine.
//!
//! Rules, turn resolution, a random-move CPU opponent, score tracking with
//! pluggable persistence, and a controller that routes frontend input.
//!
//! # Architecture
//!
//! - **Rules**: pure win/draw evaluation over a [`Board`]
//! - **Engine**: [`TurnEngine`] owns the board, turn order and round [`Phase`]
//! - **CPU**: [`CpuAgent`] picks a random empty cell
//! - **Scores**: [`ScoreTracker`] tallies results into a [`ScoreStore`]
//! - **Controller**: [`GameController`] applies [`InputEvent`]s to a
//!   [`GameSession`] and hands each [`RenderView`] to a [`Renderer`]
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{
//!     CpuAgent, GameConfig, GameController, InputEvent, MemoryStore, RenderView,
//! };
//!
//! let renderer = |view: &RenderView| println!("{}\n{}", view.board.display(), view.substatus);
//! let mut controller = GameController::new(
//!     GameConfig::default(),
//!     CpuAgent::default(),
//!     Box::new(MemoryStore::new()),
//!     Box::new(renderer),
//! );
//! controller.start();
//! controller.handle(InputEvent::CellSelected(4));
//! assert_eq!(controller.session().engine().last_move(), Some(4));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod cpu;
mod engine;
mod position;
pub mod rules;
mod scores;
mod session;
mod types;

pub use config::{CpuLevel, GameConfig, Mode, UndoPolicy};
pub use controller::{GameController, InputEvent, Renderer};
pub use cpu::CpuAgent;
pub use engine::{MoveError, Phase, PlayOutcome, Seat, TurnEngine};
pub use position::Position;
pub use rules::evaluate;
pub use scores::{FileStore, MemoryStore, SCORES_KEY, ScoreStore, ScoreTracker, Scoreboard, StoreError};
pub use session::{GameSession, RenderView, Substatus};
pub use types::{Board, GameResult, Mark, Square, WinCombo};
