//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here mutates state, so the
//! rules can be applied to any nine-cell position, reachable or not.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::{Board, GameResult};
use tracing::instrument;

/// Classifies a board as won, drawn or still in progress.
///
/// Lines are checked in [`WinCombo::ALL`](super::WinCombo::ALL) order and
/// the first complete line wins, so boards with two complete lines still
/// yield a single deterministic result.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameResult {
    if let Some((mark, combo)) = check_winner(board) {
        return GameResult::Win { mark, combo };
    }
    if is_full(board) {
        return GameResult::Draw;
    }
    GameResult::InProgress
}
