//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Square, WinCombo};
use tracing::instrument;

/// Checks if any line is complete.
///
/// Returns the mark and the first completed line in declared order,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, WinCombo)> {
    WinCombo::ALL.into_iter().find_map(|combo| {
        let [a, b, c] = combo.cells();
        match (board.get(a), board.get(b), board.get(c)) {
            (Some(Square::Occupied(first)), Some(second), Some(third))
                if second == Square::Occupied(first) && third == Square::Occupied(first) =>
            {
                Some((first, combo))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        for index in [0, 1, 2] {
            board.set(index, Square::Occupied(Mark::X));
        }
        assert_eq!(check_winner(&board), Some((Mark::X, WinCombo::ALL[0])));
    }

    #[test]
    fn test_winner_every_line() {
        for combo in WinCombo::ALL {
            let mut board = Board::new();
            for index in combo.cells() {
                board.set(index, Square::Occupied(Mark::O));
            }
            assert_eq!(check_winner(&board), Some((Mark::O, combo)));
        }
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let mut board = Board::new();
        board.set(0, Square::Occupied(Mark::X));
        board.set(4, Square::Occupied(Mark::O));
        board.set(8, Square::Occupied(Mark::X));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(0, Square::Occupied(Mark::X));
        board.set(1, Square::Occupied(Mark::X));
        assert_eq!(check_winner(&board), None);
    }
}
