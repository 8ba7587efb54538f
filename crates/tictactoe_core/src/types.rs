//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// A player symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Mark {
    /// Mark X (always opens a round).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Nothing played here yet.
    #[default]
    Empty,
    /// Cell claimed by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Square {
    fn from(mark: Option<Mark>) -> Self {
        mark.map_or(Square::Empty, Square::Occupied)
    }
}

/// 3x3 board in row-major order (indices 0-8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;

    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw squares.
    ///
    /// Useful for evaluating arbitrary positions; boards built this way
    /// never reach a [`TurnEngine`](crate::TurnEngine).
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks whether the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Indices of every empty cell, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Writes a square. Only the turn engine mutates boards.
    pub(crate) fn set(&mut self, index: usize, square: Square) {
        if let Some(slot) = self.squares.get_mut(index) {
            *slot = square;
        }
    }

    /// Formats the board as a human-readable grid, numbering empty cells 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.squares[index] {
                    Square::Empty => (index + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl From<[Option<Mark>; 9]> for Board {
    fn from(cells: [Option<Mark>; 9]) -> Self {
        Self::from_squares(cells.map(Square::from))
    }
}

/// One of the eight lines that completes a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinCombo([usize; 3]);

impl WinCombo {
    /// Every winning line: rows, then columns, then diagonals.
    ///
    /// The order is the tie-break when several lines complete at once.
    pub const ALL: [WinCombo; 8] = [
        // Rows
        WinCombo([0, 1, 2]),
        WinCombo([3, 4, 5]),
        WinCombo([6, 7, 8]),
        // Columns
        WinCombo([0, 3, 6]),
        WinCombo([1, 4, 7]),
        WinCombo([2, 5, 8]),
        // Diagonals
        WinCombo([0, 4, 8]),
        WinCombo([2, 4, 6]),
    ];

    /// The three cell indices of this line.
    pub fn cells(self) -> [usize; 3] {
        self.0
    }

    /// Whether `index` lies on this line.
    pub fn contains(self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// Outcome of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// A mark completed a line.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        combo: WinCombo,
    },
    /// Board full with no line.
    Draw,
    /// Play continues.
    InProgress,
}
