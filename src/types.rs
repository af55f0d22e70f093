//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// A player's symbol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Mark {
    /// Player one's mark (moves first).
    X,
    /// Player two's mark.
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

    /// Player slot (0 or 1) that owns this mark.
    pub fn slot(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// A single square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Marked by a player.
    Marked(Mark),
}

impl Cell {
    /// Returns true if nobody has marked this cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    /// Single-character rendering used by `Board`'s `Display`.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Marked(Mark::X) => 'X',
            Cell::Marked(Mark::O) => 'O',
        }
    }
}

/// Result of evaluating the board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and cells remain.
    Ongoing,
    /// The given mark completed a line.
    Win(Mark),
    /// Every cell is marked and nobody won.
    Tie,
}

impl Outcome {
    /// Returns true for `Win` and `Tie`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win(mark) => write!(f, "{} wins", mark),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
