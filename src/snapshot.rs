//! Read-only projections handed to the presentation layer.
//!
//! Everything here is plain data and serializes to JSON, so a renderer
//! never holds authoritative game state.

use crate::board::Board;
use crate::player::Player;
use crate::position::{Coord, SIZE};
use crate::types::{Cell, Mark, Outcome};
use serde::{Deserialize, Serialize};

/// Copy of the grid and its unmarked count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Cells as `[row][column]`.
    pub cells: [[Cell; SIZE]; SIZE],
    /// Empty cells remaining.
    pub unmarked: usize,
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            cells: *board.rows(),
            unmarked: board.unmarked_count(),
        }
    }
}

impl BoardSnapshot {
    /// Cell at `coord`.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.y()][coord.x()]
    }
}

/// Everything needed to render the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The grid.
    pub board: BoardSnapshot,
    /// Player to move (or who moved last, once the game is over).
    pub active_player: Player,
    /// Current outcome.
    pub outcome: Outcome,
    /// True while a bot move is pending or after the game ended.
    pub locked: bool,
}

/// Result of submitting a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// False when the cell was already marked; nothing changed.
    pub accepted: bool,
    /// Target cell.
    pub coord: Coord,
    /// Mark that was (or would have been) placed.
    pub mark: Mark,
    /// Outcome after the move.
    pub outcome: Outcome,
    /// Player to move next (or the mover, if the game ended).
    pub active_player: Player,
    /// True when the next move belongs to a bot.
    pub bot_pending: bool,
}

impl MoveReport {
    /// One-line status text for an announcer.
    pub fn status(&self) -> String {
        match self.outcome {
            Outcome::Win(_) => format!("{} wins!", self.active_player.name),
            Outcome::Tie => "It's a tie!".to_string(),
            Outcome::Ongoing => format!("{}'s turn.", self.active_player.name),
        }
    }
}
