//! Unmarked count invariant: the cached count agrees with the grid.

use super::Invariant;
use crate::controller::Game;
use crate::position::CELLS;

/// Invariant: marked cells plus the cached unmarked count is always 9.
pub struct UnmarkedCountInvariant;

impl Invariant<Game> for UnmarkedCountInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        board.marked_count() + board.unmarked_count() == CELLS
    }

    fn description() -> &'static str {
        "Marked cells plus cached unmarked count equals 9"
    }
}
