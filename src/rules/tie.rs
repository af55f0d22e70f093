//! Tie detection for tic-tac-toe.

use crate::board::Board;
use tracing::instrument;

/// Checks if the board is full, using the cached unmarked count.
///
/// A full board with no completed line is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.unmarked_count() == 0
}
