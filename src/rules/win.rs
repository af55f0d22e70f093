//! Win detection and move evaluation.

use super::line::{Line, scan};
use crate::board::Board;
use crate::position::Coord;
use crate::types::{Mark, Outcome};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Evaluates the board after `mark` was played at `last`.
///
/// Only lines through `last` are checked: a move can only complete a
/// line it belongs to. Diagonals are checked only when `last` sits on
/// them. A tie is declared when no line was completed and the cached
/// unmarked count has reached zero.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, last: Coord, mark: Mark) -> Outcome {
    if let Some(line) = Line::through(last)
        .into_iter()
        .find(|&line| scan(board, line).is_complete(mark))
    {
        debug!(%line, %mark, "Line completed");
        return Outcome::Win(mark);
    }

    if super::tie::is_full(board) {
        return Outcome::Tie;
    }

    Outcome::Ongoing
}

/// Scans every line for a completed one.
///
/// Returns `Some(mark)` if the mark has three in a row, `None` otherwise.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Mark> {
    Line::SCAN_ORDER.into_iter().find_map(|line| {
        let tally = scan(board, line);
        Mark::iter().find(|&mark| tally.is_complete(mark))
    })
}
