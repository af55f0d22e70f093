//! Move selection for the bot player.
//!
//! Two fixed policies: `Easy` picks any empty cell uniformly at random,
//! `Hard` runs a short rule cascade (win, block, center, corner). Neither
//! searches the game tree, so `Hard` can still be beaten.

use crate::board::Board;
use crate::position::Coord;
use crate::rules::{Line, scan};
use crate::types::Mark;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bot difficulty, chosen when the game is configured.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty cell.
    Easy,
    /// Win, then block, then center, then corner.
    #[default]
    Hard,
}

/// Chooses a cell for `own` to play.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(skip(board, rng), fields(unmarked = board.unmarked_count()))]
pub fn choose_move<R: Rng>(
    board: &Board,
    own: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Coord> {
    let choice = match difficulty {
        Difficulty::Easy => easy_move(board, rng),
        Difficulty::Hard => hard_move(board, own),
    };
    debug!(?choice, %difficulty, %own, "Bot chose move");
    choice
}

/// Picks an empty cell uniformly at random.
pub fn easy_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Coord> {
    let open = board.unmarked_cells();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Rule cascade, first match wins:
///
/// 1. complete one of our own lines;
/// 2. block an opponent line (center first, else the first found);
/// 3. take the center;
/// 4. take the first free corner in row-major order;
/// 5. take the first free cell in row-major order.
///
/// Lines are scanned rows, columns, back diagonal, forward diagonal.
/// A winning line stops the scan; blocking cells are only collected
/// along the way.
#[instrument(skip(board))]
pub fn hard_move(board: &Board, own: Mark) -> Option<Coord> {
    let mut defense = Vec::new();

    for line in Line::SCAN_ORDER {
        let tally = scan(board, line);
        if let Some(win) = tally.threat(own) {
            debug!(%line, %win, "Winning move");
            return Some(win);
        }
        if let Some(block) = tally.threat(own.opponent()) {
            debug!(%line, %block, "Recorded block");
            defense.push(block);
        }
    }

    if let Some(&first) = defense.first() {
        return Some(if defense.contains(&Coord::CENTER) {
            Coord::CENTER
        } else {
            first
        });
    }

    if board.is_empty(Coord::CENTER) {
        return Some(Coord::CENTER);
    }

    let open = board.unmarked_cells();
    open.iter()
        .copied()
        .find(|c| c.on_diagonal())
        .or_else(|| open.first().copied())
}
