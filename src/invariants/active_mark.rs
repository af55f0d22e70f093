//! Active mark invariant: the player to move matches the board.

use super::Invariant;
use crate::controller::Game;
use crate::types::{Mark, Outcome};

/// Invariant: while the game is ongoing, `X` is to move exactly when
/// both marks have been placed equally often.
pub struct ActiveMarkInvariant;

impl Invariant<Game> for ActiveMarkInvariant {
    fn holds(game: &Game) -> bool {
        if game.outcome() != Outcome::Ongoing {
            return true;
        }
        let board = game.board();
        let x_to_move = board.count(Mark::X) == board.count(Mark::O);
        (game.active_player().mark == Mark::X) == x_to_move
    }

    fn description() -> &'static str {
        "X is to move exactly when X and O counts are equal"
    }
}
