//! Turn balance invariant: X never trails O and never leads by two.

use super::Invariant;
use crate::controller::Game;
use crate::types::Mark;
use tracing::warn;

/// Invariant: `X` moves first and players alternate, so the number of
/// `X` marks minus `O` marks is 0 or 1.
pub struct TurnBalanceInvariant;

impl Invariant<Game> for TurnBalanceInvariant {
    fn holds(game: &Game) -> bool {
        let x = game.board().count(Mark::X);
        let o = game.board().count(Mark::O);
        let valid = x == o || x == o + 1;
        if !valid {
            warn!(x, o, "Turn balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X marks minus O marks is 0 or 1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::config::Mode;

    #[test]
    fn test_holds_for_alternating_moves() {
        let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
        game.submit_move(0, 0).unwrap();
        assert!(TurnBalanceInvariant::holds(&game));
        game.submit_move(1, 0).unwrap();
        assert!(TurnBalanceInvariant::holds(&game));
    }

    #[test]
    fn test_detects_double_move() {
        let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
        *game.board_mut() = Board::from_rows(["XX.", "...", "..."]);
        assert!(!TurnBalanceInvariant::holds(&game));
    }
}
