//! Game-level properties of the turn controller.

use strictly_noughts::{
    Board, CELLS, Cell, Coord, Game, GameError, Mark, Mode, Outcome, Phase, rules,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn marked(game: &Game) -> usize {
    game.board_snapshot()
        .cells
        .iter()
        .flatten()
        .filter(|c| **c != Cell::Empty)
        .count()
}

#[test]
fn test_count_invariant_over_every_move() {
    init_tracing();
    let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
    // Includes repeats that must be rejected.
    let moves = [(1, 1), (1, 1), (0, 0), (2, 2), (0, 0), (0, 2), (2, 0), (1, 0)];
    for (x, y) in moves {
        if game.is_locked() {
            break;
        }
        game.submit_move(x, y).unwrap();
        assert_eq!(marked(&game) + game.board().unmarked_count(), CELLS);
    }
}

#[test]
fn test_repeated_submission_is_idempotent() {
    init_tracing();
    let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
    game.submit_move(2, 1).unwrap();
    for _ in 0..3 {
        let report = game.submit_move(2, 1).unwrap();
        assert!(!report.accepted);
    }
    let c = Coord::new(2, 1).unwrap();
    assert_eq!(game.board().get(c), Cell::Marked(Mark::X));
    assert_eq!(game.board().unmarked_count(), 8);
    assert_eq!(game.active_player().mark, Mark::O);
}

#[test]
fn test_every_line_wins_on_its_last_cell() {
    init_tracing();
    for line in rules::Line::SCAN_ORDER {
        let [a, b, c] = line.cells();
        let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
        // O answers on cells off the line, in row-major order.
        let mut spare = Coord::all().filter(|&p| !line.contains(p));
        for cell in [a, b] {
            game.submit_move(cell.x(), cell.y()).unwrap();
            let o = spare.next().unwrap();
            game.submit_move(o.x(), o.y()).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::Ongoing);
        let report = game.submit_move(c.x(), c.y()).unwrap();
        assert_eq!(report.outcome, Outcome::Win(Mark::X), "{}", line);
        assert_eq!(report.active_player.name, "Ann");
    }
}

#[test]
fn test_top_row_example() {
    let mut board = Board::new();
    for x in 0..3 {
        board.draw_symbol(Coord::new(x, 0).unwrap(), Mark::O);
    }
    let last = Coord::new(2, 0).unwrap();
    assert_eq!(rules::evaluate(&board, last, Mark::O), Outcome::Win(Mark::O));
}

#[test]
fn test_full_board_without_line_is_tie() {
    init_tracing();
    let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
    // Final board: X O X / O X X / O X O
    let moves = [
        (0, 0),
        (1, 0),
        (2, 0),
        (0, 1),
        (1, 1),
        (0, 2),
        (2, 1),
        (2, 2),
        (1, 2),
    ];
    let mut last = None;
    for (x, y) in moves {
        last = Some(game.submit_move(x, y).unwrap());
    }
    let last = last.unwrap();
    assert_eq!(last.outcome, Outcome::Tie);
    assert_eq!(rules::winner(game.board()), None);
    assert_eq!(game.phase(), Phase::GameOver(Outcome::Tie));
}

#[test]
fn test_reset_after_win() {
    init_tracing();
    let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
    for (x, y) in [(0, 0), (1, 1), (1, 0), (2, 2), (2, 0)] {
        game.submit_move(x, y).unwrap();
    }
    assert_eq!(game.outcome(), Outcome::Win(Mark::X));

    game.reset();
    assert_eq!(game.board().unmarked_count(), 9);
    assert!(Coord::all().all(|c| game.board().is_empty(c)));
    assert_eq!(game.active_player().name, "Ann");
    assert_eq!(game.phase(), Phase::AwaitingMove);
}

#[test]
fn test_move_after_game_over_rejected() {
    init_tracing();
    let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
    for (x, y) in [(0, 0), (1, 1), (1, 0), (2, 2), (2, 0)] {
        game.submit_move(x, y).unwrap();
    }
    let before = game.board_snapshot();
    assert_eq!(game.submit_move(0, 2), Err(GameError::GameOver));
    assert_eq!(game.board_snapshot(), before);
}

#[test]
fn test_independent_games_do_not_share_state() {
    let mut first = Game::new("Ann", "Bob", Mode::TwoPlayer);
    let second = Game::new("Cy", "Di", Mode::TwoPlayer);
    first.submit_move(1, 1).unwrap();
    assert_eq!(second.board().unmarked_count(), 9);
    assert_eq!(second.active_player().name, "Cy");
}

#[test]
fn test_snapshot_serializes_for_renderer() {
    let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
    let report = game.submit_move(0, 0).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["accepted"], true);
    assert_eq!(json["mark"], "X");
    assert_eq!(json["active_player"]["name"], "Bob");

    let snapshot = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(snapshot["board"]["unmarked"], 8);
    assert_eq!(snapshot["outcome"], "Ongoing");
    assert_eq!(report.status(), "Bob's turn.");
}
