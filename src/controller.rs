//! Turn controller for tic-tac-toe.
//!
//! `Game` owns the board and both players and runs the move state
//! machine:
//!
//! - `AwaitingMove`: the active player is human and may submit a move.
//! - `Locked(ticket)`: the active player is a bot; only
//!   `play_bot_move(ticket)` advances the game.
//! - `GameOver(outcome)`: the board is frozen until `reset`.
//!
//! Every reset bumps a generation counter. Bot tickets carry the
//! generation they were issued in, so a bot move scheduled before a
//! reset can never land on the fresh board.

use crate::board::Board;
use crate::config::{GameConfig, Mode};
use crate::error::GameError;
use crate::heuristic::choose_move;
use crate::invariants::{GameInvariants, InvariantSet};
use crate::player::Player;
use crate::position::Coord;
use crate::rules::evaluate;
use crate::snapshot::{BoardSnapshot, GameSnapshot, MoveReport};
use crate::types::{Mark, Outcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Permission for one bot move, valid until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotTicket {
    /// Game generation the ticket was issued in.
    pub generation: u64,
    /// Moves played in this generation when the ticket was issued.
    pub turn: usize,
    /// Mark the bot will place.
    pub mark: Mark,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the active (human) player.
    AwaitingMove,
    /// Waiting for the bot move described by the ticket.
    Locked(BotTicket),
    /// Game ended; only `reset` is accepted.
    GameOver(Outcome),
}

/// A single tic-tac-toe game.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    active: usize,
    phase: Phase,
    generation: u64,
    history: Vec<Coord>,
    rng: StdRng,
}

impl Game {
    /// Starts a game. Player one is `X` and moves first; in
    /// `Mode::VersusBot` player two is the bot.
    #[instrument(skip(player_one, player_two))]
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>, mode: Mode) -> Self {
        Self::with_rng(player_one, player_two, mode, StdRng::from_os_rng())
    }

    /// Starts a game from a configuration, seeding the bot's rng if a
    /// seed is set.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(
            config.player_one().clone(),
            config.player_two().clone(),
            *config.mode(),
            rng,
        )
    }

    fn with_rng(
        player_one: impl Into<String>,
        player_two: impl Into<String>,
        mode: Mode,
        rng: StdRng,
    ) -> Self {
        let first = Player::human(player_one, Mark::X);
        let second = match mode.bot() {
            Some(difficulty) => Player::bot(player_two, Mark::O, difficulty),
            None => Player::human(player_two, Mark::O),
        };
        info!(player_one = %first, player_two = %second, ?mode, "Starting new game");
        Self {
            board: Board::new(),
            players: [first, second],
            active: 0,
            phase: Phase::AwaitingMove,
            generation: 0,
            history: Vec::new(),
            rng,
        }
    }

    /// Submits a move for the active human player at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// - `InvalidCoordinate` if `x` or `y` is outside the board.
    /// - `Locked` while a bot move is pending.
    /// - `GameOver` once the game has ended.
    ///
    /// A move onto a marked cell is not an error: the report comes back
    /// with `accepted == false` and nothing changes.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn submit_move(&mut self, x: usize, y: usize) -> Result<MoveReport, GameError> {
        let coord = Coord::new(x, y)?;
        match self.phase {
            Phase::AwaitingMove => Ok(self.accept(coord)),
            Phase::Locked(_) => {
                warn!(%coord, "Move submitted while locked");
                Err(GameError::Locked)
            }
            Phase::GameOver(_) => {
                warn!(%coord, "Move submitted after game over");
                Err(GameError::GameOver)
            }
        }
    }

    /// Returns the pending bot ticket, if the bot is to move.
    pub fn pending_bot_move(&self) -> Option<BotTicket> {
        match self.phase {
            Phase::Locked(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// Plays the bot move authorised by `ticket`.
    ///
    /// # Errors
    ///
    /// - `StaleTicket` if the game was reset after the ticket was issued.
    /// - `NotLocked` if no bot move is pending.
    #[instrument(skip(self))]
    pub fn play_bot_move(&mut self, ticket: BotTicket) -> Result<MoveReport, GameError> {
        if ticket.generation != self.generation {
            debug!(current = self.generation, "Ignoring stale bot ticket");
            return Err(GameError::StaleTicket {
                ticket: ticket.generation,
                current: self.generation,
            });
        }
        let pending = self.pending_bot_move().ok_or(GameError::NotLocked)?;
        if pending != ticket {
            return Err(GameError::NotLocked);
        }

        let bot = &self.players[self.active];
        let difficulty = bot.difficulty().ok_or(GameError::NotLocked)?;
        // Locked implies an ongoing game, so at least one cell is empty.
        let coord = choose_move(&self.board, bot.mark, difficulty, &mut self.rng)
            .ok_or(GameError::GameOver)?;
        info!(bot = %bot, %coord, "Bot plays");
        Ok(self.accept(coord))
    }

    /// Plays every pending bot move immediately. Returns the reports.
    pub fn run_bots(&mut self) -> Vec<MoveReport> {
        let mut reports = Vec::new();
        while let Some(ticket) = self.pending_bot_move() {
            match self.play_bot_move(ticket) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(error = %e, "Bot move failed");
                    break;
                }
            }
        }
        reports
    }

    /// Clears the board in place, hands the move back to player one and
    /// invalidates any outstanding bot ticket.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameSnapshot {
        self.board.reset();
        self.history.clear();
        self.active = 0;
        self.generation += 1;
        self.phase = Phase::AwaitingMove;
        info!(generation = self.generation, "Game reset");
        self.snapshot()
    }

    fn accept(&mut self, coord: Coord) -> MoveReport {
        let mark = self.players[self.active].mark;
        if !self.board.draw_symbol(coord, mark) {
            debug!(%coord, %mark, "Cell occupied, move rejected");
            return self.report(false, coord, mark, Outcome::Ongoing);
        }
        self.history.push(coord);

        let outcome = evaluate(&self.board, coord, mark);
        if outcome.is_terminal() {
            info!(%outcome, moves = self.history.len(), "Game over");
            self.phase = Phase::GameOver(outcome);
        } else {
            self.active = 1 - self.active;
            self.phase = if self.players[self.active].is_bot() {
                Phase::Locked(BotTicket {
                    generation: self.generation,
                    turn: self.history.len(),
                    mark: self.players[self.active].mark,
                })
            } else {
                Phase::AwaitingMove
            };
        }

        self.check_invariants();
        self.report(true, coord, mark, outcome)
    }

    fn report(&self, accepted: bool, coord: Coord, mark: Mark, outcome: Outcome) -> MoveReport {
        MoveReport {
            accepted,
            coord,
            mark,
            outcome,
            active_player: self.active_player().clone(),
            bot_pending: self.pending_bot_move().is_some(),
        }
    }

    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = GameInvariants::check_all(self) {
            for violation in &violations {
                warn!(%violation, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Game invariants violated");
        }
    }

    /// Empty cells in row-major order.
    pub fn unmarked_cells(&self) -> Vec<Coord> {
        self.board.unmarked_cells()
    }

    /// Player to move, or the player who made the final move.
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Both players; index 0 is `X`.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Copy of the grid for rendering.
    pub fn board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(&self.board)
    }

    /// Full projection for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board_snapshot(),
            active_player: self.active_player().clone(),
            outcome: self.outcome(),
            locked: self.is_locked(),
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::GameOver(outcome) => outcome,
            _ => Outcome::Ongoing,
        }
    }

    /// True while a bot move is pending or after the game ended.
    pub fn is_locked(&self) -> bool {
        self.phase != Phase::AwaitingMove
    }

    /// Number of resets so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Accepted moves since the last reset.
    pub fn history(&self) -> &[Coord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Difficulty;

    fn two_player() -> Game {
        Game::new("Ann", "Bob", Mode::TwoPlayer)
    }

    fn versus(difficulty: Difficulty) -> Game {
        Game::from_config(
            &GameConfig::new("Ann", "Bot", Mode::VersusBot { difficulty }).with_seed(11),
        )
    }

    #[test]
    fn test_players_alternate() {
        let mut game = two_player();
        assert_eq!(game.active_player().name, "Ann");
        let report = game.submit_move(1, 1).unwrap();
        assert!(report.accepted);
        assert_eq!(report.mark, Mark::X);
        assert_eq!(report.active_player.name, "Bob");
        assert_eq!(game.active_player().mark, Mark::O);
    }

    #[test]
    fn test_occupied_cell_rejected_without_turn_switch() {
        let mut game = two_player();
        game.submit_move(0, 0).unwrap();
        let report = game.submit_move(0, 0).unwrap();
        assert!(!report.accepted);
        assert_eq!(report.active_player.name, "Bob");
        assert_eq!(game.board().unmarked_count(), 8);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_invalid_coordinate() {
        let mut game = two_player();
        assert_eq!(
            game.submit_move(0, 3),
            Err(GameError::InvalidCoordinate { x: 0, y: 3 })
        );
        assert_eq!(game.board().unmarked_count(), 9);
    }

    #[test]
    fn test_win_locks_board() {
        let mut game = two_player();
        for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            game.submit_move(x, y).unwrap();
        }
        let report = game.submit_move(2, 0).unwrap();
        assert_eq!(report.outcome, Outcome::Win(Mark::X));
        assert_eq!(report.active_player.name, "Ann");
        assert_eq!(game.phase(), Phase::GameOver(Outcome::Win(Mark::X)));
        assert!(game.is_locked());

        let before = game.board_snapshot();
        assert_eq!(game.submit_move(2, 2), Err(GameError::GameOver));
        assert_eq!(game.board_snapshot(), before);
    }

    #[test]
    fn test_tie() {
        let mut game = two_player();
        // Ends as X O X / O X X / O X O with X's last move at (1,2).
        for (x, y) in [
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (0, 2),
            (2, 1),
            (2, 2),
        ] {
            assert_eq!(game.submit_move(x, y).unwrap().outcome, Outcome::Ongoing);
        }
        let report = game.submit_move(1, 2).unwrap();
        assert_eq!(report.outcome, Outcome::Tie);
        assert!(game.unmarked_cells().is_empty());
    }

    #[test]
    fn test_reset_after_win() {
        let mut game = two_player();
        for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)] {
            game.submit_move(x, y).unwrap();
        }
        let snapshot = game.reset();
        assert_eq!(snapshot.board.unmarked, 9);
        assert_eq!(snapshot.outcome, Outcome::Ongoing);
        assert!(!snapshot.locked);
        assert_eq!(game.active_player().name, "Ann");
        assert_eq!(game.board(), &Board::new());
        assert!(game.history().is_empty());
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn test_bot_locks_after_human_move() {
        let mut game = versus(Difficulty::Hard);
        let report = game.submit_move(0, 0).unwrap();
        assert!(report.bot_pending);
        assert!(game.is_locked());
        assert_eq!(game.submit_move(2, 2), Err(GameError::Locked));

        let ticket = game.pending_bot_move().unwrap();
        assert_eq!(ticket.mark, Mark::O);
        let report = game.play_bot_move(ticket).unwrap();
        assert_eq!(report.coord, Coord::CENTER);
        assert_eq!(report.mark, Mark::O);
        assert!(!report.bot_pending);
        assert_eq!(game.phase(), Phase::AwaitingMove);
    }

    #[test]
    fn test_stale_ticket_rejected_after_reset() {
        let mut game = versus(Difficulty::Easy);
        game.submit_move(1, 1).unwrap();
        let ticket = game.pending_bot_move().unwrap();
        game.reset();
        assert_eq!(
            game.play_bot_move(ticket),
            Err(GameError::StaleTicket { ticket: 0, current: 1 })
        );
        assert_eq!(game.board().unmarked_count(), 9);
    }

    #[test]
    fn test_bot_move_without_pending_ticket() {
        let mut game = versus(Difficulty::Hard);
        let ticket = BotTicket {
            generation: 0,
            turn: 0,
            mark: Mark::O,
        };
        assert_eq!(game.play_bot_move(ticket), Err(GameError::NotLocked));
    }

    #[test]
    fn test_hard_bot_blocks() {
        let mut game = versus(Difficulty::Hard);
        game.submit_move(0, 0).unwrap();
        game.run_bots(); // center
        game.submit_move(1, 0).unwrap();
        let reports = game.run_bots();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].coord, Coord::new(2, 0).unwrap());
    }

    #[test]
    fn test_seeded_easy_games_repeat() {
        let play = || {
            let mut game = versus(Difficulty::Easy);
            let mut moves = Vec::new();
            while game.outcome() == Outcome::Ongoing {
                let next = game.unmarked_cells()[0];
                game.submit_move(next.x(), next.y()).unwrap();
                moves.extend(game.run_bots().into_iter().map(|r| r.coord));
            }
            moves
        };
        assert_eq!(play(), play());
    }
}
