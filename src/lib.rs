//! Strictly Noughts - tic-tac-toe game-state engine
//!
//! The core of a 3x3 tic-tac-toe game for two humans or a human against
//! a bot. Rendering and input handling live elsewhere: a presentation
//! layer forwards the chosen cell to this crate and renders the
//! snapshots it hands back.
//!
//! # Architecture
//!
//! - **Board**: the grid plus a cached count of empty cells
//! - **Rules**: line scanning, win and tie evaluation
//! - **Heuristic**: `Easy` (random) and `Hard` (win, block, center, corner) bots
//! - **Game**: the turn controller state machine
//! - **Table**: async owner of a game and its cancellable bot timer
//!
//! # Example
//!
//! ```
//! use strictly_noughts::{Game, Mode, Outcome};
//!
//! let mut game = Game::new("Ann", "Bob", Mode::TwoPlayer);
//! for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
//!     game.submit_move(x, y)?;
//! }
//! let report = game.submit_move(2, 0)?;
//! assert_eq!(report.outcome, Outcome::Win(strictly_noughts::Mark::X));
//! # Ok::<(), strictly_noughts::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod controller;
mod error;
mod heuristic;
mod player;
mod position;
mod snapshot;
mod table;
mod types;

pub mod invariants;
pub mod rules;

// Crate-level exports - Board and domain types
pub use board::Board;
pub use position::{CELLS, Coord, SIZE};
pub use types::{Cell, Mark, Outcome};

// Crate-level exports - Players and configuration
pub use config::{GameConfig, Mode};
pub use player::{Player, PlayerKind};

// Crate-level exports - Bot heuristics
pub use heuristic::{Difficulty, choose_move, easy_move, hard_move};

// Crate-level exports - Turn controller
pub use controller::{BotTicket, Game, Phase};
pub use snapshot::{BoardSnapshot, GameSnapshot, MoveReport};
pub use table::{Table, TableEvent};

// Crate-level exports - Errors
pub use error::{ConfigError, GameError};
