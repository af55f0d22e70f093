//! Error types for move submission and bot turns.

use derive_more::{Display, Error};

/// Error returned when the game refuses an operation.
///
/// Occupied cells are deliberately absent: a move onto a marked cell is
/// reported through `MoveReport::accepted` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Coordinate outside the 3x3 grid.
    #[display("Coordinate ({}, {}) is outside the board", x, y)]
    InvalidCoordinate {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// A bot move is pending; submissions are locked out.
    #[display("Board is locked while the bot is thinking")]
    Locked,

    /// The game already ended in a win or tie.
    #[display("Game is already over")]
    GameOver,

    /// Bot ticket issued before the last reset.
    #[display("Bot ticket from generation {} is stale (current {})", ticket, current)]
    StaleTicket {
        /// Generation the ticket was issued for.
        ticket: u64,
        /// Current game generation.
        current: u64,
    },

    /// No bot move is pending.
    #[display("No bot move is pending")]
    NotLocked,

    /// A stored board whose cached unmarked count disagrees with its cells.
    #[display("Board records {} unmarked cells but has {} empty", cached, empty)]
    InconsistentBoard {
        /// Stored unmarked count.
        cached: usize,
        /// Empty cells actually on the grid.
        empty: usize,
    },
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse config: {}", err))
    }
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read config file: {}", err))
    }
}
