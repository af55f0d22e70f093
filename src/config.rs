//! Game configuration.
//!
//! A `GameConfig` fixes everything that stays constant for the lifetime
//! of a game: player names, whether player two is a bot (and how strong),
//! the pacing delay before a bot move and an optional rng seed.

use crate::error::ConfigError;
use crate::heuristic::Difficulty;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Who controls player two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    TwoPlayer,
    /// Player two is a bot of the given difficulty.
    VersusBot {
        /// Bot policy.
        difficulty: Difficulty,
    },
}

impl Mode {
    /// Bot difficulty, if player two is a bot.
    pub fn bot(self) -> Option<Difficulty> {
        match self {
            Mode::TwoPlayer => None,
            Mode::VersusBot { difficulty } => Some(difficulty),
        }
    }
}

/// Configuration for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Name of player one (`X`).
    #[serde(default = "default_player_one")]
    player_one: String,

    /// Name of player two (`O`).
    #[serde(default = "default_player_two")]
    player_two: String,

    /// Two humans, or human against a bot.
    #[serde(default)]
    mode: Mode,

    /// Pause before a bot move, in milliseconds.
    #[serde(default = "default_bot_delay_ms")]
    bot_delay_ms: u64,

    /// Seed for the bot's rng; `None` seeds from the OS.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_player_one() -> String {
    "Player One".to_string()
}

fn default_player_two() -> String {
    "Player Two".to_string()
}

fn default_bot_delay_ms() -> u64 {
    500
}

impl GameConfig {
    /// Creates a configuration with the default delay and no seed.
    #[instrument(skip(player_one, player_two))]
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>, mode: Mode) -> Self {
        Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
            mode,
            bot_delay_ms: default_bot_delay_ms(),
            seed: None,
        }
    }

    /// Sets the bot delay.
    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.bot_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the rng seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bot delay as a `Duration`.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.player_one.trim().is_empty() || config.player_two.trim().is_empty() {
            return Err(ConfigError::new("Player names must not be empty"));
        }
        debug!(?config, "Parsed config");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!(mode = ?config.mode, "Config loaded successfully");
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_player_one(), default_player_two(), Mode::default())
    }
}
