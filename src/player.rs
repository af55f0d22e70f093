//! Players seated at a game.

use crate::heuristic::Difficulty;
use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// Who chooses a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves arrive through `submit_move`.
    Human,
    /// Moves are chosen by the heuristic.
    Bot(Difficulty),
}

/// A player: display name, mark and controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Mark placed by this player.
    pub mark: Mark,
    /// Human or bot.
    pub kind: PlayerKind,
}

impl Player {
    /// Creates a human player.
    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
            kind: PlayerKind::Human,
        }
    }

    /// Creates a bot player.
    pub fn bot(name: impl Into<String>, mark: Mark, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            mark,
            kind: PlayerKind::Bot(difficulty),
        }
    }

    /// Bot difficulty, or `None` for a human.
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Bot(difficulty) => Some(difficulty),
        }
    }

    /// Returns true for bots.
    pub fn is_bot(&self) -> bool {
        self.difficulty().is_some()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.mark)
    }
}
