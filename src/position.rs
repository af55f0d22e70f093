//! Board coordinates.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// A cell coordinate: `x` is the column, `y` the row (`y = 0` is the top).
///
/// A `Coord` is always inside the board, so board accessors taking one
/// never go out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    x: usize,
    y: usize,
}

impl Coord {
    /// The center cell.
    pub const CENTER: Coord = Coord { x: 1, y: 1 };

    /// Creates a coordinate, rejecting anything outside the 3x3 grid.
    #[instrument]
    pub fn new(x: usize, y: usize) -> Result<Self, GameError> {
        if x >= SIZE || y >= SIZE {
            return Err(GameError::InvalidCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    pub(crate) const fn at(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Column.
    pub fn x(self) -> usize {
        self.x
    }

    /// Row.
    pub fn y(self) -> usize {
        self.y
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.y * SIZE + self.x
    }

    /// Creates a coordinate from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELLS).then(|| Self::at(index % SIZE, index / SIZE))
    }

    /// On the top-left to bottom-right diagonal.
    pub fn on_back_diagonal(self) -> bool {
        self.x == self.y
    }

    /// On the top-right to bottom-left diagonal.
    pub fn on_forward_diagonal(self) -> bool {
        self.x + self.y == SIZE - 1
    }

    /// On either diagonal (corners and center).
    pub fn on_diagonal(self) -> bool {
        self.on_back_diagonal() || self.on_forward_diagonal()
    }

    /// All nine coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).map(|i| Self::at(i % SIZE, i / SIZE))
    }
}

/// Unchecked wire form of a `Coord`; validated through `Coord::new`.
#[derive(Deserialize)]
struct RawCoord {
    x: usize,
    y: usize,
}

impl TryFrom<RawCoord> for Coord {
    type Error = GameError;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::new(raw.x, raw.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
