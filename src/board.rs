//! The 3x3 board and its cached unmarked count.

use crate::error::GameError;
use crate::position::{CELLS, Coord, SIZE};
use crate::types::{Cell, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 3x3 tic-tac-toe board.
///
/// Cells are stored as `[row][column]`. `unmarked` is a cached count
/// maintained by `draw_symbol` and `reset`; it is never recomputed by
/// scanning the grid. Deserialization is the one exception: a stored
/// count that disagrees with the cells is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
    unmarked: usize,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
            unmarked: CELLS,
        }
    }

    /// Marks the cell if it is empty. Returns whether the board changed.
    ///
    /// Marking an occupied cell is a no-op: the cell keeps its mark and
    /// the unmarked count is untouched.
    #[instrument(skip(self), fields(unmarked = self.unmarked))]
    pub fn draw_symbol(&mut self, coord: Coord, mark: Mark) -> bool {
        let cell = &mut self.cells[coord.y()][coord.x()];
        if !cell.is_empty() {
            debug!(%coord, existing = ?cell, "Cell already marked");
            return false;
        }
        *cell = Cell::Marked(mark);
        self.unmarked -= 1;
        true
    }

    /// Clears every cell in place and restores the unmarked count.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(Cell::Empty);
        }
        self.unmarked = CELLS;
    }

    /// Returns the cell at `coord`.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.y()][coord.x()]
    }

    /// Returns the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is 3 or more.
    pub fn at(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord).is_empty()
    }

    /// Cached number of empty cells.
    pub fn unmarked_count(&self) -> usize {
        self.unmarked
    }

    /// Number of marked cells, counted by scanning.
    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.mark() == Some(mark))
            .count()
    }

    /// Empty cells in row-major order (row outer, column inner).
    ///
    /// The order is relied on by the bot for tie-breaking.
    pub fn unmarked_cells(&self) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_empty(c)).collect()
    }

    /// Returns the grid as `[row][column]`.
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; SIZE]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let mark = match ch {
                    'X' => Mark::X,
                    'O' => Mark::O,
                    _ => continue,
                };
                board.draw_symbol(Coord::at(x, y), mark);
            }
        }
        board
    }
}

#[derive(Deserialize)]
struct RawBoard {
    cells: [[Cell; SIZE]; SIZE],
    unmarked: usize,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let empty = raw.cells.iter().flatten().filter(|c| c.is_empty()).count();
        if raw.unmarked != empty {
            return Err(GameError::InconsistentBoard {
                cached: raw.unmarked,
                empty,
            });
        }
        Ok(Self {
            cells: raw.cells,
            unmarked: raw.unmarked,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            write!(f, "{}", line.join("|"))?;
            if y < SIZE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
