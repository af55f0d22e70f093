//! Lines (rows, columns, diagonals) and the line scanner.

use crate::board::Board;
use crate::position::{Coord, SIZE};
use crate::types::{Cell, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A row, column or diagonal of three cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// Row `y`.
    Row(usize),
    /// Column `x`.
    Column(usize),
    /// Top-left to bottom-right (row == column).
    BackDiagonal,
    /// Top-right to bottom-left (row + column == 2).
    ForwardDiagonal,
}

impl Line {
    /// Every line in scan order: rows, then columns, then the back
    /// diagonal, then the forward diagonal.
    pub const SCAN_ORDER: [Line; 8] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Column(0),
        Line::Column(1),
        Line::Column(2),
        Line::BackDiagonal,
        Line::ForwardDiagonal,
    ];

    /// The three cells of this line, top to bottom then left to right.
    pub fn cells(self) -> [Coord; SIZE] {
        match self {
            Line::Row(y) => [Coord::at(0, y), Coord::at(1, y), Coord::at(2, y)],
            Line::Column(x) => [Coord::at(x, 0), Coord::at(x, 1), Coord::at(x, 2)],
            Line::BackDiagonal => [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
            Line::ForwardDiagonal => [Coord::at(2, 0), Coord::at(1, 1), Coord::at(0, 2)],
        }
    }

    /// Returns true if `coord` lies on this line.
    pub fn contains(self, coord: Coord) -> bool {
        match self {
            Line::Row(y) => coord.y() == y,
            Line::Column(x) => coord.x() == x,
            Line::BackDiagonal => coord.on_back_diagonal(),
            Line::ForwardDiagonal => coord.on_forward_diagonal(),
        }
    }

    /// Lines through `coord`: its row, its column, and each diagonal
    /// only when the coordinate sits on it.
    pub fn through(coord: Coord) -> Vec<Line> {
        let mut lines = vec![Line::Row(coord.y()), Line::Column(coord.x())];
        if coord.on_back_diagonal() {
            lines.push(Line::BackDiagonal);
        }
        if coord.on_forward_diagonal() {
            lines.push(Line::ForwardDiagonal);
        }
        lines
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Row(y) => write!(f, "row {}", y),
            Line::Column(x) => write!(f, "column {}", x),
            Line::BackDiagonal => write!(f, "back diagonal"),
            Line::ForwardDiagonal => write!(f, "forward diagonal"),
        }
    }
}

/// Classification of a line's three cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineTally {
    /// Cells marked `X`.
    pub x: u8,
    /// Cells marked `O`.
    pub o: u8,
    /// Empty cells.
    pub unmarked: u8,
    /// First empty cell in line order.
    pub first_unmarked: Option<Coord>,
}

impl LineTally {
    /// Cells held by `mark`.
    pub fn count(&self, mark: Mark) -> u8 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// True when all three cells hold `mark`.
    pub fn is_complete(&self, mark: Mark) -> bool {
        self.count(mark) as usize == SIZE
    }

    /// The cell that would complete this line for `mark`: exactly one
    /// empty cell and two cells of `mark`.
    pub fn threat(&self, mark: Mark) -> Option<Coord> {
        if self.unmarked == 1 && self.count(mark) == 2 {
            self.first_unmarked
        } else {
            None
        }
    }
}

/// Tallies the three cells of `line`.
#[instrument(level = "trace", skip(board))]
pub fn scan(board: &Board, line: Line) -> LineTally {
    line.cells()
        .into_iter()
        .fold(LineTally::default(), |mut tally, coord| {
            match board.get(coord) {
                Cell::Empty => {
                    tally.unmarked += 1;
                    tally.first_unmarked.get_or_insert(coord);
                }
                Cell::Marked(Mark::X) => tally.x += 1,
                Cell::Marked(Mark::O) => tally.o += 1,
            }
            tally
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_counts() {
        let board = Board::from_rows(["XO.", "...", "..."]);
        let tally = scan(&board, Line::Row(0));
        assert_eq!(tally.x, 1);
        assert_eq!(tally.o, 1);
        assert_eq!(tally.unmarked, 1);
        assert_eq!(tally.first_unmarked, Some(Coord::at(2, 0)));
    }

    #[test]
    fn test_threat_needs_two_and_one_gap() {
        let board = Board::from_rows(["X.X", "XO.", "O.."]);
        assert_eq!(scan(&board, Line::Row(0)).threat(Mark::X), Some(Coord::at(1, 0)));
        assert_eq!(scan(&board, Line::Row(0)).threat(Mark::O), None);
        // Column 0 is full: no gap, no threat.
        assert_eq!(scan(&board, Line::Column(0)).threat(Mark::X), None);
        assert_eq!(
            scan(&board, Line::ForwardDiagonal).threat(Mark::O),
            None,
            "X at (2,0) blocks the forward diagonal"
        );
    }

    #[test]
    fn test_through_center_has_four_lines() {
        assert_eq!(Line::through(Coord::CENTER).len(), 4);
    }

    #[test]
    fn test_through_edge_has_no_diagonal() {
        let lines = Line::through(Coord::at(1, 0));
        assert_eq!(lines, vec![Line::Row(0), Line::Column(1)]);
    }

    #[test]
    fn test_through_corner() {
        assert_eq!(
            Line::through(Coord::at(0, 0)),
            vec![Line::Row(0), Line::Column(0), Line::BackDiagonal]
        );
        assert_eq!(
            Line::through(Coord::at(0, 2)),
            vec![Line::Row(2), Line::Column(0), Line::ForwardDiagonal]
        );
    }

    #[test]
    fn test_cells_lie_on_line() {
        for line in Line::SCAN_ORDER {
            assert!(line.cells().iter().all(|&c| line.contains(c)), "{}", line);
        }
    }
}
