//! Win detection logic for bingo.

use crate::board::Board;
use crate::types::{BOARD_SIZE, Column, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the 12 lines that can complete a bingo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// A horizontal row (0-4).
    Row(usize),
    /// A vertical column.
    Column(Column),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// Every line on the board: 5 rows, 5 columns, 2 diagonals.
    pub fn all() -> impl Iterator<Item = Line> {
        (0..BOARD_SIZE)
            .map(Line::Row)
            .chain(Column::ALL.into_iter().map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Positions covered by this line.
    pub fn positions(self) -> [Position; BOARD_SIZE] {
        std::array::from_fn(|i| {
            let (row, col) = match self {
                Line::Row(row) => (row, i),
                Line::Column(column) => (i, column.index()),
                Line::Diagonal => (i, i),
                Line::AntiDiagonal => (i, BOARD_SIZE - 1 - i),
            };
            Position::at(row, col)
        })
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {}", row + 1),
            Line::Column(column) => write!(f, "column {}", column),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// Returns true if every cell on the line is marked.
///
/// The free cell counts as marked for every line through the centre.
pub fn is_line_complete(board: &Board, line: Line) -> bool {
    line.positions().iter().all(|&p| board.get(p).is_marked())
}

/// Returns every fully marked line.
#[instrument(skip(board))]
pub fn winning_lines(board: &Board) -> Vec<Line> {
    Line::all().filter(|&line| is_line_complete(board, line)).collect()
}

/// Checks whether the board has a bingo.
///
/// Pure and recomputed from scratch on every call.
#[instrument(skip(board))]
pub fn check_bingo(board: &Board) -> bool {
    Line::all().any(|line| is_line_complete(board, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let numbers: Vec<u8> = (1..=24).collect();
        Board::from_numbers(&numbers).unwrap()
    }

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_twelve_lines() {
        assert_eq!(Line::all().count(), 12);
    }

    #[test]
    fn test_no_bingo_fresh_board() {
        let board = board();
        assert!(!check_bingo(&board));
        assert!(winning_lines(&board).is_empty());
    }

    #[test]
    fn test_bingo_top_row() {
        let mut board = board();
        for col in 0..5 {
            board.mark(pos(0, col));
        }
        assert!(check_bingo(&board));
        assert_eq!(winning_lines(&board), vec![Line::Row(0)]);
    }

    #[test]
    fn test_four_of_five_is_not_bingo() {
        let mut board = board();
        for col in 0..4 {
            board.mark(pos(0, col));
        }
        assert!(!check_bingo(&board));
    }

    #[test]
    fn test_free_cell_completes_middle_row() {
        let mut board = board();
        for col in [0, 1, 3, 4] {
            board.mark(pos(2, col));
        }
        assert!(check_bingo(&board));
        assert_eq!(winning_lines(&board), vec![Line::Row(2)]);
    }

    #[test]
    fn test_anti_diagonal() {
        let mut board = board();
        for i in 0..5 {
            board.mark(pos(i, 4 - i));
        }
        assert_eq!(winning_lines(&board), vec![Line::AntiDiagonal]);
    }

    #[test]
    fn test_check_is_idempotent() {
        let mut board = board();
        for row in 0..5 {
            board.mark(pos(row, 1));
        }
        let first = check_bingo(&board);
        let second = check_bingo(&board);
        assert_eq!(first, second);
        assert_eq!(winning_lines(&board), vec![Line::Column(Column::I)]);
    }
}
