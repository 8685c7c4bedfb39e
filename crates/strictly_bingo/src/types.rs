//! Core domain types for number bingo.

use crate::error::{BingoError, BingoErrorKind};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 5;

/// Number of distinct values a bingo game can call.
pub const UNIVERSE_SIZE: usize = 75;

/// Number of values owned by each column.
pub const COLUMN_SPAN: u8 = 15;

/// A column tag of the board, which also labels every call.
///
/// Column `i` owns the values `15 * i + 1 ..= 15 * i + 15`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
pub enum Column {
    /// Values 1-15.
    B,
    /// Values 16-30.
    I,
    /// Values 31-45.
    N,
    /// Values 46-60.
    G,
    /// Values 61-75.
    O,
}

impl Column {
    /// All columns, left to right.
    pub const ALL: [Column; BOARD_SIZE] = [Column::B, Column::I, Column::N, Column::G, Column::O];

    /// Zero-based column index on the board.
    pub fn index(self) -> usize {
        match self {
            Column::B => 0,
            Column::I => 1,
            Column::N => 2,
            Column::G => 3,
            Column::O => 4,
        }
    }

    /// Column at the given board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Values owned by this column.
    pub fn range(self) -> RangeInclusive<u8> {
        let low = self.index() as u8 * COLUMN_SPAN + 1;
        low..=low + COLUMN_SPAN - 1
    }

    /// The column that owns `number`, if it is a valid bingo value.
    #[instrument]
    pub fn for_number(number: u8) -> Option<Self> {
        if number == 0 || usize::from(number) > UNIVERSE_SIZE {
            return None;
        }
        Self::from_index(usize::from((number - 1) / COLUMN_SPAN))
    }

    /// Returns true if `number` belongs to this column.
    pub fn contains(self, number: u8) -> bool {
        self.range().contains(&number)
    }
}

/// A cell position on the board.
///
/// `row` indexes the outer row-major array and `col` the inner one,
/// everywhere in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// The free centre cell.
    pub const CENTER: Position = Position { row: 2, col: 2 };

    /// Creates a position, rejecting coordinates off the board.
    #[track_caller]
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, BingoError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BingoError::new(BingoErrorKind::PositionOutOfRange { row, col }));
        }
        Ok(Self { row, col })
    }

    /// Creates a position from coordinates already known to be on the board.
    pub(crate) fn at(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self { row, col }
    }

    /// Row index (0-4).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index (0-4).
    pub fn col(self) -> usize {
        self.col
    }

    /// The column tag this position sits under.
    pub fn column(self) -> Column {
        Column::ALL[self.col]
    }

    /// Returns true for the free centre cell.
    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }

    /// All 25 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    /// A callable number.
    Number(u8),
    /// The free centre space.
    Free,
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Free => write!(f, "FREE"),
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    value: CellValue,
    marked: bool,
}

impl Cell {
    /// Creates an unmarked number cell.
    pub fn number(value: u8) -> Self {
        Self {
            value: CellValue::Number(value),
            marked: false,
        }
    }

    /// Creates the free cell, which starts marked.
    pub fn free() -> Self {
        Self {
            value: CellValue::Free,
            marked: true,
        }
    }

    /// Returns the cell's value.
    pub fn value(&self) -> CellValue {
        self.value
    }

    /// Returns the number, or `None` for the free cell.
    pub fn as_number(&self) -> Option<u8> {
        match self.value {
            CellValue::Number(n) => Some(n),
            CellValue::Free => None,
        }
    }

    /// Returns true for the free cell.
    pub fn is_free(&self) -> bool {
        self.value == CellValue::Free
    }

    /// Returns true once the cell is daubed.
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn mark(&mut self) {
        self.marked = true;
    }
}
