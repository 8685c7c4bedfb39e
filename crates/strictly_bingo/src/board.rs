//! The 5x5 bingo card and its generator.

use crate::error::{BingoError, BingoErrorKind};
use crate::types::{BOARD_SIZE, Cell, Column, Position, UNIVERSE_SIZE};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Number of callable cells (everything but the free centre).
pub const NUMBER_CELLS: usize = BOARD_SIZE * BOARD_SIZE - 1;

/// 5x5 bingo board, row-major, free cell at the centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Generates a random board.
    ///
    /// The 75-value universe is shuffled once; values are then taken in
    /// shuffled order and dropped into the next open slot (top to bottom)
    /// of the column that owns them until all 24 slots are filled. Each
    /// column therefore holds the first values of its own range to appear
    /// in the shuffle, and the whole board is a function of the RNG state.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut universe: Vec<u8> = (1..=UNIVERSE_SIZE as u8).collect();
        universe.shuffle(rng);

        let mut columns: [Vec<u8>; BOARD_SIZE] = Default::default();
        let mut placed = 0;
        for number in universe {
            let Some(column) = Column::for_number(number) else {
                continue;
            };
            let slots = if column == Column::N {
                BOARD_SIZE - 1
            } else {
                BOARD_SIZE
            };
            let column_values = &mut columns[column.index()];
            if column_values.len() < slots {
                column_values.push(number);
                placed += 1;
                if placed == NUMBER_CELLS {
                    break;
                }
            }
        }

        let mut cells = [[Cell::free(); BOARD_SIZE]; BOARD_SIZE];
        let mut next = [0usize; BOARD_SIZE];
        for position in Position::all() {
            if position.is_center() {
                continue;
            }
            let col = position.col();
            cells[position.row()][col] = Cell::number(columns[col][next[col]]);
            next[col] += 1;
        }

        let board = Self { cells };
        debug!(board = %board.display(), "Generated board");
        board
    }

    /// Builds a board from 24 explicit values placed row-major, skipping
    /// the centre.
    ///
    /// Values must be distinct and within 1-75. They do not have to sit
    /// in their own column's range, which lets tests lay out arbitrary
    /// cards.
    #[track_caller]
    #[instrument]
    pub fn from_numbers(numbers: &[u8]) -> Result<Self, BingoError> {
        if numbers.len() != NUMBER_CELLS {
            return Err(BingoError::new(BingoErrorKind::InvalidBoard(format!(
                "expected {} values, got {}",
                NUMBER_CELLS,
                numbers.len()
            ))));
        }

        let mut seen = HashSet::with_capacity(NUMBER_CELLS);
        for &n in numbers {
            if Column::for_number(n).is_none() {
                return Err(BingoError::new(BingoErrorKind::InvalidBoard(format!(
                    "value {} is outside 1-{}",
                    n, UNIVERSE_SIZE
                ))));
            }
            if !seen.insert(n) {
                return Err(BingoError::new(BingoErrorKind::InvalidBoard(format!(
                    "value {} appears twice",
                    n
                ))));
            }
        }

        let mut cells = [[Cell::free(); BOARD_SIZE]; BOARD_SIZE];
        let mut values = numbers.iter().copied();
        for position in Position::all().filter(|p| !p.is_center()) {
            if let Some(n) = values.next() {
                cells[position.row()][position.col()] = Cell::number(n);
            }
        }
        Ok(Self { cells })
    }

    /// Gets the cell at a position.
    pub fn get(&self, position: Position) -> &Cell {
        &self.cells[position.row()][position.col()]
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Marks the cell at a position (unchecked - use the matcher for validation).
    pub(crate) fn mark(&mut self, position: Position) {
        self.cells[position.row()][position.col()].mark();
    }

    /// Scans one column for a cell holding `number`.
    ///
    /// The free cell never matches.
    #[instrument(skip(self))]
    pub fn find_in_column(&self, column: Column, number: u8) -> Option<Position> {
        let col = column.index();
        (0..BOARD_SIZE)
            .find(|&row| self.cells[row][col].as_number() == Some(number))
            .map(|row| Position::at(row, col))
    }

    /// Iterates over every non-free cell with its position.
    pub fn numbered_cells(&self) -> impl Iterator<Item = (Position, u8)> + '_ {
        Position::all().filter_map(|p| self.get(p).as_number().map(|n| (p, n)))
    }

    /// Number of marked cells, the free cell included.
    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_marked())
            .count()
    }

    /// Formats the board as a text grid with a column header.
    ///
    /// Marked cells are shown in brackets.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for column in Column::ALL {
            result.push_str(&format!(" {:^4} ", column));
        }
        for row in &self.cells {
            result.push('\n');
            for cell in row {
                let text = cell.value().to_string();
                if cell.is_marked() {
                    result.push_str(&format!("[{:^4}]", text));
                } else {
                    result.push_str(&format!(" {:^4} ", text));
                }
            }
        }
        result
    }
}
