//! Call dispatch: walking the call sequence and resolving calls to cells.

use crate::board::Board;
use crate::call::{Call, CallSequence};
use crate::types::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What one dispatcher tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchTick {
    /// Zero-based index of the call, `None` on the completing tick.
    pub index: Option<usize>,
    /// The call announced on this tick.
    pub call: Option<Call>,
    /// The cell the call resolved to, if it is on the board.
    pub eligible: Option<Position>,
    /// True once the sequence is exhausted.
    pub completed: bool,
}

/// Resolves a call against the board.
///
/// Only the call's own column is scanned; the free cell never matches.
#[instrument(skip(board))]
pub fn resolve_call(board: &Board, call: Call) -> Option<Position> {
    board.find_in_column(call.column(), call.number())
}

/// Process-local dispatch state for one round.
///
/// Holds at most one eligible cell at a time. A new call replaces it and
/// an accepted mark consumes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchCursor {
    index: usize,
    current_call: Option<Call>,
    eligible: Option<Position>,
    completed: bool,
}

impl DispatchCursor {
    /// Creates a cursor before the first call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls dispatched so far.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The most recent call, if any.
    pub fn current_call(&self) -> Option<Call> {
        self.current_call
    }

    /// The cell currently open for marking.
    pub fn eligible(&self) -> Option<Position> {
        self.eligible
    }

    /// True after the completing tick.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Clears the eligible cell once a mark has consumed it.
    pub fn consume_eligible(&mut self) {
        self.eligible = None;
    }

    /// Advances to the next call.
    ///
    /// The tick after the last call completes the cursor, so the last call
    /// keeps its full interval to be marked. Ticks after completion return
    /// `None` and change nothing.
    #[instrument(skip(self, calls, board), fields(index = self.index))]
    pub fn advance(&mut self, calls: &CallSequence, board: &Board) -> Option<DispatchTick> {
        if self.completed {
            return None;
        }

        let Some(call) = calls.get(self.index) else {
            self.completed = true;
            self.eligible = None;
            info!(calls = self.index, "Call sequence exhausted");
            return Some(DispatchTick {
                index: None,
                call: None,
                eligible: None,
                completed: true,
            });
        };

        let index = self.index;
        let eligible = resolve_call(board, call);
        self.current_call = Some(call);
        self.eligible = eligible;
        self.index += 1;
        debug!(%call, index, ?eligible, "Dispatched call");

        Some(DispatchTick {
            index: Some(index),
            call: Some(call),
            eligible,
            completed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        // Column B holds 1-5 top to bottom.
        let numbers: Vec<u8> = vec![
            1, 16, 31, 46, 61, //
            2, 17, 32, 47, 62, //
            3, 18, 48, 63, //
            4, 19, 33, 49, 64, //
            5, 20, 34, 50, 65,
        ];
        Board::from_numbers(&numbers).unwrap()
    }

    #[test]
    fn test_resolves_call_on_board() {
        let board = board();
        let calls = CallSequence::parse(&["B3", "O70"]).unwrap();
        let mut cursor = DispatchCursor::new();

        let tick = cursor.advance(&calls, &board).unwrap();
        assert_eq!(tick.index, Some(0));
        assert_eq!(tick.eligible, Some(Position::new(2, 0).unwrap()));
        assert_eq!(cursor.eligible(), tick.eligible);

        let tick = cursor.advance(&calls, &board).unwrap();
        assert_eq!(tick.eligible, None);
        assert!(!tick.completed);
        assert_eq!(cursor.eligible(), None);
    }

    #[test]
    fn test_completes_after_last_call() {
        let board = board();
        let calls = CallSequence::parse(&["B1"]).unwrap();
        let mut cursor = DispatchCursor::new();

        cursor.advance(&calls, &board);
        assert!(!cursor.is_completed());
        assert!(cursor.eligible().is_some());

        let tick = cursor.advance(&calls, &board).unwrap();
        assert!(tick.completed);
        assert!(cursor.is_completed());
        assert_eq!(cursor.eligible(), None);

        assert_eq!(cursor.advance(&calls, &board), None);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let board = board();
        let calls = CallSequence::parse(&["I17", "G47", "N40", "B5"]).unwrap();

        let run = || {
            let mut cursor = DispatchCursor::new();
            std::iter::from_fn(|| cursor.advance(&calls, &board)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
        assert_eq!(run().len(), 5);
    }

    #[test]
    fn test_consume_clears_eligible() {
        let board = board();
        let calls = CallSequence::parse(&["B2"]).unwrap();
        let mut cursor = DispatchCursor::new();
        cursor.advance(&calls, &board);
        cursor.consume_eligible();
        assert_eq!(cursor.eligible(), None);
        assert_eq!(cursor.current_call(), calls.get(0));
    }
}
