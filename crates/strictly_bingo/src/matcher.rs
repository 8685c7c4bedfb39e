//! Mark validation and application.
//!
//! A mark is only ever accepted on the single cell the dispatcher has made
//! eligible. Everything else is a silent no-op, not an error.

use crate::board::Board;
use crate::rules;
use crate::types::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Why a mark attempt was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// No call is currently waiting to be marked.
    #[display("no cell is eligible")]
    NothingEligible,
    /// The attempt targeted a different cell than the eligible one.
    #[display("{} is not the eligible cell", _0)]
    NotEligible(Position),
    /// The free centre is always marked and cannot be targeted.
    #[display("the free cell cannot be marked")]
    FreeCell,
}

/// Result of a mark attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    /// Board after the attempt (unchanged when rejected).
    pub board: Board,
    /// Whether the mark was applied.
    pub accepted: bool,
    /// Whether the board shows a bingo. Always false on rejection.
    pub won: bool,
    /// Reason for rejection, if any.
    pub rejection: Option<Rejection>,
}

/// Checks the preconditions of a mark without touching the board.
#[instrument(skip(board))]
pub fn validate_mark(
    board: &Board,
    position: Position,
    eligible: Option<Position>,
) -> Result<(), Rejection> {
    if board.get(position).is_free() {
        return Err(Rejection::FreeCell);
    }
    match eligible {
        None => Err(Rejection::NothingEligible),
        Some(cell) if cell != position => Err(Rejection::NotEligible(position)),
        Some(_) => Ok(()),
    }
}

/// Attempts to mark `position` given the currently eligible cell.
///
/// Returns a new board; the input board is never modified. On acceptance
/// the cell is marked and all 12 lines are re-evaluated from scratch.
#[instrument(skip(board))]
pub fn attempt_mark(board: &Board, position: Position, eligible: Option<Position>) -> MarkOutcome {
    if let Err(rejection) = validate_mark(board, position, eligible) {
        debug!(%position, %rejection, "Mark rejected");
        return MarkOutcome {
            board: board.clone(),
            accepted: false,
            won: false,
            rejection: Some(rejection),
        };
    }

    let mut next = board.clone();
    next.mark(position);
    let won = rules::check_bingo(&next);
    debug!(%position, won, "Mark accepted");

    MarkOutcome {
        board: next,
        accepted: true,
        won,
        rejection: None,
    }
}
