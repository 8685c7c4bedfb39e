//! Round state machine.
//!
//! A round owns the board, the call sequence and the dispatch cursor, and
//! moves through explicit phases:
//!
//! ```text
//! Idle --start--> Running --tick (exhausted)--> Completed
//!                    |
//!                    +--mark (line complete)--> Bingo
//! ```
//!
//! Completed and Bingo are terminal. Events that do not apply to the
//! current phase are no-ops.

use crate::board::Board;
use crate::call::CallSequence;
use crate::config::GameConfig;
use crate::dispatch::{DispatchCursor, DispatchTick};
use crate::error::BingoError;
use crate::generator::generate_calls;
use crate::matcher::{MarkOutcome, attempt_mark};
use crate::rules::{self, Line};
use crate::types::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RoundPhase {
    /// Dealt but not started.
    Idle,
    /// Calls are being dispatched.
    Running,
    /// Every call was dispatched without a bingo.
    Completed,
    /// A line was completed.
    Bingo,
}

impl RoundPhase {
    /// Returns true for Completed and Bingo.
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundPhase::Completed | RoundPhase::Bingo)
    }
}

/// Result of a mark attempt made through a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkResult {
    /// Whether the mark was applied.
    pub accepted: bool,
    /// Whether the round has been won.
    pub won: bool,
}

/// One round of bingo: a board, its calls and the dispatch state.
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    calls: CallSequence,
    cursor: DispatchCursor,
    phase: RoundPhase,
    winning_lines: Vec<Line>,
    marks: usize,
    dispatch_epoch: u64,
}

impl Round {
    /// Creates an idle round from an existing board and calls.
    #[instrument(skip(board, calls), fields(call_count = calls.len()))]
    pub fn new(board: Board, calls: CallSequence) -> Self {
        Self {
            board,
            calls,
            cursor: DispatchCursor::new(),
            phase: RoundPhase::Idle,
            winning_lines: Vec::new(),
            marks: 0,
            dispatch_epoch: 0,
        }
    }

    /// Deals a fresh board and call sequence from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the configuration error before generating anything.
    #[track_caller]
    #[instrument(skip(rng))]
    pub fn deal<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, BingoError> {
        config.validate()?;
        let board = Board::generate(rng);
        let calls = generate_calls(
            &board,
            *config.call_count(),
            *config.boost_probability(),
            rng,
        )?;
        Ok(Self::new(board, calls))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the call sequence.
    pub fn calls(&self) -> &CallSequence {
        &self.calls
    }

    /// Returns the dispatch cursor.
    pub fn cursor(&self) -> &DispatchCursor {
        &self.cursor
    }

    /// Returns the current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns the cell currently open for marking.
    pub fn eligible(&self) -> Option<Position> {
        self.cursor.eligible()
    }

    /// Returns the lines completed by the last accepted mark.
    pub fn winning_lines(&self) -> &[Line] {
        &self.winning_lines
    }

    /// Number of accepted marks.
    pub fn marks(&self) -> usize {
        self.marks
    }

    /// Current dispatch epoch.
    ///
    /// Only the dispatcher holding the latest epoch may tick the round.
    pub fn dispatch_epoch(&self) -> u64 {
        self.dispatch_epoch
    }

    /// Claims the round for a new dispatcher, retiring any earlier one.
    #[instrument(skip(self), fields(epoch = self.dispatch_epoch))]
    pub fn claim_dispatch(&mut self) -> u64 {
        self.dispatch_epoch += 1;
        debug!(epoch = self.dispatch_epoch, "Dispatch claimed");
        self.dispatch_epoch
    }

    /// Returns true once the round is over.
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Starts dispatching. Returns false if the round was not idle.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn start(&mut self) -> bool {
        if self.phase != RoundPhase::Idle {
            debug!("Start ignored");
            return false;
        }
        self.phase = RoundPhase::Running;
        info!(calls = self.calls.len(), "Round started");
        true
    }

    /// Dispatches the next call.
    ///
    /// Returns `None` unless the round is running.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn tick(&mut self) -> Option<DispatchTick> {
        if self.phase != RoundPhase::Running {
            return None;
        }
        let tick = self.cursor.advance(&self.calls, &self.board)?;
        if tick.completed {
            self.phase = RoundPhase::Completed;
            info!(marks = self.marks, "Round completed without bingo");
        }
        Some(tick)
    }

    /// Attempts to mark a cell against the current eligible cell.
    ///
    /// Rejected attempts and attempts outside the running phase change
    /// nothing. An accepted mark consumes the eligible cell; a completed
    /// line ends the round.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn attempt_mark(&mut self, position: Position) -> MarkResult {
        if self.phase != RoundPhase::Running {
            return MarkResult {
                accepted: false,
                won: self.phase == RoundPhase::Bingo,
            };
        }

        let MarkOutcome {
            board,
            accepted,
            won,
            ..
        } = attempt_mark(&self.board, position, self.cursor.eligible());
        if !accepted {
            return MarkResult {
                accepted: false,
                won: false,
            };
        }

        self.board = board;
        self.cursor.consume_eligible();
        self.marks += 1;

        if won {
            self.winning_lines = rules::winning_lines(&self.board);
            self.phase = RoundPhase::Bingo;
            info!(lines = ?self.winning_lines, marks = self.marks, "Bingo");
        }

        MarkResult { accepted, won }
    }

    /// Starts a new round in place with a different board and calls.
    ///
    /// Bumps the dispatch epoch, so a timer still running for the previous
    /// round stops at its next tick.
    #[instrument(skip(self, board, calls))]
    pub fn reset(&mut self, board: Board, calls: CallSequence) {
        debug!(previous = %self.phase, "Resetting round");
        let epoch = self.dispatch_epoch + 1;
        *self = Self::new(board, calls);
        self.dispatch_epoch = epoch;
    }
}
