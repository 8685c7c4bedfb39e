//! Strictly Bingo - pure number-bingo game logic.
//!
//! # Architecture
//!
//! - **Board**: 5x5 card with a free centre, generated from one shuffle
//! - **Calls**: biased, duplicate-free call sequences drawn without replacement
//! - **Dispatch**: a cursor that resolves each call to at most one eligible cell
//! - **Matcher**: validates marks against the eligible cell and checks for bingo
//! - **Round**: explicit state machine tying the above together
//! - **Scheduler**: tokio task ticking a shared round with a cancellable handle
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use strictly_bingo::{GameConfig, Round, RoundPhase};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut round = Round::deal(&GameConfig::classic(), &mut rng)?;
//! round.start();
//! while let Some(tick) = round.tick() {
//!     if let Some(cell) = tick.eligible {
//!         round.attempt_mark(cell);
//!     }
//! }
//! assert!(matches!(round.phase(), RoundPhase::Completed | RoundPhase::Bingo));
//! # Ok::<(), strictly_bingo::BingoError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod call;
mod config;
mod dispatch;
mod error;
mod generator;
mod matcher;
mod round;
mod scheduler;
mod types;

pub mod rules;

// Crate-level exports - Board and cells
pub use board::{Board, NUMBER_CELLS};
pub use types::{BOARD_SIZE, COLUMN_SPAN, Cell, CellValue, Column, Position, UNIVERSE_SIZE};

// Crate-level exports - Calls
pub use call::{Call, CallParseError, CallSequence};
pub use generator::generate_calls;

// Crate-level exports - Dispatch and matching
pub use dispatch::{DispatchCursor, DispatchTick, resolve_call};
pub use matcher::{MarkOutcome, Rejection, attempt_mark, validate_mark};
pub use rules::{Line, check_bingo, winning_lines};

// Crate-level exports - Round lifecycle
pub use config::GameConfig;
pub use round::{MarkResult, Round, RoundPhase};
pub use scheduler::{
    DispatchHandle, DispatchStop, SharedRound, share, start_dispatch, start_round_dispatch,
};

// Crate-level exports - Errors
pub use error::{BingoError, BingoErrorKind};
