//! Error types for bingo configuration misuse.
//!
//! Only misconfiguration is an error. Rejected marks and ticks after a
//! round ends are defined no-ops and never surface here.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong when building a board, a call sequence or a round.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum BingoErrorKind {
    /// More calls were requested than the value universe holds.
    #[display("call count {} exceeds the {}-value universe", requested, universe)]
    CallCountExceedsUniverse {
        /// Requested number of calls.
        requested: usize,
        /// Size of the value universe.
        universe: usize,
    },

    /// Boost probability is not a probability.
    #[display("boost probability {} is outside [0, 1]", _0)]
    BoostOutOfRange(f64),

    /// The dispatch interval is zero.
    #[display("call interval must be greater than zero")]
    ZeroInterval,

    /// A board position lies outside the 5x5 grid.
    #[display("position ({}, {}) is off the board", row, col)]
    PositionOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Explicit board values were rejected.
    #[display("invalid board: {}", _0)]
    InvalidBoard(String),
}

/// Configuration error with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Bingo error: {} at {}:{}", kind, file, line)]
pub struct BingoError {
    /// Error kind.
    pub kind: BingoErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl BingoError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: BingoErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &BingoErrorKind {
        &self.kind
    }
}

impl From<BingoErrorKind> for BingoError {
    #[track_caller]
    fn from(kind: BingoErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_location() {
        let err = BingoError::new(BingoErrorKind::ZeroInterval);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.line > 0);
    }

    #[test]
    fn test_error_display_includes_kind() {
        let err = BingoError::new(BingoErrorKind::CallCountExceedsUniverse {
            requested: 80,
            universe: 75,
        });
        let text = err.to_string();
        assert!(text.contains("call count 80 exceeds the 75-value universe"));
    }
}
