//! Calls and call sequences.
//!
//! A call is the caller announcing a column tag and a number, written the
//! familiar way (`B12`, `O68`).

use crate::types::Column;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One announced (column, number) pair.
///
/// The column is always the one owning the number, so a call built
/// through [`Call::new`] is consistent by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Call {
    column: Column,
    number: u8,
}

impl Call {
    /// Creates the call for `number`, or `None` outside 1-75.
    #[instrument]
    pub fn new(number: u8) -> Option<Self> {
        Column::for_number(number).map(|column| Self { column, number })
    }

    /// Column tag of the call.
    pub fn column(&self) -> Column {
        self.column
    }

    /// Called number.
    pub fn number(&self) -> u8 {
        self.number
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column, self.number)
    }
}

/// Error parsing a call from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CallParseError {
    /// Input was empty.
    #[display("empty call")]
    Empty,

    /// The leading letter is not one of B, I, N, G, O.
    #[display("unknown column tag in {:?}", _0)]
    UnknownColumn(String),

    /// The number part is missing or not a number.
    #[display("bad number in {:?}", _0)]
    BadNumber(String),

    /// The number does not belong to the tagged column.
    #[display("{} is not in column {}", number, column)]
    WrongColumn {
        /// Tagged column.
        column: Column,
        /// Number that was read.
        number: u8,
    },

    /// The same call appears twice in a sequence.
    #[display("{} is called more than once", _0)]
    Repeated(Call),
}

impl std::error::Error for CallParseError {}

impl FromStr for Call {
    type Err = CallParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let tag = chars.next().ok_or(CallParseError::Empty)?;
        let column = tag
            .to_ascii_uppercase()
            .to_string()
            .parse::<Column>()
            .map_err(|_| CallParseError::UnknownColumn(s.to_string()))?;
        let number = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| CallParseError::BadNumber(s.to_string()))?;
        if !column.contains(number) {
            return Err(CallParseError::WrongColumn { column, number });
        }
        Ok(Self { column, number })
    }
}

/// Ordered, duplicate-free list of calls for one round.
///
/// Immutable once built; dispatch only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSequence {
    calls: Vec<Call>,
}

impl CallSequence {
    pub(crate) fn from_vec(calls: Vec<Call>) -> Self {
        Self { calls }
    }

    /// Parses a sequence from call labels such as `["B1", "I20"]`.
    ///
    /// Repeated calls are rejected so the no-repeat guarantee holds for
    /// hand-written sequences too.
    #[instrument]
    pub fn parse(labels: &[&str]) -> Result<Self, CallParseError> {
        let mut calls = Vec::with_capacity(labels.len());
        for label in labels {
            let call: Call = label.parse()?;
            if calls.contains(&call) {
                return Err(CallParseError::Repeated(call));
            }
            calls.push(call);
        }
        Ok(Self { calls })
    }

    /// Returns the call at `index`.
    pub fn get(&self, index: usize) -> Option<Call> {
        self.calls.get(index).copied()
    }

    /// Number of calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns true if there are no calls.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calls as a slice.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Iterates over the calls in order.
    pub fn iter(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }
}

impl std::fmt::Display for CallSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self.calls.iter().map(Call::to_string).collect();
        write!(f, "{}", labels.join(" "))
    }
}
