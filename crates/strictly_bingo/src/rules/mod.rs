//! Game rules for bingo.
//!
//! This module contains pure functions for evaluating a board. Rules are
//! separated from board storage so the matcher, the round and tests can
//! all ask the same questions.

pub mod win;

pub use win::{Line, check_bingo, is_line_complete, winning_lines};
