//! Biased call-sequence generation.
//!
//! Calls are drawn without replacement from two pools: the numbers on the
//! board, and every number in the universe. Each draw picks the board pool
//! with the boost probability. A drawn number leaves both pools, so no call
//! repeats and a board number is never offered twice.

use crate::board::Board;
use crate::call::{Call, CallSequence};
use crate::error::{BingoError, BingoErrorKind};
use crate::types::UNIVERSE_SIZE;
use rand::Rng;
use tracing::{debug, instrument, trace};

/// Checks a boost probability.
#[track_caller]
pub(crate) fn check_boost(boost_probability: f64) -> Result<(), BingoError> {
    if !(0.0..=1.0).contains(&boost_probability) {
        return Err(BingoError::new(BingoErrorKind::BoostOutOfRange(
            boost_probability,
        )));
    }
    Ok(())
}

/// Checks a requested call count against the universe.
#[track_caller]
pub(crate) fn check_count(count: usize) -> Result<(), BingoError> {
    if count > UNIVERSE_SIZE {
        return Err(BingoError::new(BingoErrorKind::CallCountExceedsUniverse {
            requested: count,
            universe: UNIVERSE_SIZE,
        }));
    }
    Ok(())
}

/// Removes `number` from a pool if present.
fn take(pool: &mut Vec<u8>, number: u8) {
    if let Some(idx) = pool.iter().position(|&n| n == number) {
        pool.swap_remove(idx);
    }
}

/// Generates `count` calls for a board.
///
/// With probability `boost_probability` a draw comes from the numbers on
/// the board, otherwise from the whole 1-75 universe. If the chosen pool is
/// empty the other one is used. The loop performs at most one draw per
/// universe value, so it always terminates.
///
/// # Errors
///
/// Fails before drawing anything if `count` exceeds the universe or the
/// probability lies outside `[0, 1]`.
#[track_caller]
#[instrument(skip(board, rng))]
pub fn generate_calls<R: Rng + ?Sized>(
    board: &Board,
    count: usize,
    boost_probability: f64,
    rng: &mut R,
) -> Result<CallSequence, BingoError> {
    check_count(count)?;
    check_boost(boost_probability)?;

    let mut board_pool: Vec<u8> = board.numbered_cells().map(|(_, n)| n).collect();
    let mut universe_pool: Vec<u8> = (1..=UNIVERSE_SIZE as u8).collect();
    let mut calls = Vec::with_capacity(count);
    let mut boosted = 0usize;

    while calls.len() < count && !universe_pool.is_empty() {
        let from_board = !board_pool.is_empty() && rng.random_bool(boost_probability);
        let pool = if from_board {
            &mut board_pool
        } else {
            &mut universe_pool
        };
        let idx = rng.random_range(0..pool.len());
        let number = pool.swap_remove(idx);

        if from_board {
            boosted += 1;
            take(&mut universe_pool, number);
        } else {
            take(&mut board_pool, number);
        }

        let Some(call) = Call::new(number) else {
            continue;
        };
        trace!(%call, from_board, "Drew call");
        calls.push(call);
    }

    let sequence = CallSequence::from_vec(calls);
    debug!(
        count = sequence.len(),
        boosted,
        calls = %sequence,
        "Generated call sequence"
    );
    Ok(sequence)
}
