//! Timed dispatch of calls.
//!
//! One tokio task per round ticks the shared [`Round`] on a fixed period.
//! Ticks and mark attempts take the same lock, so a mark can never race a
//! tick that is replacing the eligible cell.

use crate::board::Board;
use crate::call::CallSequence;
use crate::dispatch::DispatchTick;
use crate::error::{BingoError, BingoErrorKind};
use crate::round::{Round, RoundPhase};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// A round shared between the dispatch task and the player.
pub type SharedRound = Arc<Mutex<Round>>;

/// Wraps a round for sharing.
pub fn share(round: Round) -> SharedRound {
    Arc::new(Mutex::new(round))
}

/// Why a dispatch task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DispatchStop {
    /// Every call was dispatched.
    Completed,
    /// The round was won.
    Bingo,
    /// The handle was cancelled or dropped.
    Cancelled,
    /// The round was reset or claimed by a newer dispatcher.
    Superseded,
}

/// Handle to a running dispatch task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct DispatchHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<DispatchStop>>,
}

impl DispatchHandle {
    /// Stops the dispatch task at its next await point.
    #[instrument(skip(self))]
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Cancelling dispatch");
            self.cancel.cancel();
        }
    }

    /// Returns true once `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the task to stop and reports why.
    #[instrument(skip(self))]
    pub async fn finished(mut self) -> DispatchStop {
        let Some(task) = self.task.take() else {
            return DispatchStop::Cancelled;
        };
        match task.await {
            Ok(stop) => stop,
            Err(e) => {
                warn!(error = %e, "Dispatch task did not finish cleanly");
                DispatchStop::Cancelled
            }
        }
    }
}

impl Drop for DispatchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Starts ticking a shared round every `period`.
///
/// The round is started if it is still idle. The first call goes out one
/// full period after this returns. `on_tick` runs outside the round lock
/// after every tick, including the completing one. The task ends by itself
/// when the round reaches Completed or Bingo, when the round is reset, or
/// when a later `start_dispatch` claims the same round.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Rejects a zero period.
#[track_caller]
#[instrument(skip(round, on_tick))]
pub fn start_dispatch<F>(
    round: SharedRound,
    period: Duration,
    mut on_tick: F,
) -> Result<DispatchHandle, BingoError>
where
    F: FnMut(DispatchTick) + Send + 'static,
{
    if period.is_zero() {
        return Err(BingoError::new(BingoErrorKind::ZeroInterval));
    }

    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let epoch = {
            let mut round = round.lock().await;
            let epoch = round.claim_dispatch();
            round.start();
            if let Some(stop) = terminal_stop(round.phase()) {
                return stop;
            }
            epoch
        };

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("Dispatch cancelled");
                    return DispatchStop::Cancelled;
                }
                _ = ticker.tick() => {
                    let (tick, phase) = {
                        let mut round = round.lock().await;
                        if round.dispatch_epoch() != epoch {
                            info!(epoch, current = round.dispatch_epoch(), "Dispatch superseded");
                            return DispatchStop::Superseded;
                        }
                        (round.tick(), round.phase())
                    };
                    if let Some(tick) = tick {
                        on_tick(tick);
                    }
                    if let Some(stop) = terminal_stop(phase) {
                        info!(%stop, "Dispatch finished");
                        return stop;
                    }
                }
            }
        }
    });

    Ok(DispatchHandle {
        cancel,
        task: Some(task),
    })
}

/// Builds a fresh round from a board and calls and starts dispatching it.
///
/// Returns the handle together with the shared round, through which mark
/// attempts are made.
#[track_caller]
#[instrument(skip(calls, board, on_tick))]
pub fn start_round_dispatch<F>(
    calls: CallSequence,
    board: Board,
    period: Duration,
    on_tick: F,
) -> Result<(DispatchHandle, SharedRound), BingoError>
where
    F: FnMut(DispatchTick) + Send + 'static,
{
    let round = share(Round::new(board, calls));
    let handle = start_dispatch(Arc::clone(&round), period, on_tick)?;
    Ok((handle, round))
}

fn terminal_stop(phase: RoundPhase) -> Option<DispatchStop> {
    match phase {
        RoundPhase::Completed => Some(DispatchStop::Completed),
        RoundPhase::Bingo => Some(DispatchStop::Bingo),
        RoundPhase::Idle | RoundPhase::Running => None,
    }
}
