//! Round orchestration between the dispatcher and a player.

use crate::player::Player;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use strictly_bingo::{
    Board, DispatchTick, Line, MarkResult, Position, RoundPhase, SharedRound, start_dispatch,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the session to whoever is watching.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A call went out.
    Called(DispatchTick),
    /// The player daubed a cell.
    Marked {
        /// Cell the player chose.
        position: Position,
        /// What the round made of it.
        result: MarkResult,
    },
    /// The round ended.
    Finished(RoundPhase),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Final phase of the round.
    pub outcome: RoundPhase,
    /// Number of calls that went out.
    pub calls_made: usize,
    /// Accepted marks.
    pub marks: usize,
    /// Completed lines, empty unless the round was won.
    pub winning_lines: Vec<Line>,
    /// Final board.
    pub board: Board,
}

/// Plays one round: dispatches calls and lets a player react to them.
pub struct Session {
    round: SharedRound,
    period: Duration,
    player: Box<dyn Player>,
    event_tx: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl Session {
    /// Creates a session over a shared round.
    pub fn new(round: SharedRound, period: Duration, player: Box<dyn Player>) -> Self {
        Self {
            round,
            period,
            player,
            event_tx: None,
        }
    }

    /// Reports progress on the given channel.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Returns the shared round.
    pub fn round(&self) -> &SharedRound {
        &self.round
    }

    /// Runs the round to its end.
    ///
    /// The dispatch handle is cancelled on every exit path.
    #[instrument(skip(self), fields(player = %self.player.name(), period = ?self.period))]
    pub async fn run(mut self) -> Result<SessionSummary> {
        info!("Starting bingo session");

        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let handle = start_dispatch(Arc::clone(&self.round), self.period, move |tick| {
            if tick_tx.send(tick).is_err() {
                debug!("Session gone, dropping tick");
            }
        })?;

        let mut calls_made = 0usize;
        while let Some(tick) = tick_rx.recv().await {
            if tick.call.is_some() {
                calls_made += 1;
            }
            self.emit(SessionEvent::Called(tick));
            if tick.completed {
                break;
            }

            if !self.is_current(&tick).await {
                debug!(call = ?tick.call, "Skipping stale call");
                continue;
            }

            let Some(position) = self.player.on_call(&tick).await else {
                continue;
            };
            let result = self.round.lock().await.attempt_mark(position);
            if !result.accepted {
                warn!(%position, "Mark arrived too late");
            }
            let won = result.won;
            self.emit(SessionEvent::Marked { position, result });
            if won {
                break;
            }
        }

        handle.cancel();
        let stop = handle.finished().await;
        debug!(%stop, "Dispatch stopped");

        let round = self.round.lock().await;
        let summary = SessionSummary {
            outcome: round.phase(),
            calls_made,
            marks: round.marks(),
            winning_lines: round.winning_lines().to_vec(),
            board: round.board().clone(),
        };
        drop(round);

        self.emit(SessionEvent::Finished(summary.outcome));
        info!(
            outcome = %summary.outcome,
            calls = summary.calls_made,
            marks = summary.marks,
            "Session finished"
        );
        Ok(summary)
    }

    /// True while the tick's call is still the one open for marking.
    async fn is_current(&self, tick: &DispatchTick) -> bool {
        let round = self.round.lock().await;
        round.phase() == RoundPhase::Running && round.cursor().current_call() == tick.call
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.event_tx
            && tx.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }
}
