//! Player trait and the automatic dauber.

use crate::config::PlayerConfig;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use strictly_bingo::{DispatchTick, Position};
use tracing::{debug, warn};

/// Something that reacts to calls by choosing a cell to mark.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Reacts to a dispatched call.
    ///
    /// Returns the position to mark, or `None` to let the call pass.
    async fn on_call(&mut self, tick: &DispatchTick) -> Option<Position>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Player that daubs every eligible cell after a short delay, missing
/// some at random.
pub struct AutoPlayer {
    name: String,
    reaction: Duration,
    miss_chance: f64,
    rng: StdRng,
}

impl AutoPlayer {
    /// Creates an automatic player.
    pub fn new(config: &PlayerConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let miss_chance = *config.miss_chance();
        let miss_chance = if miss_chance.is_finite() {
            miss_chance.clamp(0.0, 1.0)
        } else {
            warn!(miss_chance, "Ignoring non-finite miss chance");
            0.0
        };
        Self {
            name: config.name().clone(),
            reaction: Duration::from_millis(*config.reaction_ms()),
            miss_chance,
            rng,
        }
    }
}

#[async_trait::async_trait]
impl Player for AutoPlayer {
    async fn on_call(&mut self, tick: &DispatchTick) -> Option<Position> {
        let cell = tick.eligible?;

        if self.rng.random_bool(self.miss_chance) {
            debug!(player = %self.name, %cell, "Missed the call");
            return None;
        }

        tokio::time::sleep(self.reaction).await;
        debug!(player = %self.name, %cell, "Daubing");
        Some(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_bingo::Call;

    fn tick(eligible: Option<Position>) -> DispatchTick {
        DispatchTick {
            index: Some(0),
            call: Call::new(1),
            eligible,
            completed: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_marks_eligible_cell() {
        let mut player = AutoPlayer::new(&PlayerConfig::default(), Some(1));
        let cell = Position::new(0, 0).unwrap();
        assert_eq!(player.on_call(&tick(Some(cell))).await, Some(cell));
        assert_eq!(player.on_call(&tick(None)).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_misses_at_full_miss_chance() {
        let config = PlayerConfig::new("sleepy".to_string(), 10, 1.0);
        let mut player = AutoPlayer::new(&config, Some(2));
        let cell = Position::new(1, 1).unwrap();
        assert_eq!(player.on_call(&tick(Some(cell))).await, None);
        assert_eq!(player.name(), "sleepy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_nan_miss_chance_never_misses() {
        let config = PlayerConfig::new("odd".to_string(), 10, f64::NAN);
        let mut player = AutoPlayer::new(&config, Some(3));
        let cell = Position::new(3, 3).unwrap();
        assert_eq!(player.on_call(&tick(Some(cell))).await, Some(cell));
    }
}
