//! Round configuration.

use crate::error::{BingoError, BingoErrorKind};
use crate::generator::{check_boost, check_count};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Settings for one round of bingo.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of calls generated per board.
    #[serde(default = "default_call_count")]
    call_count: usize,

    /// Chance that a call is drawn from the numbers on the board.
    #[serde(default = "default_boost_probability")]
    boost_probability: f64,

    /// Milliseconds between calls.
    #[serde(default = "default_call_interval_ms")]
    call_interval_ms: u64,
}

fn default_call_count() -> usize {
    10
}

fn default_boost_probability() -> f64 {
    0.65
}

fn default_call_interval_ms() -> u64 {
    5_000
}

impl GameConfig {
    /// Creates a configuration, validating it.
    #[track_caller]
    #[instrument]
    pub fn new(
        call_count: usize,
        boost_probability: f64,
        call_interval_ms: u64,
    ) -> Result<Self, BingoError> {
        let config = Self {
            call_count,
            boost_probability,
            call_interval_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Ten calls, 65% boost, five seconds apart.
    pub fn classic() -> Self {
        Self {
            call_count: default_call_count(),
            boost_probability: default_boost_probability(),
            call_interval_ms: default_call_interval_ms(),
        }
    }

    /// Thirty calls with an 85% boost.
    pub fn marathon() -> Self {
        Self {
            call_count: 30,
            boost_probability: 0.85,
            call_interval_ms: default_call_interval_ms(),
        }
    }

    /// Checks every field, failing on the first bad one.
    #[track_caller]
    #[instrument]
    pub fn validate(&self) -> Result<(), BingoError> {
        check_count(self.call_count)?;
        check_boost(self.boost_probability)?;
        if self.call_interval_ms == 0 {
            return Err(BingoError::new(BingoErrorKind::ZeroInterval));
        }
        Ok(())
    }

    /// Dispatch period as a duration.
    pub fn call_interval(&self) -> Duration {
        Duration::from_millis(self.call_interval_ms)
    }

    /// Returns a copy with a different call count.
    pub fn with_call_count(mut self, call_count: usize) -> Self {
        self.call_count = call_count;
        self
    }

    /// Returns a copy with a different boost probability.
    pub fn with_boost_probability(mut self, boost_probability: f64) -> Self {
        self.boost_probability = boost_probability;
        self
    }

    /// Returns a copy with a different call interval.
    pub fn with_call_interval_ms(mut self, call_interval_ms: u64) -> Self {
        self.call_interval_ms = call_interval_ms;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GameConfig::classic().validate().is_ok());
        assert!(GameConfig::marathon().validate().is_ok());
        assert_eq!(*GameConfig::marathon().call_count(), 30);
    }

    #[test]
    fn test_new_rejects_bad_values() {
        assert!(GameConfig::new(76, 0.5, 1000).is_err());
        assert!(GameConfig::new(10, -0.1, 1000).is_err());
        let err = GameConfig::new(10, 0.5, 0).unwrap_err();
        assert_eq!(err.kind(), &BingoErrorKind::ZeroInterval);
    }

    #[test]
    fn test_builders_do_not_validate() {
        let config = GameConfig::classic().with_call_count(100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interval_duration() {
        let config = GameConfig::classic().with_call_interval_ms(250);
        assert_eq!(config.call_interval(), Duration::from_millis(250));
    }
}
