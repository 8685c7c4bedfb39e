//! Host configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_bingo::GameConfig;
use tracing::{debug, info, instrument};

/// Settings for the automatic player.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    #[serde(default = "default_name")]
    name: String,

    /// Delay before daubing an eligible cell, in milliseconds.
    #[serde(default = "default_reaction_ms")]
    reaction_ms: u64,

    /// Chance of missing an eligible cell entirely.
    #[serde(default)]
    miss_chance: f64,
}

#[instrument]
fn default_name() -> String {
    "auto".to_string()
}

#[instrument]
fn default_reaction_ms() -> u64 {
    400
}

impl PlayerConfig {
    /// Creates a player configuration.
    #[instrument(skip(name), fields(player = %name))]
    pub fn new(name: String, reaction_ms: u64, miss_chance: f64) -> Self {
        Self {
            name,
            reaction_ms,
            miss_chance,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new(default_name(), default_reaction_ms(), 0.0)
    }
}

/// Full host configuration: one `[game]` and one `[player]` table.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Round settings.
    #[serde(default)]
    game: GameConfig,

    /// Automatic player settings.
    #[serde(default)]
    player: PlayerConfig,
}

impl AppConfig {
    /// Creates a configuration from its parts.
    pub fn new(game: GameConfig, player: PlayerConfig) -> Self {
        Self { game, player }
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            calls = config.game.call_count(),
            boost = config.game.boost_probability(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the game settings and the player's miss chance.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid game settings: {}", e.kind())))?;
        if !(0.0..=1.0).contains(&self.player.miss_chance) {
            return Err(ConfigError::new(format!(
                "miss_chance {} is outside [0, 1]",
                self.player.miss_chance
            )));
        }
        Ok(())
    }

    /// Returns a copy with the game settings replaced.
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
