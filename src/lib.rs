//! Strictly Bingo host - headless rounds on top of `strictly_bingo`.
//!
//! # Architecture
//!
//! - **Config**: TOML file with `[game]` and `[player]` tables
//! - **Player**: trait for reacting to calls, with an automatic dauber
//! - **Session**: runs one round, forwarding ticks to the player over a channel
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use strictly_bingo::{GameConfig, Round, share};
//! use strictly_bingo_app::{AutoPlayer, PlayerConfig, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::classic();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let round = share(Round::deal(&config, &mut rng)?);
//! let player = AutoPlayer::new(&PlayerConfig::default(), Some(1));
//! let summary = Session::new(round, config.call_interval(), Box::new(player))
//!     .run()
//!     .await?;
//! println!("{}", summary.outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod player;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, PlayerConfig};

// Crate-level exports - Players
pub use player::{AutoPlayer, Player};

// Crate-level exports - Session
pub use session::{Session, SessionEvent, SessionSummary};
