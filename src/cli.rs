//! Command-line interface for the bingo host.

use clap::{Parser, Subcommand};

/// Strictly Bingo - headless number-bingo rounds
#[derive(Parser, Debug)]
#[command(name = "bingo")]
#[command(about = "Deal, call and play number-bingo rounds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Deal a board and print it
    Board {
        /// RNG seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Deal a board and print the call sequence generated for it
    Calls {
        /// RNG seed for a reproducible board and sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Number of calls to generate
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Chance that a call comes from the board
        #[arg(short, long, default_value = "0.65")]
        boost: f64,
    },

    /// Play one round with the automatic player
    Play {
        /// Path to a TOML config file ([game] and [player] tables)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// RNG seed for the board, calls and player
        #[arg(long)]
        seed: Option<u64>,

        /// Override the time between calls, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Use the 30-call, high-boost preset instead of the classic one
        #[arg(long)]
        marathon: bool,
    },
}
