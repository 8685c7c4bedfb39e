//! Strictly Bingo - Unified CLI
//!
//! Deals boards, generates call sequences and plays headless rounds.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use strictly_bingo::{Board, GameConfig, Round, generate_calls, share};
use strictly_bingo_app::{AppConfig, AutoPlayer, Session, SessionEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Board { seed } => run_board(seed),
        Command::Calls { seed, count, boost } => run_calls(seed, count, boost),
        Command::Play {
            config,
            seed,
            interval_ms,
            marathon,
        } => run_play(config, seed, interval_ms, marathon).await,
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Print a freshly dealt board
#[instrument]
fn run_board(seed: Option<u64>) -> Result<()> {
    let board = Board::generate(&mut make_rng(seed));
    println!("{}", board.display());
    Ok(())
}

/// Print a board and the call sequence generated for it
#[instrument]
fn run_calls(seed: Option<u64>, count: usize, boost: f64) -> Result<()> {
    let mut rng = make_rng(seed);
    let board = Board::generate(&mut rng);
    let calls = generate_calls(&board, count, boost, &mut rng)?;
    println!("{}\n", board.display());
    println!("{}", calls);
    Ok(())
}

/// Resolve the config file: the flag first, then `BINGO_CONFIG`.
fn config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os("BINGO_CONFIG").map(PathBuf::from))
}

/// Play one headless round with the automatic player
#[instrument]
async fn run_play(
    config: Option<PathBuf>,
    seed: Option<u64>,
    interval_ms: Option<u64>,
    marathon: bool,
) -> Result<()> {
    let mut app = match config_path(config) {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::default(),
    };
    if marathon {
        app = app.with_game(GameConfig::marathon());
    }
    if let Some(ms) = interval_ms {
        let game = app.game().clone().with_call_interval_ms(ms);
        app = app.with_game(game);
    }
    app.validate()?;
    debug!(?app, "Effective configuration");

    let mut rng = make_rng(seed);
    let round = Round::deal(app.game(), &mut rng)?;
    println!("{}\n", round.board().display());

    let player = AutoPlayer::new(app.player(), seed);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let session = Session::new(share(round), app.game().call_interval(), Box::new(player))
        .with_events(event_tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                SessionEvent::Called(tick) => match tick.call {
                    Some(call) => println!("Call: {}", call),
                    None => println!("No more calls"),
                },
                SessionEvent::Marked { position, result } if result.accepted => {
                    println!("  daubed {}", position);
                }
                SessionEvent::Marked { .. } => {}
                SessionEvent::Finished(phase) => println!("Round over: {}", phase),
            }
        }
    });

    info!("Playing round");
    let summary = session.run().await?;
    printer.await.context("Event printer failed")?;

    println!("\n{}", summary.board.display());
    if summary.winning_lines.is_empty() {
        println!(
            "No bingo after {} calls ({} marks)",
            summary.calls_made, summary.marks
        );
    } else {
        let lines: Vec<String> = summary.winning_lines.iter().map(|l| l.to_string()).collect();
        println!(
            "BINGO on {} after {} calls",
            lines.join(", "),
            summary.calls_made
        );
    }
    Ok(())
}
