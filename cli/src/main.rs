//! twenty48 - Play 2048 in the terminal
//!
//! Starts a new game (or resumes a snapshot) and runs the turn loop with the
//! selected player:
//! 1. `human`: keyboard commands, with hints from the greedy assistant
//! 2. `greedy`: the assistant plays on its own
//! 3. `random`: uniformly random slides
//!
//! Logs go to a file so they never interleave with the game on the console.

use anyhow::Result;
use clap::Parser;
use engine_core::{
    EngineError, GameEngine, GameState, GameSummary, GreedyAssistant, MoveSource, NoRender,
    RandomPlayer, Renderer, TileDistribution,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

mod config;
mod console;
mod human;
mod keys;
mod snapshot;

use crate::config::{Config, PlayerKind};
use crate::console::ConsoleRenderer;
use crate::human::HumanPlayer;
use crate::snapshot::SnapshotError;

/// Log file for this run, named after the start time.
fn log_file_path(log_dir: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    log_dir.join(format!("twenty48-{secs}.log"))
}

fn open_log_file(log_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;
    let path = log_file_path(log_dir);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

fn init_tracing(level: &str, log_dir: &Path) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match open_log_file(log_dir) {
        Ok((path, file)) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .init();
            info!(path = %path.display(), "Logging initialized");
        }
        // Without a log file, run without logs rather than writing over the game.
        Err(_) => tracing_subscriber::registry().with(filter).init(),
    }
}

fn build_player(kind: PlayerKind, config: &Config, rng: &mut ChaCha20Rng) -> Box<dyn MoveSource> {
    match kind {
        PlayerKind::Human => Box::new(
            HumanPlayer::stdio()
                .with_assistant(Box::new(GreedyAssistant::new()))
                .with_log_dir(config.log_dir()),
        ),
        PlayerKind::Greedy => Box::new(GreedyAssistant::new()),
        PlayerKind::Random => Box::new(RandomPlayer::with_seed(rng.gen())),
    }
}

fn run(config: &Config) -> Result<GameSummary> {
    let kind = config.player_kind()?;
    let seed = config.seed();
    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    info!(?seed, player = %kind, "Starting game");

    let mut player = build_player(kind, config, &mut rng);
    let settings = config.game_settings();
    let state = match &config.snapshot {
        Some(path) => {
            let board = snapshot::read_snapshot(path)?;
            if board.num_rows() == 0 {
                info!(path = %path.display(), "Snapshot holds no rows, starting a new game");
                GameState::new(&settings, rng)?
            } else {
                info!(path = %path.display(), "Resuming game from snapshot");
                GameState::from_board(board, TileDistribution::new(&settings.new_tiles)?, rng)
            }
        }
        None => GameState::new(&settings, rng)?,
    };

    let mut renderer: Box<dyn Renderer> = if config.silent {
        Box::new(NoRender)
    } else {
        Box::new(ConsoleRenderer::stdout())
    };

    let mut engine = GameEngine::new(state);
    Ok(engine.run(player.as_mut(), renderer.as_mut())?)
}

/// Short message shown to the player when a game ends in an error.
fn failure_message(err: &anyhow::Error) -> String {
    if err.downcast_ref::<EngineError>().is_some() {
        "The game ran into an invalid state, exiting...".into()
    } else if err.downcast_ref::<SnapshotError>().is_some() {
        "There is an error in the game snapshot file, exiting...".into()
    } else {
        format!("{err:#}")
    }
}

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e:#}");
        return ExitCode::from(2);
    }

    init_tracing(config.effective_log_level(), &config.log_dir());
    info!(log_level = %config.effective_log_level(), "Tracing initialized");

    match run(&config) {
        Ok(summary) => {
            info!(
                outcome = ?summary.outcome,
                turns = summary.turns,
                score = summary.score,
                "Game completed"
            );
            if summary.ineffective_moves > 0 {
                warn!(
                    ineffective_moves = summary.ineffective_moves,
                    "Some moves did not change the board"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Game failed: {:#}", e);
            println!("{}", failure_message(&e));
            ExitCode::from(1)
        }
    }
}
