//! Command-line configuration for the twenty48 binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use engine_core::{GameSettings, NewTile, TileDistribution};
use once_cell::sync::Lazy;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_player() -> String {
    CENTRAL_CONFIG.player.kind.clone()
}

fn default_board_size() -> usize {
    CENTRAL_CONFIG.game.board_size
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

/// Who decides the moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// Keyboard input, with hints from the greedy assistant.
    Human,
    /// The greedy assistant plays on its own.
    Greedy,
    /// Uniformly random directions.
    Random,
}

impl PlayerKind {
    pub const NAMES: [&'static str; 3] = ["human", "greedy", "random"];
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerKind::Human => "human",
            PlayerKind::Greedy => "greedy",
            PlayerKind::Random => "random",
        })
    }
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "greedy" => Ok(PlayerKind::Greedy),
            "random" => Ok(PlayerKind::Random),
            other => Err(anyhow!(
                "invalid player '{}', expected one of {}",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "twenty48", version)]
#[command(about = "Play 2048 in the terminal")]
#[command(
    long_about = "Play 2048 in the terminal, or watch a built-in player play it.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Seed for the random number generator; the same seed always produces
    /// the same game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress UI rendering
    #[arg(short, long)]
    pub silent: bool,

    /// Who plays the game (human, greedy, random)
    #[arg(long, default_value_t = default_player())]
    pub player: String,

    /// Number of tiles on a new board (random when omitted)
    #[arg(long)]
    pub initial_tiles: Option<usize>,

    /// Size of each row and column of a new board
    #[arg(long, default_value_t = default_board_size())]
    pub board_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log at debug level, overriding --log-level
    #[arg(long)]
    pub debug: bool,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Resume the game saved in this snapshot file instead of starting a new one
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.player_kind()?;

        if self.board_size == 0 {
            return Err(anyhow!("board_size must be greater than 0"));
        }

        if let Some(count) = self.initial_tiles() {
            let cells = self.board_size * self.board_size;
            if count > cells {
                return Err(anyhow!(
                    "initial_tiles ({}) cannot exceed the {} cells of the board",
                    count,
                    cells
                ));
            }
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        TileDistribution::new(&new_tiles(&CENTRAL_CONFIG))
            .context("invalid new_tiles in the game configuration")?;

        Ok(())
    }

    pub fn player_kind(&self) -> Result<PlayerKind> {
        self.player.parse()
    }

    /// Seed from the command line, else from the config file.
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.player.seed)
    }

    pub fn initial_tiles(&self) -> Option<usize> {
        self.initial_tiles.or(CENTRAL_CONFIG.game.num_initial_tiles)
    }

    /// Level used when `RUST_LOG` is unset.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Where log files go: `--log-dir`, then the configured directory, then
    /// the platform data directory, then the working directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| CENTRAL_CONFIG.common.log_dir.as_ref().map(PathBuf::from))
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("twenty48").join("logs")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Settings for a new game.
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            board_size: self.board_size,
            num_initial_tiles: self.initial_tiles(),
            new_tiles: new_tiles(&CENTRAL_CONFIG),
        }
    }
}

fn new_tiles(config: &CentralConfig) -> Vec<NewTile> {
    config
        .game
        .new_tiles
        .iter()
        .map(|tile| NewTile {
            value: tile.value,
            weight: tile.weight,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            seed: Some(42),
            silent: true,
            player: "greedy".into(),
            initial_tiles: Some(2),
            board_size: 4,
            log_level: "info".into(),
            debug: false,
            log_dir: Some(PathBuf::from("/tmp/twenty48-logs")),
            snapshot: None,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_player() {
        let mut cfg = base_config();
        cfg.player = "llm".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid player 'llm'"));
    }

    #[test]
    fn validate_rejects_zero_board_size() {
        let mut cfg = base_config();
        cfg.board_size = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("board_size"));
    }

    #[test]
    fn validate_rejects_too_many_initial_tiles() {
        let mut cfg = base_config();
        cfg.board_size = 2;
        cfg.initial_tiles = Some(5);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("initial_tiles"));

        cfg.initial_tiles = Some(4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn player_kind_parses_case_insensitively() {
        assert_eq!("Human".parse::<PlayerKind>().unwrap(), PlayerKind::Human);
        assert_eq!(" random ".parse::<PlayerKind>().unwrap(), PlayerKind::Random);
        for name in PlayerKind::NAMES {
            assert_eq!(name.parse::<PlayerKind>().unwrap().to_string(), name);
        }
    }

    #[test]
    fn debug_flag_overrides_log_level() {
        let mut cfg = base_config();
        assert_eq!(cfg.effective_log_level(), "info");
        cfg.debug = true;
        assert_eq!(cfg.effective_log_level(), "debug");
    }

    #[test]
    fn log_dir_prefers_command_line() {
        assert_eq!(base_config().log_dir(), PathBuf::from("/tmp/twenty48-logs"));
    }

    #[test]
    fn cli_flags_take_priority() {
        let cfg = base_config();
        assert_eq!(cfg.seed(), Some(42));
        assert_eq!(cfg.initial_tiles(), Some(2));

        let settings = cfg.game_settings();
        assert_eq!(settings.board_size, 4);
        assert_eq!(settings.num_initial_tiles, Some(2));
        assert!(!settings.new_tiles.is_empty());
    }

    #[test]
    fn parses_command_line() {
        let cfg = Config::try_parse_from([
            "twenty48",
            "--seed",
            "7",
            "-s",
            "--player",
            "random",
            "--board-size",
            "5",
            "--initial-tiles",
            "3",
            "--debug",
            "saved.json",
        ])
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert!(cfg.silent);
        assert_eq!(cfg.player_kind().unwrap(), PlayerKind::Random);
        assert_eq!(cfg.board_size, 5);
        assert_eq!(cfg.initial_tiles, Some(3));
        assert!(cfg.debug);
        assert_eq!(cfg.snapshot, Some(PathBuf::from("saved.json")));
    }

    #[test]
    fn verify_command() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
