//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_log_dir() -> Option<String> {
    defaults::log_dir().map(Into::into)
}
fn d_board_size() -> usize {
    defaults::board_size()
}
fn d_num_initial_tiles() -> Option<usize> {
    defaults::num_initial_tiles()
}
fn d_new_tiles() -> Vec<NewTileConfig> {
    defaults::new_tiles()
        .into_iter()
        .map(|(value, weight)| NewTileConfig { value, weight })
        .collect()
}
fn d_player_kind() -> String {
    defaults::player_kind().into()
}
fn d_player_seed() -> Option<u64> {
    defaults::player_seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Directory for log files. A platform data directory is used when unset.
    #[serde(default = "d_log_dir")]
    pub log_dir: Option<String>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: d_log_level(),
            log_dir: d_log_dir(),
        }
    }
}

/// Rules of a new game
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_board_size")]
    pub board_size: usize,
    /// Tiles on a new board; a random count when unset.
    #[serde(default = "d_num_initial_tiles")]
    pub num_initial_tiles: Option<usize>,
    #[serde(default = "d_new_tiles")]
    pub new_tiles: Vec<NewTileConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: d_board_size(),
            num_initial_tiles: d_num_initial_tiles(),
            new_tiles: d_new_tiles(),
        }
    }
}

/// A spawnable tile and its relative weight
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct NewTileConfig {
    pub value: u32,
    pub weight: f64,
}

/// Who plays the game
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// `human`, `greedy` or `random`.
    #[serde(default = "d_player_kind")]
    pub kind: String,
    /// Seed for tile spawns and the random player; entropy when unset.
    #[serde(default = "d_player_seed")]
    pub seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            kind: d_player_kind(),
            seed: d_player_seed(),
        }
    }
}
