//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so the binary runs without
//! any config file on disk.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    game: GameDefaults,
    player: PlayerDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    log_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    board_size: usize,
    num_initial_tiles: Option<usize>,
    new_tiles: Vec<TileDefault>,
}

#[derive(Debug, Deserialize)]
struct TileDefault {
    value: u32,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct PlayerDefaults {
    kind: String,
    seed: Option<u64>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn log_dir() -> Option<&'static str> {
    DEFAULTS.common.log_dir.as_deref()
}

// Game
pub fn board_size() -> usize {
    DEFAULTS.game.board_size
}
pub fn num_initial_tiles() -> Option<usize> {
    DEFAULTS.game.num_initial_tiles
}
/// `(value, weight)` pairs of the spawnable tiles.
pub fn new_tiles() -> Vec<(u32, f64)> {
    DEFAULTS
        .game
        .new_tiles
        .iter()
        .map(|tile| (tile.value, tile.weight))
        .collect()
}

// Player
pub fn player_kind() -> &'static str {
    &DEFAULTS.player.kind
}
pub fn player_seed() -> Option<u64> {
    DEFAULTS.player.seed
}
