//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the `twenty48` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`TWENTY48_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! TWENTY48_<SECTION>_<KEY>=value
//!
//! Examples:
//!     TWENTY48_COMMON_LOG_LEVEL=debug
//!     TWENTY48_GAME_BOARD_SIZE=5
//!     TWENTY48_PLAYER_KIND=greedy
//!     TWENTY48_PLAYER_SEED=42
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, config_search_paths, load_config, load_from_path, CONFIG_ENV_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;
