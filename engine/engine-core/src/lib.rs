//! Core types and rules for the 2048 game engine
//!
//! This crate provides everything needed to play 2048 without any I/O:
//! - `Board`: Rows of optional tiles with row/column access
//! - `grid`: Pure sliding, merging, spawning and end-of-game checks
//! - `GameState`: The live board plus its tile distribution and RNG
//! - `MoveSource`: Anything that can pick the next slide
//! - `Renderer`: Observer hooks for each phase of a game
//! - `GameEngine`: The turn loop tying the above together

pub mod assistant;
pub mod board;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod player;
pub mod render;
pub mod state;

// Re-export main types for convenience
pub use assistant::{GreedyAssistant, MoveEvaluation};
pub use board::{Board, BoardError, Cell, Tile};
pub use direction::{ParseDirectionError, SlideDirection};
pub use engine::{EngineError, GameEngine, GameOutcome, GameSummary};
pub use grid::{NewTile, SpawnError, TileDistribution};
pub use player::{
    MoveOutcome, MoveSource, PlayerDecision, PlayerError, RandomPlayer, ScriptedPlayer,
};
pub use render::{NoRender, Renderer};
pub use state::{GameSettings, GameState};
