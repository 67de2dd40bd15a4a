//! Move sources: anything that can decide the next slide
//!
//! The turn loop only knows about the [`MoveSource`] trait. Concrete sources
//! (console input, search-based assistants, scripted replays) are chosen at
//! startup and passed in as trait objects.

use crate::board::{Board, BoardError};
use crate::direction::SlideDirection;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A direction chosen by a move source, with an optional explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDecision {
    /// The direction the player decided on.
    pub direction: SlideDirection,
    /// Why the player picked it; empty when no reason is given.
    pub reason: String,
}

impl PlayerDecision {
    pub fn new(direction: SlideDirection, reason: impl Into<String>) -> Self {
        Self {
            direction,
            reason: reason.into(),
        }
    }

    /// A decision without a reason.
    pub fn bare(direction: SlideDirection) -> Self {
        Self::new(direction, String::new())
    }
}

/// What a move source produced for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Slide in the given direction.
    Decision(PlayerDecision),
    /// The player gave up; the turn loop stops without a win or loss.
    Quit,
}

/// Errors raised by move sources. Propagated as-is; the engine never retries.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Failed to read player input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Player input was closed before a move was made")]
    InputClosed,
    #[error("No effective move is available")]
    NoMoveAvailable,
    #[error("Cannot decide on an invalid board: {0}")]
    Board(#[from] BoardError),
}

/// A provider of per-turn decisions.
///
/// Object-safe so it can be used as `Box<dyn MoveSource>`.
pub trait MoveSource {
    /// Decide the next move for `board`.
    fn next_move(&mut self, board: &Board) -> Result<MoveOutcome, PlayerError>;
}

impl<T: MoveSource + ?Sized> MoveSource for Box<T> {
    fn next_move(&mut self, board: &Board) -> Result<MoveOutcome, PlayerError> {
        (**self).next_move(board)
    }
}

/// Picks a direction uniformly at random, ignoring the board.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl MoveSource for RandomPlayer {
    fn next_move(&mut self, _board: &Board) -> Result<MoveOutcome, PlayerError> {
        let direction = *SlideDirection::ALL
            .choose(&mut self.rng)
            .ok_or(PlayerError::NoMoveAvailable)?;
        Ok(MoveOutcome::Decision(PlayerDecision::new(
            direction,
            "Picked at random",
        )))
    }
}

/// Replays a fixed sequence of decisions, then quits.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    decisions: VecDeque<PlayerDecision>,
}

impl ScriptedPlayer {
    pub fn new(decisions: impl IntoIterator<Item = PlayerDecision>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }

    /// Script from bare directions.
    pub fn from_directions(directions: impl IntoIterator<Item = SlideDirection>) -> Self {
        Self::new(directions.into_iter().map(PlayerDecision::bare))
    }

    /// Decisions not yet played.
    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl MoveSource for ScriptedPlayer {
    fn next_move(&mut self, _board: &Board) -> Result<MoveOutcome, PlayerError> {
        Ok(self
            .decisions
            .pop_front()
            .map_or(MoveOutcome::Quit, MoveOutcome::Decision))
    }
}
