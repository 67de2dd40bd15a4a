//! Turn loop driving a game from its first board to a terminal state

use crate::board::BoardError;
use crate::player::{MoveOutcome, MoveSource, PlayerError};
use crate::render::Renderer;
use crate::state::GameState;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// The winning tile was reached.
    Won,
    /// The board filled up with no possible merge.
    Lost,
    /// The move source asked to stop.
    Quit,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub outcome: GameOutcome,
    /// Decisions applied to the board, effective or not.
    pub turns: u64,
    /// Score of the final board.
    pub score: u64,
    /// Decisions that left the board unchanged.
    pub ineffective_moves: u64,
}

/// Errors that abort the turn loop.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Game reached an invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("Move source failed: {0}")]
    Player(#[from] PlayerError),
}

/// Runs games on a [`GameState`].
///
/// The engine owns the state; move sources and renderers only ever see
/// copies of the board.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// The state being played.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Play until the game is won, lost, or the move source quits.
    ///
    /// The win check runs before the loss check, so a full board that holds
    /// the winning tile counts as a win. An ineffective decision is not an
    /// error; the board stays as it was and the next turn starts.
    pub fn run(
        &mut self,
        player: &mut dyn MoveSource,
        renderer: &mut dyn Renderer,
    ) -> Result<GameSummary, EngineError> {
        let mut turns = 0u64;
        let mut ineffective_moves = 0u64;

        renderer.on_init();
        info!(score = self.state.score(), "Game started");

        let outcome = loop {
            renderer.on_start(&self.state.board());

            if self.state.has_won() {
                renderer.on_win();
                break GameOutcome::Won;
            }
            if self.state.is_out_of_moves()? {
                renderer.on_lose();
                break GameOutcome::Lost;
            }

            renderer.before_next_move();
            let decision = match player.next_move(&self.state.board())? {
                MoveOutcome::Decision(decision) => decision,
                MoveOutcome::Quit => break GameOutcome::Quit,
            };
            renderer.after_next_move(&decision);

            turns += 1;
            if !self.state.slide(decision.direction)? {
                ineffective_moves += 1;
            }
            debug!(
                turn = turns,
                direction = %decision.direction,
                score = self.state.score(),
                "Turn finished"
            );
        };

        let summary = GameSummary {
            outcome,
            turns,
            score: self.state.score(),
            ineffective_moves,
        };
        info!(
            outcome = ?summary.outcome,
            turns = summary.turns,
            score = summary.score,
            ineffective_moves = summary.ineffective_moves,
            "Game finished"
        );
        Ok(summary)
    }
}
