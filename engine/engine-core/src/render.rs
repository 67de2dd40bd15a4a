//! Observer hooks for the turn loop
//!
//! A [`Renderer`] is told about every phase of a game. All hooks default to
//! no-ops so an implementation only overrides what it displays.

use crate::board::Board;
use crate::player::PlayerDecision;

/// Receives lifecycle notifications from [`GameEngine::run`](crate::engine::GameEngine::run).
///
/// Hooks are called in this order: `on_init` once, then per turn
/// `on_start`, `before_next_move`, `after_next_move`, and finally one of
/// `on_win` or `on_lose` when the game ends. A player quitting ends the game
/// without either terminal hook.
pub trait Renderer {
    /// Called once before the first turn.
    fn on_init(&mut self) {}

    /// Called at the start of every turn with a copy of the current board.
    fn on_start(&mut self, _board: &Board) {}

    /// Called right before the move source is asked for a decision.
    fn before_next_move(&mut self) {}

    /// Called with the decision the move source made.
    fn after_next_move(&mut self, _decision: &PlayerDecision) {}

    /// Called when the board reaches the winning tile.
    fn on_win(&mut self) {}

    /// Called when no move can change the board anymore.
    fn on_lose(&mut self) {}
}

/// Renderer that displays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl Renderer for NoRender {}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn on_init(&mut self) {
        (**self).on_init()
    }

    fn on_start(&mut self, board: &Board) {
        (**self).on_start(board)
    }

    fn before_next_move(&mut self) {
        (**self).before_next_move()
    }

    fn after_next_move(&mut self, decision: &PlayerDecision) {
        (**self).after_next_move(decision)
    }

    fn on_win(&mut self) {
        (**self).on_win()
    }

    fn on_lose(&mut self) {
        (**self).on_lose()
    }
}
