//! One-ply greedy assistant
//!
//! Simulates every direction on a copy of the board and picks the slide that
//! builds the largest tiles. It can play on its own or answer hint requests
//! from an interactive player.

use crate::board::{Board, BoardError, Tile};
use crate::direction::SlideDirection;
use crate::grid;
use crate::player::{MoveOutcome, MoveSource, PlayerDecision, PlayerError};
use tracing::debug;

/// The simulated result of sliding in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvaluation {
    pub direction: SlideDirection,
    /// Whether the slide changes the board at all.
    pub effective: bool,
    /// Number of merges the slide performs.
    pub merges: usize,
    /// Empty cells after the slide (before any spawn).
    pub empty_after: usize,
    /// Increase of the sum of squared tile values; favours large merges.
    pub gain: u64,
    /// Largest tile after the slide.
    pub largest_tile: Tile,
}

fn square_sum(board: &Board) -> u64 {
    board.tiles().map(|tile| u64::from(tile).pow(2)).sum()
}

/// Simulate `direction` on a copy of `board`.
pub fn evaluate(board: &Board, direction: SlideDirection) -> Result<MoveEvaluation, BoardError> {
    let mut after = board.clone();
    let effective = grid::move_and_merge_board(&mut after, direction)?;

    Ok(MoveEvaluation {
        direction,
        effective,
        merges: board.tiles().count() - after.tiles().count(),
        empty_after: after.empty_count(),
        gain: square_sum(&after).saturating_sub(square_sum(board)),
        largest_tile: after.tiles().max().unwrap_or(0),
    })
}

/// Picks the effective direction with the largest gain.
///
/// Ties go to the slide leaving more empty cells, then to the earlier
/// direction in `Up, Left, Down, Right` order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssistant;

impl GreedyAssistant {
    pub fn new() -> Self {
        Self
    }

    /// Best effective slide for `board`, if any.
    pub fn best_move(&self, board: &Board) -> Result<Option<MoveEvaluation>, BoardError> {
        let mut best: Option<MoveEvaluation> = None;

        for direction in SlideDirection::ALL {
            let candidate = evaluate(board, direction)?;
            if !candidate.effective {
                continue;
            }
            let better = match &best {
                None => true,
                Some(current) => {
                    (candidate.gain, candidate.empty_after) > (current.gain, current.empty_after)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        Ok(best)
    }
}

fn explain(evaluation: &MoveEvaluation) -> String {
    match evaluation.merges {
        0 => format!(
            "No merge is available; sliding {} keeps {} cells free",
            evaluation.direction.name().to_lowercase(),
            evaluation.empty_after
        ),
        1 => format!(
            "Merges 1 pair, leaves {} cells free, largest tile {}",
            evaluation.empty_after, evaluation.largest_tile
        ),
        n => format!(
            "Merges {} pairs, leaves {} cells free, largest tile {}",
            n, evaluation.empty_after, evaluation.largest_tile
        ),
    }
}

impl MoveSource for GreedyAssistant {
    fn next_move(&mut self, board: &Board) -> Result<MoveOutcome, PlayerError> {
        let best = self.best_move(board)?.ok_or(PlayerError::NoMoveAvailable)?;
        debug!(
            direction = %best.direction,
            merges = best.merges,
            gain = best.gain,
            "Assistant picked a move"
        );

        Ok(MoveOutcome::Decision(PlayerDecision::new(
            best.direction,
            explain(&best),
        )))
    }
}
