//! Grid transform engine
//!
//! Pure functions over boards and lines of cells: the move-and-merge pass,
//! directional board passes, scoring, win/terminal detection, and random
//! tile spawning.
//!
//! Randomness always comes from a caller-provided RNG so that a seeded game
//! is fully reproducible.

use crate::board::{Board, BoardError, Cell, Tile};
use crate::direction::SlideDirection;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The size of each row/column of a new board.
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// The number of tiles populated on a new board.
pub const DEFAULT_NUMBER_OF_INITIAL_TILES: usize = 2;

/// The tile that wins the game.
pub const WINNING_TILE: Tile = 2048;

/// Tiles that can be spawned, with their relative weights.
pub const DEFAULT_NEW_TILES: [NewTile; 2] = [
    NewTile {
        value: 2,
        weight: 0.9,
    },
    NewTile {
        value: 4,
        weight: 0.1,
    },
];

/// A tile value that may be spawned, and its relative weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewTile {
    pub value: Tile,
    pub weight: f64,
}

/// Errors building a [`TileDistribution`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("At least one new tile must be configured")]
    NoTiles,
    #[error("Invalid weight {weight} for new tile {value}")]
    InvalidWeight { value: Tile, weight: f64 },
    #[error("New tile weights must not all be zero")]
    ZeroWeights,
}

/// A validated weighted distribution over spawnable tile values.
#[derive(Debug, Clone)]
pub struct TileDistribution {
    tiles: Vec<NewTile>,
    index: WeightedIndex<f64>,
}

impl TileDistribution {
    pub fn new(tiles: &[NewTile]) -> Result<Self, SpawnError> {
        if tiles.is_empty() {
            return Err(SpawnError::NoTiles);
        }
        if let Some(bad) = tiles
            .iter()
            .find(|tile| !tile.weight.is_finite() || tile.weight < 0.0)
        {
            return Err(SpawnError::InvalidWeight {
                value: bad.value,
                weight: bad.weight,
            });
        }

        let index = WeightedIndex::new(tiles.iter().map(|tile| tile.weight))
            .map_err(|_| SpawnError::ZeroWeights)?;

        Ok(Self {
            tiles: tiles.to_vec(),
            index,
        })
    }

    /// The configured tiles.
    pub fn tiles(&self) -> &[NewTile] {
        &self.tiles
    }

    /// Draw a tile value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        self.tiles[self.index.sample(rng)].value
    }
}

impl Default for TileDistribution {
    fn default() -> Self {
        Self::new(&DEFAULT_NEW_TILES).expect("default new tiles should be a valid distribution")
    }
}

/// Which end of a line tiles are slid towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toward {
    Start,
    End,
}

/// Slide every tile in `cells` towards the end, merging equal neighbours.
///
/// Two-pointer, single pass, O(n). `right` marks the slot currently
/// receiving tiles and `left` scans towards the start. A slot that has
/// absorbed a merge is settled, so no tile merges twice in one pass.
///
/// ```
/// use engine_core::grid::move_and_merge;
///
/// assert_eq!(move_and_merge(&[None, Some(4), Some(4)]), vec![None, None, Some(8)]);
/// assert_eq!(
///     move_and_merge(&[Some(2), None, Some(2), Some(2)]),
///     vec![None, None, Some(2), Some(4)],
/// );
/// ```
pub fn move_and_merge(cells: &[Cell]) -> Vec<Cell> {
    let mut results = cells.to_vec();
    if results.is_empty() {
        return results;
    }

    let mut right = results.len() - 1;
    let mut left = right;

    loop {
        let advance_left = if left == right || results[left].is_none() {
            true
        } else if results[right].is_none() {
            // right stays put so it can still take a merge from further left
            results[right] = results[left].take();
            true
        } else if results[left] == results[right] {
            let absorbed = results[left].take();
            results[right] = results[right]
                .zip(absorbed)
                .map(|(a, b)| a.saturating_add(b));
            right -= 1;
            true
        } else {
            right -= 1;
            false
        };

        if advance_left {
            if left == 0 {
                break;
            }
            left -= 1;
        }
    }

    results
}

/// [`move_and_merge`] towards either end of the line.
pub fn move_and_merge_toward(cells: &[Cell], toward: Toward) -> Vec<Cell> {
    match toward {
        Toward::End => move_and_merge(cells),
        Toward::Start => {
            let reversed: Vec<Cell> = cells.iter().rev().copied().collect();
            let mut merged = move_and_merge(&reversed);
            merged.reverse();
            merged
        }
    }
}

fn pass_rows(board: &mut Board, toward: Toward) -> Result<bool, BoardError> {
    let mut modified = false;

    for index in 0..board.num_rows() {
        let changed = board.row(index).and_then(|row| {
            let new_row = move_and_merge_toward(row, toward);
            (new_row != row).then_some(new_row)
        });
        if let Some(new_row) = changed {
            modified = true;
            board.replace_row(index, &new_row)?;
        }
    }

    Ok(modified)
}

fn pass_columns(board: &mut Board, toward: Toward) -> Result<bool, BoardError> {
    let mut modified = false;

    for (index, column) in board.columns()?.into_iter().enumerate() {
        let new_column = move_and_merge_toward(&column, toward);
        if new_column != column {
            modified = true;
            board.replace_column(index, &new_column)?;
        }
    }

    Ok(modified)
}

/// Move and merge every row or column of `board` in `direction`.
///
/// Returns whether any row/column changed. No tile is spawned.
pub fn move_and_merge_board(
    board: &mut Board,
    direction: SlideDirection,
) -> Result<bool, BoardError> {
    match direction {
        SlideDirection::Up => pass_columns(board, Toward::Start),
        SlideDirection::Left => pass_rows(board, Toward::Start),
        SlideDirection::Down => pass_columns(board, Toward::End),
        SlideDirection::Right => pass_rows(board, Toward::End),
    }
}

pub fn move_and_merge_up(board: &mut Board) -> Result<bool, BoardError> {
    move_and_merge_board(board, SlideDirection::Up)
}

pub fn move_and_merge_left(board: &mut Board) -> Result<bool, BoardError> {
    move_and_merge_board(board, SlideDirection::Left)
}

pub fn move_and_merge_down(board: &mut Board) -> Result<bool, BoardError> {
    move_and_merge_board(board, SlideDirection::Down)
}

pub fn move_and_merge_right(board: &mut Board) -> Result<bool, BoardError> {
    move_and_merge_board(board, SlideDirection::Right)
}

/// Spawn a tile from `tiles` on a uniformly random empty cell.
///
/// Cells are picked by rejection sampling (random row, then random column
/// within that row) until an empty one comes up. Returns the coordinates of
/// the new tile, or `None` when the board has no empty cell.
pub fn spawn_tile<R: Rng + ?Sized>(
    board: &mut Board,
    tiles: &TileDistribution,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if board.empty_count() == 0 {
        return None;
    }

    loop {
        let row = rng.gen_range(0..board.num_rows());
        let width = board.row(row).map_or(0, <[Cell]>::len);
        if width == 0 {
            continue;
        }
        let column = rng.gen_range(0..width);

        if board.get(row, column) == Some(None) {
            let value = tiles.sample(rng);
            board.set(row, column, Some(value));
            trace!(row, column, value, "Spawned tile");
            return Some((row, column));
        }
    }
}

/// Sum of every tile on the board.
pub fn score(board: &Board) -> u64 {
    board.tiles().map(u64::from).sum()
}

/// Whether any tile equals exactly [`WINNING_TILE`].
pub fn has_2048(board: &Board) -> bool {
    board.tiles().any(|tile| tile == WINNING_TILE)
}

fn is_movable(a: Cell, b: Cell) -> bool {
    a.is_none() != b.is_none()
}

fn is_mergeable(a: Cell, b: Cell) -> bool {
    a.is_some() && a == b
}

/// Whether no adjacent pair in any row or column can move or merge.
///
/// A board without adjacent pairs (empty, or a single cell) is out of moves.
pub fn is_out_of_moves(board: &Board) -> Result<bool, BoardError> {
    let columns = board.columns()?;

    let any_move = board
        .rows()
        .iter()
        .chain(columns.iter())
        .flat_map(|line| line.windows(2))
        .any(|pair| is_movable(pair[0], pair[1]) || is_mergeable(pair[0], pair[1]));

    Ok(!any_move)
}

/// Create a `size x size` board with initial tiles.
///
/// With `num_initial_tiles == None` the count is random, between
/// `min(2, size²/2)` and `max(2, size²/2)` inclusive.
pub fn create_board<R: Rng + ?Sized>(
    size: usize,
    tiles: &TileDistribution,
    num_initial_tiles: Option<usize>,
    rng: &mut R,
) -> Board {
    let mut board = Board::empty(size);

    let count = match num_initial_tiles {
        Some(count) => count,
        None => {
            let max_initial = size * size / 2;
            rng.gen_range(max_initial.min(2)..=max_initial.max(2))
        }
    };

    for _ in 0..count {
        spawn_tile(&mut board, tiles, rng);
    }

    board
}
