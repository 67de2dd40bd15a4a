//! Game state: the live board plus everything needed to advance it

use crate::board::{Board, BoardError};
use crate::direction::SlideDirection;
use crate::grid::{
    self, NewTile, SpawnError, TileDistribution, DEFAULT_BOARD_SIZE,
    DEFAULT_NEW_TILES, DEFAULT_NUMBER_OF_INITIAL_TILES,
};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings for creating a fresh game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Size of each row/column.
    pub board_size: usize,
    /// Tiles populated on the new board; random when `None`.
    pub num_initial_tiles: Option<usize>,
    /// Spawnable tiles and their weights.
    pub new_tiles: Vec<NewTile>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            num_initial_tiles: Some(DEFAULT_NUMBER_OF_INITIAL_TILES),
            new_tiles: DEFAULT_NEW_TILES.to_vec(),
        }
    }
}

/// The mutable state of one game of 2048.
///
/// Owns the live board exclusively. Callers only ever receive copies of it,
/// so nothing outside can mutate the board between turns.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    tiles: TileDistribution,
    rng: ChaCha20Rng,
}

impl GameState {
    /// Start a new game on a freshly created board.
    pub fn new(settings: &GameSettings, mut rng: ChaCha20Rng) -> Result<Self, SpawnError> {
        let tiles = TileDistribution::new(&settings.new_tiles)?;
        let board = grid::create_board(
            settings.board_size,
            &tiles,
            settings.num_initial_tiles,
            &mut rng,
        );
        debug!(
            board_size = settings.board_size,
            tiles = board.tiles().count(),
            "Created new board"
        );

        Ok(Self { board, tiles, rng })
    }

    /// Resume a game from an existing board (e.g. a snapshot).
    pub fn from_board(board: Board, tiles: TileDistribution, rng: ChaCha20Rng) -> Self {
        Self { board, tiles, rng }
    }

    /// A copy of the current board.
    pub fn board(&self) -> Board {
        self.board.clone()
    }

    /// Current score: the sum of every tile.
    pub fn score(&self) -> u64 {
        grid::score(&self.board)
    }

    /// Whether the 2048 tile has been reached.
    pub fn has_won(&self) -> bool {
        grid::has_2048(&self.board)
    }

    /// Whether no slide in any direction can change the board.
    pub fn is_out_of_moves(&self) -> Result<bool, BoardError> {
        grid::is_out_of_moves(&self.board)
    }

    /// Slide every tile towards `direction`, then spawn one new tile if
    /// anything moved or merged.
    ///
    /// Returns whether the move was effective. An ineffective slide leaves
    /// the board untouched and spawns nothing.
    pub fn slide(&mut self, direction: SlideDirection) -> Result<bool, BoardError> {
        if !grid::move_and_merge_board(&mut self.board, direction)? {
            debug!(%direction, "Slide had no effect");
            return Ok(false);
        }

        let spawned = grid::spawn_tile(&mut self.board, &self.tiles, &mut self.rng);
        debug!(%direction, ?spawned, score = self.score(), "Slide applied");
        Ok(true)
    }

    pub fn slide_up(&mut self) -> Result<bool, BoardError> {
        self.slide(SlideDirection::Up)
    }

    pub fn slide_left(&mut self) -> Result<bool, BoardError> {
        self.slide(SlideDirection::Left)
    }

    pub fn slide_down(&mut self) -> Result<bool, BoardError> {
        self.slide(SlideDirection::Down)
    }

    pub fn slide_right(&mut self) -> Result<bool, BoardError> {
        self.slide(SlideDirection::Right)
    }
}
