//! The 2048 game board
//!
//! A board is a grid of optional tile values stored row by row. Columns are
//! derived views over the rows; replacing a column writes through to the rows
//! in place.
//!
//! Rectangularity is an invariant of every board produced by this crate, but
//! it is not checked when a board is built from raw rows (e.g. a snapshot).
//! A ragged board surfaces as [`BoardError::ColumnNotAligned`] the first time
//! its columns are extracted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric value of an occupied cell.
pub type Tile = u32;

/// A single board cell: `None` when empty.
pub type Cell = Option<Tile>;

/// Structural errors raised by board operations.
///
/// These indicate a malformed board (usually one loaded from a bad snapshot)
/// and are never recovered from inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Expected row {index} on the game board")]
    RowNotExist { index: usize },
    #[error("Expected all columns on the board to have identical lengths")]
    ColumnNotAligned,
    #[error(
        "Cannot replace column {index} of length {old_length} with a new column of length {new_length}"
    )]
    InvalidColumnReplacement {
        index: usize,
        old_length: usize,
        new_length: usize,
    },
}

/// A 2D grid of optional tiles, rows outer and columns inner.
///
/// Serializes as a bare JSON 2D array, e.g. `[[2, null], [null, 4]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty `size x size` board.
    pub fn empty(size: usize) -> Self {
        Self {
            rows: vec![vec![None; size]; size],
        }
    }

    /// Wrap raw rows without validating their lengths.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Consume the board, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    /// Borrow all rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Borrow a single row.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, column)`, or `None` when out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Overwrite a single cell. Returns `false` when out of range.
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Iterate over the values of occupied cells.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells().flatten()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells().filter(Option::is_none).count()
    }

    /// Extract every column, each read top to bottom.
    ///
    /// Produces one column per cell of the first row. Fails if any row has a
    /// different length from the first.
    pub fn columns(&self) -> Result<Vec<Vec<Cell>>, BoardError> {
        let Some(first) = self.rows.first() else {
            return Ok(Vec::new());
        };
        let width = first.len();
        if self.rows.iter().any(|row| row.len() != width) {
            return Err(BoardError::ColumnNotAligned);
        }

        Ok((0..width)
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect())
    }

    /// Overwrite row `index` with exactly the contents of `new_row`.
    pub fn replace_row(&mut self, index: usize, new_row: &[Cell]) -> Result<(), BoardError> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(BoardError::RowNotExist { index })?;
        *row = new_row.to_vec();
        Ok(())
    }

    /// Overwrite column `index` cell by cell, top to bottom.
    ///
    /// A length mismatch is detected incrementally: rows written before
    /// `new_column` runs short keep their new values, and the error reports
    /// how many rows had been written (`old_length`).
    pub fn replace_column(&mut self, index: usize, new_column: &[Cell]) -> Result<(), BoardError> {
        for (i, row) in self.rows.iter_mut().enumerate() {
            match (row.get_mut(index), new_column.get(i)) {
                (Some(slot), Some(&cell)) => *slot = cell,
                _ => {
                    return Err(BoardError::InvalidColumnReplacement {
                        index,
                        old_length: i,
                        new_length: new_column.len(),
                    })
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Vec<Cell>>> for Board {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::from_rows(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .tiles()
            .map(|tile| tile.to_string().len())
            .max()
            .unwrap_or(1);

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(tile) => write!(f, "{tile:>width$}")?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_rows(vec![
            vec![Some(2), None, Some(4)],
            vec![None, Some(8), None],
            vec![Some(16), None, Some(2)],
        ])
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty(4);
        assert_eq!(board.num_rows(), 4);
        assert!(board.rows().iter().all(|row| row.len() == 4));
        assert_eq!(board.empty_count(), 16);
        assert_eq!(board.tiles().count(), 0);
    }

    #[test]
    fn test_columns_read_top_to_bottom() {
        let columns = sample().columns().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0], vec![Some(2), None, Some(16)]);
        assert_eq!(columns[1], vec![None, Some(8), None]);
        assert_eq!(columns[2], vec![Some(4), None, Some(2)]);
    }

    #[test]
    fn test_columns_of_board_without_rows() {
        assert!(Board::from_rows(Vec::new()).columns().unwrap().is_empty());
    }

    #[test]
    fn test_ragged_board_fails_on_column_extraction() {
        // Construction succeeds; the problem only shows up when columns are read.
        let board = Board::from_rows(vec![vec![Some(2), None], vec![None]]);
        assert_eq!(board.num_rows(), 2);
        assert_eq!(board.columns(), Err(BoardError::ColumnNotAligned));
    }

    #[test]
    fn test_replace_row() {
        let mut board = sample();
        board
            .replace_row(1, &[Some(2), Some(2), Some(2)])
            .unwrap();
        assert_eq!(board.row(1).unwrap(), &[Some(2), Some(2), Some(2)]);
        assert_eq!(board.row(0).unwrap(), &[Some(2), None, Some(4)]);
    }

    #[test]
    fn test_replace_row_out_of_range() {
        let mut board = sample();
        let err = board.replace_row(3, &[None, None, None]).unwrap_err();
        assert_eq!(err, BoardError::RowNotExist { index: 3 });
        assert_eq!(board, sample());
    }

    #[test]
    fn test_replace_row_round_trip() {
        let original = sample();
        let mut board = original.clone();
        let saved = board.row(2).unwrap().to_vec();

        board.replace_row(2, &[None, None, None]).unwrap();
        assert_ne!(board, original);
        board.replace_row(2, &saved).unwrap();
        assert_eq!(board, original);
    }

    #[test]
    fn test_replace_column_writes_through_rows() {
        let mut board = sample();
        board.replace_column(1, &[Some(4), Some(4), Some(4)]).unwrap();
        assert_eq!(board.get(0, 1), Some(Some(4)));
        assert_eq!(board.get(1, 1), Some(Some(4)));
        assert_eq!(board.get(2, 1), Some(Some(4)));
        assert_eq!(board.get(0, 0), Some(Some(2)));
    }

    #[test]
    fn test_replace_column_round_trip() {
        let original = sample();
        let mut board = original.clone();
        let saved = board.columns().unwrap()[0].clone();

        board.replace_column(0, &[None, None, None]).unwrap();
        assert_ne!(board, original);
        board.replace_column(0, &saved).unwrap();
        assert_eq!(board, original);
    }

    #[test]
    fn test_replace_column_short_is_detected_incrementally() {
        let mut board = sample();
        let err = board.replace_column(0, &[Some(32), Some(64)]).unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidColumnReplacement {
                index: 0,
                old_length: 2,
                new_length: 2,
            }
        );
        // The first two rows were already overwritten.
        assert_eq!(board.get(0, 0), Some(Some(32)));
        assert_eq!(board.get(1, 0), Some(Some(64)));
        assert_eq!(board.get(2, 0), Some(Some(16)));
    }

    #[test]
    fn test_replace_column_out_of_range_index() {
        let mut board = sample();
        let err = board.replace_column(5, &[None, None, None]).unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidColumnReplacement {
                index: 5,
                old_length: 0,
                new_length: 3,
            }
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::empty(2);
        assert!(board.set(1, 0, Some(8)));
        assert!(!board.set(2, 0, Some(8)));
        assert_eq!(board.get(1, 0), Some(Some(8)));
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(0, 9), None);
    }

    #[test]
    fn test_json_shape() {
        let board = Board::from_rows(vec![vec![Some(2), None], vec![None, Some(2048)]]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[2,null],[null,2048]]");

        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(vec![vec![Some(2), None], vec![None, Some(16)]]);
        assert_eq!(board.to_string(), " 2  .\n . 16");
    }
}
