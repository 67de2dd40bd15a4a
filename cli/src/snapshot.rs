//! Game snapshots: a board saved as a JSON array of rows
//!
//! ```text
//! [[2, null, null, null], [null, 4, null, null], ...]
//! ```

use engine_core::Board;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Path used when the player does not name one.
pub const DEFAULT_SNAPSHOT_PATH: &str = "./snapshot.json";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read the game snapshot {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse the game snapshot {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a board from a snapshot file.
///
/// Only the JSON shape is checked; a ragged board loads fine and is
/// rejected later by the engine.
pub fn read_snapshot(path: &Path) -> Result<Board, SnapshotError> {
    let file = File::open(path).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Failed to read the game snapshot");
        SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            warn!(path = %path.display(), error = %source, "Failed to read the game snapshot");
            SnapshotError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            warn!(path = %path.display(), error = %source, "Failed to parse the game snapshot");
            SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn write_snapshot(board: &Board, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, board)?;
    writer.flush()
}

/// Write `board` to `path`, logging a warning instead of failing.
///
/// Returns whether the snapshot was written.
pub fn try_write_snapshot(board: &Board, path: &Path) -> bool {
    match write_snapshot(board, path) {
        Ok(()) => {
            info!(path = %path.display(), "Wrote the game snapshot");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to write the game snapshot");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_rows(vec![
            vec![Some(2), None, None],
            vec![None, Some(4), None],
            vec![None, None, Some(2048)],
        ])
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        assert!(try_write_snapshot(&sample(), &path));
        assert_eq!(read_snapshot(&path).unwrap(), sample());
    }

    #[test]
    fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        assert!(try_write_snapshot(&sample(), &path));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[[2,null,null],[null,4,null],[null,null,2048]]");
    }

    #[test]
    fn test_ragged_snapshot_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.json");
        std::fs::write(&path, "[[2, null], [4]]").unwrap();

        let board = read_snapshot(&path).unwrap();
        assert_eq!(board.num_rows(), 2);
        assert!(board.columns().is_err());
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = read_snapshot(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        for content in ["not json", "{\"rows\": 1}", "[[\"two\"]]", "[[-2]]"] {
            let path = dir.path().join("bad.json");
            std::fs::write(&path, content).unwrap();
            let err = read_snapshot(&path).unwrap_err();
            assert!(matches!(err, SnapshotError::Parse { .. }), "{content}");
        }
    }

    #[test]
    fn test_write_failure_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("snapshot.json");
        assert!(!try_write_snapshot(&sample(), &path));
    }
}
