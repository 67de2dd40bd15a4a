//! Interactive player reading commands from a terminal

use crate::keys::{KeySource, TerminalKeys};
use crate::snapshot::{self, DEFAULT_SNAPSHOT_PATH};
use engine_core::{Board, MoveOutcome, MoveSource, PlayerDecision, PlayerError, SlideDirection};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A human pressing one key per command.
///
/// `w`/`a`/`s`/`d` slide, `h` asks the assistant for a hint, `p` saves a
/// snapshot and `q` gives up after confirmation. Anything else is reported
/// and prompted again. The snapshot path and the quit confirmation are read
/// as whole lines.
pub struct HumanPlayer<K, R, W> {
    keys: K,
    input: R,
    output: W,
    assistant: Option<Box<dyn MoveSource>>,
    log_dir: Option<PathBuf>,
}

impl HumanPlayer<TerminalKeys, io::StdinLock<'static>, io::Stdout> {
    /// A player on the terminal, stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(TerminalKeys, io::stdin().lock(), io::stdout())
    }
}

impl<K: KeySource, R: BufRead, W: Write> HumanPlayer<K, R, W> {
    pub fn new(keys: K, input: R, output: W) -> Self {
        Self {
            keys,
            input,
            output,
            assistant: None,
            log_dir: None,
        }
    }

    /// Source of hints for the `h` command.
    pub fn with_assistant(mut self, assistant: Box<dyn MoveSource>) -> Self {
        self.assistant = Some(assistant);
        self
    }

    /// Directory mentioned when saving a snapshot fails.
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line, without its line ending. End of input is an error.
    fn read_line(&mut self) -> Result<String, PlayerError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlayerError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt(&mut self, text: &str) -> Result<String, PlayerError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Wait for one key press and echo it.
    fn prompt_key(&mut self, text: &str) -> Result<char, PlayerError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let key = self.keys.read_key()?.ok_or(PlayerError::InputClosed)?;
        writeln!(self.output, "{key}")?;
        Ok(key)
    }

    fn hint(&mut self, board: &Board) -> Result<(), PlayerError> {
        let Some(assistant) = self.assistant.as_mut() else {
            writeln!(self.output, "No assistant is configured.")?;
            return Ok(());
        };

        match assistant.next_move(board) {
            Ok(MoveOutcome::Decision(suggestion)) => {
                writeln!(
                    self.output,
                    "The assistant suggested: {}",
                    suggestion.direction
                )?;
                writeln!(self.output, "Reason provided: {}", suggestion.reason)?;
            }
            Ok(MoveOutcome::Quit) => {
                writeln!(self.output, "The assistant has no suggestion.")?;
            }
            Err(e) => {
                warn!(error = %e, "Assistant failed to suggest a move");
                writeln!(self.output, "The assistant could not suggest a move: {e}")?;
            }
        }
        Ok(())
    }

    fn save(&mut self, board: &Board) -> Result<(), PlayerError> {
        let answer = self.prompt("Provide a file path to save the snapshot: ")?;
        let answer = answer.trim();
        let path = Path::new(if answer.is_empty() {
            DEFAULT_SNAPSHOT_PATH
        } else {
            answer
        });

        if snapshot::try_write_snapshot(board, path) {
            writeln!(self.output, "Wrote the game snapshot: {}", path.display())?;
        } else {
            writeln!(
                self.output,
                "Failed to write the game snapshot: {}",
                path.display()
            )?;
            if let Some(dir) = &self.log_dir {
                writeln!(self.output, "Refer to the application logs: {}", dir.display())?;
            }
        }
        Ok(())
    }

    /// Ask for confirmation; `true` means the player gives up.
    fn confirm_quit(&mut self) -> Result<bool, PlayerError> {
        let answer = self.prompt("Are you sure you want to give up (Y/N)? ")?;
        writeln!(self.output)?;

        if answer.trim().eq_ignore_ascii_case("y") {
            writeln!(self.output, "See you next time!")?;
            Ok(true)
        } else {
            writeln!(self.output, "Let's continue the game!")?;
            Ok(false)
        }
    }
}

impl<K: KeySource, R: BufRead, W: Write> MoveSource for HumanPlayer<K, R, W> {
    fn next_move(&mut self, board: &Board) -> Result<MoveOutcome, PlayerError> {
        loop {
            let key = self.prompt_key("Select an option: ")?.to_ascii_lowercase();
            writeln!(self.output)?;
            debug!(%key, "Player input");

            if let Some(direction) = SlideDirection::from_key(key) {
                return Ok(MoveOutcome::Decision(PlayerDecision::bare(direction)));
            }

            match key {
                'h' => self.hint(board)?,
                'p' => self.save(board)?,
                'q' => {
                    if self.confirm_quit()? {
                        info!("Player gave up");
                        return Ok(MoveOutcome::Quit);
                    }
                }
                _ => writeln!(self.output, "Unrecognized option: {}", key.escape_debug())?,
            }
            writeln!(self.output)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::GreedyAssistant;
    use std::io::Cursor;

    /// Replays the characters of a string as key presses.
    struct Keys(std::vec::IntoIter<char>);

    impl KeySource for Keys {
        fn read_key(&mut self) -> Result<Option<char>, PlayerError> {
            Ok(self.0.next())
        }
    }

    type TestPlayer = HumanPlayer<Keys, Cursor<Vec<u8>>, Vec<u8>>;

    fn player(keys: &str, lines: &str) -> TestPlayer {
        HumanPlayer::new(
            Keys(keys.chars().collect::<Vec<_>>().into_iter()),
            Cursor::new(lines.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn board() -> Board {
        Board::from_rows(vec![vec![Some(2), Some(2)], vec![None, None]])
    }

    fn output(player: TestPlayer) -> String {
        String::from_utf8(player.into_output()).unwrap()
    }

    fn decision(direction: SlideDirection) -> MoveOutcome {
        MoveOutcome::Decision(PlayerDecision::bare(direction))
    }

    #[test]
    fn test_direction_keys() {
        let mut p = player("wAsD", "");
        for expected in SlideDirection::ALL {
            assert_eq!(p.next_move(&board()).unwrap(), decision(expected));
        }
        assert_eq!(output(p).matches("Select an option: ").count(), 4);
    }

    #[test]
    fn test_each_key_is_one_command() {
        // Two keys typed back to back are two moves, with no Enter needed.
        let mut p = player("ws", "");
        assert_eq!(p.next_move(&board()).unwrap(), decision(SlideDirection::Up));
        assert_eq!(p.next_move(&board()).unwrap(), decision(SlideDirection::Down));
        assert!(!output(p).contains("Unrecognized option"));
    }

    #[test]
    fn test_key_is_echoed() {
        let mut p = player("a", "");
        p.next_move(&board()).unwrap();
        assert!(output(p).starts_with("Select an option: a\n"));
    }

    #[test]
    fn test_unrecognized_option_reprompts() {
        let mut p = player("x d", "");
        assert_eq!(p.next_move(&board()).unwrap(), decision(SlideDirection::Right));
        let text = output(p);
        assert!(text.contains("Unrecognized option: x"));
        assert!(text.contains("Unrecognized option:  "));
        assert_eq!(text.matches("Select an option: ").count(), 3);
    }

    #[test]
    fn test_end_of_input() {
        let mut p = player("", "");
        assert!(matches!(
            p.next_move(&board()).unwrap_err(),
            PlayerError::InputClosed
        ));
    }

    #[test]
    fn test_quit_confirmed() {
        let mut p = player("q", "y\n");
        assert_eq!(p.next_move(&board()).unwrap(), MoveOutcome::Quit);
        assert!(output(p).contains("See you next time!"));
    }

    #[test]
    fn test_quit_declined() {
        let mut p = player("qa", "n\n");
        assert_eq!(p.next_move(&board()).unwrap(), decision(SlideDirection::Left));
        assert!(output(p).contains("Let's continue the game!"));
    }

    #[test]
    fn test_quit_without_confirmation_line() {
        let mut p = player("q", "");
        assert!(matches!(
            p.next_move(&board()).unwrap_err(),
            PlayerError::InputClosed
        ));
    }

    #[test]
    fn test_hint_without_assistant() {
        let mut p = player("hw", "");
        p.next_move(&board()).unwrap();
        assert!(output(p).contains("No assistant is configured."));
    }

    #[test]
    fn test_hint_from_assistant() {
        let mut p = player("hw", "").with_assistant(Box::new(GreedyAssistant::new()));
        p.next_move(&board()).unwrap();
        let text = output(p);
        assert!(text.contains("The assistant suggested: LEFT"));
        assert!(text.contains("Reason provided: Merges 1 pair"));
    }

    #[test]
    fn test_hint_failure_is_reported() {
        let stuck = Board::from_rows(vec![vec![Some(2), Some(4)], vec![Some(4), Some(2)]]);
        let mut p = player("hw", "").with_assistant(Box::new(GreedyAssistant::new()));
        p.next_move(&stuck).unwrap();
        assert!(output(p).contains("could not suggest a move"));
    }

    #[test]
    fn test_save_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let mut p = player("pd", &format!("{}\n", path.display()));

        p.next_move(&board()).unwrap();

        assert_eq!(snapshot::read_snapshot(&path).unwrap(), board());
        assert!(output(p).contains("Wrote the game snapshot"));
    }

    #[test]
    fn test_save_failure_points_to_logs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("saved.json");
        let mut p = player("pd", &format!("{}\n", path.display())).with_log_dir("/tmp/logs");

        p.next_move(&board()).unwrap();

        let text = output(p);
        assert!(text.contains("Failed to write the game snapshot"));
        assert!(text.contains("Refer to the application logs: /tmp/logs"));
    }
}
