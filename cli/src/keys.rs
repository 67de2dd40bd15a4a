//! Single keystroke input for the option prompt

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use engine_core::PlayerError;
use std::io;

/// Something that yields one key press at a time.
pub trait KeySource {
    /// Block until a character key is pressed. `None` means no more keys
    /// will come.
    fn read_key(&mut self) -> Result<Option<char>, PlayerError>;
}

/// Puts the terminal in raw mode until dropped.
struct RawMode;

impl RawMode {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Key presses from the controlling terminal.
///
/// Raw mode is held only while waiting for a key, so line prompts in between
/// read from a cooked terminal. Non-character keys are skipped; Ctrl+C and
/// Ctrl+D end the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<Option<char>, PlayerError> {
        let _raw = RawMode::enter()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c' | 'd'))
            {
                return Ok(None);
            }
            if let KeyCode::Char(c) = key.code {
                return Ok(Some(c));
            }
        }
    }
}
