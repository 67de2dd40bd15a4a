//! Slide directions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A direction towards which every tile on the board is slid.
///
/// Each direction has a canonical keystroke (`w`, `a`, `s`, `d`) used for
/// console input and for the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    Up,
    Left,
    Down,
    Right,
}

impl SlideDirection {
    /// All directions, in keystroke order.
    pub const ALL: [SlideDirection; 4] = [
        SlideDirection::Up,
        SlideDirection::Left,
        SlideDirection::Down,
        SlideDirection::Right,
    ];

    /// Keystroke bound to this direction.
    pub const fn key(self) -> char {
        match self {
            SlideDirection::Up => 'w',
            SlideDirection::Left => 'a',
            SlideDirection::Down => 's',
            SlideDirection::Right => 'd',
        }
    }

    /// Direction bound to a keystroke (case-insensitive).
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(SlideDirection::Up),
            'a' => Some(SlideDirection::Left),
            's' => Some(SlideDirection::Down),
            'd' => Some(SlideDirection::Right),
            _ => None,
        }
    }

    /// Upper-case name, e.g. `"UP"`.
    pub const fn name(self) -> &'static str {
        match self {
            SlideDirection::Up => "UP",
            SlideDirection::Left => "LEFT",
            SlideDirection::Down => "DOWN",
            SlideDirection::Right => "RIGHT",
        }
    }
}

impl fmt::Display for SlideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized slide direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for SlideDirection {
    type Err = ParseDirectionError;

    /// Accepts a keystroke (`w`) or a name (`up`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if let Some(direction) = Self::from_key(key) {
                return Ok(direction);
            }
        }

        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for direction in SlideDirection::ALL {
            assert_eq!(SlideDirection::from_key(direction.key()), Some(direction));
        }
        assert_eq!(SlideDirection::from_key('W'), Some(SlideDirection::Up));
        assert_eq!(SlideDirection::from_key('x'), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("d".parse(), Ok(SlideDirection::Right));
        assert_eq!(" Left ".parse(), Ok(SlideDirection::Left));
        assert_eq!("DOWN".parse(), Ok(SlideDirection::Down));
        assert!("sideways".parse::<SlideDirection>().is_err());
        assert!("".parse::<SlideDirection>().is_err());
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(SlideDirection::Up.to_string(), "UP");
    }
}
