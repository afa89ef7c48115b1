//! Move directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Tiles slide towards row 0.
    Up,
    /// Tiles slide towards the last row.
    Down,
    /// Tiles slide towards column 0.
    Left,
    /// Tiles slide towards the last column.
    Right,
}

impl Direction {
    /// All directions, in the order game-over detection tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether this direction operates on rows (as opposed to columns).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Whether lines are read back to front before compaction.
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Input that does not name a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a direction: {:?}", self.input)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts plain names, browser-style arrow key names, and WASD / vi keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" | "k" => Ok(Direction::Up),
            "down" | "arrowdown" | "s" | "j" => Ok(Direction::Down),
            "left" | "arrowleft" | "a" | "h" => Ok(Direction::Left),
            "right" | "arrowright" | "d" | "l" => Ok(Direction::Right),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("ArrowLeft".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("D".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("j".parse::<Direction>(), Ok(Direction::Down));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "diagonal".parse::<Direction>().unwrap_err();
        assert_eq!(err.input, "diagonal");
        assert!(format!("{err}").contains("diagonal"));
    }

    #[test]
    fn test_display_round_trips() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_orientation() {
        assert!(Direction::Left.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(Direction::Down.is_reversed());
        assert!(!Direction::Left.is_reversed());
    }
}
