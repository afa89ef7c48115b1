//! Error types for board construction and game configuration.

use std::fmt;

/// Reasons a raw matrix cannot be turned into a [`Board`](crate::grid::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The matrix has no rows.
    ZeroSize,
    /// A row's length does not match the number of rows.
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Expected length (the number of rows).
        size: usize,
    },
    /// A cell holds something other than 0 or a power of two >= 2.
    InvalidValue {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The rejected value.
        value: u32,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ZeroSize => write!(f, "board has no rows"),
            BoardError::NotSquare { row, len, size } => {
                write!(f, "row {row} has {len} cells, expected {size}")
            }
            BoardError::InvalidValue { row, col, value } => {
                write!(f, "cell ({row}, {col}) holds {value}, expected 0 or a power of two")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Reasons a [`GameConfig`](crate::game::GameConfig) is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Boards smaller than 2x2 cannot hold a playable game.
    SizeTooSmall(usize),
    /// The cell count of the board does not fit in `usize`.
    SizeTooLarge(usize),
    /// More starting tiles than the board has cells.
    TooManyStartTiles {
        /// Requested number of starting tiles.
        requested: usize,
        /// Number of cells on the board.
        cells: usize,
    },
    /// Probability of spawning a 4 is not within `[0, 1]`.
    InvalidProbability(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SizeTooSmall(size) => {
                write!(f, "board size {size} is too small (minimum 2)")
            }
            ConfigError::SizeTooLarge(size) => {
                write!(f, "board size {size} is too large")
            }
            ConfigError::TooManyStartTiles { requested, cells } => {
                write!(f, "{requested} starting tiles do not fit on {cells} cells")
            }
            ConfigError::InvalidProbability(p) => {
                write!(f, "spawn probability {p} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
