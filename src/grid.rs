//! Grid layer for slide48.
//!
//! Pure board arithmetic with no randomness and no tile identities:
//! - Line compaction (gap removal and single-pass merging)
//! - Board-wide moves built from one compaction primitive
//! - The four move directions

mod board;
mod direction;
mod line;

pub use board::{Board, MoveResult};
pub use direction::{Direction, ParseDirectionError};
pub use line::{compact_line, LineResult};
