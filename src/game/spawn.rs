//! Random tile placement.

use crate::grid::Board;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default probability that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// A tile placed by the spawn policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    /// Row of the new tile.
    pub row: usize,
    /// Column of the new tile.
    pub col: usize,
    /// Value of the new tile (2 or 4).
    pub value: u32,
}

/// Place a 2 or a 4 on a uniformly chosen empty cell.
///
/// The cell is drawn first, then the value. Returns `None` without touching
/// the RNG when the board is full.
///
/// `four_probability` must lie in `[0, 1]`; [`GameConfig::validate`] checks
/// this before any game starts.
///
/// [`GameConfig::validate`]: crate::game::GameConfig::validate
pub fn spawn_tile<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    four_probability: f64,
) -> Option<Spawn> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(four_probability) { 4 } else { 2 };
    board.set(row, col, value);

    Some(Spawn { row, col, value })
}
