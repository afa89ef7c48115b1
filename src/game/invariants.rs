//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger. A violation means the transition or the
//! reconciler broke the board/tile correspondence.

use crate::game::GameState;
use std::collections::HashSet;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = state.board();
    let tiles = state.tiles();

    // Cell values
    for (row, col, value) in board.occupied() {
        if value < 2 || !value.is_power_of_two() {
            violations.push(InvariantViolation {
                message: format!("Cell ({row}, {col}) holds {value}, not a power of two"),
            });
        }
    }

    // Bijection between tiles and occupied cells
    if tiles.len() != board.occupied_count() {
        violations.push(InvariantViolation {
            message: format!(
                "{} tiles for {} occupied cells",
                tiles.len(),
                board.occupied_count()
            ),
        });
    }

    let mut positions = HashSet::new();
    let mut ids = HashSet::new();
    for tile in tiles {
        match board.get(tile.row, tile.col) {
            Some(value) if value == tile.value => {}
            Some(value) => violations.push(InvariantViolation {
                message: format!(
                    "Tile {} says {} but cell ({}, {}) holds {value}",
                    tile.id, tile.value, tile.row, tile.col
                ),
            }),
            None => violations.push(InvariantViolation {
                message: format!("Tile {} is off the board at ({}, {})", tile.id, tile.row, tile.col),
            }),
        }

        if !positions.insert((tile.row, tile.col)) {
            violations.push(InvariantViolation {
                message: format!("Two tiles share cell ({}, {})", tile.row, tile.col),
            });
        }
        if !ids.insert(tile.id) {
            violations.push(InvariantViolation {
                message: format!("Identity {} used twice", tile.id),
            });
        }
        if tile.id.0 >= state.next_id() {
            violations.push(InvariantViolation {
                message: format!(
                    "Identity {} not below the counter {}",
                    tile.id,
                    state.next_id()
                ),
            });
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
