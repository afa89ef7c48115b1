//! Game layer for slide48.
//!
//! Builds on the grid layer:
//! - Random spawning with an injected RNG
//! - Tile identities reconciled across moves
//! - Game state, the move transition, and undo history
//! - Invariant checks

mod invariants;
mod spawn;
mod state;
mod tile;

pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use spawn::{spawn_tile, Spawn, DEFAULT_FOUR_PROBABILITY};
pub use state::{GameConfig, GameState, MoveOutcome, Snapshot, DEFAULT_SIZE, DEFAULT_START_TILES};
pub use tile::{attribute_merges, reconcile, Reconciled, Tile, TileId};
