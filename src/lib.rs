// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! slide48: a deterministic sliding-tile (2048) engine.
//!
//! This crate provides the grid transition engine of a 2048-style game:
//! - Line compaction with single-pass, leftmost-first merging
//! - Board moves in four directions built from that one primitive
//! - Stable tile identities across moves, for flicker-free animation
//! - Seeded, injectable randomness so every game is reproducible
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Front-end (TUI, replay, CLI)      │
//! ├─────────────────────────────────────┤
//! │   Session (best score, undo, log)   │
//! ├─────────────────────────────────────┤
//! │   Game (spawn, tiles, state)        │
//! ├─────────────────────────────────────┤
//! │   Grid (compaction, moves)          │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod replay;
pub mod session;
pub mod store;

pub use error::{BoardError, ConfigError};

// Re-export key types at crate root for convenience
pub use game::{GameConfig, GameState, MoveOutcome, Tile, TileId};
pub use grid::{Board, Direction};
pub use session::{Action, Session};
