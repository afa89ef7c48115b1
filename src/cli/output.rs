//! Output formatting utilities for CLI.

use serde::Serialize;
use slide48::game::Tile;
use slide48::replay::ReplayEngine;

/// JSON-serializable replay position.
#[derive(Debug, Serialize)]
pub(super) struct JsonReplayResult {
    /// Random seed of the recording.
    pub(super) seed: u64,
    /// Board side length.
    pub(super) size: usize,
    /// Step shown.
    pub(super) step: usize,
    /// Total recorded actions.
    pub(super) total_steps: usize,
    /// Score at this step.
    pub(super) score: u64,
    /// Best score reached up to this step.
    pub(super) best_score: u64,
    /// Largest tile on the board.
    pub(super) max_tile: u32,
    /// Whether no legal move remains.
    pub(super) game_over: bool,
    /// Cell values, row-major.
    pub(super) board: Vec<Vec<u32>>,
    /// Tracked tiles.
    pub(super) tiles: Vec<Tile>,
}

impl JsonReplayResult {
    /// Capture the engine's current position.
    pub(super) fn from_engine(engine: &ReplayEngine) -> Self {
        let state = engine.state();
        let board = state.board();
        Self {
            seed: engine.recording().seed,
            size: board.size(),
            step: engine.step(),
            total_steps: engine.recording().len(),
            score: state.score(),
            best_score: engine.best_score(),
            max_tile: board.max_value(),
            game_over: state.is_game_over(),
            board: board.rows().map(<[u32]>::to_vec).collect(),
            tiles: state.tiles().to_vec(),
        }
    }
}
