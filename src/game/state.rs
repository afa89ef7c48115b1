//! Game state and the move transition.

use crate::error::ConfigError;
use crate::game::{
    attribute_merges, reconcile, spawn_tile, Spawn, Tile, TileId, DEFAULT_FOUR_PROBABILITY,
};
use crate::grid::{Board, Direction};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default side length of the board.
pub const DEFAULT_SIZE: usize = 4;

/// Default number of tiles placed when a game starts.
pub const DEFAULT_START_TILES: usize = 2;

/// Game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the board (default: 4).
    pub size: usize,
    /// Tiles spawned by a new game (default: 2).
    pub start_tiles: usize,
    /// Probability that a spawned tile is a 4 (default: 0.1).
    pub four_probability: f64,
    /// Maximum undo depth (default: unbounded).
    pub history_limit: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start_tiles: DEFAULT_START_TILES,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            history_limit: None,
        }
    }
}

impl GameConfig {
    /// Check that a game can be started with this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::SizeTooSmall(self.size));
        }
        let cells = self
            .size
            .checked_mul(self.size)
            .ok_or(ConfigError::SizeTooLarge(self.size))?;
        if self.start_tiles > cells {
            return Err(ConfigError::TooManyStartTiles {
                requested: self.start_tiles,
                cells,
            });
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::InvalidProbability(self.four_probability));
        }
        Ok(())
    }
}

/// A board together with the tiles that were on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The board.
    pub board: Board,
    /// The tiles, one per non-empty cell.
    pub tiles: Vec<Tile>,
}

/// What a call to [`GameState::step`] did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Whether the move was accepted.
    pub moved: bool,
    /// Points gained from merges.
    pub score_delta: u64,
    /// Number of merges performed.
    pub merges: usize,
    /// The tile placed after the move, if any.
    pub spawned: Option<Spawn>,
    /// Tiles that disappeared (absorbed by merges).
    pub retired: Vec<TileId>,
}

impl MoveOutcome {
    /// Outcome of a rejected move.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }
}

/// Complete state of one game.
///
/// The board and the tile list are kept in one-to-one correspondence: one
/// tile per non-empty cell, at that cell, carrying that value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Configuration the game was started with.
    config: GameConfig,
    /// Current board.
    board: Board,
    /// Current tiles.
    tiles: Vec<Tile>,
    /// Accumulated score.
    score: u64,
    /// Next identity to mint.
    next_id: u64,
    /// Earlier positions, oldest first.
    history: Vec<Snapshot>,
}

impl GameState {
    /// Start a new game: empty board, `start_tiles` spawns, zero score.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut board = Board::empty(config.size).map_err(|_| ConfigError::SizeTooSmall(0))?;
        let mut tiles = Vec::with_capacity(config.start_tiles);
        let mut next_id = 0u64;
        for _ in 0..config.start_tiles {
            if let Some(spawn) = spawn_tile(&mut board, rng, config.four_probability) {
                tiles.push(Tile::minted(TileId(next_id), spawn.value, spawn.row, spawn.col));
                next_id += 1;
            }
        }
        // Keep tiles in row-major order like every later transition does
        tiles.sort_by_key(|t| (t.row, t.col));

        Ok(Self {
            config,
            board,
            tiles,
            score: 0,
            next_id,
            history: Vec::new(),
        })
    }

    /// Wrap an existing board, minting one tile per non-empty cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. The board's size
    /// overrides `config.size`.
    pub fn from_board(config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        let config = GameConfig {
            size: board.size(),
            ..config
        };
        config.validate()?;

        let reconciled = reconcile(&[], &board, 0);
        Ok(Self {
            config,
            board,
            tiles: reconciled.tiles,
            score: 0,
            next_id: reconciled.next_id,
            history: Vec::new(),
        })
    }

    /// Configuration of this game.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Current tiles, row-major.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Next identity the game will mint.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of positions undo can return to.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether no direction can change the board.
    ///
    /// Derived from the board on every call, never cached.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.board.is_terminal()
    }

    /// Apply a move and return the successor state, leaving `self` alone.
    ///
    /// Same transition as [`GameState::advance`], at the cost of cloning the
    /// whole state including its history.
    #[must_use]
    pub fn step<R: Rng + ?Sized>(&self, direction: Direction, rng: &mut R) -> (Self, MoveOutcome) {
        let mut next = self.clone();
        let outcome = next.advance(direction, rng);
        (next, outcome)
    }

    /// Apply a move in place.
    ///
    /// A rejected move (no line changes) leaves the state untouched and
    /// returns [`MoveOutcome::unchanged`] without drawing from `rng`. An
    /// accepted move compacts the board, spawns one tile, reconciles tile
    /// identities, adds the merge points, and pushes the previous position
    /// onto the history.
    pub fn advance<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> MoveOutcome {
        let result = self.board.apply_move(direction);
        if !result.moved {
            return MoveOutcome::unchanged();
        }

        let mut board = result.board;
        let spawned = spawn_tile(&mut board, rng, self.config.four_probability);

        let mut reconciled = reconcile(&self.tiles, &board, self.next_id);
        attribute_merges(
            &mut reconciled.tiles,
            &self.tiles,
            &reconciled.retired,
            spawned,
        );

        let previous = Snapshot {
            board: std::mem::replace(&mut self.board, board),
            tiles: std::mem::replace(&mut self.tiles, reconciled.tiles),
        };
        self.history.push(previous);
        if let Some(limit) = self.config.history_limit {
            let excess = self.history.len().saturating_sub(limit);
            self.history.drain(..excess);
        }
        self.score += result.score_delta;
        self.next_id = reconciled.next_id;

        MoveOutcome {
            moved: true,
            score_delta: result.score_delta,
            merges: result.merges,
            spawned,
            retired: reconciled.retired,
        }
    }

    /// Return to the previous position.
    ///
    /// Restores the board and its tiles. The score and the identity counter
    /// stay where they are. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.board = snapshot.board;
        self.tiles = snapshot.tiles;
        true
    }

    /// Capture the current board and tiles.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            tiles: self.tiles.clone(),
        }
    }
}
