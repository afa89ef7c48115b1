//! Interactive session: one game at a time, plus the best score.
//!
//! The session owns the RNG and the current [`GameState`], turns user
//! actions into transitions, and keeps the best score in sync with a
//! [`ScoreStore`]. Every action either completes fully or leaves the
//! session untouched.

use crate::error::ConfigError;
use crate::game::{assert_invariants, GameConfig, GameState, MoveOutcome};
use crate::grid::Direction;
use crate::store::{MemoryStore, ScoreStore};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A user action, as stored in recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Slide the tiles.
    Move(Direction),
    /// Return to the previous position.
    Undo,
    /// Abandon the current game and start another.
    NewGame,
}

/// An interactive game session.
#[derive(Debug)]
pub struct Session<R> {
    /// Current game.
    state: GameState,
    /// Source of spawn randomness.
    rng: R,
    /// Best score seen across games.
    best_score: u64,
    /// Durable home of the best score.
    store: Box<dyn ScoreStore>,
    /// Accepted actions since the session started.
    actions: Vec<Action>,
}

impl<R: Rng> Session<R> {
    /// Start a session with an in-memory best score of 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        Self::with_store(config, rng, Box::new(MemoryStore::default()))
    }

    /// Start a session whose best score lives in `store`.
    ///
    /// A store that cannot be read is treated as holding 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_store(
        config: GameConfig,
        mut rng: R,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(config, &mut rng)?;
        let best_score = store.load_best().unwrap_or_else(|e| {
            warn!(error = %e, "could not read best score, starting from 0");
            0
        });
        debug!(size = config.size, best_score, "session started");
        assert_invariants(&state);

        Ok(Self {
            state,
            rng,
            best_score,
            store,
            actions: Vec::new(),
        })
    }

    /// Current game.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.state.score()
    }

    /// Best score across games, including the current one.
    #[must_use]
    pub const fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Whether the current game has no legal move left.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Whether undo would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.state.history_len() > 0
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Apply a move.
    ///
    /// Ignored (returns [`MoveOutcome::unchanged`]) when the game is over or
    /// the move would not change the board.
    #[instrument(skip(self), fields(score = self.state.score()))]
    pub fn play(&mut self, direction: Direction) -> MoveOutcome {
        if self.is_game_over() {
            debug!("move ignored, game is over");
            return MoveOutcome::unchanged();
        }

        let outcome = self.state.advance(direction, &mut self.rng);
        if !outcome.moved {
            debug!("move ignored, board unchanged");
            return outcome;
        }

        assert_invariants(&self.state);
        self.actions.push(Action::Move(direction));
        debug!(
            score_delta = outcome.score_delta,
            merges = outcome.merges,
            spawned = ?outcome.spawned,
            game_over = self.is_game_over(),
            "move accepted"
        );
        self.update_best();
        outcome
    }

    /// Undo the last accepted move. Returns `false` if there was none.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        if !self.state.undo() {
            debug!("nothing to undo");
            return false;
        }
        assert_invariants(&self.state);
        self.actions.push(Action::Undo);
        debug!(history = self.state.history_len(), "undone");
        true
    }

    /// Start a new game with the same configuration.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        let config = *self.state.config();
        match GameState::new(config, &mut self.rng) {
            Ok(state) => {
                assert_invariants(&state);
                self.state = state;
                self.actions.push(Action::NewGame);
                debug!("new game");
            }
            // The config was validated when the session started
            Err(e) => warn!(error = %e, "could not start a new game"),
        }
    }

    /// Apply a recorded action.
    ///
    /// Returns whether the action changed anything.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Move(direction) => self.play(direction).moved,
            Action::Undo => self.undo(),
            Action::NewGame => {
                self.new_game();
                true
            }
        }
    }

    /// Raise the best score to the current score and persist it.
    fn update_best(&mut self) {
        let score = self.state.score();
        if score <= self.best_score {
            return;
        }
        self.best_score = score;
        info!(best_score = score, "new best score");
        if let Err(e) = self.store.save_best(score) {
            warn!(error = %e, "could not persist best score");
        }
    }
}
