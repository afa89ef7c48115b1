//! Game recording and replay.
//!
//! Because spawning draws from a seeded RNG, a whole game is reproduced by:
//! - `seed: u64` - the seed of the session's `StdRng`
//! - `config: GameConfig` - board size and spawn settings
//! - `actions: Vec<Action>` - every accepted move, undo and restart
//!
//! No board snapshots are stored. To view step N, re-run actions 0..N.
//!
//! # Time Travel
//!
//! - **Forward**: apply the next recorded action
//! - **Backward**: re-run from step 0 to (`current_step` - 1)
//! - **Jump to step N**: re-run from step 0 to N

mod render;

pub use render::render_ascii;

use crate::error::ConfigError;
use crate::game::{GameConfig, GameState};
use crate::session::{Action, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Everything needed to reproduce a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Seed of the session RNG.
    pub seed: u64,
    /// Game configuration.
    pub config: GameConfig,
    /// Accepted actions, oldest first.
    pub actions: Vec<Action>,
}

impl Recording {
    /// Create a new recording.
    #[must_use]
    pub fn new(seed: u64, config: GameConfig, actions: Vec<Action>) -> Self {
        Self {
            seed,
            config,
            actions,
        }
    }

    /// Start a session that this recording can be replayed against.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded configuration is invalid.
    pub fn session(&self) -> Result<Session<StdRng>, ConfigError> {
        Session::new(self.config, StdRng::seed_from_u64(self.seed))
    }

    /// Number of recorded actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Save recording to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file I/O fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self).map_err(ReplayError::Format)?;
        fs::write(path, json).map_err(ReplayError::Io)
    }

    /// Load recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a recording.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(ReplayError::Io)?;
        serde_json::from_str(&text).map_err(ReplayError::Format)
    }
}

/// Error type for replay operations.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading or writing a recording failed.
    Io(io::Error),
    /// A recording could not be (de)serialized.
    Format(serde_json::Error),
    /// The recorded configuration cannot start a game.
    InvalidConfig(ConfigError),
    /// Step number out of bounds.
    StepOutOfBounds {
        /// Requested step.
        requested: usize,
        /// Last valid step.
        max_step: usize,
    },
    /// No recorded actions remain.
    EndOfRecording,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Recording I/O failed: {e}"),
            Self::Format(e) => write!(f, "Recording is malformed: {e}"),
            Self::InvalidConfig(e) => write!(f, "Recorded configuration is invalid: {e}"),
            Self::StepOutOfBounds {
                requested,
                max_step,
            } => {
                write!(f, "Step {requested} out of bounds (max: {max_step})")
            }
            Self::EndOfRecording => write!(f, "End of recording reached"),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Replay engine - steps through a recording deterministically.
///
/// Since games are deterministic, this engine can:
/// - Step forward by applying one action
/// - Step backward by replaying from step 0
/// - Jump to any step by replaying from step 0
#[derive(Debug)]
pub struct ReplayEngine {
    /// The recording being replayed.
    recording: Recording,
    /// Session the actions are applied to.
    session: Session<StdRng>,
    /// Number of actions applied so far.
    current_step: usize,
}

impl ReplayEngine {
    /// Create a new replay engine from a recording, starting at step 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded configuration is invalid.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        Self::new_at_step(recording, 0)
    }

    /// Create a new replay engine at a specific step.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the step lies
    /// beyond the recording.
    pub fn new_at_step(recording: Recording, target_step: usize) -> Result<Self, ReplayError> {
        if target_step > recording.len() {
            return Err(ReplayError::StepOutOfBounds {
                requested: target_step,
                max_step: recording.len(),
            });
        }

        let session = recording.session().map_err(ReplayError::InvalidConfig)?;
        let mut engine = Self {
            recording,
            session,
            current_step: 0,
        };
        while engine.current_step < target_step {
            engine.apply_next();
        }
        Ok(engine)
    }

    /// Get the recording.
    #[must_use]
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Number of actions applied so far.
    #[must_use]
    pub fn step(&self) -> usize {
        self.current_step
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        self.session.state()
    }

    /// Best score reached up to the current step.
    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.session.best_score()
    }

    /// Whether every recorded action has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_step >= self.recording.len()
    }

    /// Apply the next recorded action.
    ///
    /// # Errors
    ///
    /// Returns an error at the end of the recording.
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        if self.is_finished() {
            return Err(ReplayError::EndOfRecording);
        }
        self.apply_next();
        Ok(())
    }

    /// Go back one step.
    ///
    /// This replays from step 0 to (`current_step` - 1).
    ///
    /// # Errors
    ///
    /// Returns an error if already at step 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.current_step == 0 {
            return Err(ReplayError::StepOutOfBounds {
                requested: 0,
                max_step: self.recording.len(),
            });
        }
        self.goto_step(self.current_step - 1)
    }

    /// Jump to a specific step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step lies beyond the recording.
    pub fn goto_step(&mut self, target_step: usize) -> Result<(), ReplayError> {
        let recording = self.recording.clone();
        *self = Self::new_at_step(recording, target_step)?;
        Ok(())
    }

    /// Render current state to plain text.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(self.state(), self.best_score(), Some((self.current_step, self.recording.len())))
    }

    /// Apply the action at `current_step` (internal, bounds already checked).
    fn apply_next(&mut self) {
        let action = self.recording.actions[self.current_step];
        self.session.apply(action);
        self.current_step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use tempfile::NamedTempFile;

    /// Play a seeded session for a while and record it.
    fn recorded_game(seed: u64) -> (Recording, GameState) {
        let config = GameConfig::default();
        let mut session = Session::new(config, StdRng::seed_from_u64(seed)).unwrap();
        for dir in Direction::ALL.iter().cycle().take(60) {
            session.play(*dir);
        }
        session.undo();
        let recording = Recording::new(seed, config, session.actions().to_vec());
        (recording, session.state().clone())
    }

    #[test]
    fn test_replay_reaches_final_state() {
        let (recording, final_state) = recorded_game(42);
        let len = recording.len();
        let engine = ReplayEngine::new_at_step(recording, len).unwrap();

        assert!(engine.is_finished());
        assert_eq!(engine.state(), &final_state);
    }

    #[test]
    fn test_step_forward_and_back() {
        let (recording, _) = recorded_game(7);
        let mut engine = ReplayEngine::new(recording).unwrap();
        let start = engine.state().clone();

        engine.step_forward().unwrap();
        engine.step_forward().unwrap();
        assert_eq!(engine.step(), 2);

        engine.step_backward().unwrap();
        engine.step_backward().unwrap();
        assert_eq!(engine.step(), 0);
        assert_eq!(engine.state(), &start);
        assert!(matches!(
            engine.step_backward(),
            Err(ReplayError::StepOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_end_of_recording() {
        let recording = Recording::new(1, GameConfig::default(), vec![]);
        let mut engine = ReplayEngine::new(recording).unwrap();
        assert!(engine.is_finished());
        assert!(matches!(engine.step_forward(), Err(ReplayError::EndOfRecording)));
    }

    #[test]
    fn test_goto_out_of_bounds() {
        let (recording, _) = recorded_game(3);
        let len = recording.len();
        let mut engine = ReplayEngine::new(recording).unwrap();
        let err = engine.goto_step(len + 5).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_invalid_config() {
        let config = GameConfig {
            size: 0,
            ..GameConfig::default()
        };
        let recording = Recording::new(1, config, vec![]);
        assert!(matches!(
            ReplayEngine::new(recording),
            Err(ReplayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_recording_save_load_roundtrip() {
        let (recording, _) = recorded_game(99);

        let temp_file = NamedTempFile::new().expect("create temp file");
        recording.save(temp_file.path()).expect("save recording");
        let loaded = Recording::load(temp_file.path()).expect("load recording");

        assert_eq!(loaded, recording);
    }

    #[test]
    fn test_load_garbage() {
        let temp_file = NamedTempFile::new().expect("create temp file");
        fs::write(temp_file.path(), "{\"seed\": 1}").unwrap();
        assert!(matches!(
            Recording::load(temp_file.path()),
            Err(ReplayError::Format(_))
        ));
    }
}
