//! Whole-game integration tests.
//!
//! These tests play complete seeded games through the public API and check
//! that they terminate, stay consistent, persist the best score, and replay
//! exactly.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use slide48::game::check_invariants;
use slide48::replay::{Recording, ReplayEngine};
use slide48::store::{JsonFileStore, ScoreStore};
use slide48::{Action, Board, Direction, GameConfig, GameState, Session};

/// Play until no move is accepted, trying directions in a fixed order.
fn play_to_end(session: &mut Session<StdRng>, max_moves: usize) -> usize {
    let mut moves = 0;
    while moves < max_moves && !session.is_game_over() {
        let moved = Direction::ALL.iter().any(|&d| session.play(d).moved);
        if !moved {
            break;
        }
        moves += 1;
        assert!(check_invariants(session.state()).is_empty());
    }
    moves
}

#[test]
fn test_seeded_games_reach_game_over() {
    for seed in 0..20 {
        let mut session = Session::new(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
        let moves = play_to_end(&mut session, 100_000);

        assert!(moves > 0, "seed {seed} made no moves");
        assert!(session.is_game_over(), "seed {seed} did not finish");
        assert!(session.state().board().is_terminal());
        assert_eq!(session.best_score(), session.score());
        for dir in Direction::ALL {
            assert!(!session.play(dir).moved);
        }
    }
}

#[test]
fn test_score_matches_merge_totals() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut state = GameState::new(GameConfig::default(), &mut rng).unwrap();
    let mut total = 0;

    for dir in Direction::ALL.iter().cycle().take(400) {
        let (next, outcome) = state.step(*dir, &mut rng);
        total += outcome.score_delta;
        state = next;
    }
    assert_eq!(state.score(), total);
}

#[test]
fn test_documented_scenarios() {
    let board = Board::from_rows(&[[2, 2, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]).unwrap();
    let result = board.apply_move(Direction::Left);
    assert_eq!(result.board.get(0, 0), Some(4));
    assert_eq!(result.board.get(0, 1), Some(8));
    assert_eq!(result.score_delta, 12);

    let checkerboard =
        Board::from_rows(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap();
    assert!(checkerboard.is_terminal());

    let state = GameState::from_board(GameConfig::default(), checkerboard).unwrap();
    assert!(state.is_game_over());
}

#[test]
fn test_best_score_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");

    let best = {
        let store = JsonFileStore::new(&path);
        let mut session =
            Session::with_store(GameConfig::default(), StdRng::seed_from_u64(5), Box::new(store))
                .unwrap();
        play_to_end(&mut session, 100_000);
        session.best_score()
    };
    assert!(best > 0);
    assert_eq!(JsonFileStore::new(&path).load_best().unwrap(), best);

    // A fresh session starts from the stored best, not from 0
    let store = JsonFileStore::new(&path);
    let session =
        Session::with_store(GameConfig::default(), StdRng::seed_from_u64(6), Box::new(store)).unwrap();
    assert_eq!(session.best_score(), best);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_recorded_game_replays_exactly() {
    let seed = 2024;
    let config = GameConfig::default();
    let mut session = Session::new(config, StdRng::seed_from_u64(seed)).unwrap();

    play_to_end(&mut session, 50);
    assert!(session.undo());
    session.new_game();
    play_to_end(&mut session, 30);

    let recording = Recording::new(seed, config, session.actions().to_vec());
    assert!(recording.actions.contains(&Action::Undo));
    assert!(recording.actions.contains(&Action::NewGame));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    recording.save(&path).unwrap();
    let loaded = Recording::load(&path).unwrap();

    let len = loaded.len();
    let mut engine = ReplayEngine::new(loaded).unwrap();
    while !engine.is_finished() {
        engine.step_forward().unwrap();
        assert!(check_invariants(engine.state()).is_empty());
    }
    assert_eq!(engine.step(), len);
    assert_eq!(engine.state(), session.state());
    assert_eq!(engine.best_score(), session.best_score());
}

#[test]
fn test_undo_walks_back_history() {
    let config = GameConfig {
        history_limit: Some(3),
        ..GameConfig::default()
    };
    let mut session = Session::new(config, StdRng::seed_from_u64(9)).unwrap();

    let mut boards = vec![session.state().board().clone()];
    for _ in 0..6 {
        play_to_end(&mut session, 1);
        boards.push(session.state().board().clone());
    }

    // Only the last three positions are kept
    for expected in boards.iter().rev().skip(1).take(3) {
        assert!(session.undo());
        assert_eq!(session.state().board(), expected);
    }
    assert!(!session.undo());
}

#[test]
fn test_larger_boards() {
    for size in [2, 3, 5, 6] {
        let config = GameConfig {
            size,
            ..GameConfig::default()
        };
        let mut session = Session::new(config, StdRng::seed_from_u64(31)).unwrap();
        assert_eq!(session.state().board().size(), size);
        play_to_end(&mut session, 100_000);
        assert!(session.is_game_over());
    }
}
