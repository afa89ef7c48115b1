#![no_main]

//! Move sequence fuzzer.
//!
//! This fuzz target starts from an arbitrary board and applies an arbitrary
//! sequence of moves and undos, checking after every action that:
//! 1. The board sum only changes by spawned tiles
//! 2. Tile tracking agrees with the board
//! 3. Undo restores the previous board exactly

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slide48::game::check_invariants;
use slide48::{Board, Direction, GameConfig, GameState};

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Up,
    Down,
    Left,
    Right,
    Undo,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    seed: u64,
    /// Side length, folded into 2..=6.
    size: u8,
    /// Cell exponents; 0 is empty, k is 2^k.
    cells: Vec<u8>,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: FuzzInput| {
    let size = usize::from(input.size % 5) + 2;
    let rows: Vec<Vec<u32>> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    let exp = input.cells.get(r * size + c).copied().unwrap_or(0) % 17;
                    if exp == 0 { 0 } else { 1u32 << exp }
                })
                .collect()
        })
        .collect();

    let board = Board::from_rows(&rows).expect("powers of two form a valid board");
    let mut state = GameState::from_board(GameConfig::default(), board).expect("valid state");
    let mut rng = StdRng::seed_from_u64(input.seed);

    for action in input.actions.into_iter().take(256) {
        let direction = match action {
            FuzzAction::Up => Direction::Up,
            FuzzAction::Down => Direction::Down,
            FuzzAction::Left => Direction::Left,
            FuzzAction::Right => Direction::Right,
            FuzzAction::Undo => {
                let before = state.board().clone();
                if !state.undo() {
                    assert_eq!(state.board(), &before);
                }
                assert!(check_invariants(&state).is_empty());
                continue;
            }
        };

        let (next, outcome) = state.step(direction, &mut rng);
        let spawned = outcome.spawned.map_or(0, |s| u64::from(s.value));
        assert_eq!(next.board().sum(), state.board().sum() + spawned);
        assert_eq!(next.score(), state.score() + outcome.score_delta);

        let violations = check_invariants(&next);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");

        if outcome.moved {
            let mut undone = next.clone();
            assert!(undone.undo());
            assert_eq!(undone.board(), state.board());
        }
        state = next;
    }
});
