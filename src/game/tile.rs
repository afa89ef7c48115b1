//! Tile identities and their reconciliation across moves.

use crate::game::Spawn;
use crate::grid::Board;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a tile.
///
/// Minted from a per-game counter; never handed to two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// A tile as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Identity carried across moves.
    pub id: TileId,
    /// Face value (a power of two >= 2).
    pub value: u32,
    /// Row on the board.
    pub row: usize,
    /// Column on the board.
    pub col: usize,
    /// Whether this identity was minted by the latest transition.
    pub is_new: bool,
    /// The two retired tiles this one was formed from, when known.
    pub merged_from: Option<[TileId; 2]>,
}

impl Tile {
    /// Create a freshly minted tile.
    #[must_use]
    pub const fn minted(id: TileId, value: u32, row: usize, col: usize) -> Self {
        Self {
            id,
            value,
            row,
            col,
            is_new: true,
            merged_from: None,
        }
    }

    /// Whether the tile sits at `(row, col)`.
    #[must_use]
    pub const fn is_at(&self, row: usize, col: usize) -> bool {
        self.row == row && self.col == col
    }
}

/// Output of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// One tile per non-empty cell, row-major.
    pub tiles: Vec<Tile>,
    /// Counter value to mint the next identity from.
    pub next_id: u64,
    /// Old tiles that were not carried over, in their original order.
    pub retired: Vec<TileId>,
}

/// Map the previous tile list onto a new board.
///
/// Cells are visited row-major. Each cell takes, in order of preference:
/// an unclaimed old tile at the same position with the same value; the
/// first unclaimed old tile (list order) with the same value; a fresh id.
/// This is a heuristic for animation continuity, not merge provenance.
#[must_use]
pub fn reconcile(old: &[Tile], board: &Board, next_id: u64) -> Reconciled {
    let mut claimed = vec![false; old.len()];
    let mut tiles = Vec::with_capacity(board.occupied_count());
    let mut next_id = next_id;

    for (row, col, value) in board.occupied() {
        let stationary = old
            .iter()
            .enumerate()
            .position(|(i, t)| !claimed[i] && t.value == value && t.is_at(row, col));
        let found = stationary.or_else(|| {
            old.iter()
                .enumerate()
                .position(|(i, t)| !claimed[i] && t.value == value)
        });

        let tile = if let Some(i) = found {
            claimed[i] = true;
            Tile {
                row,
                col,
                is_new: false,
                merged_from: None,
                ..old[i]
            }
        } else {
            let id = TileId(next_id);
            next_id += 1;
            Tile::minted(id, value, row, col)
        };
        tiles.push(tile);
    }

    let retired = old
        .iter()
        .zip(&claimed)
        .filter(|&(_, &c)| !c)
        .map(|(t, _)| t.id)
        .collect();

    Reconciled {
        tiles,
        next_id,
        retired,
    }
}

/// Mark freshly minted tiles with the pair of retired tiles they came from.
///
/// For every new tile other than the spawned one, the first two retired
/// tiles of half its value become its `merged_from`. Tiles with no such
/// pair are left alone.
pub fn attribute_merges(
    tiles: &mut [Tile],
    old: &[Tile],
    retired: &[TileId],
    spawn: Option<Spawn>,
) {
    let mut pool: Vec<&Tile> = old.iter().filter(|t| retired.contains(&t.id)).collect();

    for tile in tiles.iter_mut() {
        if !tile.is_new || tile.value < 4 {
            continue;
        }
        if spawn.is_some_and(|s| tile.is_at(s.row, s.col)) {
            continue;
        }

        let half = tile.value / 2;
        let mut sources = pool
            .iter()
            .enumerate()
            .filter(|(_, t)| t.value == half)
            .map(|(i, _)| i);
        if let (Some(a), Some(b)) = (sources.next(), sources.next()) {
            tile.merged_from = Some([pool[a].id, pool[b].id]);
            // b > a, so removing b first keeps a's index valid
            pool.remove(b);
            pool.remove(a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn tile(id: u64, value: u32, row: usize, col: usize) -> Tile {
        Tile {
            id: TileId(id),
            value,
            row,
            col,
            is_new: false,
            merged_from: None,
        }
    }

    #[test]
    fn test_tile_id_display() {
        assert_eq!(TileId(7).to_string(), "tile-7");
    }

    #[test]
    fn test_stationary_tile_keeps_identity() {
        let old = vec![tile(0, 2, 0, 0), tile(1, 4, 1, 1)];
        let board = Board::from_rows(&[[2, 0], [0, 4]]).unwrap();
        let result = reconcile(&old, &board, 2);

        assert_eq!(result.tiles, old);
        assert_eq!(result.next_id, 2);
        assert!(result.retired.is_empty());
    }

    #[test]
    fn test_moved_tile_keeps_identity() {
        let old = vec![tile(0, 2, 0, 3)];
        let board = Board::from_rows(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let result = reconcile(&old, &board, 1);

        assert_eq!(result.tiles.len(), 1);
        assert_eq!(result.tiles[0].id, TileId(0));
        assert!(result.tiles[0].is_at(0, 0));
        assert!(!result.tiles[0].is_new);
    }

    #[test]
    fn test_unmatched_value_is_minted() {
        let old = vec![tile(0, 2, 0, 0), tile(1, 2, 0, 1)];
        let board = Board::from_rows(&[[4, 0], [0, 0]]).unwrap();
        let result = reconcile(&old, &board, 2);

        assert_eq!(result.tiles.len(), 1);
        assert_eq!(result.tiles[0].id, TileId(2));
        assert!(result.tiles[0].is_new);
        assert_eq!(result.next_id, 3);
        assert_eq!(result.retired, vec![TileId(0), TileId(1)]);
    }

    #[test]
    fn test_each_old_tile_claimed_once() {
        let old = vec![tile(5, 2, 1, 1)];
        let board = Board::from_rows(&[[2, 2], [0, 0]]).unwrap();
        let result = reconcile(&old, &board, 6);

        assert_eq!(result.tiles[0].id, TileId(5));
        assert_eq!(result.tiles[1].id, TileId(6));
        assert!(result.tiles[1].is_new);
    }

    #[test]
    fn test_first_unclaimed_match_in_list_order() {
        // Both old 2s could have moved to (0, 0); the earlier list entry wins.
        let old = vec![tile(3, 2, 1, 0), tile(1, 2, 1, 1)];
        let board = Board::from_rows(&[[2, 0], [0, 2]]).unwrap();
        let result = reconcile(&old, &board, 4);

        assert_eq!(result.tiles[0].id, TileId(3));
        assert_eq!(result.tiles[1].id, TileId(1));
    }

    #[test]
    fn test_stationary_tile_beats_list_order() {
        // id 0 is first in the list, but id 1 never left (0, 0)
        let old = vec![tile(0, 2, 0, 3), tile(1, 2, 0, 0)];
        let board = Board::from_rows(&[[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
        let result = reconcile(&old, &board, 2);

        assert_eq!(result.tiles[0].id, TileId(1));
        assert!(result.tiles[0].is_at(0, 0));
        assert_eq!(result.tiles[1].id, TileId(0));
        assert!(result.tiles[1].is_at(0, 3));
        assert!(result.retired.is_empty());
    }

    #[test]
    fn test_reused_tile_clears_flags() {
        let mut old = vec![tile(0, 4, 0, 1)];
        old[0].is_new = true;
        old[0].merged_from = Some([TileId(8), TileId(9)]);
        let board = Board::from_rows(&[[4, 0], [0, 0]]).unwrap();
        let result = reconcile(&old, &board, 10);

        assert!(!result.tiles[0].is_new);
        assert_eq!(result.tiles[0].merged_from, None);
    }

    #[test]
    fn test_attribute_merge_after_left_move() {
        let old = vec![tile(0, 2, 0, 0), tile(1, 2, 0, 1), tile(2, 8, 1, 0)];
        let before = Board::from_rows(&[[2, 2], [8, 0]]).unwrap();
        let after = before.apply_move(Direction::Left).board;
        let mut result = reconcile(&old, &after, 3);
        attribute_merges(&mut result.tiles, &old, &result.retired, None);

        let merged = result.tiles.iter().find(|t| t.value == 4).unwrap();
        assert!(merged.is_new);
        assert_eq!(merged.merged_from, Some([TileId(0), TileId(1)]));

        let kept = result.tiles.iter().find(|t| t.value == 8).unwrap();
        assert_eq!(kept.id, TileId(2));
        assert_eq!(kept.merged_from, None);
    }

    #[test]
    fn test_spawned_tile_not_attributed() {
        let old = vec![tile(0, 2, 0, 0), tile(1, 2, 0, 1)];
        let board = Board::from_rows(&[[4, 0], [0, 4]]).unwrap();
        let mut result = reconcile(&old, &board, 2);
        let spawn = Spawn {
            row: 1,
            col: 1,
            value: 4,
        };
        attribute_merges(&mut result.tiles, &old, &result.retired, Some(spawn));

        assert_eq!(result.tiles[0].merged_from, Some([TileId(0), TileId(1)]));
        assert_eq!(result.tiles[1].merged_from, None);
        assert!(result.tiles[1].is_new);
    }
}
