//! The square board and board-wide moves.

use crate::error::BoardError;
use crate::grid::{compact_line, Direction};
use serde::{Deserialize, Serialize};

/// An N x N board of cell values.
///
/// `0` marks an empty cell; every other value is a power of two >= 2.
/// Cells are stored in row-major order. Moves never mutate a board in place:
/// [`Board::apply_move`] returns a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Board {
    /// Side length.
    size: usize,
    /// Cells in row-major order.
    cells: Vec<u32>,
}

/// Result of applying a direction to a board, before any spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// The board after compaction.
    pub board: Board,
    /// Whether any line changed.
    pub moved: bool,
    /// Sum of every merge produced by the move.
    pub score_delta: u64,
    /// Number of merges performed.
    pub merges: usize,
}

/// Whether a value may sit in a cell.
const fn is_valid_cell(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl Board {
    /// Create an all-empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ZeroSize`] if `size` is zero.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build a board from rows, validating shape and values.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are empty, not square, or hold a value
    /// that is neither 0 nor a power of two >= 2.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !is_valid_cell(value) {
                    return Err(BoardError::InvalidValue { row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Self { size, cells })
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Set a cell. Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        debug_assert!(is_valid_cell(value), "invalid cell value {value}");
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = value;
        }
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    /// Iterate over `(row, col, value)` for every non-empty cell, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| (i / size, i % size, v))
    }

    /// Coordinates of every empty cell, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(i, _)| (i / size, i % size))
            .collect()
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Largest value on the board (0 when empty).
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all cell values.
    #[must_use]
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Board coordinate of position `k` along line `index` in traversal order.
    ///
    /// Traversal order is the order the compactor sees, so reading and
    /// writing through this mapping is the reverse-compact-reverse trick.
    fn line_coord(&self, direction: Direction, index: usize, k: usize) -> (usize, usize) {
        let k = if direction.is_reversed() {
            self.size - 1 - k
        } else {
            k
        };
        if direction.is_horizontal() {
            (index, k)
        } else {
            (k, index)
        }
    }

    /// Read line `index` in traversal order for `direction`.
    #[must_use]
    pub fn line(&self, direction: Direction, index: usize) -> Vec<u32> {
        (0..self.size)
            .map(|k| {
                let (row, col) = self.line_coord(direction, index, k);
                self.cells[row * self.size + col]
            })
            .collect()
    }

    /// Write line `index` back, undoing the traversal order.
    fn write_line(&mut self, direction: Direction, index: usize, values: &[u32]) {
        for (k, &value) in values.iter().enumerate() {
            let (row, col) = self.line_coord(direction, index, k);
            self.cells[row * self.size + col] = value;
        }
    }

    /// Slide and merge every line in `direction`.
    ///
    /// The receiver is untouched. When the result reports `moved == false`
    /// the returned board equals `self`.
    #[must_use]
    pub fn apply_move(&self, direction: Direction) -> MoveResult {
        let mut board = self.clone();
        let mut moved = false;
        let mut score_delta = 0u64;
        let mut merges = 0usize;

        for index in 0..self.size {
            let line = self.line(direction, index);
            let before = line.iter().filter(|&&v| v != 0).count();
            let result = compact_line(&line);
            let after = result.line.iter().filter(|&&v| v != 0).count();

            moved |= result.moved;
            score_delta += result.score_gain;
            merges += before - after;
            board.write_line(direction, index, &result.line);
        }

        MoveResult {
            board,
            moved,
            score_delta,
            merges,
        }
    }

    /// Whether `direction` would change the board.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        // Cheaper than a full apply_move: any gap before a tile or any
        // mergeable equal neighbour along a line is enough. A 2^31 pair
        // cannot merge.
        (0..self.size).any(|index| {
            let line = self.line(direction, index);
            line.windows(2).any(|w| {
                (w[0] == 0 && w[1] != 0)
                    || (w[0] != 0 && w[0] == w[1] && w[0].checked_mul(2).is_some())
            })
        })
    }

    /// Whether no direction changes the board.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !Direction::ALL.iter().any(|&d| self.can_move(d))
    }
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.rows().map(<[u32]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u32; 4]; 4]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_empty_board() {
        let b = Board::empty(4).unwrap();
        assert_eq!(b.size(), 4);
        assert_eq!(b.occupied_count(), 0);
        assert_eq!(b.empty_cells().len(), 16);
        assert_eq!(Board::empty(0), Err(BoardError::ZeroSize));
    }

    #[test]
    fn test_from_rows_validation() {
        assert_eq!(
            Board::from_rows(&[vec![2, 0], vec![0]]),
            Err(BoardError::NotSquare {
                row: 1,
                len: 1,
                size: 2
            })
        );
        assert_eq!(
            Board::from_rows(&[vec![2, 3], vec![0, 0]]),
            Err(BoardError::InvalidValue {
                row: 0,
                col: 1,
                value: 3
            })
        );
        assert!(Board::from_rows(&[vec![1, 0], vec![0, 0]]).is_err());
        assert!(Board::from_rows::<Vec<u32>>(&[]).is_err());
    }

    #[test]
    fn test_left_and_right_are_mirrors() {
        let b = board(&[[0, 2, 2, 4], [0; 4], [0; 4], [0; 4]]);

        let left = b.apply_move(Direction::Left);
        assert_eq!(left.board.line(Direction::Left, 0), vec![4, 4, 0, 0]);

        let right = b.apply_move(Direction::Right);
        assert_eq!(right.board.rows().next().unwrap(), &[0, 0, 4, 4]);
        assert_eq!(left.score_delta, 4);
        assert_eq!(right.score_delta, 4);
    }

    #[test]
    fn test_unmergeable_top_pair_is_terminal() {
        let top = 1u32 << 31;
        let b = Board::from_rows(&[[top, top], [4, 2]]).unwrap();

        for dir in Direction::ALL {
            assert!(!b.apply_move(dir).moved);
            assert!(!b.can_move(dir), "{dir} reported as legal");
        }
        assert!(b.is_terminal());

        // A gap still lets the pair slide
        let b = Board::from_rows(&[[0, top], [top, 2]]).unwrap();
        assert!(b.can_move(Direction::Left));
        assert!(!b.is_terminal());
    }

    #[test]
    fn test_up_and_down() {
        let b = board(&[[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]]);

        let up = b.apply_move(Direction::Up);
        assert_eq!(up.board.get(0, 0), Some(4));
        assert_eq!(up.board.get(1, 0), Some(2));
        assert_eq!(up.board.get(2, 0), Some(0));

        // Traversal starts from the bottom, so the lower pair merges
        let down = b.apply_move(Direction::Down);
        assert_eq!(down.board.get(3, 0), Some(4));
        assert_eq!(down.board.get(2, 0), Some(2));
        assert_eq!(down.board.get(0, 0), Some(0));
    }

    #[test]
    fn test_score_accumulates_across_lines() {
        let b = board(&[[2, 2, 0, 0], [4, 4, 0, 0], [0; 4], [0; 4]]);
        let result = b.apply_move(Direction::Left);
        assert!(result.moved);
        assert_eq!(result.score_delta, 12);
        assert_eq!(result.merges, 2);
    }

    #[test]
    fn test_noop_returns_identical_board() {
        let b = board(&[[2, 4, 0, 0], [4, 2, 0, 0], [0; 4], [0; 4]]);
        let result = b.apply_move(Direction::Left);
        assert!(!result.moved);
        assert_eq!(result.board, b);
        assert_eq!(result.score_delta, 0);
        assert!(!b.can_move(Direction::Left));
        assert!(!b.can_move(Direction::Up));
        assert!(b.can_move(Direction::Right));
        assert!(b.can_move(Direction::Down));
    }

    #[test]
    fn test_checkerboard_is_terminal() {
        let b = board(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(b.is_terminal());
        for dir in Direction::ALL {
            assert!(!b.apply_move(dir).moved);
        }
    }

    #[test]
    fn test_full_board_with_pair_not_terminal() {
        let b = board(&[[2, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]]);
        assert!(!b.is_terminal());
        assert!(b.can_move(Direction::Left));
        assert!(!b.can_move(Direction::Up));
    }

    #[test]
    fn test_can_move_agrees_with_apply() {
        let b = board(&[[0, 0, 0, 2], [0, 0, 2, 4], [0, 2, 4, 8], [2, 4, 8, 16]]);
        for dir in Direction::ALL {
            assert_eq!(b.can_move(dir), b.apply_move(dir).moved, "{dir}");
        }
    }

    #[test]
    fn test_serde_as_nested_rows() {
        let b = board(&[[2, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 8]]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,4,0,0],[0,0,0,0],[0,0,0,8]]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);

        assert!(serde_json::from_str::<Board>("[[3]]").is_err());
    }

    #[test]
    fn test_stats() {
        let b = board(&[[2, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 8]]);
        assert_eq!(b.max_value(), 8);
        assert_eq!(b.sum(), 14);
        assert_eq!(b.occupied().collect::<Vec<_>>(), vec![(0, 0, 2), (1, 1, 4), (3, 3, 8)]);
    }
}
