//! 3x3 board state and win-line geometry

use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Number of cells on the board
pub const CELLS: usize = 9;

/// The 8 winning index triples: rows, then columns, then diagonals.
/// Scan order matters: `rules::winner` reports the first completed line.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Board state, row-major (index = row * 3 + col)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    /// Create an empty board
    pub const fn new() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    /// Get the cell at `index`
    pub fn get(&self, index: usize) -> Result<Option<Mark>, GameError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(GameError::IndexOutOfRange(index))
    }

    /// Check whether the cell at `index` is empty
    pub fn is_empty(&self, index: usize) -> Result<bool, GameError> {
        Ok(self.get(index)?.is_none())
    }

    /// Place `mark` at `index`. The cell must be empty.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        if self.get(index)?.is_some() {
            return Err(GameError::IllegalMove(index));
        }
        self.cells[index] = Some(mark);
        Ok(())
    }

    /// True when no empty cell remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Value copy of the current state, for try/undo search
    pub fn snapshot(&self) -> Board {
        *self
    }

    /// Restore a previously taken snapshot exactly
    pub fn restore(&mut self, snapshot: &Board) {
        *self = *snapshot;
    }

    /// Iterate cells in index order
    pub fn cells(&self) -> impl Iterator<Item = Option<Mark>> + '_ {
        self.cells.iter().copied()
    }

    /// Unchecked cell access for in-crate scans over known-valid indices
    pub(crate) fn cell(&self, index: usize) -> Option<Mark> {
        self.cells[index]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for index in 0..CELLS {
            assert_eq!(board.is_empty(index), Ok(true));
        }
        assert!(!board.is_full());
    }

    #[test]
    fn test_place_and_get() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        assert_eq!(board.get(4), Ok(Some(Mark::X)));
        assert_eq!(board.is_empty(4), Ok(false));
    }

    #[test]
    fn test_place_occupied_fails() {
        let mut board = Board::new();
        board.place(0, Mark::X).unwrap();
        assert_eq!(board.place(0, Mark::O), Err(GameError::IllegalMove(0)));
        // The occupant is untouched
        assert_eq!(board.get(0), Ok(Some(Mark::X)));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.get(9), Err(GameError::IndexOutOfRange(9)));
        assert_eq!(board.is_empty(12), Err(GameError::IndexOutOfRange(12)));
        assert_eq!(
            board.place(9, Mark::X),
            Err(GameError::IndexOutOfRange(9))
        );
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new();
        for index in 0..CELLS {
            let mark = if index % 2 == 0 { Mark::X } else { Mark::O };
            board.place(index, mark).unwrap();
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut board = Board::new();
        board.place(0, Mark::X).unwrap();
        board.place(4, Mark::O).unwrap();

        let snap = board.snapshot();
        board.place(8, Mark::X).unwrap();
        board.place(2, Mark::O).unwrap();
        board.restore(&snap);

        // Cell-by-cell identical to the snapshot
        for index in 0..CELLS {
            assert_eq!(board.get(index), snap.get(index));
        }
        assert_eq!(board, snap);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_lines_cover_board() {
        // Every cell participates in at least one line; the center in four
        let mut counts = [0usize; CELLS];
        for line in &LINES {
            for &index in line {
                counts[index] += 1;
            }
        }
        assert!(counts.iter().all(|&c| c >= 2));
        assert_eq!(counts[4], 4);
    }
}
