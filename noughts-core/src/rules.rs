//! Win/draw classification and legal-move enumeration
//!
//! Pure functions over a [`Board`]; the outcome is always derived from
//! the cells, never stored.

use crate::board::{Board, Mark, CELLS, LINES};
use serde::{Deserialize, Serialize};

/// Classification of a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    WonBy(Mark),
    Draw,
}

impl Outcome {
    /// True for `WonBy` and `Draw`; terminal boards accept no moves
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Mark holding a completed line, if any.
///
/// Lines are scanned in the fixed order of [`LINES`] (rows, columns,
/// diagonals) and the first match wins. Two distinct winning marks
/// cannot arise under alternating legal play; the scan still finishes
/// cleanly on such a board rather than arbitrating.
pub fn winner(board: &Board) -> Option<Mark> {
    let mut found: Option<Mark> = None;
    for &[a, b, c] in &LINES {
        let mark = match board.cell(a) {
            Some(mark) => mark,
            None => continue,
        };
        if board.cell(b) == Some(mark) && board.cell(c) == Some(mark) {
            debug_assert!(
                found.map_or(true, |f| f == mark),
                "two distinct completed lines on one board"
            );
            if found.is_none() {
                found = Some(mark);
            }
        }
    }
    found
}

/// True iff `mark` holds a completed line
pub fn is_win(board: &Board, mark: Mark) -> bool {
    LINES.iter().any(|&[a, b, c]| {
        board.cell(a) == Some(mark)
            && board.cell(b) == Some(mark)
            && board.cell(c) == Some(mark)
    })
}

/// All empty cell indices, ascending
pub fn legal_moves(board: &Board) -> Vec<usize> {
    (0..CELLS).filter(|&index| board.cell(index).is_none()).collect()
}

/// Classify the board as ongoing, won, or drawn
pub fn classify(board: &Board) -> Outcome {
    match winner(board) {
        Some(mark) => Outcome::WonBy(mark),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::Ongoing,
    }
}
