//! Core error types

use thiserror::Error;

/// Validation failure for a submitted move or an engine invocation.
///
/// All variants are recoverable: the board is never left partially
/// mutated, so the caller can simply discard the input and retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell index {0} is outside the 3x3 board")]
    IndexOutOfRange(usize),

    #[error("illegal move at cell {0}")]
    IllegalMove(usize),

    #[error("no legal moves remain")]
    NoLegalMoves,
}
