//! Noughts Core - game state and automated opponent
//!
//! This crate provides the core logic for noughts and crosses:
//! - Board state (3x3 grid, row-major indices 0-8)
//! - Win/draw classification over the 8 fixed lines
//! - Automated opponent at three strengths (random, one-ply
//!   win/block heuristic, exhaustive minimax)
//! - Match control: turn sequencing, engine replies, score tally

pub mod board;
pub mod engine;
pub mod error;
pub mod rules;
pub mod session;

// Re-exports for convenient access
pub use board::{Board, Mark, CELLS, LINES};
pub use engine::{Difficulty, Engine};
pub use error::GameError;
pub use rules::{classify, is_win, legal_moves, winner, Outcome};
pub use session::{AppliedMove, Mode, Score, Session, TurnReport, ENGINE_MARK};
