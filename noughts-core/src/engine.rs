//! Automated opponent
//!
//! Three strengths over the same interface:
//! - `Easy`: uniform random over the legal moves
//! - `Medium`: take an immediate win, else block the opponent's
//!   immediate win, else random. One ply only; fork-blind on purpose.
//! - `Hard`: exhaustive minimax over the remaining game tree, ties
//!   resolved to the lowest index.
//!
//! The engine is stateless between calls apart from its RNG stream;
//! `Hard` never consults the RNG at all.

use crate::board::{Board, Mark};
use crate::error::GameError;
use crate::rules::{classify, is_win, legal_moves, Outcome};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Opponent strength
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a tier name ("easy", "medium", "hard")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Deterministic fallback when no entropy source is available
const FALLBACK_SEED: u64 = 42;

/// Automated opponent with an injected, seedable random source
pub struct Engine {
    rng: ChaCha8Rng,
}

impl Engine {
    pub fn new() -> Self {
        let rng = ChaCha8Rng::from_rng(rand::thread_rng())
            .unwrap_or_else(|_| ChaCha8Rng::seed_from_u64(FALLBACK_SEED));
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick one legal index for `mark` at the given strength.
    ///
    /// Fails with `NoLegalMoves` on a full board; the caller checks
    /// terminality before invoking the engine.
    pub fn choose(
        &mut self,
        board: &Board,
        mark: Mark,
        difficulty: Difficulty,
    ) -> Result<usize, GameError> {
        match difficulty {
            Difficulty::Easy => self.random_move(board),
            Difficulty::Medium => self.heuristic_move(board, mark),
            Difficulty::Hard => best_move(board, mark),
        }
    }

    fn random_move(&mut self, board: &Board) -> Result<usize, GameError> {
        legal_moves(board)
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalMoves)
    }

    /// Win if possible, else block, else random
    fn heuristic_move(&mut self, board: &Board, mark: Mark) -> Result<usize, GameError> {
        let mut scratch = board.snapshot();
        if let Some(index) = completing_move(&mut scratch, mark)? {
            return Ok(index);
        }
        if let Some(index) = completing_move(&mut scratch, mark.opponent())? {
            return Ok(index);
        }
        self.random_move(board)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowest empty index that completes a line for `mark`, if any
fn completing_move(board: &mut Board, mark: Mark) -> Result<Option<usize>, GameError> {
    for index in legal_moves(board) {
        let snap = board.snapshot();
        board.place(index, mark)?;
        let wins = is_win(board, mark);
        board.restore(&snap);
        if wins {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Exhaustive minimax from the root; ties resolve to the lowest index
/// because candidates are scanned ascending and only a strictly better
/// score replaces the incumbent.
fn best_move(board: &Board, mark: Mark) -> Result<usize, GameError> {
    let moves = legal_moves(board);
    let mut best_index = *moves.first().ok_or(GameError::NoLegalMoves)?;
    let mut best_score = i32::MIN;

    let mut scratch = board.snapshot();
    for index in moves {
        let snap = scratch.snapshot();
        scratch.place(index, mark)?;
        let score = minimax(&mut scratch, mark.opponent(), mark)?;
        scratch.restore(&snap);

        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }

    Ok(best_index)
}

/// Score a position for `engine_mark` with `to_move` next to play.
///
/// Terminal values: +1 engine win, -1 opponent win, 0 draw. The tree
/// is at most 9 plies deep, so the search runs unbounded.
fn minimax(board: &mut Board, to_move: Mark, engine_mark: Mark) -> Result<i32, GameError> {
    match classify(board) {
        Outcome::WonBy(mark) => {
            return Ok(if mark == engine_mark { 1 } else { -1 });
        }
        Outcome::Draw => return Ok(0),
        Outcome::Ongoing => {}
    }

    let maximizing = to_move == engine_mark;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for index in legal_moves(board) {
        let snap = board.snapshot();
        board.place(index, to_move)?;
        let score = minimax(board, to_move.opponent(), engine_mark)?;
        board.restore(&snap);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    Ok(best)
}
