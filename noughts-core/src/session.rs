//! Match control: turn sequencing, engine replies, and the score tally
//!
//! A [`Session`] owns the live board. Moves arrive through
//! [`Session::submit_move`], which validates, applies, classifies, and
//! (against the engine) answers within the same call, so no partial
//! turn is ever observable.

use crate::board::{Board, Mark};
use crate::engine::{Difficulty, Engine};
use crate::error::GameError;
use crate::rules::{classify, Outcome};
use serde::{Deserialize, Serialize};

/// Mark the automated side plays in [`Mode::VsEngine`]
pub const ENGINE_MARK: Mark = Mark::O;

/// Opponent selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Human plays X, the engine answers as O
    VsEngine,
    /// Two humans alternate marks
    TwoPlayer,
}

impl Mode {
    /// Parse a mode name ("vs-engine", "two-player")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vs-engine" => Some(Mode::VsEngine),
            "two-player" => Some(Mode::TwoPlayer),
            _ => None,
        }
    }
}

/// Cumulative wins per mark. Survives board resets; only
/// [`Session::reset_score`] clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub x: u32,
    pub o: u32,
}

/// A mark placed on the board during one `submit_move` call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub index: usize,
    pub mark: Mark,
}

/// What one `submit_move` call did: the applied moves (the submitted
/// one, plus the engine reply when there was one) and the resulting
/// outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub moves: Vec<AppliedMove>,
    pub outcome: Outcome,
}

/// Match controller
pub struct Session {
    board: Board,
    to_move: Mark,
    mode: Mode,
    difficulty: Difficulty,
    score: Score,
    engine: Engine,
}

impl Session {
    /// New session with the stock defaults: vs-engine, medium
    pub fn new() -> Self {
        Self::with_engine(Engine::new())
    }

    /// New session with a seeded engine, for reproducible play
    pub fn with_seed(seed: u64) -> Self {
        Self::with_engine(Engine::with_seed(seed))
    }

    fn with_engine(engine: Engine) -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            mode: Mode::VsEngine,
            difficulty: Difficulty::Medium,
            score: Score::default(),
            engine,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current classification, recomputed from the board
    pub fn outcome(&self) -> Outcome {
        classify(&self.board)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Mark whose move is accepted next
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    // ========================================================================
    // MOVE SUBMISSION
    // ========================================================================

    /// Apply the submitter's move at `index`, then the engine reply when
    /// the mode calls for one.
    ///
    /// Rejects with `IllegalMove` when the match is already terminal or,
    /// vs the engine, when it is not the human's turn. The board is
    /// untouched on any error.
    pub fn submit_move(&mut self, index: usize) -> Result<TurnReport, GameError> {
        if self.outcome().is_terminal() {
            return Err(GameError::IllegalMove(index));
        }
        if self.mode == Mode::VsEngine && self.to_move == ENGINE_MARK {
            // The engine reply happens inside this call, so input is only
            // ever accepted while the human side is on the move.
            return Err(GameError::IllegalMove(index));
        }

        self.board.place(index, self.to_move)?;
        let mut moves = vec![AppliedMove {
            index,
            mark: self.to_move,
        }];
        let mut outcome = classify(&self.board);

        match self.mode {
            Mode::TwoPlayer => {
                if outcome == Outcome::Ongoing {
                    self.to_move = self.to_move.opponent();
                }
            }
            Mode::VsEngine => {
                if outcome == Outcome::Ongoing {
                    let reply = self
                        .engine
                        .choose(&self.board, ENGINE_MARK, self.difficulty)?;
                    self.board.place(reply, ENGINE_MARK)?;
                    moves.push(AppliedMove {
                        index: reply,
                        mark: ENGINE_MARK,
                    });
                    outcome = classify(&self.board);
                }
            }
        }

        self.record(outcome);
        Ok(TurnReport { moves, outcome })
    }

    // ========================================================================
    // SETTINGS AND RESETS
    // ========================================================================

    /// Select the opponent. Always resets the board, never the score.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset_board();
    }

    /// Select the engine strength; takes effect on the next reply
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Clear the board and hand the move back to X. The score tally is
    /// left untouched.
    pub fn reset_board(&mut self) {
        self.board = Board::new();
        self.to_move = Mark::X;
    }

    /// Zero both win counters
    pub fn reset_score(&mut self) {
        self.score = Score::default();
    }

    /// Bump the tally on a decisive outcome. Terminal boards reject
    /// further submissions, so this fires at most once per game.
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::WonBy(Mark::X) => self.score.x += 1,
            Outcome::WonBy(Mark::O) => self.score.o += 1,
            Outcome::Ongoing | Outcome::Draw => {}
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
