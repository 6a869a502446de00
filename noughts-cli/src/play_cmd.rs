//! Play command - interactive game in the terminal
//!
//! Drives a `Session` from stdin: cell indices make moves, a handful of
//! commands cover the reset/mode/difficulty controls. Illegal input is
//! reported and ignored; the session state never corrupts.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use noughts_core::{
    Board, Difficulty, GameError, Mark, Mode, Outcome, Session, TurnReport,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Opponent: "vs-engine" or "two-player"
    #[arg(long, default_value = "vs-engine")]
    pub mode: String,

    /// Engine strength: "easy", "medium", or "hard"
    #[arg(long, default_value = "medium")]
    pub difficulty: String,
}

/// One parsed line of player input
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Move(usize),
    ResetBoard,
    ResetScore,
    SetDifficulty(Difficulty),
    SetMode(Mode),
    Quit,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let mut session = create_session(&args, seed)?;

    println!("Enter a cell index (0-8), or one of:");
    println!("  reset | reset-score | mode <vs-engine|two-player> | difficulty <easy|medium|hard> | quit");

    let stdin = io::stdin();
    render(&session);
    prompt(&session)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!("ignoring input {:?}: {}", line.trim(), err);
                println!("? {}", err);
                prompt(&session)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Move(index) => match session.submit_move(index) {
                Ok(report) => {
                    report_turn(&report);
                    render(&session);
                    if report.outcome.is_terminal() {
                        report_game_over(&session, report.outcome);
                    }
                }
                Err(err) => {
                    // Recoverable by design: the move was simply not applied
                    tracing::warn!("rejected move {}: {}", index, err);
                    println!("? {}", describe_rejection(err));
                }
            },
            Command::ResetBoard => {
                session.reset_board();
                println!("board cleared, X to move");
                render(&session);
            }
            Command::ResetScore => {
                session.reset_score();
                println!("score cleared");
            }
            Command::SetDifficulty(difficulty) => {
                session.set_difficulty(difficulty);
                println!("difficulty set to {:?}", difficulty);
            }
            Command::SetMode(mode) => {
                // Mode changes restart the game but keep the score
                session.set_mode(mode);
                println!("mode set to {:?}, board cleared", mode);
                render(&session);
            }
        }

        prompt(&session)?;
    }

    let score = session.score();
    println!("final score: X {} - O {}", score.x, score.o);
    Ok(())
}

/// Build the session from command arguments
fn create_session(args: &PlayArgs, seed: Option<u64>) -> Result<Session> {
    let mode = Mode::from_name(&args.mode)
        .ok_or_else(|| anyhow!("unknown mode: {}", args.mode))?;
    let difficulty = Difficulty::from_name(&args.difficulty)
        .ok_or_else(|| anyhow!("unknown difficulty: {}", args.difficulty))?;

    let mut session = match seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    };
    session.set_mode(mode);
    session.set_difficulty(difficulty);

    tracing::info!("new session: mode={:?}, difficulty={:?}", mode, difficulty);
    Ok(session)
}

/// Parse one input line
fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.trim().split_whitespace();
    let head = words.next().ok_or_else(|| anyhow!("empty input"))?;

    let command = match head {
        "quit" | "q" => Command::Quit,
        "reset" => Command::ResetBoard,
        "reset-score" => Command::ResetScore,
        "difficulty" => {
            let name = words.next().ok_or_else(|| anyhow!("difficulty needs a tier name"))?;
            let tier = Difficulty::from_name(name)
                .ok_or_else(|| anyhow!("unknown difficulty: {}", name))?;
            Command::SetDifficulty(tier)
        }
        "mode" => {
            let name = words.next().ok_or_else(|| anyhow!("mode needs a name"))?;
            let mode = Mode::from_name(name)
                .ok_or_else(|| anyhow!("unknown mode: {}", name))?;
            Command::SetMode(mode)
        }
        other => {
            let index: usize = other
                .parse()
                .map_err(|_| anyhow!("expected a cell index or command, got {:?}", other))?;
            Command::Move(index)
        }
    };

    Ok(command)
}

/// One printable line per applied move
fn report_turn(report: &TurnReport) {
    for applied in &report.moves {
        println!("{} -> cell {}", mark_char(Some(applied.mark)), applied.index);
    }
}

fn report_game_over(session: &Session, outcome: Outcome) {
    match outcome {
        Outcome::WonBy(mark) => println!("{} wins!", mark_char(Some(mark))),
        Outcome::Draw => println!("it's a draw"),
        Outcome::Ongoing => {}
    }
    let score = session.score();
    println!("score: X {} - O {}", score.x, score.o);
    println!("type 'reset' to play again");
}

fn describe_rejection(err: GameError) -> String {
    match err {
        GameError::IndexOutOfRange(index) => format!("cell {} is off the board (use 0-8)", index),
        GameError::IllegalMove(index) => format!("cell {} is not playable right now", index),
        GameError::NoLegalMoves => "the board is full".to_string(),
    }
}

fn prompt(session: &Session) -> Result<()> {
    if !session.outcome().is_terminal() {
        print!("{} to move> ", mark_char(Some(session.to_move())));
    } else {
        print!("> ");
    }
    io::stdout().flush().context("failed to flush stdout")?;
    Ok(())
}

fn render(session: &Session) {
    println!("{}", render_board(session.board()));
}

/// ASCII grid, row-major
fn render_board(board: &Board) -> String {
    let cells: Vec<char> = board.cells().map(mark_char).collect();
    let mut out = String::new();
    for row in 0..3 {
        out.push_str(&format!(
            " {} | {} | {}\n",
            cells[row * 3],
            cells[row * 3 + 1],
            cells[row * 3 + 2]
        ));
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

fn mark_char(cell: Option<Mark>) -> char {
    match cell {
        Some(Mark::X) => 'X',
        Some(Mark::O) => 'O',
        None => '.',
    }
}
