//! Selfplay command - engine-vs-engine batches
//!
//! Pits two difficulty tiers against each other over many games,
//! alternating which tier takes X for fairness, and reports aggregate
//! win/draw statistics as text or JSON.

use anyhow::{anyhow, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use noughts_core::{classify, Board, Difficulty, Engine, Mark, Outcome};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play (tiers alternate who takes X)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// First tier: "easy", "medium", or "hard"
    #[arg(long, default_value = "hard")]
    pub first: String,

    /// Second tier
    #[arg(long, default_value = "easy")]
    pub second: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    moves: u32,
    /// Mark the first tier played this game
    first_mark: Mark,
}

/// Aggregated results over the batch
#[derive(Clone, Debug)]
struct BatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
}

/// Run selfplay command
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let (first, second) = parse_tiers(&args)?;

    tracing::info!(
        "starting selfplay: {:?} vs {:?} ({} games)",
        first,
        second,
        args.games
    );

    let results = play_batch(first, second, args.games, seed)?;

    if args.json {
        print_json_results(first, second, &results)?;
    } else {
        print_text_results(first, second, &results);
    }

    Ok(())
}

/// Resolve both tier names
fn parse_tiers(args: &SelfplayArgs) -> Result<(Difficulty, Difficulty)> {
    let first = Difficulty::from_name(&args.first)
        .ok_or_else(|| anyhow!("unknown difficulty: {}", args.first))?;
    let second = Difficulty::from_name(&args.second)
        .ok_or_else(|| anyhow!("unknown difficulty: {}", args.second))?;
    Ok((first, second))
}

/// Play all games in the batch
fn play_batch(
    first: Difficulty,
    second: Difficulty,
    games: usize,
    seed: Option<u64>,
) -> Result<BatchResults> {
    let mut rng = create_rng(seed);
    let mut records = Vec::with_capacity(games);

    for game_num in 0..games {
        // Alternate who takes X for fairness
        let first_mark = if game_num % 2 == 0 { Mark::X } else { Mark::O };
        let mut engine = Engine::with_seed(rng.gen());

        let record = play_single_game(&mut engine, first, second, first_mark, game_num + 1)?;

        tracing::info!(
            "game {}: {:?} in {} moves",
            record.game_number,
            record.outcome,
            record.moves
        );

        records.push(record);
    }

    Ok(compute_batch_statistics(records))
}

/// Play one game to completion, both sides driven by the engine
fn play_single_game(
    engine: &mut Engine,
    first: Difficulty,
    second: Difficulty,
    first_mark: Mark,
    game_number: usize,
) -> Result<GameRecord> {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    let mut moves = 0u32;

    while classify(&board) == Outcome::Ongoing {
        let difficulty = if to_move == first_mark { first } else { second };
        let index = engine.choose(&board, to_move, difficulty)?;
        board.place(index, to_move)?;
        moves += 1;
        to_move = to_move.opponent();
    }

    Ok(GameRecord {
        game_number,
        outcome: classify(&board),
        moves,
        first_mark,
    })
}

/// Compute aggregate statistics from game records
fn compute_batch_statistics(games: Vec<GameRecord>) -> BatchResults {
    let first_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::WonBy(g.first_mark))
        .count();
    let second_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::WonBy(g.first_mark.opponent()))
        .count();
    let draws = games
        .iter()
        .filter(|g| g.outcome == Outcome::Draw)
        .count();

    let total_moves: u32 = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    BatchResults {
        games,
        first_wins,
        second_wins,
        draws,
        avg_moves,
    }
}

/// Create RNG from seed or entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print results as JSON
fn print_json_results(first: Difficulty, second: Difficulty, results: &BatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: Outcome,
        moves: u32,
        first_mark: Mark,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: Difficulty,
        second: Difficulty,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        first,
        second,
        total_games: results.games.len(),
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: g.outcome,
                moves: g.moves,
                first_mark: g.first_mark,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(first: Difficulty, second: Difficulty, results: &BatchResults) {
    let total = results.games.len();
    let pct = |n: usize| {
        if total > 0 {
            n as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Selfplay Results ===");
    println!("{:?} vs {:?}, {} games", first, second, total);
    println!("{:?} wins:  {} ({:.1}%)", first, results.first_wins, pct(results.first_wins));
    println!("{:?} wins:  {} ({:.1}%)", second, results.second_wins, pct(results.second_wins));
    println!("Draws:      {} ({:.1}%)", results.draws, pct(results.draws));
    println!("Avg moves:  {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves ({:?} played {:?})",
            game.game_number, game.outcome, game.moves, first, game.first_mark
        );
    }
}
