//! Noughts CLI - command-line interface
//!
//! Commands:
//! - play: interactive game against the engine or a second human
//! - selfplay: engine-vs-engine batch with aggregate statistics

mod play_cmd;
mod selfplay_cmd;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(about = "Noughts and crosses with a three-tier automated opponent")]
struct Cli {
    /// RNG seed for reproducible engine play
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play(play_cmd::PlayArgs),
    /// Play engine-vs-engine games and report statistics
    Selfplay(selfplay_cmd::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Selfplay(args) => selfplay_cmd::run(args, cli.seed),
    }
}
