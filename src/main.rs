use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use tracing::info;

use trouble::{
    simulation::{SimulationConfig, WinnerSink, run_batch},
    trouble::{DiceMode, StrategyKind},
};

/// Plays many games of Trouble and records who wins
#[derive(Parser, Debug)]
#[command(name = "trouble")]
#[command(about = "Compare Trouble strategies over many simulated games", long_about = None)]
struct Args {
    /// How many games to run
    #[arg(long, default_value_t = 10)]
    games: u64,

    /// Result file, one winner per line
    #[arg(long, default_value = "results.txt")]
    out: PathBuf,

    /// Trace every roll and board
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Dice model
    #[arg(long, value_enum, default_value_t = DiceMode::Mechanism)]
    dice: DiceMode,

    /// Base seed for the per-game random streams
    #[arg(long)]
    seed: Option<u64>,

    /// Abort if a game has no winner after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Strategies for Red, Purple, White and Blue
    #[arg(long, value_enum, num_args = 4, default_values_t = StrategyKind::DEFAULT_LINEUP)]
    players: Vec<StrategyKind>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let lineup: [StrategyKind; 4] = args
        .players
        .as_slice()
        .try_into()
        .map_err(|_| format!("expected 4 strategies, got {}", args.players.len()))?;

    let config = SimulationConfig {
        games: args.games,
        dice: args.dice,
        lineup,
        seed: args.seed,
        round_limit: args.max_rounds,
    };

    let sink = WinnerSink::new(BufWriter::new(File::create(&args.out)?));
    let tally = run_batch(&config, &sink)?;
    sink.into_inner()?;

    info!(out = %args.out.display(), "results written");
    println!("============================================");
    print!("{tally}");
    println!("============================================");

    Ok(())
}
