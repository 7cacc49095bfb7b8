use std::path::PathBuf;

use clap::Parser;

use hearts_cli::config::SimConfig;
use hearts_cli::logging::init_logging;
use hearts_cli::runner::HandRunner;
use hearts_core::AppInfo;
use hearts_core::model::player::PlayerPosition;

/// Plays automatic hands of Hearts and reports each player's penalty score.
#[derive(Debug, Parser)]
#[command(
    name = "hearts-sim",
    author,
    version,
    about = "Single-hand Hearts simulator with automatic players"
)]
struct Cli {
    /// Path to a YAML configuration file (built-in defaults when omitted).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of independent hands to play.
    #[arg(long, value_name = "HANDS")]
    hands: Option<usize>,

    /// Override the master RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Deal the deck in suit-major, rank-ascending order without shuffling.
    #[arg(long)]
    no_shuffle: bool,

    /// Exit after validating the configuration (no hands are played).
    #[arg(long)]
    validate_only: bool,

    /// Print every trick of every hand.
    #[arg(long)]
    print_tricks: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(hands) = cli.hands {
        config.deals.hands = hands;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if cli.no_shuffle {
        config.deals.shuffle = false;
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let hands = config.deals.hands;

    println!(
        "{} {}: loaded configuration '{run_id}' ({hands} hand{})",
        AppInfo::name(),
        AppInfo::version(),
        if hands == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: no hands played.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, outputs.as_ref())?;
    let runner = HandRunner::new(config, outputs);
    println!("Master seed: {}", runner.master_seed());

    let print_tricks = cli.print_tricks;
    let summary = runner.run_with(|outcome| {
        match outcome.deal_seed {
            Some(seed) => println!("Hand {} (deal seed {seed})", outcome.hand_index + 1),
            None => println!("Hand {} (unshuffled deck)", outcome.hand_index + 1),
        }

        if print_tricks {
            for (index, trick) in outcome.game.tricks().iter().enumerate() {
                let plays = trick
                    .plays()
                    .iter()
                    .map(|play| format!("{} {}", play.position, play.card))
                    .collect::<Vec<_>>()
                    .join(", ");
                let winner = trick
                    .winner()
                    .map(|seat| seat.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("  Trick {:>2}: {plays} -> {winner}", index + 1);
            }
        }

        println!("Game over!");
        for seat in PlayerPosition::LOOP {
            println!(
                "Player {} ({seat}) score: {}",
                seat.index() + 1,
                outcome.game.player(seat).calculate_score()
            );
        }
    })?;

    if let Some(path) = summary.jsonl_path.as_ref() {
        println!("Hand log: {}", path.display());
    }
    if let Some(path) = summary.summary_path.as_ref() {
        println!("Summary table: {}", path.display());
    }

    Ok(())
}
