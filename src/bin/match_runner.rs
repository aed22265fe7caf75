//! Headless Match Runner
//!
//! Runs CPU matches without rendering and prints a JSON or text summary.

use std::process::ExitCode;

use clap::Parser;
use syntax_smash::ai::Difficulty;
use syntax_smash::core::config::{Entrant, MatchConfig};
use syntax_smash::core::error::Result;
use syntax_smash::roster::{load_roster, Roster};
use syntax_smash::simulation::{HeadlessMatch, MatchSummary};

/// Headless Match Runner - CPU vs CPU platform-fighter matches
#[derive(Parser, Debug)]
#[command(name = "match_runner")]
#[command(about = "Run CPU matches headless and print placements and scores")]
struct Args {
    /// Match config TOML (stage, stocks, entrants)
    #[arg(long)]
    config: Option<String>,

    /// Roster TOML; the built-in roster when omitted
    #[arg(long)]
    roster: Option<String>,

    /// Characters to enter when no config is given
    #[arg(long, value_delimiter = ',', default_value = "Rust,Python")]
    fighters: Vec<String>,

    /// Difficulty for every CPU entered with --fighters
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Stocks per fighter (overrides the config)
    #[arg(long)]
    stocks: Option<u32>,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of matches; seeds increase by one per match
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every combat event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => {
            let difficulty = Difficulty::from_name(&args.difficulty).unwrap_or_else(|| {
                eprintln!("Unknown difficulty '{}', using normal", args.difficulty);
                Difficulty::Normal
            });
            MatchConfig {
                entrants: args
                    .fighters
                    .iter()
                    .map(|name| Entrant::cpu(name.trim(), difficulty))
                    .collect(),
                ..Default::default()
            }
        }
    };
    if let Some(stocks) = args.stocks {
        config.starting_stocks = stocks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<Vec<MatchSummary>> {
    let roster = match &args.roster {
        Some(path) => load_roster(path)?,
        None => Roster::builtin(),
    };
    let base = build_config(args)?;

    let mut summaries = Vec::new();
    for i in 0..args.matches.max(1) {
        let config = MatchConfig {
            seed: base.seed.wrapping_add(i as u64),
            ..base.clone()
        };
        let mut game = HeadlessMatch::new(config, &roster)?;
        while !game.is_finished() {
            let events = game.run_frame();
            if args.verbose {
                for event in events.iter() {
                    eprintln!("  [{:>8.0}ms] {:?}", event.time, event.event_type);
                }
            }
        }
        summaries.push(game.summary());
    }
    Ok(summaries)
}

fn print_text(summary: &MatchSummary) {
    println!("Match Result (seed {})", summary.seed);
    println!("=================");
    println!(
        "Duration: {:.1}s over {} frames{}",
        summary.duration_ms / 1000.0,
        summary.frames,
        if summary.timed_out { " (time limit)" } else { "" }
    );
    println!("Hits: {}  KOs: {}", summary.total_hits, summary.total_knockouts);
    println!();
    for result in &summary.results {
        println!(
            "{}. {} {:<12} stocks={} damage={:.0}% score={} (push {:.0}, stage {:.0}, commit {:.0}, bonus {:.0})",
            result.placement,
            result.id,
            result.character,
            result.stocks,
            result.damage,
            result.score,
            result.breakdown.push,
            result.breakdown.stage,
            result.breakdown.commit,
            result.breakdown.bonus
        );
    }
    println!();
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("syntax_smash=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let summaries = match run(&args) {
        Ok(summaries) => summaries,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.format.as_str() {
        "text" => summaries.iter().for_each(print_text),
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            match serde_json::to_string_pretty(&summaries) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }
    ExitCode::SUCCESS
}
