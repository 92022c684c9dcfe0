//! Headless reactor simulator CLI.
//!
//! Runs accelerated sessions without timers to study drain and rage pacing.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                              # 100 active runs, feed below 30%
//!   cargo run --bin simulate -- -a combat --policy never  # Time a full combat drain
//!   cargo run --bin simulate -- --policy random=0.002 -s 42

use anyhow::{Context, Result};
use clap::Parser;
use demon_fuel::core::ActivityLevel;
use demon_fuel::simulator::{run_simulation, FeedPolicy, SimConfig};
use demon_fuel::telemetry::{self, LogTarget};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Headless demon fuel reactor simulator")]
struct Args {
    /// Number of simulation runs
    #[arg(short = 'n', long, default_value_t = 100)]
    runs: u32,

    /// Ticks simulated per run
    #[arg(short, long, default_value_t = 36_000)]
    ticks: u64,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Feeding policy: never, threshold=N or random=P
    #[arg(short, long, default_value = "threshold=30", value_parser = parse_policy)]
    policy: FeedPolicy,

    /// Activity level held for every run: idle, active or combat
    #[arg(short, long, default_value = "active")]
    activity: ActivityLevel,

    /// Run with moonlight mode on
    #[arg(short, long)]
    moonlight: bool,

    /// Log progress: -v start and finish, -vv each run, -vvv reactor events
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also save the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_policy(s: &str) -> Result<FeedPolicy, String> {
    let s = s.trim().to_ascii_lowercase();
    if s == "never" {
        return Ok(FeedPolicy::Never);
    }
    let (kind, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected never, threshold=N or random=P, got {s:?}"))?;
    let value: f64 = value
        .parse()
        .map_err(|_| format!("not a number: {value:?}"))?;
    match kind {
        "threshold" if (0.0..=100.0).contains(&value) => Ok(FeedPolicy::Threshold { below: value }),
        "random" if (0.0..=1.0).contains(&value) => Ok(FeedPolicy::Random { chance: value }),
        "threshold" => Err("threshold must be within 0..=100".to_string()),
        "random" => Err("random chance must be within 0..=1".to_string()),
        other => Err(format!("unknown policy {other:?}")),
    }
}

/// Maps the `-v` count to the runner's verbosity and the subscriber level.
fn log_settings(verbose: u8) -> (u8, Level) {
    match verbose {
        0 => (0, Level::WARN),
        1 => (1, Level::INFO),
        2 => (2, Level::INFO),
        _ => (2, Level::DEBUG),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (verbosity, level) = log_settings(args.verbose);
    telemetry::init(level, LogTarget::Stderr).context("installing logger")?;

    let config = SimConfig {
        runs: args.runs,
        ticks_per_run: args.ticks,
        seed: args.seed,
        policy: args.policy,
        activity: args.activity,
        moonlight: args.moonlight,
        verbosity,
    };

    if !args.json {
        print_header(&config);
    }

    let report = run_simulation(&config);

    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }

    if let Some(path) = args.output {
        std::fs::write(&path, report.to_json())
            .with_context(|| format!("writing report to {}", path.display()))?;
        eprintln!("JSON report saved to: {}", path.display());
    }

    Ok(())
}

fn print_header(config: &SimConfig) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DEMON FUEL REACTOR SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.runs);
    println!("  Ticks per Run:  {}", config.ticks_per_run);
    println!("  Activity:       {}", config.activity);
    println!("  Moonlight:      {}", config.moonlight);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();
}
