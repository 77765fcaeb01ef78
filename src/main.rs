//! Command-line entry point for scrim-elo
//!
//! Reads match results and player pools as JSON, runs the rating engine or
//! the team balancer, and prints the result as JSON. Storage of rosters and
//! history is left to whoever calls this.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scrim_elo::balance::{select_by_rank, TeamBalancer};
use scrim_elo::config::AppConfig;
use scrim_elo::rating::{InMemoryRoster, RatingEngine};
use scrim_elo::types::{MatchHistoryEntry, MatchResult, PoolPlayer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Scrim Elo - rating updates and team balancing for 5v5 scrims
#[derive(Parser)]
#[command(
    name = "scrim-elo",
    version,
    about = "Elo rating updates and team balancing for ad-hoc 5v5 games",
    long_about = "Scrim Elo rates team matches on summed player ratings, scales each \
                 player's share by in-match performance, and proposes the most evenly \
                 matched team splits for a pool of players."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running a command")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a match
    Update {
        /// Match result JSON file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Undo a recorded match against a roster
    Revert {
        /// Match history entry JSON file
        #[arg(short, long, value_name = "FILE")]
        entry: PathBuf,
        /// Roster JSON file (list of name and rating)
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,
    },
    /// Rank the most balanced splits of a pool
    Balance {
        /// Player pool JSON file (list of name and rating)
        #[arg(short, long, value_name = "FILE")]
        pool: PathBuf,
        /// Number of options to return
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Split a pool with the greedy heuristic
    Greedy {
        /// Player pool JSON file (list of name and rating)
        #[arg(short, long, value_name = "FILE")]
        pool: PathBuf,
    },
    /// Balance a pool and print the team lists of one ranked option
    Select {
        /// Player pool JSON file (list of name and rating)
        #[arg(short, long, value_name = "FILE")]
        pool: PathBuf,
        /// 1-based rank of the option to use
        #[arg(short, long)]
        rank: usize,
    },
    /// Show the volatility factor for a round score
    K {
        #[arg(long)]
        rounds_one: u32,
        #[arg(long)]
        rounds_two: u32,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    scrim_elo::config::validate_config(&config)?;
    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Update { input } => {
            let engine = RatingEngine::new(config.rating.clone())?;
            let result: MatchResult = read_json(&input)?;
            let update = engine.update_ratings(&result)?;
            print_json(&update)
        }
        Commands::Revert { entry, roster } => {
            let engine = RatingEngine::new(config.rating.clone())?;
            let entry: MatchHistoryEntry = read_json(&entry)?;
            let players: Vec<PoolPlayer> = read_json(&roster)?;
            let mut roster =
                InMemoryRoster::from_ratings(players.into_iter().map(|p| (p.name, p.rating)));

            let outcome = engine.revert_match(&entry, &mut roster);
            print_json(&serde_json::json!({
                "outcome": outcome,
                "roster": roster.standings(),
            }))
        }
        Commands::Balance { pool, top } => {
            let balancer = TeamBalancer::new(config.balance.clone())?;
            let pool: Vec<PoolPlayer> = read_json(&pool)?;
            let top = top.unwrap_or(config.balance.top_n_options);
            let splits = balancer.propose_balanced_teams(&pool, top)?;
            print_json(&splits)
        }
        Commands::Greedy { pool } => {
            let balancer = TeamBalancer::new(config.balance.clone())?;
            let pool: Vec<PoolPlayer> = read_json(&pool)?;
            print_json(&balancer.greedy(&pool))
        }
        Commands::Select { pool, rank } => {
            let balancer = TeamBalancer::new(config.balance.clone())?;
            let pool: Vec<PoolPlayer> = read_json(&pool)?;
            let splits = balancer.propose(&pool)?;
            print_json(&select_by_rank(&splits, rank)?)
        }
        Commands::K {
            rounds_one,
            rounds_two,
        } => {
            let engine = RatingEngine::new(config.rating.clone())?;
            let k = engine.determine_k(rounds_one, rounds_two)?;
            print_json(&serde_json::json!({ "k": k }))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!("Loaded configuration: {:?}", config);

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    match args.command {
        Some(command) => run(command, &config),
        None => {
            info!(
                "{} {}: no command given, see --help",
                config.service.name,
                scrim_elo::VERSION
            );
            Ok(())
        }
    }
}
