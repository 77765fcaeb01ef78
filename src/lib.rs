//! Scrim Elo - ratings and team balancing for ad-hoc 5v5 games
//!
//! This crate provides an Elo variant that rates teams on their summed
//! ratings and shares the result among players by performance, plus an
//! exhaustive team balancer that finds the most even split of a small pool.

pub mod balance;
pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{EloError, Result};
pub use types::*;

// Re-export key components
pub use balance::{greedy_balance, select_by_id, select_by_rank, TeamBalancer};
pub use config::{AppConfig, BalanceConfig, RatingConfig};
pub use rating::{InMemoryRoster, League, RatingEngine, RevertOutcome, Roster};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
