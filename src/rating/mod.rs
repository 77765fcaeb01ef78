//! Elo rating updates for team matches
//!
//! This module provides K selection from the round score, the team-level Elo
//! computation, the two intra-team distribution policies, and the roster and
//! history plumbing needed to record and revert matches.

pub mod distribution;
pub mod engine;
pub mod history;
pub mod league;
pub mod roster;
pub mod volatility;

// Re-export commonly used types
pub use distribution::{
    PerformanceExpectation, PerformanceWeightedDistributor, ProportionalDistributor,
    RatingDistributor,
};
pub use engine::{expected_score, team_delta, RatingEngine, RevertOutcome};
pub use history::MatchHistory;
pub use league::League;
pub use roster::{InMemoryRoster, Roster, RosterEntry};
pub use volatility::determine_k;
