//! Elo rating engine for team matches
//!
//! Teams are rated on their summed ratings. The round score picks the
//! volatility factor, the classic Elo expectation gives a single rounded
//! team delta, and the configured [`RatingDistributor`] shares it out.

use crate::config::{DistributionPolicy, RatingConfig};
use crate::error::{EloError, Result};
use crate::rating::distribution::{
    performance_expectations, PerformanceWeightedDistributor, ProportionalDistributor,
    RatingDistributor,
};
use crate::rating::roster::Roster;
use crate::rating::volatility;
use crate::types::{
    HistoryRecord, MatchHistoryEntry, MatchId, MatchResult, PlayerUpdate, RatingChange,
    RatingUpdate, Team, MAX_TEAM_SIZE,
};
use crate::utils::{current_timestamp, generate_match_id, round_half_up};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Result of reverting a recorded match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevertOutcome {
    pub match_id: MatchId,
    /// Players whose rating was put back
    pub restored_players: Vec<RatingChange>,
    /// Recorded players the roster no longer knows
    #[serde(serialize_with = "serialize_warnings")]
    pub warnings: Vec<EloError>,
}

fn serialize_warnings<S>(warnings: &[EloError], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(warnings.iter().map(|w| w.to_string()))
}

/// Elo expectation of a team with `rating` facing a team with `opponent_rating`
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / 400.0))
}

/// Rounded team delta for volatility `k`
pub fn team_delta(k: f64, outcome: f64, expected: f64) -> i64 {
    round_half_up(k * (outcome - expected))
}

/// Check team sizes, names and numeric fields before rating a match
pub fn validate_match(result: &MatchResult) -> Result<()> {
    for (label, team) in [("Team one", &result.team_one), ("Team two", &result.team_two)] {
        if team.is_empty() {
            return Err(EloError::InvalidMatch {
                reason: format!("{} has no players", label),
            }
            .into());
        }
        if team.len() > MAX_TEAM_SIZE {
            return Err(EloError::InvalidMatch {
                reason: format!(
                    "{} has {} players, at most {} allowed",
                    label,
                    team.len(),
                    MAX_TEAM_SIZE
                ),
            }
            .into());
        }
    }

    let mut seen = HashSet::new();
    for player in result.players() {
        if player.name.trim().is_empty() {
            return Err(EloError::InvalidMatch {
                reason: "Player name cannot be empty".to_string(),
            }
            .into());
        }
        if !seen.insert(player.name.as_str()) {
            return Err(EloError::InvalidMatch {
                reason: format!("Player {} appears more than once", player.name),
            }
            .into());
        }
        if !player.pre_rating.is_finite() || !player.performance_score.is_finite() {
            return Err(EloError::InvalidMatch {
                reason: format!("Player {} has a non-finite rating or score", player.name),
            }
            .into());
        }
        if !(player.percentile_weight > 0.0 && player.percentile_weight <= 1.0) {
            return Err(EloError::InvalidMatch {
                reason: format!(
                    "Player {} has percentile weight {} outside (0, 1]",
                    player.name, player.percentile_weight
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Computes post-match ratings for both teams of a match
#[derive(Debug)]
pub struct RatingEngine {
    config: RatingConfig,
    distributor: Box<dyn RatingDistributor>,
}

impl RatingEngine {
    /// Create an engine using the distribution policy named in the config
    pub fn new(config: RatingConfig) -> Result<Self> {
        let distributor = distributor_for(&config);
        Self::with_distributor(config, distributor)
    }

    /// Create an engine with an explicit distributor
    pub fn with_distributor(
        config: RatingConfig,
        distributor: Box<dyn RatingDistributor>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            distributor,
        })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn distributor_name(&self) -> &'static str {
        self.distributor.name()
    }

    /// Volatility factor for a round score using the configured buckets
    pub fn determine_k(&self, rounds_one: u32, rounds_two: u32) -> Result<f64> {
        volatility::determine_k(
            rounds_one,
            rounds_two,
            &self.config.k_buckets,
            self.config.default_k,
        )
    }

    /// Rate a match and produce its history entry
    ///
    /// Pure computation; nothing is written anywhere. Fails with
    /// [`EloError::InvalidMatch`] for malformed line-ups and
    /// [`EloError::DivisionUndefined`] for a 0-0 score.
    pub fn update_ratings(&self, result: &MatchResult) -> Result<RatingUpdate> {
        validate_match(result)?;

        let k = self.determine_k(result.team_one_rounds_won, result.team_two_rounds_won)?;
        let outcome = result.team_one_outcome();
        let team_one_rating = result.team_one.total_rating();
        let team_two_rating = result.team_two.total_rating();
        let expected = expected_score(team_one_rating, team_two_rating);

        let team_one_delta = team_delta(k, outcome, expected);
        let team_two_delta = -team_one_delta;

        debug!(
            "Team ratings {} vs {}, expected {:.4}, outcome {}, deltas {}/{}",
            team_one_rating, team_two_rating, expected, outcome, team_one_delta, team_two_delta
        );

        let team_one = self.distribute(&result.team_one, team_one_delta, outcome);
        let team_two = self.distribute(&result.team_two, team_two_delta, 1.0 - outcome);

        let history_entry = MatchHistoryEntry {
            match_id: generate_match_id(),
            timestamp: current_timestamp(),
            team_one: team_one.iter().map(HistoryRecord::from).collect(),
            team_two: team_two.iter().map(HistoryRecord::from).collect(),
            team_one_rounds_won: result.team_one_rounds_won,
            team_two_rounds_won: result.team_two_rounds_won,
        };

        info!(
            "Rated {}-{} match {} with K={} using {} distribution",
            result.team_one_rounds_won,
            result.team_two_rounds_won,
            history_entry.match_id,
            k,
            self.distributor.name()
        );

        Ok(RatingUpdate {
            team_one_rating,
            team_two_rating,
            k,
            expected_score: expected,
            outcome,
            team_one_delta,
            team_two_delta,
            team_one,
            team_two,
            history_entry,
        })
    }

    fn distribute(&self, team: &Team, team_delta: i64, outcome: f64) -> Vec<PlayerUpdate> {
        let expectations = performance_expectations(team, self.config.responsibility_factor);
        let deltas = self
            .distributor
            .distribute(team, &expectations, team_delta, outcome);

        team.iter()
            .zip(expectations)
            .zip(deltas)
            .map(|((player, expectation), rating_delta)| PlayerUpdate {
                name: player.name.clone(),
                pre_rating: player.pre_rating,
                performance_score: player.performance_score,
                weighted_percentile: expectation.weighted_percentile,
                expected_performance: expectation.expected_performance,
                performance_delta: expectation.performance_delta,
                rating_delta,
                post_rating: player.pre_rating + rating_delta,
            })
            .collect()
    }

    /// Restore every recorded player to their pre-match rating
    ///
    /// Best effort: a player missing from the roster is reported in
    /// `warnings` and the remaining players are still restored.
    pub fn revert_match<R: Roster + ?Sized>(
        &self,
        entry: &MatchHistoryEntry,
        roster: &mut R,
    ) -> RevertOutcome {
        let mut restored_players = Vec::new();
        let mut warnings = Vec::new();

        for record in entry.records() {
            let current = roster.get_player(&record.name).map(|p| p.rating);
            match current {
                Some(old_rating) => match roster.restore_rating(&record.name, record.pre_rating) {
                    Ok(()) => restored_players.push(RatingChange {
                        name: record.name.clone(),
                        old_rating,
                        new_rating: record.pre_rating,
                    }),
                    Err(e) => {
                        warn!("Failed to restore {}: {}", record.name, e);
                        warnings.push(EloError::PlayerNotFound {
                            name: record.name.clone(),
                        });
                    }
                },
                None => {
                    warn!(
                        "Match history is inconsistent, player {} not found",
                        record.name
                    );
                    warnings.push(EloError::PlayerNotFound {
                        name: record.name.clone(),
                    });
                }
            }
        }

        info!(
            "Reverted match {}: {} restored, {} missing",
            entry.match_id,
            restored_players.len(),
            warnings.len()
        );

        RevertOutcome {
            match_id: entry.match_id,
            restored_players,
            warnings,
        }
    }
}

/// Distributor named by the config's distribution policy
fn distributor_for(config: &RatingConfig) -> Box<dyn RatingDistributor> {
    match config.distribution {
        DistributionPolicy::PerformanceWeighted => Box::new(PerformanceWeightedDistributor::new(
            config.outperform_threshold,
        )),
        DistributionPolicy::Proportional => Box::new(ProportionalDistributor::new()),
    }
}

impl Default for RatingEngine {
    /// Engine over [`RatingConfig::default`], which always validates
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            distributor: distributor_for(&config),
            config,
        }
    }
}
