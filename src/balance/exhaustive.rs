//! Exhaustive team balancing
//!
//! Every permutation of the pool is split at its midpoint. Players carry a
//! distinct power-of-two id, so a team is identified by the sum of its
//! members' ids no matter how they were ordered, and repeated partitions are
//! dropped with set lookups. The kept splits are ranked by the absolute
//! difference of the team totals.

use crate::balance::greedy::greedy_balance;
use crate::balance::permutations::Permutations;
use crate::config::BalanceConfig;
use crate::error::{EloError, Result};
use crate::types::{BalancePlayer, PoolPlayer, TeamAssignment, TeamSplit};
use crate::utils::rating_difference;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Tag each pool player with `1 << position`
pub fn assign_ids(pool: &[PoolPlayer]) -> Vec<BalancePlayer> {
    pool.iter()
        .enumerate()
        .map(|(position, player)| BalancePlayer {
            name: player.name.clone(),
            rating: player.rating,
            id: 1u32 << position,
        })
        .collect()
}

/// Reject pools whose splits could not be played as a match
///
/// Names must be non-empty and unique, ratings finite.
pub fn validate_pool(pool: &[PoolPlayer]) -> Result<()> {
    let mut seen = HashSet::new();
    for player in pool {
        if player.name.trim().is_empty() {
            return Err(EloError::InvalidPool {
                reason: "Player name cannot be empty".to_string(),
            }
            .into());
        }
        if !seen.insert(player.name.as_str()) {
            return Err(EloError::InvalidPool {
                reason: format!("Player {} appears more than once", player.name),
            }
            .into());
        }
        if !player.rating.is_finite() {
            return Err(EloError::InvalidPool {
                reason: format!("Player {} has a non-finite rating", player.name),
            }
            .into());
        }
    }
    Ok(())
}

/// Proposes evenly matched splits of a player pool
#[derive(Debug, Clone, Default)]
pub struct TeamBalancer {
    config: BalanceConfig,
}

impl TeamBalancer {
    pub fn new(config: BalanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    fn check_pool_size(&self, pool: &[PoolPlayer]) -> Result<()> {
        if pool.len() > self.config.max_pool_size {
            warn!(
                "Rejecting pool of {} players, limit is {}",
                pool.len(),
                self.config.max_pool_size
            );
            return Err(EloError::PoolTooLarge {
                size: pool.len(),
                max: self.config.max_pool_size,
            }
            .into());
        }
        Ok(())
    }

    /// Every distinct partition of the pool, in the order first generated
    pub fn distinct_splits(&self, pool: &[PoolPlayer]) -> Result<Vec<TeamSplit>> {
        self.check_pool_size(pool)?;
        validate_pool(pool)?;

        if pool.is_empty() {
            return Ok(Vec::new());
        }

        let players = assign_ids(pool);
        let midpoint = (players.len() + 1) / 2;

        let mut kept_one = HashSet::new();
        let mut kept_two = HashSet::new();
        let mut splits = Vec::new();
        let mut generated = 0usize;

        for order in Permutations::new(players.len()) {
            generated += 1;
            let (first, second) = order.split_at(midpoint);

            let team_one_id: u32 = first.iter().map(|&i| players[i].id).sum();
            let team_two_id: u32 = second.iter().map(|&i| players[i].id).sum();

            if kept_one.contains(&team_one_id)
                || kept_two.contains(&team_two_id)
                || kept_two.contains(&team_one_id)
            {
                continue;
            }
            kept_one.insert(team_one_id);
            kept_two.insert(team_two_id);

            let team_one: Vec<BalancePlayer> = first.iter().map(|&i| players[i].clone()).collect();
            let team_two: Vec<BalancePlayer> =
                second.iter().map(|&i| players[i].clone()).collect();
            let team_one_total: f64 = team_one.iter().map(|p| p.rating).sum();
            let team_two_total: f64 = team_two.iter().map(|p| p.rating).sum();

            splits.push(TeamSplit {
                team_one,
                team_two,
                id: team_one_id,
                rating_difference: rating_difference(team_one_total, team_two_total),
            });
        }

        debug!(
            "Generated {} orderings of {} players, {} distinct splits",
            generated,
            players.len(),
            splits.len()
        );

        Ok(splits)
    }

    /// The `top_n` most balanced splits, smallest rating difference first
    ///
    /// Fails with [`EloError::PoolTooLarge`] when the pool exceeds the
    /// configured limit and [`EloError::InvalidPool`] for blank or repeated
    /// names and non-finite ratings. Equal differences keep generation order.
    pub fn propose_balanced_teams(
        &self,
        pool: &[PoolPlayer],
        top_n: usize,
    ) -> Result<Vec<TeamSplit>> {
        let mut splits = self.distinct_splits(pool)?;
        splits.sort_by(|a, b| a.rating_difference.total_cmp(&b.rating_difference));
        splits.truncate(top_n);

        if let Some(best) = splits.first() {
            info!(
                "Balanced {} players, best split differs by {}",
                pool.len(),
                best.rating_difference
            );
        }

        Ok(splits)
    }

    /// Ranked splits using the configured number of options
    pub fn propose(&self, pool: &[PoolPlayer]) -> Result<Vec<TeamSplit>> {
        self.propose_balanced_teams(pool, self.config.top_n_options)
    }

    /// Greedy alternative with no pool size limit
    pub fn greedy(&self, pool: &[PoolPlayer]) -> TeamAssignment {
        greedy_balance(pool)
    }
}
