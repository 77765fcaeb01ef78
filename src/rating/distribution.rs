//! Sharing a team's rating delta among its players
//!
//! The team-level delta is fixed by the Elo expectation; a [`RatingDistributor`]
//! only decides how it is split inside the team. Two policies exist and an
//! engine uses exactly one of them.

use crate::types::Team;
use serde::{Deserialize, Serialize};

/// Expected performance of one player given their team's total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceExpectation {
    pub weighted_percentile: f64,
    pub expected_performance: f64,
    pub performance_delta: f64,
}

/// Split a team's total performance by `percentile ^ (1 / responsibility_factor)`
///
/// Performance deltas within a team always sum to zero.
pub fn performance_expectations(
    team: &Team,
    responsibility_factor: f64,
) -> Vec<PerformanceExpectation> {
    let weights: Vec<f64> = team
        .iter()
        .map(|player| player.percentile_weight.powf(1.0 / responsibility_factor))
        .collect();
    let total_weight: f64 = weights.iter().sum();
    let total_performance = team.total_performance();

    team.iter()
        .zip(weights)
        .map(|(player, weighted_percentile)| {
            let expected_performance = if total_weight > 0.0 {
                total_performance * weighted_percentile / total_weight
            } else {
                0.0
            };
            PerformanceExpectation {
                weighted_percentile,
                expected_performance,
                performance_delta: player.performance_score - expected_performance,
            }
        })
        .collect()
}

/// Policy for distributing a team delta across the team's players
pub trait RatingDistributor: Send + Sync + std::fmt::Debug {
    /// Rating change for each player, in team order
    ///
    /// # Arguments
    /// * `team` - The players, in the order they were supplied
    /// * `expectations` - Performance expectations, parallel to `team`
    /// * `team_delta` - Rounded rating change of the whole team
    /// * `outcome` - The team's outcome score (1 win, 0 loss, 0.5 tie)
    fn distribute(
        &self,
        team: &Team,
        expectations: &[PerformanceExpectation],
        team_delta: i64,
        outcome: f64,
    ) -> Vec<f64>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Equal shares, scaled by how far each player beat their expected performance
#[derive(Debug, Clone)]
pub struct PerformanceWeightedDistributor {
    outperform_threshold: f64,
}

impl PerformanceWeightedDistributor {
    pub fn new(outperform_threshold: f64) -> Self {
        Self {
            outperform_threshold,
        }
    }
}

impl RatingDistributor for PerformanceWeightedDistributor {
    fn distribute(
        &self,
        team: &Team,
        expectations: &[PerformanceExpectation],
        team_delta: i64,
        _outcome: f64,
    ) -> Vec<f64> {
        if team.is_empty() {
            return Vec::new();
        }

        let base_share = team_delta as f64 / team.len() as f64;

        expectations
            .iter()
            .map(|expectation| {
                let margin = expectation.performance_delta / self.outperform_threshold;
                if team_delta >= 0 {
                    base_share * (1.0 + margin)
                } else {
                    base_share * (1.0 - margin)
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "performance_weighted"
    }
}

/// Shares proportional to each player's part of the team rating
///
/// Loss responsibility follows rating order; win responsibility is the same
/// set of shares in reverse order, so the strongest player takes the smallest
/// share of a gain. Players with equal ratings split their win shares evenly.
#[derive(Debug, Clone, Default)]
pub struct ProportionalDistributor;

impl ProportionalDistributor {
    pub fn new() -> Self {
        Self
    }

    /// Loss responsibility per player in percent, summing to 100
    pub fn lose_shares(team: &Team) -> Vec<f64> {
        let total = team.total_rating();
        let size = team.len() as f64;

        team.iter()
            .map(|player| {
                if total != 0.0 {
                    100.0 * player.pre_rating / total
                } else {
                    100.0 / size
                }
            })
            .collect()
    }

    /// Win responsibility per player in percent, summing to 100
    pub fn win_shares(team: &Team, lose_shares: &[f64]) -> Vec<f64> {
        let players = team.players();
        let size = players.len();

        let mut order: Vec<usize> = (0..size).collect();
        order.sort_by(|&a, &b| players[a].pre_rating.total_cmp(&players[b].pre_rating));

        let mut win = vec![0.0; size];
        for (rank, &index) in order.iter().enumerate() {
            win[index] = lose_shares[order[size - 1 - rank]];
        }

        // Average across groups of equal ratings
        let mut start = 0;
        while start < size {
            let rating = players[order[start]].pre_rating;
            let mut end = start + 1;
            while end < size && players[order[end]].pre_rating == rating {
                end += 1;
            }
            if end - start > 1 {
                let group = &order[start..end];
                let mean = group.iter().map(|&i| win[i]).sum::<f64>() / group.len() as f64;
                for &i in group {
                    win[i] = mean;
                }
            }
            start = end;
        }

        win
    }
}

impl RatingDistributor for ProportionalDistributor {
    fn distribute(
        &self,
        team: &Team,
        _expectations: &[PerformanceExpectation],
        team_delta: i64,
        outcome: f64,
    ) -> Vec<f64> {
        if team.is_empty() {
            return Vec::new();
        }

        let lose = Self::lose_shares(team);
        let win = Self::win_shares(team, &lose);

        win.iter()
            .zip(lose.iter())
            .map(|(win_share, lose_share)| {
                0.01 * team_delta as f64 * (outcome * win_share + (1.0 - outcome) * lose_share)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "proportional"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    fn team(entries: &[(f64, f64, f64)]) -> Team {
        Team::new(
            entries
                .iter()
                .enumerate()
                .map(|(i, &(rating, score, percentile))| {
                    Player::new(format!("p{}", i), rating, score, percentile)
                })
                .collect(),
        )
    }

    #[test]
    fn test_expectations_sum_to_team_performance() {
        let team = team(&[
            (1000.0, 300.0, 1.0),
            (900.0, 200.0, 0.6),
            (800.0, 100.0, 0.2),
        ]);
        let expectations = performance_expectations(&team, 11.0);

        let expected_total: f64 = expectations.iter().map(|e| e.expected_performance).sum();
        let delta_total: f64 = expectations.iter().map(|e| e.performance_delta).sum();

        assert!((expected_total - 600.0).abs() < 1e-9);
        assert!(delta_total.abs() < 1e-9);
        // Higher percentile is expected to score more
        assert!(expectations[0].expected_performance > expectations[2].expected_performance);
    }

    #[test]
    fn test_equal_percentiles_expect_equal_share() {
        let team = team(&[(1000.0, 300.0, 0.5), (1000.0, 100.0, 0.5)]);
        let expectations = performance_expectations(&team, 11.0);

        assert!((expectations[0].expected_performance - 200.0).abs() < 1e-9);
        assert!((expectations[0].performance_delta - 100.0).abs() < 1e-9);
        assert!((expectations[1].performance_delta + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_performance_weighted_gain() {
        let team = team(&[(1000.0, 300.0, 0.5), (1000.0, 100.0, 0.5)]);
        let expectations = performance_expectations(&team, 11.0);
        let deltas =
            PerformanceWeightedDistributor::new(200.0).distribute(&team, &expectations, 10, 1.0);

        // Base share 5, +-100 performance is half a share either way
        assert!((deltas[0] - 7.5).abs() < 1e-9);
        assert!((deltas[1] - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_performance_weighted_loss_spares_outperformer() {
        let team = team(&[(1000.0, 400.0, 0.5), (1000.0, 0.0, 0.5)]);
        let expectations = performance_expectations(&team, 11.0);
        let deltas =
            PerformanceWeightedDistributor::new(200.0).distribute(&team, &expectations, -10, 0.0);

        // +200 over expectation cancels the base loss entirely
        assert!(deltas[0].abs() < 1e-9);
        assert!((deltas[1] + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_proportional_shares() {
        let team = team(&[(100.0, 0.0, 1.0), (300.0, 0.0, 1.0)]);
        let lose = ProportionalDistributor::lose_shares(&team);
        let win = ProportionalDistributor::win_shares(&team, &lose);

        assert_eq!(lose, vec![25.0, 75.0]);
        assert_eq!(win, vec![75.0, 25.0]);
    }

    #[test]
    fn test_proportional_tied_ratings_average() {
        let team = team(&[(200.0, 0.0, 1.0), (100.0, 0.0, 1.0), (100.0, 0.0, 1.0)]);
        let lose = ProportionalDistributor::lose_shares(&team);
        let win = ProportionalDistributor::win_shares(&team, &lose);

        // Lose shares 50/25/25; reversed the two 100s would take 50 and 25
        assert_eq!(win[0], 25.0);
        assert_eq!(win[1], 37.5);
        assert_eq!(win[2], 37.5);
    }

    #[test]
    fn test_proportional_distribution_sums_to_team_delta() {
        let team = team(&[(900.0, 0.0, 1.0), (1100.0, 0.0, 1.0), (1000.0, 0.0, 1.0)]);
        let distributor = ProportionalDistributor::new();

        for (delta, outcome) in [(12, 1.0), (-12, 0.0), (3, 0.5), (-3, 0.5)] {
            let deltas = distributor.distribute(&team, &[], delta, outcome);
            let sum: f64 = deltas.iter().sum();
            assert!((sum - delta as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_team_distributes_nothing() {
        let empty = Team::default();
        assert!(PerformanceWeightedDistributor::new(200.0)
            .distribute(&empty, &[], 10, 1.0)
            .is_empty());
        assert!(ProportionalDistributor::new()
            .distribute(&empty, &[], 10, 1.0)
            .is_empty());
    }
}
