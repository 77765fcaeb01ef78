//! Greedy team balancing
//!
//! Not globally optimal, but O(n log n) and usable for pools too large for the
//! exhaustive search.

use crate::types::{PoolPlayer, TeamAssignment};
use tracing::debug;

/// Hand out players highest rating first to whichever team has the lower total
///
/// Ties on the running total go to team one; equal ratings keep pool order.
pub fn greedy_balance(pool: &[PoolPlayer]) -> TeamAssignment {
    let mut players = pool.to_vec();
    players.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let mut assignment = TeamAssignment::default();
    let mut team_one_total = 0.0;
    let mut team_two_total = 0.0;

    for player in players {
        if team_one_total <= team_two_total {
            team_one_total += player.rating;
            assignment.team_one.push(player);
        } else {
            team_two_total += player.rating;
            assignment.team_two.push(player);
        }
    }

    debug!(
        "Greedy split of {} players: {} vs {}",
        pool.len(),
        team_one_total,
        team_two_total
    );

    assignment
}
