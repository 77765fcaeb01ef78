//! Turning a chosen split into two name lists

use crate::error::{EloError, Result};
use crate::types::{TeamSelection, TeamSplit};

fn to_selection(split: &TeamSplit) -> TeamSelection {
    TeamSelection {
        team_one: split.team_one.iter().map(|p| p.name.clone()).collect(),
        team_two: split.team_two.iter().map(|p| p.name.clone()).collect(),
    }
}

/// Pick a split by its 1-based position in the ranked list
pub fn select_by_rank(splits: &[TeamSplit], rank: usize) -> Result<TeamSelection> {
    rank.checked_sub(1)
        .and_then(|index| splits.get(index))
        .map(to_selection)
        .ok_or_else(|| {
            EloError::InvalidSelection {
                selection: format!("rank {}", rank),
                available: splits.len(),
            }
            .into()
        })
}

/// Pick a split by the id of either of its teams
///
/// The returned lists keep the split's own team order.
pub fn select_by_id(splits: &[TeamSplit], id: u32) -> Result<TeamSelection> {
    splits
        .iter()
        .find(|split| split.id == id || split.team_two_id() == id)
        .map(to_selection)
        .ok_or_else(|| {
            EloError::InvalidSelection {
                selection: format!("id {}", id),
                available: splits.len(),
            }
            .into()
        })
}
