//! Common types shared by the rating engine and the team balancer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Players are identified by their display name
pub type PlayerName = String;

/// Unique identifier for a recorded match
pub type MatchId = Uuid;

/// Largest team accepted by the rating engine
pub const MAX_TEAM_SIZE: usize = 5;

/// A participant in a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    pub pre_rating: f64,
    /// In-match performance (combat score or similar)
    pub performance_score: f64,
    /// Standing within the roster, in (0, 1]
    pub percentile_weight: f64,
}

impl Player {
    pub fn new(
        name: impl Into<PlayerName>,
        pre_rating: f64,
        performance_score: f64,
        percentile_weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            pre_rating,
            performance_score,
            percentile_weight,
        }
    }
}

/// Ordered group of players on one side of a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    players: Vec<Player>,
}

impl Team {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    /// Sum of pre-match ratings
    pub fn total_rating(&self) -> f64 {
        self.players.iter().map(|p| p.pre_rating).sum()
    }

    /// Sum of performance scores
    pub fn total_performance(&self) -> f64 {
        self.players.iter().map(|p| p.performance_score).sum()
    }
}

impl From<Vec<Player>> for Team {
    fn from(players: Vec<Player>) -> Self {
        Self::new(players)
    }
}

/// Final score and line-ups of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub team_one_rounds_won: u32,
    pub team_two_rounds_won: u32,
    pub team_one: Team,
    pub team_two: Team,
}

impl MatchResult {
    pub fn new(
        team_one: impl Into<Team>,
        team_two: impl Into<Team>,
        team_one_rounds_won: u32,
        team_two_rounds_won: u32,
    ) -> Self {
        Self {
            team_one_rounds_won,
            team_two_rounds_won,
            team_one: team_one.into(),
            team_two: team_two.into(),
        }
    }

    /// Outcome score from team one's point of view: 1 win, 0 loss, 0.5 tie
    pub fn team_one_outcome(&self) -> f64 {
        match self.team_one_rounds_won.cmp(&self.team_two_rounds_won) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Less => 0.0,
            std::cmp::Ordering::Equal => 0.5,
        }
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team_one.iter().chain(self.team_two.iter())
    }
}

/// Per-player breakdown of a rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub name: PlayerName,
    pub pre_rating: f64,
    pub performance_score: f64,
    pub weighted_percentile: f64,
    pub expected_performance: f64,
    pub performance_delta: f64,
    pub rating_delta: f64,
    pub post_rating: f64,
}

/// One player's line in the match history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub name: PlayerName,
    pub pre_rating: f64,
    pub performance_score: f64,
    pub post_rating: f64,
}

impl From<&PlayerUpdate> for HistoryRecord {
    fn from(update: &PlayerUpdate) -> Self {
        Self {
            name: update.name.clone(),
            pre_rating: update.pre_rating,
            performance_score: update.performance_score,
            post_rating: update.post_rating,
        }
    }
}

/// Immutable snapshot written once per processed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    pub match_id: MatchId,
    pub timestamp: DateTime<Utc>,
    pub team_one: Vec<HistoryRecord>,
    pub team_two: Vec<HistoryRecord>,
    pub team_one_rounds_won: u32,
    pub team_two_rounds_won: u32,
}

impl MatchHistoryEntry {
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.team_one.iter().chain(self.team_two.iter())
    }
}

/// Everything produced by a single rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub team_one_rating: f64,
    pub team_two_rating: f64,
    pub k: f64,
    /// Elo expectation for team one
    pub expected_score: f64,
    /// Outcome score for team one
    pub outcome: f64,
    pub team_one_delta: i64,
    pub team_two_delta: i64,
    pub team_one: Vec<PlayerUpdate>,
    pub team_two: Vec<PlayerUpdate>,
    pub history_entry: MatchHistoryEntry,
}

impl RatingUpdate {
    pub fn updated_players(&self) -> impl Iterator<Item = &PlayerUpdate> {
        self.team_one.iter().chain(self.team_two.iter())
    }
}

/// Rating movement of one roster player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub name: PlayerName,
    pub old_rating: f64,
    pub new_rating: f64,
}

/// Player offered to the team balancer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolPlayer {
    pub name: PlayerName,
    pub rating: f64,
}

impl PoolPlayer {
    pub fn new(name: impl Into<PlayerName>, rating: f64) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

/// Pool player tagged with its power-of-two identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePlayer {
    pub name: PlayerName,
    pub rating: f64,
    pub id: u32,
}

/// One candidate partition of a pool into two teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub team_one: Vec<BalancePlayer>,
    pub team_two: Vec<BalancePlayer>,
    /// Sum of team one's member ids
    pub id: u32,
    pub rating_difference: f64,
}

impl TeamSplit {
    pub fn team_two_id(&self) -> u32 {
        self.team_two.iter().map(|p| p.id).sum()
    }

    pub fn team_one_total(&self) -> f64 {
        self.team_one.iter().map(|p| p.rating).sum()
    }

    pub fn team_two_total(&self) -> f64 {
        self.team_two.iter().map(|p| p.rating).sum()
    }
}

/// Two teams of pool players, as produced by the greedy balancer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub team_one: Vec<PoolPlayer>,
    pub team_two: Vec<PoolPlayer>,
}

impl TeamAssignment {
    pub fn team_one_total(&self) -> f64 {
        self.team_one.iter().map(|p| p.rating).sum()
    }

    pub fn team_two_total(&self) -> f64 {
        self.team_two.iter().map(|p| p.rating).sum()
    }

    pub fn rating_difference(&self) -> f64 {
        crate::utils::rating_difference(self.team_one_total(), self.team_two_total())
    }
}

/// Chosen split reduced to the two name lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSelection {
    pub team_one: Vec<PlayerName>,
    pub team_two: Vec<PlayerName>,
}
