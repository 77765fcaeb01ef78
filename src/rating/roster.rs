//! Roster lookup interface and an in-memory implementation
//!
//! The roster is the caller's record of every known player and their current
//! rating. The engine only needs to resolve names and write ratings back.

use crate::config::RatingConfig;
use crate::error::{EloError, Result};
use crate::types::{Player, PlayerName, PoolPlayer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player's standing on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: PlayerName,
    pub rating: f64,
    pub games_played: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RosterEntry {
    /// Create a new entry for a player who has not played yet
    pub fn new(name: impl Into<PlayerName>, rating: f64) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            rating,
            games_played: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Apply a post-match rating and count the game
    pub fn record_match(&mut self, rating: f64) {
        self.rating = rating;
        self.games_played += 1;
        self.last_updated = Utc::now();
    }

    /// Put back a pre-match rating and uncount the game
    pub fn restore(&mut self, rating: f64) {
        self.rating = rating;
        self.games_played = self.games_played.saturating_sub(1);
        self.last_updated = Utc::now();
    }
}

/// Name-keyed lookup the engine writes ratings through
pub trait Roster {
    /// Look up a player by name
    fn get_player(&self, name: &str) -> Option<&RosterEntry>;

    /// Store a post-match rating
    fn record_match_rating(&mut self, name: &str, rating: f64) -> Result<()>;

    /// Store a pre-match rating taken from history
    fn restore_rating(&mut self, name: &str, rating: f64) -> Result<()>;

    fn contains(&self, name: &str) -> bool {
        self.get_player(name).is_some()
    }
}

/// In-memory roster keyed by player name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRoster {
    players: HashMap<PlayerName, RosterEntry>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from `(name, rating)` pairs
    pub fn from_ratings<I, S>(ratings: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<PlayerName>,
    {
        let mut roster = Self::new();
        for (name, rating) in ratings {
            roster.add_player(name, rating);
        }
        roster
    }

    /// Add a player, replacing any existing entry with the same name
    pub fn add_player(&mut self, name: impl Into<PlayerName>, rating: f64) {
        let entry = RosterEntry::new(name, rating);
        self.players.insert(entry.name.clone(), entry);
    }

    /// Add a player at the configured starting rating
    ///
    /// A player already on the roster keeps their entry. Returns the
    /// player's current rating either way.
    pub fn add_new_player(&mut self, name: impl Into<PlayerName>, config: &RatingConfig) -> f64 {
        let name = name.into();
        self.players
            .entry(name.clone())
            .or_insert_with(|| RosterEntry::new(name, config.initial_rating))
            .rating
    }

    /// Remove a player, returning whether they were present
    pub fn remove_player(&mut self, name: &str) -> bool {
        self.players.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Current rating of a player
    pub fn rating(&self, name: &str) -> Option<f64> {
        self.players.get(name).map(|entry| entry.rating)
    }

    /// All players, highest rating first
    pub fn standings(&self) -> Vec<RosterEntry> {
        let mut entries: Vec<RosterEntry> = self.players.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }

    /// Share of the roster rated at or below this player, in (0, 1]
    pub fn percentile(&self, name: &str) -> Option<f64> {
        let rating = self.rating(name)?;
        let at_or_below = self
            .players
            .values()
            .filter(|entry| entry.rating <= rating)
            .count();
        Some(at_or_below as f64 / self.players.len() as f64)
    }

    /// Build a match participant from the roster's rating and percentile
    pub fn match_player(&self, name: &str, performance_score: f64) -> Result<Player> {
        let not_found = || EloError::PlayerNotFound {
            name: name.to_string(),
        };
        let rating = self.rating(name).ok_or_else(not_found)?;
        let percentile = self.percentile(name).ok_or_else(not_found)?;

        Ok(Player::new(name, rating, performance_score, percentile))
    }

    /// Build a balancing pool entry from the roster's rating
    pub fn pool_player(&self, name: &str) -> Result<PoolPlayer> {
        let rating = self.rating(name).ok_or_else(|| EloError::PlayerNotFound {
            name: name.to_string(),
        })?;
        Ok(PoolPlayer::new(name, rating))
    }
}

impl Roster for InMemoryRoster {
    fn get_player(&self, name: &str) -> Option<&RosterEntry> {
        self.players.get(name)
    }

    fn record_match_rating(&mut self, name: &str, rating: f64) -> Result<()> {
        let entry = self
            .players
            .get_mut(name)
            .ok_or_else(|| EloError::PlayerNotFound {
                name: name.to_string(),
            })?;
        entry.record_match(rating);
        Ok(())
    }

    fn restore_rating(&mut self, name: &str, rating: f64) -> Result<()> {
        let entry = self
            .players
            .get_mut(name)
            .ok_or_else(|| EloError::PlayerNotFound {
                name: name.to_string(),
            })?;
        entry.restore(rating);
        Ok(())
    }
}
