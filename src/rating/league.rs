//! Roster-backed match recording
//!
//! [`League`] owns the roster and the match history and applies engine
//! output to them. Recording is all-or-nothing; reverting is best effort.

use crate::error::{EloError, Result};
use crate::rating::engine::{RatingEngine, RevertOutcome};
use crate::rating::history::MatchHistory;
use crate::rating::roster::{InMemoryRoster, Roster};
use crate::types::{MatchResult, PlayerName, RatingUpdate};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct League<R: Roster = InMemoryRoster> {
    engine: RatingEngine,
    roster: R,
    history: MatchHistory,
}

impl<R: Roster> League<R> {
    pub fn new(engine: RatingEngine, roster: R) -> Self {
        Self {
            engine,
            roster,
            history: MatchHistory::new(),
        }
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    pub fn roster(&self) -> &R {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut R {
        &mut self.roster
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Rate a match, write every post-match rating and log the match
    ///
    /// Every player is resolved against the roster before anything is
    /// written; a single unknown name fails the whole match with
    /// [`EloError::PlayerNotFound`] and leaves the roster untouched.
    pub fn record_match(&mut self, result: &MatchResult) -> Result<RatingUpdate> {
        let update = self.engine.update_ratings(result)?;

        if let Some(missing) = update
            .updated_players()
            .find(|player| !self.roster.contains(&player.name))
        {
            warn!(
                "Discarding match {}: {} is not on the roster",
                update.history_entry.match_id, missing.name
            );
            return Err(EloError::PlayerNotFound {
                name: missing.name.clone(),
            }
            .into());
        }

        for player in update.updated_players() {
            self.roster
                .record_match_rating(&player.name, player.post_rating)?;
        }

        self.history.push(update.history_entry.clone());
        info!(
            "Recorded match {} ({} matches in history)",
            update.history_entry.match_id,
            self.history.len()
        );

        Ok(update)
    }

    /// Undo the most recent match and drop it from the history
    ///
    /// Fails with [`EloError::EmptyHistory`] when there is nothing to revert.
    pub fn revert_last_match(&mut self) -> Result<RevertOutcome> {
        let entry = self.history.pop_latest().ok_or(EloError::EmptyHistory)?;
        Ok(self.engine.revert_match(&entry, &mut self.roster))
    }
}

impl League<InMemoryRoster> {
    /// Put a newcomer on the roster at the engine's initial rating
    pub fn register_player(&mut self, name: impl Into<PlayerName>) -> f64 {
        let rating = self.roster.add_new_player(name, self.engine.config());
        debug!("Roster now has {} players", self.roster.len());
        rating
    }
}
