//! Append-only log of processed matches

use crate::types::MatchHistoryEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchHistory {
    entries: Vec<MatchHistoryEntry>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: MatchHistoryEntry) {
        self.entries.push(entry);
    }

    /// Most recently recorded match
    pub fn latest(&self) -> Option<&MatchHistoryEntry> {
        self.entries.last()
    }

    /// Remove and return the most recently recorded match
    pub fn pop_latest(&mut self) -> Option<MatchHistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, MatchHistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{current_timestamp, generate_match_id};

    fn entry(rounds_one: u32) -> MatchHistoryEntry {
        MatchHistoryEntry {
            match_id: generate_match_id(),
            timestamp: current_timestamp(),
            team_one: vec![],
            team_two: vec![],
            team_one_rounds_won: rounds_one,
            team_two_rounds_won: 13,
        }
    }

    #[test]
    fn test_latest_is_last_pushed() {
        let mut history = MatchHistory::new();
        assert!(history.latest().is_none());

        history.push(entry(3));
        history.push(entry(11));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().team_one_rounds_won, 11);

        let popped = history.pop_latest().unwrap();
        assert_eq!(popped.team_one_rounds_won, 11);
        assert_eq!(history.latest().unwrap().team_one_rounds_won, 3);
    }

    #[test]
    fn test_pop_empty() {
        let mut history = MatchHistory::new();
        assert!(history.pop_latest().is_none());
        assert!(history.is_empty());
    }
}
