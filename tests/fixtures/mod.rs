//! Shared builders for integration and property tests

#![allow(dead_code)]

use scrim_elo::rating::{InMemoryRoster, League, RatingEngine};
use scrim_elo::types::{MatchResult, Player, PoolPlayer};

/// Ten regulars with a realistic spread of ratings
pub const REGULARS: [(&str, f64); 10] = [
    ("vex", 1342.0),
    ("sable", 1288.0),
    ("kilo", 1215.0),
    ("marrow", 1170.0),
    ("juno", 1104.0),
    ("pike", 1050.0),
    ("tansy", 998.0),
    ("orrin", 940.0),
    ("wick", 902.0),
    ("lumen", 861.0),
];

pub fn regulars_roster() -> InMemoryRoster {
    InMemoryRoster::from_ratings(REGULARS)
}

pub fn regulars_league() -> League {
    League::new(RatingEngine::default(), regulars_roster())
}

pub fn regulars_pool() -> Vec<PoolPlayer> {
    REGULARS
        .iter()
        .map(|&(name, rating)| PoolPlayer::new(name, rating))
        .collect()
}

/// Build a match from roster names paired with performance scores
pub fn roster_match(
    roster: &InMemoryRoster,
    team_one: &[(&str, f64)],
    team_two: &[(&str, f64)],
    rounds_one: u32,
    rounds_two: u32,
) -> MatchResult {
    let side = |lineup: &[(&str, f64)]| -> Vec<Player> {
        lineup
            .iter()
            .map(|&(name, score)| {
                roster
                    .match_player(name, score)
                    .expect("fixture player on roster")
            })
            .collect()
    };
    MatchResult::new(side(team_one), side(team_two), rounds_one, rounds_two)
}

/// A full 5v5 between the top and bottom halves of the regulars
pub fn top_vs_bottom(roster: &InMemoryRoster, rounds_one: u32, rounds_two: u32) -> MatchResult {
    roster_match(
        roster,
        &[
            ("vex", 310.0),
            ("sable", 240.0),
            ("kilo", 205.0),
            ("marrow", 180.0),
            ("juno", 150.0),
        ],
        &[
            ("pike", 260.0),
            ("tansy", 210.0),
            ("orrin", 190.0),
            ("wick", 140.0),
            ("lumen", 95.0),
        ],
        rounds_one,
        rounds_two,
    )
}
