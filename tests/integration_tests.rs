//! Integration tests for scrim-elo
//!
//! These tests run the public API end to end:
//! - Rating a match and writing it back through a league
//! - Reverting matches against a changed roster
//! - Balancing a pool and carrying the chosen split into a match
//! - Configuration driving engine and balancer behaviour

mod fixtures;

use scrim_elo::balance::{greedy_balance, select_by_rank, TeamBalancer};
use scrim_elo::config::{AppConfig, BalanceConfig, DistributionPolicy, RatingConfig};
use scrim_elo::error::{as_elo_error, EloError};
use scrim_elo::rating::{League, RatingEngine, Roster};
use scrim_elo::types::{MatchResult, Player, PoolPlayer};

use fixtures::{regulars_league, regulars_pool, roster_match, top_vs_bottom};

#[test]
fn test_even_five_stack_close_win() {
    let engine = RatingEngine::default();
    let team = |prefix: &str| -> Vec<Player> {
        (0..5)
            .map(|i| Player::new(format!("{}{}", prefix, i), 200.0, 180.0, 0.5))
            .collect()
    };

    let update = engine
        .update_ratings(&MatchResult::new(team("a"), team("b"), 13, 11))
        .unwrap();

    assert_eq!(update.k, 20.0);
    assert_eq!(update.expected_score, 0.5);
    assert_eq!(update.team_one_delta, 10);
    assert_eq!(update.team_two_delta, -10);
}

#[test]
fn test_zero_zero_match_is_rejected() {
    let engine = RatingEngine::default();
    let err = engine.determine_k(0, 0).unwrap_err();
    assert!(matches!(
        as_elo_error(&err),
        Some(EloError::DivisionUndefined { .. })
    ));
}

#[test]
fn test_four_player_pool_example() {
    let pool = vec![
        PoolPlayer::new("w", 100.0),
        PoolPlayer::new("x", 200.0),
        PoolPlayer::new("y", 300.0),
        PoolPlayer::new("z", 400.0),
    ];
    let splits = TeamBalancer::default().propose(&pool).unwrap();

    assert_eq!(splits[0].rating_difference, 0.0);
    assert_eq!(splits[1].rating_difference, 200.0);

    let selection = select_by_rank(&splits, 1).unwrap();
    let z_team = if selection.team_one.contains(&"z".to_string()) {
        &selection.team_one
    } else {
        &selection.team_two
    };
    assert!(z_team.contains(&"w".to_string()));
}

#[test]
fn test_record_and_revert_workflow() {
    let mut league = regulars_league();
    let before = league.roster().standings();

    let first = top_vs_bottom(league.roster(), 13, 6);
    let update = league.record_match(&first).unwrap();
    assert!(update.team_one_delta >= 0);
    assert_eq!(update.team_one_delta + update.team_two_delta, 0);

    let second = top_vs_bottom(league.roster(), 9, 13);
    league.record_match(&second).unwrap();
    assert_eq!(league.history().len(), 2);

    league.revert_last_match().unwrap();
    league.revert_last_match().unwrap();

    for entry in before {
        let now = league.roster().get_player(&entry.name).unwrap();
        assert_eq!(now.rating, entry.rating);
        assert_eq!(now.games_played, 0);
    }
    assert!(league.revert_last_match().is_err());
}

#[test]
fn test_outperformer_loses_less() {
    let mut league = regulars_league();
    let result = roster_match(
        league.roster(),
        &[("juno", 420.0), ("pike", 90.0)],
        &[("tansy", 250.0), ("orrin", 250.0)],
        4,
        13,
    );

    let update = league.record_match(&result).unwrap();
    let juno = &update.team_one[0];
    let pike = &update.team_one[1];

    assert!(update.team_one_delta < 0);
    assert!(juno.performance_delta > 0.0);
    assert!(juno.rating_delta > pike.rating_delta);
}

#[test]
fn test_match_with_unknown_player_leaves_roster_untouched() {
    let mut league = regulars_league();
    let mut result = top_vs_bottom(league.roster(), 13, 3);
    result.team_two = vec![Player::new("stranger", 1000.0, 200.0, 0.5)].into();

    let err = league.record_match(&result).unwrap_err();
    assert!(matches!(
        as_elo_error(&err),
        Some(EloError::PlayerNotFound { .. })
    ));
    assert_eq!(league.roster().rating("vex"), Some(1342.0));
    assert!(league.history().is_empty());
}

#[test]
fn test_balanced_selection_feeds_a_match() {
    let mut league = regulars_league();
    let pool = regulars_pool();

    let splits = TeamBalancer::default().propose(&pool).unwrap();
    assert_eq!(splits.len(), 10);
    assert!(splits
        .windows(2)
        .all(|w| w[0].rating_difference <= w[1].rating_difference));

    // The exhaustive search never does worse than the greedy heuristic
    let greedy = greedy_balance(&pool);
    assert!(splits[0].rating_difference <= greedy.rating_difference());

    let selection = select_by_rank(&splits, 1).unwrap();
    assert_eq!(selection.team_one.len(), 5);
    assert_eq!(selection.team_two.len(), 5);

    // Everyone scores the same, so only the split itself matters
    let one: Vec<(&str, f64)> = selection
        .team_one
        .iter()
        .map(|name| (name.as_str(), 200.0))
        .collect();
    let two: Vec<(&str, f64)> = selection
        .team_two
        .iter()
        .map(|name| (name.as_str(), 200.0))
        .collect();

    let result = roster_match(league.roster(), &one, &two, 13, 12);
    let update = league.record_match(&result).unwrap();

    // Near-even teams, narrow win
    assert_eq!(update.k, 20.0);
    assert!(update.team_one_delta >= 9 && update.team_one_delta <= 11);
}

#[test]
fn test_pool_limit_from_config() {
    let balancer = TeamBalancer::new(BalanceConfig {
        max_pool_size: 8,
        top_n_options: 5,
    })
    .unwrap();

    let err = balancer.propose(&regulars_pool()).unwrap_err();
    assert_eq!(
        as_elo_error(&err),
        Some(&EloError::PoolTooLarge { size: 10, max: 8 })
    );

    // The greedy fallback has no limit
    let assignment = balancer.greedy(&regulars_pool());
    assert_eq!(assignment.team_one.len() + assignment.team_two.len(), 10);
}

#[test]
fn test_config_file_selects_policy() {
    let config = AppConfig::from_toml_str(
        r#"
        [service]
        log_level = "warn"

        [rating]
        distribution = "proportional"
        "#,
    )
    .unwrap();
    assert_eq!(config.rating.distribution, DistributionPolicy::Proportional);

    let engine = RatingEngine::new(config.rating).unwrap();
    let mut league = League::new(engine, fixtures::regulars_roster());
    let result = roster_match(
        league.roster(),
        &[("vex", 0.0), ("lumen", 0.0)],
        &[("sable", 0.0), ("wick", 0.0)],
        13,
        1,
    );
    let update = league.record_match(&result).unwrap();
    assert!(update.team_one_delta > 0);

    // Winning side: the strongest player takes the smallest share
    let vex = &update.team_one[0];
    let lumen = &update.team_one[1];
    assert!(vex.rating_delta < lumen.rating_delta);

    // Losing side: the strongest player carries the largest share
    let sable = &update.team_two[0];
    let wick = &update.team_two[1];
    assert!(sable.rating_delta < wick.rating_delta);
}

#[test]
fn test_custom_buckets_change_k() {
    let config = RatingConfig {
        k_buckets: vec![],
        default_k: 50.0,
        ..RatingConfig::default()
    };
    let engine = RatingEngine::new(config).unwrap();
    assert_eq!(engine.determine_k(13, 0).unwrap(), 50.0);
}

#[test]
fn test_newcomer_is_balanced_and_rated() {
    let mut league = regulars_league();
    let rating = league.register_player("nova");
    assert_eq!(rating, league.engine().config().initial_rating);

    let names = ["nova", "vex", "kilo", "pike", "wick", "lumen"];
    let pool: Vec<PoolPlayer> = names
        .iter()
        .map(|name| league.roster().pool_player(name).unwrap())
        .collect();
    let splits = TeamBalancer::default().propose(&pool).unwrap();
    let selection = select_by_rank(&splits, 1).unwrap();

    let one: Vec<(&str, f64)> = selection
        .team_one
        .iter()
        .map(|name| (name.as_str(), 200.0))
        .collect();
    let two: Vec<(&str, f64)> = selection
        .team_two
        .iter()
        .map(|name| (name.as_str(), 200.0))
        .collect();
    let result = roster_match(league.roster(), &one, &two, 13, 9);
    let update = league.record_match(&result).unwrap();

    let nova = update
        .updated_players()
        .find(|p| p.name == "nova")
        .unwrap();
    assert_eq!(nova.pre_rating, 1000.0);
    assert_eq!(league.roster().get_player("nova").unwrap().games_played, 1);
}
