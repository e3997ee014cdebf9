//! Tests for the team and history store.

use chrono::NaiveDate;
use strictly_baseball::{
    ControllerOptions, GameController, GameRecordSink, NamePool, PlayerCard, SimpleAction, TeamInfo,
};
use strictly_scorebook::{AppStore, ScorebookConfig, ScorebookRotation, Team};

fn finished_game(date: NaiveDate) -> strictly_baseball::GameRecord {
    let options = ControllerOptions {
        regulation_innings: 1,
        ..ControllerOptions::default()
    };
    let mut game = GameController::new(Default::default(), NamePool::default(), options);
    game.handle_action(SimpleAction::Homerun.into());
    for _ in 0..6 {
        game.handle_action(SimpleAction::Out.into());
    }
    game.final_record(date).unwrap()
}

#[test]
fn test_store_from_default_config_uses_pool() {
    let store = AppStore::from_config(&ScorebookConfig::default());
    assert_eq!(store.my_team().info().short_name, "POW");
    assert_eq!(store.opponent().info().short_name, "AKA");
    assert!(matches!(store.rotation(NamePool::default()), ScorebookRotation::Pool(_)));
}

#[test]
fn test_duplicate_records_ignored() {
    let mut store = AppStore::from_config(&ScorebookConfig::default());
    let date = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
    let record = finished_game(date);

    assert!(store.add_game_record(record.clone()));
    store.record(record);
    assert_eq!(store.records().len(), 1);
}

#[test]
fn test_newest_record_first() {
    let mut store = AppStore::from_config(&ScorebookConfig::default());
    store.add_game_record(finished_game(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()));
    store.add_game_record(finished_game(NaiveDate::from_ymd_opt(2026, 7, 5).unwrap()));
    assert_eq!(store.records()[0].date().to_string(), "2026-07-05");
}

#[test]
fn test_set_teams_changes_matchup() {
    let mut store = AppStore::from_config(&ScorebookConfig::default());
    store.set_opponent(Team::new(
        TeamInfo::new("Harbor Cats", "HBR"),
        Vec::new(),
        PlayerCard::new("Ace", 18, "Pitcher"),
    ));
    store.update_my_team(|team| team.set_lineup(vec![PlayerCard::new("Lone", 1, "C")]));
    assert_eq!(store.matchup().home.short_name, "HBR");
    assert!(store.my_team().batting_order().is_none());
}

#[test]
fn test_my_team_bats_first() {
    let mut store = AppStore::from_config(&ScorebookConfig::default());
    store.set_my_team(Team::new(
        TeamInfo::new("Seagulls", "SEA"),
        Vec::new(),
        PlayerCard::new("Gull", 18, "Pitcher"),
    ));
    let matchup = store.matchup();
    assert_eq!(matchup.away.short_name, "SEA");
    assert_eq!(matchup.home.short_name, "AKA");
}
