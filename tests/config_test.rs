//! Tests for loading scorebook configuration files.

use std::io::Write;
use std::time::Duration;
use strictly_baseball::ResolutionMode;
use strictly_scorebook::ScorebookConfig;

#[test]
fn test_load_full_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[away]
name = "Seagulls"
short_name = "SEA"

[home]
name = "Harbor Cats"
short_name = "HBR"

[game]
regulation_innings = 7
message_duration_ms = 500
strict_resolution = true

[lineup]
batters = ["One", "Two", "Three"]
pitchers = ["Lefty"]
"#
    )
    .unwrap();

    let config = ScorebookConfig::from_file(file.path()).unwrap();
    assert_eq!(config.matchup().away.short_name, "SEA");
    assert_eq!(config.matchup().home.name, "Harbor Cats");

    let options = config.controller_options();
    assert_eq!(options.regulation_innings, 7);
    assert_eq!(options.message_duration, Duration::from_millis(500));
    assert_eq!(options.resolution_mode, ResolutionMode::Strict);
    assert_eq!(config.lineup().batters().len(), 3);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScorebookConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(config, ScorebookConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[game\nregulation_innings = ").unwrap();
    let err = ScorebookConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_short_batting_order_is_rejected() {
    let toml = r#"
[lineup.away_order]
batters = [{ name = "Solo", number = 1, position = "C" }]
pitcher = { name = "Ace", number = 18, position = "P" }
"#;
    let err = ScorebookConfig::from_toml(toml).unwrap_err();
    assert!(err.message.contains("away_order"));
}
