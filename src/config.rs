//! Scorebook configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_baseball::{
    ControllerOptions, Matchup, PlayerCard, ResolutionMode, TeamInfo, LINEUP_SLOTS, REGULATION_INNINGS,
};
use tracing::{debug, info, instrument, warn};

/// One team's name as shown on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
pub struct TeamSection {
    /// Full team name.
    name: String,
    /// Scoreboard abbreviation.
    short_name: String,
}

impl From<&TeamSection> for TeamInfo {
    fn from(section: &TeamSection) -> Self {
        TeamInfo::new(section.name.clone(), section.short_name.clone())
    }
}

impl From<TeamInfo> for TeamSection {
    fn from(info: TeamInfo) -> Self {
        Self {
            name: info.name,
            short_name: info.short_name,
        }
    }
}

/// Game rules and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameSection {
    /// The game ends after the bottom of this inning.
    regulation_innings: u32,
    /// How long announcements stay up, in milliseconds.
    message_duration_ms: u64,
    /// Reject plays that put two runners on one base.
    strict_resolution: bool,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            regulation_innings: REGULATION_INNINGS,
            message_duration_ms: 1800,
            strict_resolution: false,
        }
    }
}

/// A full batting order for one side.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OrderSection {
    /// Nine batters, leadoff first.
    batters: Vec<PlayerCard>,
    /// Starting pitcher.
    pitcher: PlayerCard,
}

/// Who bats and pitches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct LineupSection {
    /// Names cycled for both teams when no per-side order is given.
    batters: Vec<String>,
    /// Pitcher names; the first one pitches.
    pitchers: Vec<String>,
    /// Batting order for the visiting team.
    away_order: Option<OrderSection>,
    /// Batting order for the home team.
    home_order: Option<OrderSection>,
}

/// Complete scorebook configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ScorebookConfig {
    /// Visiting team.
    away: TeamSection,
    /// Home team.
    home: TeamSection,
    /// Rules.
    game: GameSection,
    /// Batting orders and name pool.
    lineup: LineupSection,
}

impl Default for ScorebookConfig {
    fn default() -> Self {
        let matchup = Matchup::default();
        Self {
            away: matchup.away.into(),
            home: matchup.home.into(),
            game: GameSection::default(),
            lineup: LineupSection::default(),
        }
    }
}

impl ScorebookConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(away = %config.away.name, home = %config.home.name, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates TOML text.
    #[instrument(skip(content), fields(len = content.len()))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given and present, otherwise the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks values that TOML alone cannot constrain.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.regulation_innings == 0 {
            return Err(ConfigError::new("regulation_innings must be at least 1".to_string()));
        }
        for (side, order) in [("away", &self.lineup.away_order), ("home", &self.lineup.home_order)] {
            if let Some(order) = order {
                if order.batters.len() != LINEUP_SLOTS {
                    return Err(ConfigError::new(format!(
                        "{}_order needs {} batters, found {}",
                        side,
                        LINEUP_SLOTS,
                        order.batters.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Teams for the controller.
    pub fn matchup(&self) -> Matchup {
        Matchup {
            away: TeamInfo::from(&self.away),
            home: TeamInfo::from(&self.home),
        }
    }

    /// Controller options derived from the `[game]` section.
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            regulation_innings: self.game.regulation_innings,
            message_duration: Duration::from_millis(self.game.message_duration_ms),
            resolution_mode: if self.game.strict_resolution {
                ResolutionMode::Strict
            } else {
                ResolutionMode::Permissive
            },
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ScorebookConfig::from_toml("").unwrap();
        assert_eq!(config, ScorebookConfig::default());
        assert_eq!(*config.game().regulation_innings(), 9);
    }

    #[test]
    fn test_partial_game_section() {
        let config = ScorebookConfig::from_toml("[game]\nstrict_resolution = true\n").unwrap();
        assert_eq!(config.controller_options().resolution_mode, ResolutionMode::Strict);
        assert_eq!(config.controller_options().message_duration, Duration::from_millis(1800));
    }

    #[test]
    fn test_zero_innings_rejected() {
        let err = ScorebookConfig::from_toml("[game]\nregulation_innings = 0\n").unwrap_err();
        assert!(err.message.contains("regulation_innings"));
    }

    #[test]
    fn test_builders() {
        let config = ScorebookConfig::default()
            .with_home(TeamSection::from(TeamInfo::new("Seagulls", "SEA")))
            .with_game(GameSection::default().with_regulation_innings(7));
        assert_eq!(config.matchup().home.short_name, "SEA");
        assert_eq!(config.controller_options().regulation_innings, 7);
    }
}
