//! Core domain types for live baseball scoring.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the three bases a runner can occupy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, derive_more::Display,
)]
pub enum Base {
    /// First base.
    #[display("1B")]
    #[serde(rename = "1B")]
    First,
    /// Second base.
    #[display("2B")]
    #[serde(rename = "2B")]
    Second,
    /// Third base.
    #[display("3B")]
    #[serde(rename = "3B")]
    Third,
}

impl Base {
    /// Returns the occupancy index (0 = first, 2 = third).
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Returns the base one station further along, or `None` from third.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => Some(Self::Third),
            Self::Third => None,
        }
    }
}

/// Where a runner slot starts the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// The batter at the plate.
    #[display("batter")]
    Batter,
    /// A runner already on base.
    #[display("{_0}")]
    Runner(Base),
}

impl Origin {
    /// Returns the base the runner starts on, if any.
    pub fn base(self) -> Option<Base> {
        match self {
            Self::Batter => None,
            Self::Runner(base) => Some(base),
        }
    }

    /// Returns the label shown next to this slot on the resolution sheet.
    pub fn label(self) -> &'static str {
        match self {
            Self::Batter => "Batter",
            Self::Runner(Base::First) => "Runner on 1st",
            Self::Runner(Base::Second) => "Runner on 2nd",
            Self::Runner(Base::Third) => "Runner on 3rd",
        }
    }
}

/// Outcome chosen for a single runner slot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    derive_more::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Destination {
    /// Runner is retired.
    #[display("out")]
    #[serde(rename = "out")]
    #[strum(serialize = "out")]
    Out,
    /// Runner ends on first.
    #[display("1B")]
    #[serde(rename = "1B")]
    #[strum(serialize = "1B", serialize = "first")]
    First,
    /// Runner ends on second.
    #[display("2B")]
    #[serde(rename = "2B")]
    #[strum(serialize = "2B", serialize = "second")]
    Second,
    /// Runner ends on third.
    #[display("3B")]
    #[serde(rename = "3B")]
    #[strum(serialize = "3B", serialize = "third")]
    Third,
    /// Runner scores.
    #[display("home")]
    #[serde(rename = "home")]
    #[strum(serialize = "home")]
    Home,
    /// Runner holds the base they started on.
    #[display("stay")]
    #[serde(rename = "stay")]
    #[strum(serialize = "stay")]
    Stay,
}

impl Destination {
    /// Returns the base this destination occupies, if it names one.
    pub fn base(self) -> Option<Base> {
        match self {
            Self::First => Some(Base::First),
            Self::Second => Some(Base::Second),
            Self::Third => Some(Base::Third),
            Self::Out | Self::Home | Self::Stay => None,
        }
    }

    /// Returns the sheet label for this destination.
    pub fn label(self) -> &'static str {
        match self {
            Self::Out => "OUT",
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
            Self::Home => "Scores",
            Self::Stay => "Holds",
        }
    }
}

impl From<Base> for Destination {
    fn from(base: Base) -> Self {
        match base {
            Base::First => Self::First,
            Base::Second => Self::Second,
            Base::Third => Self::Third,
        }
    }
}

/// Which team a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Visiting team, bats in the top half.
    #[display("away")]
    Away,
    /// Home team, bats in the bottom half.
    #[display("home")]
    Home,
}

impl Side {
    /// Returns the other team.
    pub fn opponent(self) -> Self {
        match self {
            Self::Away => Self::Home,
            Self::Home => Self::Away,
        }
    }
}

/// Half of an inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    /// Away team bats.
    #[display("top")]
    Top,
    /// Home team bats.
    #[display("bottom")]
    Bottom,
}

impl Half {
    /// Returns the side at the plate during this half.
    pub fn batting_side(self) -> Side {
        match self {
            Self::Top => Side::Away,
            Self::Bottom => Side::Home,
        }
    }

    /// Returns the side in the field during this half.
    pub fn fielding_side(self) -> Side {
        self.batting_side().opponent()
    }

    /// Returns true for the top half.
    pub fn is_top(self) -> bool {
        matches!(self, Self::Top)
    }
}

/// Base occupancy: first, second, third.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bases([bool; 3]);

impl Bases {
    /// Empty bases.
    pub const EMPTY: Self = Self([false; 3]);

    /// Bases loaded.
    pub const LOADED: Self = Self([true; 3]);

    /// Creates occupancy from first/second/third flags.
    pub fn new(first: bool, second: bool, third: bool) -> Self {
        Self([first, second, third])
    }

    /// Returns true if a runner is on `base`.
    pub fn occupied(&self, base: Base) -> bool {
        self.0[base.index()]
    }

    /// Marks `base` occupied or vacant.
    pub fn set(&mut self, base: Base, occupied: bool) {
        self.0[base.index()] = occupied;
    }

    /// Number of runners on base.
    pub fn count(&self) -> u32 {
        self.0.iter().filter(|&&b| b).count() as u32
    }

    /// Returns true if nobody is on base.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Occupied bases, lead runner first (third, second, first).
    pub fn runners_lead_first(&self) -> Vec<Base> {
        [Base::Third, Base::Second, Base::First]
            .into_iter()
            .filter(|&base| self.occupied(base))
            .collect()
    }

    /// Raw occupancy flags.
    pub fn as_array(&self) -> [bool; 3] {
        self.0
    }
}

impl From<[bool; 3]> for Bases {
    fn from(flags: [bool; 3]) -> Self {
        Self(flags)
    }
}

/// Balls and strikes on the current batter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Count {
    /// Balls (0-3 when committed).
    pub balls: u8,
    /// Strikes (0-2 when committed).
    pub strikes: u8,
}

/// Display snapshot of a batter or pitcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCard {
    /// Player name.
    pub name: String,
    /// Uniform number.
    pub number: u32,
    /// Fielding position label.
    pub position: String,
    /// Batting average, preformatted (".321").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<String>,
    /// Earned run average, preformatted ("2.45").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
}

impl PlayerCard {
    /// Creates a card without stats.
    #[instrument(skip(name, position), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, number: u32, position: impl Into<String>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            number,
            position: position.into(),
            avg: None,
            era: None,
        }
    }

    /// Attaches a batting average.
    pub fn with_avg(mut self, avg: impl Into<String>) -> Self {
        self.avg = Some(avg.into());
        self
    }

    /// Attaches an earned run average.
    pub fn with_era(mut self, era: impl Into<String>) -> Self {
        self.era = Some(era.into());
        self
    }
}

/// Team identity shown on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamInfo {
    /// Full team name.
    pub name: String,
    /// Abbreviation for the line score.
    pub short_name: String,
}

impl TeamInfo {
    /// Creates team info.
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

/// Both teams in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    /// Visiting team.
    pub away: TeamInfo,
    /// Home team.
    pub home: TeamInfo,
}

impl Default for Matchup {
    fn default() -> Self {
        Self {
            away: TeamInfo::new("Powerfuls", "POW"),
            home: TeamInfo::new("Akatsuki Prep", "AKA"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_destination_parses_base_keywords() {
        assert_eq!(Destination::from_str("2B").unwrap(), Destination::Second);
        assert_eq!(Destination::from_str("2b").unwrap(), Destination::Second);
        assert_eq!(Destination::from_str("home").unwrap(), Destination::Home);
        assert!(Destination::from_str("dugout").is_err());
    }

    #[test]
    fn test_runners_lead_first() {
        let bases = Bases::new(true, false, true);
        assert_eq!(bases.runners_lead_first(), vec![Base::Third, Base::First]);
        assert_eq!(bases.count(), 2);
    }

    #[test]
    fn test_half_sides() {
        assert_eq!(Half::Top.batting_side(), Side::Away);
        assert_eq!(Half::Bottom.fielding_side(), Side::Away);
    }
}
