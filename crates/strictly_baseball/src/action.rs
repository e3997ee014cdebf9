//! Scoring actions a manager can record.
//!
//! Actions are domain events: simple actions commit immediately, complex
//! actions open a pending play that must be resolved runner by runner.

use serde::{Deserialize, Serialize};

/// Whether an action commits directly or needs runner resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Deterministic, committed immediately.
    #[display("simple")]
    Simple,
    /// Requires a pending play.
    #[display("complex")]
    Complex,
}

/// Actions that need runner-by-runner resolution.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ComplexAction {
    /// One-base hit.
    #[display("single")]
    Single,
    /// Two-base hit.
    #[display("double")]
    Double,
    /// Fly out that scores the runner from third.
    #[display("sacrifice-fly")]
    SacrificeFly,
    /// Bunt that advances runners at the batter's expense.
    #[display("sacrifice-bunt")]
    SacrificeBunt,
    /// Two outs on one batted ball.
    #[display("double-play")]
    DoublePlay,
    /// Batter reaches while a runner is retired.
    #[display("fielders-choice")]
    FieldersChoice,
    /// Runners advance on the pitch.
    #[display("stolen-base")]
    StolenBase,
    /// Runner thrown out stealing.
    #[display("caught-stealing")]
    CaughtStealing,
    /// Runners advance on a wild pitch.
    #[display("wild-pitch")]
    WildPitch,
    /// Every runner awarded one base.
    #[display("balk")]
    Balk,
    /// Batter reaches on a fielding error.
    #[display("error")]
    Error,
}

impl ComplexAction {
    /// Label shown on the resolution sheet and in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::SacrificeFly => "Sacrifice fly",
            Self::SacrificeBunt => "Sacrifice bunt",
            Self::DoublePlay => "Double play",
            Self::FieldersChoice => "Fielder's choice",
            Self::StolenBase => "Stolen base",
            Self::CaughtStealing => "Caught stealing",
            Self::WildPitch => "Wild pitch",
            Self::Balk => "Balk",
            Self::Error => "Error",
        }
    }
}

/// Actions that always commit immediately.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SimpleAction {
    /// Pitch outside the zone.
    #[display("ball")]
    Ball,
    /// Called or swinging strike.
    #[display("strike")]
    Strike,
    /// Foul ball; never the third strike.
    #[display("foul")]
    Foul,
    /// Home run.
    #[display("homerun")]
    Homerun,
    /// Three-base hit.
    #[display("triple")]
    Triple,
    /// Batter retired, runners hold.
    #[display("out")]
    Out,
    /// Base on balls.
    #[display("walk")]
    Walk,
    /// Batter hit by the pitch.
    #[display("hit-by-pitch")]
    HitByPitch,
    /// Intentional base on balls.
    #[display("intentional-walk")]
    IntentionalWalk,
    /// Start over from the first pitch.
    #[display("reset")]
    Reset,
}

/// Any action the controller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From)]
#[serde(untagged)]
pub enum GameAction {
    /// Committed immediately.
    #[display("{_0}")]
    Simple(SimpleAction),
    /// Resolved through a pending play.
    #[display("{_0}")]
    Complex(ComplexAction),
}

impl GameAction {
    /// Returns whether the action is simple or complex.
    pub fn kind(self) -> ActionKind {
        match self {
            Self::Simple(_) => ActionKind::Simple,
            Self::Complex(_) => ActionKind::Complex,
        }
    }

    /// Every action keyword, simple actions first.
    pub fn all() -> Vec<Self> {
        use strum::IntoEnumIterator;
        SimpleAction::iter()
            .map(Self::Simple)
            .chain(ComplexAction::iter().map(Self::Complex))
            .collect()
    }
}

impl std::str::FromStr for GameAction {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimpleAction::from_str(s)
            .map(Self::Simple)
            .or_else(|_| ComplexAction::from_str(s).map(Self::Complex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_kebab_keywords() {
        assert_eq!(
            GameAction::from_str("hit-by-pitch").unwrap(),
            GameAction::Simple(SimpleAction::HitByPitch)
        );
        assert_eq!(
            GameAction::from_str("Fielders-Choice").unwrap(),
            GameAction::Complex(ComplexAction::FieldersChoice)
        );
        assert!(GameAction::from_str("infield-fly").is_err());
    }

    #[test]
    fn test_display_matches_keyword() {
        for action in GameAction::all() {
            let keyword = action.to_string();
            assert_eq!(GameAction::from_str(&keyword).unwrap(), action);
        }
    }

    #[test]
    fn test_action_counts() {
        let all = GameAction::all();
        assert_eq!(all.len(), 21);
        assert_eq!(all.iter().filter(|a| a.kind() == ActionKind::Complex).count(), 11);
    }
}
