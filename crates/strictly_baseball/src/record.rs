//! Finished-game records and the sink that stores them.

use crate::ledger::TeamScoreline;
use crate::state::GameState;
use crate::types::Side;
use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// One side outscored the other.
    #[display("{_0} wins")]
    Winner(Side),
    /// Level after the final half-inning.
    #[display("Tie")]
    Tie,
}

/// One team's line in a saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RecordLine {
    name: String,
    short_name: String,
    runs: u32,
    hits: u32,
    errors: u32,
    innings: Vec<Option<u32>>,
}

impl From<&TeamScoreline> for RecordLine {
    fn from(line: &TeamScoreline) -> Self {
        Self {
            name: line.team().name.clone(),
            short_name: line.team().short_name.clone(),
            runs: *line.runs(),
            hits: *line.hits(),
            errors: *line.errors(),
            innings: line.innings().clone(),
        }
    }
}

/// A finished game as kept in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    id: String,
    date: NaiveDate,
    away: RecordLine,
    home: RecordLine,
    innings_played: u32,
    outcome: Outcome,
}

impl GameRecord {
    /// Builds a record from a final snapshot.
    #[instrument(skip(state), fields(away = *state.away().runs(), home = *state.home().runs()))]
    pub fn from_state(id: impl Into<String> + std::fmt::Debug, date: NaiveDate, state: &GameState) -> Self {
        let away_runs = *state.away().runs();
        let home_runs = *state.home().runs();
        let outcome = match away_runs.cmp(&home_runs) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::Away),
            std::cmp::Ordering::Less => Outcome::Winner(Side::Home),
            std::cmp::Ordering::Equal => Outcome::Tie,
        };
        Self {
            id: id.into(),
            date,
            away: RecordLine::from(state.away()),
            home: RecordLine::from(state.home()),
            innings_played: state.situation().inning,
            outcome,
        }
    }

    /// Returns the line for `side`.
    pub fn line(&self, side: Side) -> &RecordLine {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

/// Receives finished games for history.
pub trait GameRecordSink {
    /// Stores `record`.
    fn record(&mut self, record: GameRecord);
}

impl GameRecordSink for Vec<GameRecord> {
    #[instrument(skip_all, fields(id = %record.id))]
    fn record(&mut self, record: GameRecord) {
        info!("Game record stored");
        self.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameController, SimpleAction};

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Winner(Side::Home).to_string(), "home wins");
        assert_eq!(Outcome::Winner(Side::Away).to_string(), "away wins");
        assert_eq!(Outcome::Tie.to_string(), "Tie");
    }

    #[test]
    fn test_from_state_reads_ledger() {
        let mut game = GameController::default();
        game.handle_action(SimpleAction::Homerun.into());
        let date = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        let record = GameRecord::from_state("g1", date, game.snapshot());
        assert_eq!(*record.outcome(), Outcome::Winner(Side::Away));
        assert_eq!(*record.line(Side::Away).runs(), 1);
        assert_eq!(*record.line(Side::Away).hits(), 1);
        assert_eq!(*record.line(Side::Home).runs(), 0);
    }

    #[test]
    fn test_vec_sink_appends() {
        let mut sink: Vec<GameRecord> = Vec::new();
        let game = GameController::default();
        let date = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        sink.record(GameRecord::from_state("g1", date, game.snapshot()));
        assert_eq!(sink.len(), 1);
        assert_eq!(*sink[0].outcome(), Outcome::Tie);
    }
}
