//! Application state: both teams and the history of finished games.

use crate::config::{OrderSection, ScorebookConfig};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_baseball::{
    BattingOrder, BattingRotation, GameRecord, GameRecordSink, LineupRotation, Matchup, NamePool, PlayerCard, Side,
    TeamInfo, DEFAULT_PITCHERS,
};
use tracing::{debug, info, instrument, warn};

/// A team as the scorebook knows it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Team {
    info: TeamInfo,
    lineup: Vec<PlayerCard>,
    pitcher: PlayerCard,
}

impl Team {
    /// Builds a team from its name and an optional configured order.
    ///
    /// Without an order the lineup is empty and `fallback_pitcher` pitches.
    pub fn from_section(info: TeamInfo, order: Option<&OrderSection>, fallback_pitcher: &str) -> Self {
        match order {
            Some(order) => Self::new(info, order.batters().clone(), order.pitcher().clone()),
            None => Self::new(info, Vec::new(), PlayerCard::new(fallback_pitcher, 18, "Pitcher")),
        }
    }

    /// Replaces the batting order.
    pub fn set_lineup(&mut self, lineup: Vec<PlayerCard>) {
        self.lineup = lineup;
    }

    /// Replaces the pitcher.
    pub fn set_pitcher(&mut self, pitcher: PlayerCard) {
        self.pitcher = pitcher;
    }

    /// A nine-slot order for the controller, if the lineup is complete.
    pub fn batting_order(&self) -> Option<BattingOrder> {
        BattingOrder::new(self.lineup.clone(), self.pitcher.clone())
    }
}

/// Batter source picked from the store's lineups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorebookRotation {
    /// Shared name pool.
    Pool(NamePool),
    /// Per-side batting orders.
    Lineup(LineupRotation),
}

impl BattingRotation for ScorebookRotation {
    fn current_batter(&self, side: Side) -> PlayerCard {
        match self {
            Self::Pool(pool) => pool.current_batter(side),
            Self::Lineup(lineup) => lineup.current_batter(side),
        }
    }

    fn advance(&mut self, side: Side) -> PlayerCard {
        match self {
            Self::Pool(pool) => pool.advance(side),
            Self::Lineup(lineup) => lineup.advance(side),
        }
    }

    fn pitcher(&self, fielding: Side) -> PlayerCard {
        match self {
            Self::Pool(pool) => pool.pitcher(fielding),
            Self::Lineup(lineup) => lineup.pitcher(fielding),
        }
    }

    fn rewind(&mut self) {
        match self {
            Self::Pool(pool) => pool.rewind(),
            Self::Lineup(lineup) => lineup.rewind(),
        }
    }
}

/// The scorebook's in-memory store.
///
/// `my_team` bats first (visitors); `opponent` is the home side.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppStore {
    my_team: Team,
    opponent: Team,
    records: Vec<GameRecord>,
}

impl AppStore {
    /// Creates a store with no history.
    #[instrument(skip_all, fields(my_team = %my_team.info.name, opponent = %opponent.info.name))]
    pub fn new(my_team: Team, opponent: Team) -> Self {
        Self {
            my_team,
            opponent,
            records: Vec::new(),
        }
    }

    /// Builds both teams from configuration.
    #[instrument(skip_all)]
    pub fn from_config(config: &ScorebookConfig) -> Self {
        let matchup = config.matchup();
        let fallback = config
            .lineup()
            .pitchers()
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_PITCHERS[0]);
        let my_team = Team::from_section(matchup.away, config.lineup().away_order().as_ref(), fallback);
        let opponent = Team::from_section(matchup.home, config.lineup().home_order().as_ref(), fallback);
        Self::new(my_team, opponent)
    }

    /// Teams for a new game.
    pub fn matchup(&self) -> Matchup {
        Matchup {
            away: self.my_team.info.clone(),
            home: self.opponent.info.clone(),
        }
    }

    /// Per-side orders when both lineups are complete, otherwise `pool`.
    #[instrument(skip_all)]
    pub fn rotation(&self, pool: NamePool) -> ScorebookRotation {
        match (self.my_team.batting_order(), self.opponent.batting_order()) {
            (Some(away), Some(home)) => {
                debug!("Using per-side batting orders");
                ScorebookRotation::Lineup(LineupRotation::new(away, home))
            }
            _ => {
                debug!("Using shared name pool");
                ScorebookRotation::Pool(pool)
            }
        }
    }

    /// Replaces our team.
    #[instrument(skip_all, fields(team = %team.info.name))]
    pub fn set_my_team(&mut self, team: Team) {
        self.my_team = team;
    }

    /// Replaces the opponent.
    #[instrument(skip_all, fields(team = %team.info.name))]
    pub fn set_opponent(&mut self, team: Team) {
        self.opponent = team;
    }

    /// Edits our team in place.
    pub fn update_my_team(&mut self, edit: impl FnOnce(&mut Team)) {
        edit(&mut self.my_team);
    }

    /// Adds a finished game, newest first.
    ///
    /// Returns false and keeps the history unchanged if a record with the
    /// same id is already stored.
    #[instrument(skip_all, fields(id = %record.id()))]
    pub fn add_game_record(&mut self, record: GameRecord) -> bool {
        if self.records.iter().any(|r| r.id() == record.id()) {
            warn!("Game already saved");
            return false;
        }
        info!(outcome = %record.outcome(), "Game saved");
        self.records.insert(0, record);
        true
    }
}

impl GameRecordSink for AppStore {
    fn record(&mut self, record: GameRecord) {
        self.add_game_record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, batters: usize) -> Team {
        let lineup = (1..=batters as u32)
            .map(|n| PlayerCard::new(format!("{name} {n}"), n, "Fielder"))
            .collect();
        Team::new(TeamInfo::new(name, &name[..3]), lineup, PlayerCard::new(format!("{name} ace"), 18, "Pitcher"))
    }

    #[test]
    fn test_rotation_needs_both_lineups() {
        let store = AppStore::new(team("Powerfuls", 9), team("Akatsuki", 3));
        assert!(matches!(store.rotation(NamePool::default()), ScorebookRotation::Pool(_)));

        let store = AppStore::new(team("Powerfuls", 9), team("Akatsuki", 9));
        let rotation = store.rotation(NamePool::default());
        assert!(matches!(rotation, ScorebookRotation::Lineup(_)));
        assert_eq!(rotation.current_batter(Side::Home).name, "Akatsuki 1");
    }

    #[test]
    fn test_update_my_team() {
        let mut store = AppStore::new(team("Powerfuls", 9), team("Akatsuki", 9));
        store.update_my_team(|team| team.set_pitcher(PlayerCard::new("Reliever", 41, "Pitcher")));
        assert_eq!(store.my_team().pitcher().name, "Reliever");
    }
}
