//! Live game snapshot and its update primitives.

use crate::ledger::TeamScoreline;
use crate::types::{Bases, Count, Half, Matchup, PlayerCard, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Balls that award first base.
pub const BALLS_FOR_WALK: u8 = 4;

/// Strikes that retire the batter.
pub const STRIKES_FOR_OUT: u8 = 3;

/// Outs that end a half-inning.
pub const OUTS_PER_HALF: u8 = 3;

/// Count, outs, bases and inning position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseOutState {
    /// Balls and strikes.
    pub count: Count,
    /// Outs in the current half-inning.
    pub outs: u8,
    /// Runner occupancy.
    pub bases: Bases,
    /// Current inning (1-based).
    pub inning: u32,
    /// Current half.
    pub half: Half,
    /// Set once the final half-inning is complete.
    pub is_game_over: bool,
}

impl BaseOutState {
    /// Top of the first, nobody on, nobody out.
    pub fn new() -> Self {
        Self {
            count: Count::default(),
            outs: 0,
            bases: Bases::EMPTY,
            inning: 1,
            half: Half::Top,
            is_game_over: false,
        }
    }

    /// Returns true while the away team bats.
    pub fn is_top(&self) -> bool {
        self.half.is_top()
    }
}

impl Default for BaseOutState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a forced advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedAdvance {
    /// Occupancy after the batter takes first.
    pub bases: Bases,
    /// Runners forced home.
    pub runs: u32,
}

/// Places the batter on first, moving only runners who are forced.
///
/// The runner on third scores only with the bases loaded, the runner on second
/// moves only when first is occupied, and the runner on first always moves up.
#[instrument]
pub fn force_advance(bases: Bases) -> ForcedAdvance {
    let [first, second, third] = bases.as_array();
    let mut next = bases.as_array();
    let mut runs = 0;
    if first {
        if second {
            if third {
                runs += 1;
            }
            next[2] = true;
        }
        next[1] = true;
    }
    next[0] = true;
    debug!(?next, runs, "Forced advance");
    ForcedAdvance {
        bases: Bases::from(next),
        runs,
    }
}

/// Read-only view of everything on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    situation: BaseOutState,
    away: TeamScoreline,
    home: TeamScoreline,
    batter: PlayerCard,
    pitcher: PlayerCard,
}

impl GameState {
    /// Creates the opening snapshot.
    #[instrument(skip_all)]
    pub fn new(matchup: &Matchup, batter: PlayerCard, pitcher: PlayerCard) -> Self {
        Self {
            situation: BaseOutState::new(),
            away: TeamScoreline::new(matchup.away.clone()),
            home: TeamScoreline::new(matchup.home.clone()),
            batter,
            pitcher,
        }
    }

    /// Returns the line for `side`.
    pub fn line(&self, side: Side) -> &TeamScoreline {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.situation.is_game_over
    }

    /// Side currently at the plate.
    pub fn batting_side(&self) -> Side {
        self.situation.half.batting_side()
    }

    /// Side currently in the field.
    pub fn fielding_side(&self) -> Side {
        self.situation.half.fielding_side()
    }

    pub(crate) fn situation_mut(&mut self) -> &mut BaseOutState {
        &mut self.situation
    }

    pub(crate) fn line_mut(&mut self, side: Side) -> &mut TeamScoreline {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    pub(crate) fn set_batter(&mut self, batter: PlayerCard) {
        self.batter = batter;
    }

    pub(crate) fn set_pitcher(&mut self, pitcher: PlayerCard) {
        self.pitcher = pitcher;
    }

    /// Records a zero for the batting side's current inning if it is blank.
    #[instrument(skip(self))]
    pub fn ensure_inning_recorded(&mut self) {
        let inning = self.situation.inning;
        let side = self.batting_side();
        self.line_mut(side).ensure_inning_recorded(inning);
    }

    /// Credits `runs` to the batting side. No-op for zero.
    #[instrument(skip(self))]
    pub fn add_runs(&mut self, runs: u32) {
        let inning = self.situation.inning;
        let side = self.batting_side();
        self.line_mut(side).add_runs(inning, runs);
    }

    /// Credits hits to the batting side.
    #[instrument(skip(self))]
    pub fn add_hits(&mut self, hits: u32) {
        let side = self.batting_side();
        self.line_mut(side).add_hits(hits);
    }

    /// Charges errors to the fielding side.
    #[instrument(skip(self))]
    pub fn add_errors(&mut self, errors: u32) {
        let side = self.fielding_side();
        self.line_mut(side).add_errors(errors);
    }

    /// Zeroes balls and strikes; outs and bases are untouched.
    #[instrument(skip(self))]
    pub fn reset_count(&mut self) {
        self.situation.count = Count::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(
            &Matchup::default(),
            PlayerCard::new("Batter", 1, "P"),
            PlayerCard::new("Pitcher", 18, "P"),
        )
    }

    #[test]
    fn test_force_advance_loaded_scores_one() {
        let forced = force_advance(Bases::LOADED);
        assert_eq!(forced.runs, 1);
        assert_eq!(forced.bases, Bases::LOADED);
    }

    #[test]
    fn test_force_advance_first_and_second_loads_bases() {
        let forced = force_advance(Bases::new(true, true, false));
        assert_eq!(forced.runs, 0);
        assert_eq!(forced.bases, Bases::LOADED);
    }

    #[test]
    fn test_force_advance_first_only() {
        let forced = force_advance(Bases::new(true, false, false));
        assert_eq!(forced.bases, Bases::new(true, true, false));
        assert_eq!(forced.runs, 0);
    }

    #[test]
    fn test_force_advance_unforced_runners_hold() {
        let forced = force_advance(Bases::new(false, true, true));
        assert_eq!(forced.bases, Bases::LOADED);
        assert_eq!(forced.runs, 0);

        let forced = force_advance(Bases::new(false, false, true));
        assert_eq!(forced.bases, Bases::new(true, false, true));
    }

    #[test]
    fn test_errors_charged_to_fielding_side() {
        let mut state = state();
        state.add_errors(1);
        state.add_hits(1);
        assert_eq!(*state.home().errors(), 1);
        assert_eq!(*state.away().hits(), 1);
        assert_eq!(*state.away().errors(), 0);
    }

    #[test]
    fn test_reset_count_keeps_outs_and_bases() {
        let mut state = state();
        state.situation_mut().count = Count { balls: 3, strikes: 2 };
        state.situation_mut().outs = 2;
        state.situation_mut().bases = Bases::LOADED;
        state.reset_count();
        assert_eq!(state.situation().count, Count::default());
        assert_eq!(state.situation().outs, 2);
        assert_eq!(state.situation().bases, Bases::LOADED);
    }
}
