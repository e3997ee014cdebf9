//! Per-side runs, hits, errors and the inning-by-inning line.

use crate::types::TeamInfo;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of inning slots every line score starts with.
pub const REGULATION_SLOTS: usize = 9;

/// Box-score line for one team.
///
/// `innings[i]` holds runs scored in inning `i + 1`; `None` means the team has
/// not batted in that inning yet. Extra innings grow the vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TeamScoreline {
    team: TeamInfo,
    runs: u32,
    hits: u32,
    errors: u32,
    innings: Vec<Option<u32>>,
}

impl TeamScoreline {
    /// Creates an empty line for `team`.
    #[instrument(skip(team), fields(team = %team.name))]
    pub fn new(team: TeamInfo) -> Self {
        Self {
            team,
            runs: 0,
            hits: 0,
            errors: 0,
            innings: vec![None; REGULATION_SLOTS],
        }
    }

    /// Marks `inning` (1-based) as played, scoring zero if nothing is recorded yet.
    #[instrument(skip(self), fields(team = %self.team.short_name))]
    pub fn ensure_inning_recorded(&mut self, inning: u32) {
        let slot = self.slot_mut(inning);
        if slot.is_none() {
            *slot = Some(0);
        }
    }

    /// Adds `runs` to the total and to `inning`. No-op for zero.
    #[instrument(skip(self), fields(team = %self.team.short_name))]
    pub fn add_runs(&mut self, inning: u32, runs: u32) {
        if runs == 0 {
            return;
        }
        self.runs += runs;
        let slot = self.slot_mut(inning);
        *slot = Some(slot.unwrap_or(0) + runs);
        debug!(total = self.runs, "Runs added");
    }

    /// Credits hits.
    #[instrument(skip(self), fields(team = %self.team.short_name))]
    pub fn add_hits(&mut self, hits: u32) {
        self.hits += hits;
    }

    /// Charges errors.
    #[instrument(skip(self), fields(team = %self.team.short_name))]
    pub fn add_errors(&mut self, errors: u32) {
        self.errors += errors;
    }

    /// Runs in `inning` (1-based), if that inning has been played.
    pub fn inning(&self, inning: u32) -> Option<u32> {
        let index = (inning as usize).checked_sub(1)?;
        self.innings.get(index).copied().flatten()
    }

    /// Sum of every recorded inning.
    pub fn inning_total(&self) -> u32 {
        self.innings.iter().flatten().sum()
    }

    fn slot_mut(&mut self, inning: u32) -> &mut Option<u32> {
        let index = (inning.max(1) - 1) as usize;
        if index >= self.innings.len() {
            self.innings.resize(index + 1, None);
        }
        &mut self.innings[index]
    }
}
