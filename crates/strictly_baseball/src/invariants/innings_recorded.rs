//! Innings invariant: every completed half-inning shows a number.

use super::Invariant;
use crate::state::GameState;
use crate::types::Half;

/// Invariant: a half-inning that has been completed is never blank.
///
/// Away has completed innings `1..inning`, plus the current one once the
/// bottom half has started. Home has completed `1..inning`, plus the current
/// one when the game ended in the bottom half.
pub struct PlayedInningsRecorded;

impl Invariant<GameState> for PlayedInningsRecorded {
    fn holds(state: &GameState) -> bool {
        let situation = state.situation();
        let inning = situation.inning;
        let in_bottom = situation.half == Half::Bottom;

        let away_done = if in_bottom { inning } else { inning - 1 };
        let home_done = if in_bottom && situation.is_game_over {
            inning
        } else {
            inning - 1
        };

        (1..=away_done).all(|i| state.away().inning(i).is_some())
            && (1..=home_done).all(|i| state.home().inning(i).is_some())
    }

    fn description() -> &'static str {
        "Completed half-innings are recorded (zero rather than blank)"
    }
}
