//! Ledger invariant: total runs equal the sum of the inning line.

use super::Invariant;
use crate::state::GameState;
use crate::types::Side;

/// Invariant: for both teams, `runs` equals the sum of every recorded inning.
pub struct LedgerBalanced;

impl Invariant<GameState> for LedgerBalanced {
    fn holds(state: &GameState) -> bool {
        [Side::Away, Side::Home].into_iter().all(|side| {
            let line = state.line(side);
            *line.runs() == line.inning_total()
        })
    }

    fn description() -> &'static str {
        "Runs equal the sum of the inning-by-inning line"
    }
}
