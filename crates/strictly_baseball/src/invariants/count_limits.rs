//! Count invariant: balls, strikes and outs stay below their thresholds.

use super::Invariant;
use crate::state::{GameState, BALLS_FOR_WALK, OUTS_PER_HALF, STRIKES_FOR_OUT};

/// Invariant: no committed snapshot shows four balls, three strikes or three outs.
///
/// The final snapshot of a finished game may keep the third out on the board.
pub struct CountWithinLimits;

impl Invariant<GameState> for CountWithinLimits {
    fn holds(state: &GameState) -> bool {
        let situation = state.situation();
        let max_outs = if situation.is_game_over {
            OUTS_PER_HALF
        } else {
            OUTS_PER_HALF - 1
        };
        situation.count.balls < BALLS_FOR_WALK
            && situation.count.strikes < STRIKES_FOR_OUT
            && situation.outs <= max_outs
    }

    fn description() -> &'static str {
        "Balls <= 3, strikes <= 2, outs <= 2 between plays"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameController, SimpleAction};

    #[test]
    fn test_holds_through_full_count() {
        let mut game = GameController::default();
        for action in [SimpleAction::Ball, SimpleAction::Ball, SimpleAction::Ball] {
            game.handle_action(action.into());
        }
        for action in [SimpleAction::Strike, SimpleAction::Foul, SimpleAction::Foul] {
            game.handle_action(action.into());
        }
        assert_eq!(game.snapshot().situation().count.balls, 3);
        assert_eq!(game.snapshot().situation().count.strikes, 2);
        assert!(CountWithinLimits::holds(game.snapshot()));
    }
}
