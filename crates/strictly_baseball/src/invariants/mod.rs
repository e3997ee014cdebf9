//! First-class invariants for the live game snapshot.
//!
//! Invariants are logical properties that must hold after every committed
//! transition. They are testable independently and document what the
//! controller guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod count_limits;
pub mod ledger_balanced;
pub mod innings_recorded;

pub use count_limits::CountWithinLimits;
pub use innings_recorded::PlayedInningsRecorded;
pub use ledger_balanced::LedgerBalanced;

/// All snapshot invariants as a composable set.
pub type BaseballInvariants = (CountWithinLimits, LedgerBalanced, PlayedInningsRecorded);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameController, SimpleAction};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameController::default();
        assert!(BaseballInvariants::check_all(game.snapshot()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_scoring() {
        let mut game = GameController::default();
        game.handle_action(SimpleAction::Homerun.into());
        game.handle_action(SimpleAction::Walk.into());
        game.handle_action(SimpleAction::Triple.into());
        assert!(BaseballInvariants::check_all(game.snapshot()).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameController::default();
        type TwoInvariants = (CountWithinLimits, LedgerBalanced);
        assert!(TwoInvariants::check_all(game.snapshot()).is_ok());
    }
}
