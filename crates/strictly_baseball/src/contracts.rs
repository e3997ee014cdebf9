//! Contract-based validation for committing a pending play.
//!
//! Contracts formalize Hoare-style reasoning: {P} commit {Q}

use crate::commit::{validate, ResolutionMode};
use crate::error::PlayError;
use crate::invariants::{BaseballInvariants, InvariantSet};
use crate::pending::PendingPlay;
use crate::state::GameState;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), PlayError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), PlayError>;
}

/// A play about to be committed, with the mode it is checked under.
#[derive(Debug, Clone, Copy)]
pub struct CommitRequest<'a> {
    /// The resolved play.
    pub play: &'a PendingPlay,
    /// Validation mode.
    pub mode: ResolutionMode,
}

/// Contract for committing a resolved play.
///
/// Preconditions:
/// - The game is still in progress
/// - Every slot is resolvable under the mode
///
/// Postconditions:
/// - Count, ledger and innings invariants hold
pub struct CommitContract;

impl<'a> Contract<GameState, CommitRequest<'a>> for CommitContract {
    #[instrument(skip_all, fields(play = %request.play.action_label(), mode = ?request.mode))]
    fn pre(state: &GameState, request: &CommitRequest<'a>) -> Result<(), PlayError> {
        if state.is_game_over() {
            return Err(PlayError::GameOver);
        }
        validate(request.play, request.mode)
    }

    #[instrument(skip_all)]
    fn post(_before: &GameState, after: &GameState) -> Result<(), PlayError> {
        BaseballInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            PlayError::InvariantViolation(descriptions)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::RunnerSlot;
    use crate::types::{Destination, Matchup, Origin, PlayerCard};

    fn fresh() -> GameState {
        GameState::new(
            &Matchup::default(),
            PlayerCard::new("Batter", 1, "CF"),
            PlayerCard::new("Pitcher", 18, "P"),
        )
    }

    #[test]
    fn test_pre_rejects_unresolvable_play() {
        let play = PendingPlay::new(
            "Single",
            vec![RunnerSlot::new(Origin::Batter, Destination::Stay, &[Destination::Stay])],
            true,
            false,
        );
        let request = CommitRequest {
            play: &play,
            mode: ResolutionMode::Permissive,
        };
        assert_eq!(
            CommitContract::pre(&fresh(), &request),
            Err(PlayError::StayFromBatter { index: 0 })
        );
    }

    #[test]
    fn test_post_holds_for_fresh_state() {
        let state = fresh();
        assert!(CommitContract::post(&state, &state).is_ok());
    }
}
