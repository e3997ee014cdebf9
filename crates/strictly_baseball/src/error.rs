//! Errors raised while recording plays.

use crate::types::{Base, Destination};

/// Error that can occur when recording or resolving a play.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlayError {
    /// The game is over; only reset is accepted.
    #[display("Game is already over")]
    GameOver,

    /// Slot edit or confirm without an open play.
    #[display("No play is awaiting confirmation")]
    NoPendingPlay,

    /// Slot index past the end of the play.
    #[display("Runner slot {} does not exist (play has {} slots)", index, len)]
    SlotOutOfRange {
        /// Requested slot.
        index: usize,
        /// Slots in the play.
        len: usize,
    },

    /// Destination outside the slot's legal options.
    #[display("Slot {} cannot be sent to {}", index, destination)]
    IllegalDestination {
        /// Offending slot.
        index: usize,
        /// Rejected destination.
        destination: Destination,
    },

    /// A slot with nothing to choose from.
    #[display("Slot {} has no legal destinations", index)]
    EmptyOptions {
        /// Offending slot.
        index: usize,
    },

    /// The batter cannot hold a base they never reached.
    #[display("Slot {} is the batter and cannot stay", index)]
    StayFromBatter {
        /// Offending slot.
        index: usize,
    },

    /// Two runners end the play on the same base.
    #[display("Two runners resolved to {}", base)]
    BaseCollision {
        /// Contested base.
        base: Base,
    },

    /// A committed snapshot broke a game invariant.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for PlayError {}
