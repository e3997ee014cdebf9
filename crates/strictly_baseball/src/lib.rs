//! Strictly Baseball - live scoring state machine
//!
//! Interprets discrete scoring actions against a count/out/base model,
//! resolves ambiguous multi-runner plays through a propose-then-confirm
//! protocol, and keeps the inning-by-inning line score.
//!
//! # Architecture
//!
//! - **State**: count, outs, bases, inning and both scorelines
//! - **Resolver**: complex action + situation into a [`PendingPlay`]
//! - **Protocol**: the single open play, edited slot by slot
//! - **Controller**: dispatches actions, commits plays, flips innings
//!
//! # Example
//!
//! ```
//! use strictly_baseball::{ActionOutcome, ComplexAction, Destination, GameController, SimpleAction};
//!
//! let mut game = GameController::default();
//! game.handle_action(SimpleAction::Walk.into());
//! assert_eq!(game.handle_action(ComplexAction::Single.into()), ActionOutcome::Proposed);
//! game.update_pending_slot(0, Destination::Third).unwrap();
//! game.confirm_pending().unwrap();
//! assert_eq!(*game.snapshot().away().hits(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod commit;
mod controller;
mod error;
mod ledger;
mod message;
mod pending;
mod protocol;
mod record;
mod resolver;
mod rotation;
mod state;
mod types;

pub mod contracts;
pub mod invariants;

// Crate-level exports - Actions
pub use action::{ActionKind, ComplexAction, GameAction, SimpleAction};

// Crate-level exports - Commit
pub use commit::{tally, validate, PlayTally, ResolutionMode};

// Crate-level exports - Controller
pub use controller::{ActionOutcome, ControllerOptions, GameController, REGULATION_INNINGS};

// Crate-level exports - Errors
pub use error::PlayError;

// Crate-level exports - Ledger
pub use ledger::{TeamScoreline, REGULATION_SLOTS};

// Crate-level exports - Messages
pub use message::{MessageBoard, TransientMessage, DEFAULT_MESSAGE_DURATION};

// Crate-level exports - Pending plays
pub use pending::{PendingPlay, RunnerSlot};
pub use protocol::PlayProposal;
pub use resolver::build_pending_play;

// Crate-level exports - History
pub use record::{GameRecord, GameRecordSink, Outcome, RecordLine};

// Crate-level exports - Rotation
pub use rotation::{BattingOrder, BattingRotation, LineupRotation, NamePool, DEFAULT_BATTERS, DEFAULT_PITCHERS, LINEUP_SLOTS};

// Crate-level exports - State
pub use state::{force_advance, BaseOutState, ForcedAdvance, GameState, BALLS_FOR_WALK, OUTS_PER_HALF, STRIKES_FOR_OUT};

// Crate-level exports - Types
pub use types::{Base, Bases, Count, Destination, Half, Matchup, Origin, PlayerCard, Side, TeamInfo};
