//! Pending plays: proposed runner outcomes awaiting confirmation.

use crate::types::{Destination, Origin};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// One runner's (or the batter's) proposed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RunnerSlot {
    origin: Origin,
    label: String,
    destination: Destination,
    options: Vec<Destination>,
}

impl RunnerSlot {
    /// Creates a slot defaulting to `destination`, selectable among `options`.
    pub fn new(origin: Origin, destination: Destination, options: &[Destination]) -> Self {
        Self {
            origin,
            label: origin.label().to_string(),
            destination,
            options: options.to_vec(),
        }
    }

    /// Returns true if `destination` is one of this slot's options.
    pub fn allows(&self, destination: Destination) -> bool {
        self.options.contains(&destination)
    }

    /// Returns true if the manager has a real choice to make.
    pub fn is_ambiguous(&self) -> bool {
        self.options.len() >= 2
    }
}

/// A proposed play whose runner outcomes are chosen before commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PendingPlay {
    action_label: String,
    slots: Vec<RunnerSlot>,
    is_hit: bool,
    is_error: bool,
}

impl PendingPlay {
    /// Creates a pending play.
    pub fn new(action_label: impl Into<String>, slots: Vec<RunnerSlot>, is_hit: bool, is_error: bool) -> Self {
        Self {
            action_label: action_label.into(),
            slots,
            is_hit,
            is_error,
        }
    }

    /// Returns true if any slot offers two or more options.
    pub fn needs_confirmation(&self) -> bool {
        self.slots.iter().any(RunnerSlot::is_ambiguous)
    }

    /// Sets slot `index` to `destination` when it is a legal option.
    ///
    /// Returns false, leaving the play unchanged, for an unknown slot or an
    /// illegal destination.
    #[instrument(skip(self), fields(play = %self.action_label))]
    pub fn set_destination(&mut self, index: usize, destination: Destination) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            warn!(index, "No such runner slot");
            return false;
        };
        if !slot.allows(destination) {
            warn!(index, %destination, options = ?slot.options, "Destination not offered");
            return false;
        }
        slot.destination = destination;
        debug!(index, %destination, "Slot updated");
        true
    }
}
