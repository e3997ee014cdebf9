//! Two-state holder for the single open pending play.

use crate::error::PlayError;
use crate::pending::PendingPlay;
use crate::types::Destination;
use tracing::{debug, instrument, warn};

/// Holds at most one pending play.
///
/// `None` is the absent state; `Some` is the open state. Proposing while open
/// replaces the prior play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayProposal {
    open: Option<PendingPlay>,
}

impl PlayProposal {
    /// Creates an empty proposal slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the open play, if any.
    pub fn current(&self) -> Option<&PendingPlay> {
        self.open.as_ref()
    }

    /// Returns true while a play is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Opens `play`, returning the play it replaced.
    #[instrument(skip_all, fields(play = %play.action_label()))]
    pub fn propose(&mut self, play: PendingPlay) -> Option<PendingPlay> {
        let replaced = self.open.replace(play);
        if let Some(prior) = &replaced {
            warn!(prior = %prior.action_label(), "Replacing open play");
        }
        replaced
    }

    /// Changes one slot's destination while open.
    ///
    /// # Errors
    ///
    /// [`PlayError::NoPendingPlay`] when absent, [`PlayError::SlotOutOfRange`]
    /// for an unknown slot and [`PlayError::IllegalDestination`] for a
    /// destination not offered. The play is unchanged on error.
    #[instrument(skip(self))]
    pub fn update_slot(&mut self, index: usize, destination: Destination) -> Result<(), PlayError> {
        let play = self.open.as_mut().ok_or(PlayError::NoPendingPlay)?;
        let len = play.slots().len();
        if index >= len {
            return Err(PlayError::SlotOutOfRange { index, len });
        }
        if !play.set_destination(index, destination) {
            return Err(PlayError::IllegalDestination { index, destination });
        }
        Ok(())
    }

    /// Discards the open play.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Option<PendingPlay> {
        let discarded = self.open.take();
        debug!(discarded = discarded.is_some(), "Proposal cancelled");
        discarded
    }

    /// Removes the open play for commit.
    pub(crate) fn take(&mut self) -> Option<PendingPlay> {
        self.open.take()
    }

    /// Puts a play back after a failed commit.
    pub(crate) fn restore(&mut self, play: PendingPlay) {
        self.open = Some(play);
    }
}
