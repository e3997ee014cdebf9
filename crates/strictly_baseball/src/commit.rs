//! Turning a resolved pending play into bases, runs and outs.

use crate::error::PlayError;
use crate::pending::PendingPlay;
use crate::types::{Bases, Destination, Origin};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// How strictly a resolved play is checked before commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Per-slot checks only; two runners may land on the same base.
    #[default]
    Permissive,
    /// Also rejects two runners ending on the same base.
    Strict,
}

/// Net effect of a resolved play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTally {
    /// Occupancy after the play.
    pub bases: Bases,
    /// Runners who scored.
    pub runs: u32,
    /// Runners retired.
    pub outs: u8,
}

/// Checks every slot of `play` under `mode`.
///
/// # Errors
///
/// Returns the first problem found: a slot with no options, a destination that
/// is not offered, a batter told to stay, or (strict mode) two runners on one base.
#[instrument(skip(play), fields(play = %play.action_label()))]
pub fn validate(play: &PendingPlay, mode: ResolutionMode) -> Result<(), PlayError> {
    for (index, slot) in play.slots().iter().enumerate() {
        if slot.options().is_empty() {
            return Err(PlayError::EmptyOptions { index });
        }
        if !slot.allows(*slot.destination()) {
            return Err(PlayError::IllegalDestination {
                index,
                destination: *slot.destination(),
            });
        }
        if *slot.origin() == Origin::Batter && *slot.destination() == Destination::Stay {
            return Err(PlayError::StayFromBatter { index });
        }
    }

    if mode == ResolutionMode::Strict {
        let mut taken = Bases::EMPTY;
        for slot in play.slots() {
            let landing = match slot.destination() {
                Destination::Stay => slot.origin().base(),
                other => other.base(),
            };
            if let Some(base) = landing {
                if taken.occupied(base) {
                    warn!(%base, "Base collision");
                    return Err(PlayError::BaseCollision { base });
                }
                taken.set(base, true);
            }
        }
    }

    Ok(())
}

/// Counts outs and runs and rebuilds occupancy from the slot destinations.
///
/// Slots are processed independently; call [`validate`] first.
#[instrument(skip(play), fields(play = %play.action_label()))]
pub fn tally(play: &PendingPlay) -> PlayTally {
    let mut bases = Bases::EMPTY;
    let mut runs = 0;
    let mut outs = 0;

    for slot in play.slots() {
        match slot.destination() {
            Destination::Out => outs += 1,
            Destination::Home => runs += 1,
            Destination::Stay => {
                if let Some(base) = slot.origin().base() {
                    bases.set(base, true);
                }
            }
            other => {
                if let Some(base) = other.base() {
                    bases.set(base, true);
                }
            }
        }
    }

    debug!(?bases, runs, outs, "Play tallied");
    PlayTally { bases, runs, outs }
}
