//! Builds pending plays for complex actions.
//!
//! Each builder inspects base occupancy and emits one slot per runner, lead
//! runner first, plus a batter slot for batted balls. The default destination
//! is the most likely outcome; the options are what the manager may pick.

use crate::action::ComplexAction;
use crate::pending::{PendingPlay, RunnerSlot};
use crate::state::BaseOutState;
use crate::types::{Base, Destination, Origin};
use tracing::{debug, instrument};

use Destination::{First, Home, Out, Second, Stay, Third};

/// Slot template for a runner on a given base: (default, options).
type RunnerRule = (Destination, &'static [Destination]);

/// Per-base rules for one action, third/second/first.
struct RunnerRules {
    third: RunnerRule,
    second: RunnerRule,
    first: RunnerRule,
}

impl RunnerRules {
    fn for_base(&self, base: Base) -> RunnerRule {
        match base {
            Base::Third => self.third,
            Base::Second => self.second,
            Base::First => self.first,
        }
    }
}

/// What must be true before an action can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precondition {
    /// Always buildable.
    None,
    /// A runner must be on third.
    RunnerOnThird,
    /// At least one runner on base.
    AnyRunner,
    /// At least one runner on base and fewer than two outs.
    AnyRunnerFewerThanTwoOuts,
}

/// Full recipe for one complex action.
struct PlayShape {
    precondition: Precondition,
    runners: RunnerRules,
    batter: Option<RunnerRule>,
    is_hit: bool,
    is_error: bool,
}

fn shape(action: ComplexAction) -> PlayShape {
    match action {
        ComplexAction::Single => PlayShape {
            precondition: Precondition::None,
            runners: RunnerRules {
                third: (Home, &[Home, Stay]),
                second: (Home, &[Home, Third]),
                first: (Second, &[Second, Third, Home]),
            },
            batter: Some((First, &[First, Second])),
            is_hit: true,
            is_error: false,
        },
        ComplexAction::Double => PlayShape {
            precondition: Precondition::None,
            runners: RunnerRules {
                third: (Home, &[Home]),
                second: (Home, &[Home, Third]),
                first: (Third, &[Third, Home]),
            },
            batter: Some((Second, &[Second])),
            is_hit: true,
            is_error: false,
        },
        ComplexAction::SacrificeFly => PlayShape {
            precondition: Precondition::RunnerOnThird,
            runners: RunnerRules {
                third: (Home, &[Home, Stay]),
                second: (Stay, &[Stay, Third]),
                first: (Stay, &[Stay, Second]),
            },
            batter: Some((Out, &[Out])),
            is_hit: false,
            is_error: false,
        },
        ComplexAction::SacrificeBunt => PlayShape {
            precondition: Precondition::AnyRunner,
            runners: RunnerRules {
                third: (Home, &[Home, Stay]),
                second: (Third, &[Third, Home, Stay]),
                first: (Second, &[Second, Third]),
            },
            batter: Some((Out, &[Out, First])),
            is_hit: false,
            is_error: false,
        },
        ComplexAction::DoublePlay => PlayShape {
            precondition: Precondition::AnyRunnerFewerThanTwoOuts,
            runners: RunnerRules {
                third: (Stay, &[Out, Home, Stay]),
                second: (Stay, &[Out, Third, Stay]),
                first: (Out, &[Out, Second]),
            },
            batter: Some((Out, &[Out])),
            is_hit: false,
            is_error: false,
        },
        ComplexAction::FieldersChoice => PlayShape {
            precondition: Precondition::AnyRunner,
            runners: RunnerRules {
                third: (Stay, &[Out, Home, Stay]),
                second: (Third, &[Out, Third, Stay]),
                first: (Out, &[Out, Second, Third]),
            },
            batter: Some((First, &[First])),
            is_hit: false,
            is_error: false,
        },
        ComplexAction::StolenBase => PlayShape {
            precondition: Precondition::AnyRunner,
            runners: RunnerRules {
                third: (Stay, &[Home, Stay]),
                second: (Third, &[Third, Stay]),
                first: (Second, &[Second, Stay]),
            },
            batter: None,
            is_hit: false,
            is_error: false,
        },
        ComplexAction::CaughtStealing => PlayShape {
            precondition: Precondition::AnyRunner,
            runners: RunnerRules {
                third: (Stay, &[Out, Stay]),
                second: (Stay, &[Out, Stay]),
                first: (Out, &[Out, Stay]),
            },
            batter: None,
            is_hit: false,
            is_error: false,
        },
        ComplexAction::WildPitch => PlayShape {
            precondition: Precondition::AnyRunner,
            runners: RunnerRules {
                third: (Home, &[Home, Stay]),
                second: (Third, &[Third, Home, Stay]),
                first: (Second, &[Second, Third]),
            },
            batter: None,
            is_hit: false,
            is_error: false,
        },
        ComplexAction::Balk => PlayShape {
            precondition: Precondition::AnyRunner,
            runners: RunnerRules {
                third: (Home, &[Home]),
                second: (Third, &[Third]),
                first: (Second, &[Second]),
            },
            batter: None,
            is_hit: false,
            is_error: false,
        },
        ComplexAction::Error => PlayShape {
            precondition: Precondition::None,
            runners: RunnerRules {
                third: (Home, &[Home, Stay]),
                second: (Third, &[Third, Home, Stay]),
                first: (Second, &[Second, Third, Home]),
            },
            batter: Some((First, &[First, Second, Third])),
            is_hit: false,
            is_error: true,
        },
    }
}

fn precondition_met(precondition: Precondition, situation: &BaseOutState) -> bool {
    let bases = &situation.bases;
    match precondition {
        Precondition::None => true,
        Precondition::RunnerOnThird => bases.occupied(Base::Third),
        Precondition::AnyRunner => !bases.is_empty(),
        Precondition::AnyRunnerFewerThanTwoOuts => !bases.is_empty() && situation.outs < 2,
    }
}

/// Builds the pending play for `action`, or `None` when its precondition fails.
///
/// Preconditions: sacrifice fly needs a runner on third; double play needs a
/// runner and fewer than two outs; every baserunning action, the bunt and the
/// fielder's choice need at least one runner. Singles, doubles and errors are
/// always buildable.
#[instrument(skip(situation), fields(bases = ?situation.bases, outs = situation.outs))]
pub fn build_pending_play(action: ComplexAction, situation: &BaseOutState) -> Option<PendingPlay> {
    let shape = shape(action);
    if !precondition_met(shape.precondition, situation) {
        debug!(%action, "Precondition not met");
        return None;
    }

    let mut slots: Vec<RunnerSlot> = situation
        .bases
        .runners_lead_first()
        .into_iter()
        .map(|base| {
            let (default, options) = shape.runners.for_base(base);
            RunnerSlot::new(Origin::Runner(base), default, options)
        })
        .collect();

    if let Some((default, options)) = shape.batter {
        slots.push(RunnerSlot::new(Origin::Batter, default, options));
    }

    debug!(%action, slots = slots.len(), "Pending play built");
    Some(PendingPlay::new(action.label(), slots, shape.is_hit, shape.is_error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bases;

    fn situation(bases: Bases, outs: u8) -> BaseOutState {
        BaseOutState {
            bases,
            outs,
            ..BaseOutState::new()
        }
    }

    #[test]
    fn test_single_bases_empty_has_only_batter() {
        let play = build_pending_play(ComplexAction::Single, &situation(Bases::EMPTY, 0)).unwrap();
        assert_eq!(play.slots().len(), 1);
        assert_eq!(*play.slots()[0].origin(), Origin::Batter);
        assert_eq!(*play.slots()[0].destination(), First);
        assert_eq!(play.slots()[0].options(), &vec![First, Second]);
        assert!(play.needs_confirmation());
        assert!(*play.is_hit());
    }

    #[test]
    fn test_slots_are_lead_runner_first() {
        let play = build_pending_play(ComplexAction::Single, &situation(Bases::LOADED, 0)).unwrap();
        let origins: Vec<_> = play.slots().iter().map(|s| *s.origin()).collect();
        assert_eq!(
            origins,
            vec![
                Origin::Runner(Base::Third),
                Origin::Runner(Base::Second),
                Origin::Runner(Base::First),
                Origin::Batter
            ]
        );
    }

    #[test]
    fn test_baserunning_needs_runners() {
        let empty = situation(Bases::EMPTY, 0);
        for action in [
            ComplexAction::StolenBase,
            ComplexAction::CaughtStealing,
            ComplexAction::WildPitch,
            ComplexAction::Balk,
            ComplexAction::SacrificeBunt,
            ComplexAction::FieldersChoice,
            ComplexAction::DoublePlay,
            ComplexAction::SacrificeFly,
        ] {
            assert!(build_pending_play(action, &empty).is_none(), "{action} should need runners");
        }
    }

    #[test]
    fn test_sacrifice_fly_needs_runner_on_third() {
        assert!(build_pending_play(ComplexAction::SacrificeFly, &situation(Bases::new(true, true, false), 0)).is_none());
        let play = build_pending_play(ComplexAction::SacrificeFly, &situation(Bases::new(false, false, true), 1)).unwrap();
        assert_eq!(*play.slots()[0].destination(), Home);
        assert_eq!(*play.slots()[1].destination(), Out);
    }

    #[test]
    fn test_double_play_needs_fewer_than_two_outs() {
        let runner_on_first = Bases::new(true, false, false);
        assert!(build_pending_play(ComplexAction::DoublePlay, &situation(runner_on_first, 2)).is_none());
        let play = build_pending_play(ComplexAction::DoublePlay, &situation(runner_on_first, 1)).unwrap();
        let outs = play.slots().iter().filter(|s| *s.destination() == Out).count();
        assert_eq!(outs, 2);
    }

    #[test]
    fn test_balk_is_unambiguous() {
        let play = build_pending_play(ComplexAction::Balk, &situation(Bases::LOADED, 0)).unwrap();
        assert!(!play.needs_confirmation());
        assert_eq!(play.slots().len(), 3);
    }

    #[test]
    fn test_error_flags_and_generous_batter() {
        let play = build_pending_play(ComplexAction::Error, &situation(Bases::EMPTY, 0)).unwrap();
        assert!(*play.is_error());
        assert!(!*play.is_hit());
        assert_eq!(play.slots()[0].options(), &vec![First, Second, Third]);
    }

    #[test]
    fn test_every_default_is_an_option() {
        use strum::IntoEnumIterator;
        for action in ComplexAction::iter() {
            for outs in 0..3 {
                for flags in 0u8..8 {
                    let bases = Bases::new(flags & 1 != 0, flags & 2 != 0, flags & 4 != 0);
                    if let Some(play) = build_pending_play(action, &situation(bases, outs)) {
                        for slot in play.slots() {
                            assert!(slot.allows(*slot.destination()), "{action}: {slot:?}");
                        }
                    }
                }
            }
        }
    }
}
