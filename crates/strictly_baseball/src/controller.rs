//! The game controller: sole owner of the live snapshot.
//!
//! Every mutation goes through [`GameController::handle_action`] or the
//! pending-play operations. Simple actions commit at once; complex actions
//! are resolved by the resolver into a [`PendingPlay`] that is either
//! auto-committed (no real choice) or held open until confirmed.

use crate::action::{ComplexAction, GameAction, SimpleAction};
use crate::commit::{tally, ResolutionMode};
use crate::contracts::{CommitContract, CommitRequest, Contract};
use crate::error::PlayError;
use crate::message::{MessageBoard, DEFAULT_MESSAGE_DURATION};
use crate::pending::PendingPlay;
use crate::protocol::PlayProposal;
use crate::record::GameRecord;
use crate::resolver::build_pending_play;
use crate::rotation::{BattingRotation, NamePool};
use crate::state::{force_advance, GameState, BALLS_FOR_WALK, OUTS_PER_HALF, STRIKES_FOR_OUT};
use crate::types::{Bases, Destination, Half, Matchup};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Regulation length of a game.
pub const REGULATION_INNINGS: u32 = 9;

/// Tunable controller behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerOptions {
    /// The game ends after the bottom half of this inning (or any later one).
    pub regulation_innings: u32,
    /// How long transient messages stay visible.
    pub message_duration: Duration,
    /// How resolved plays are checked before commit.
    pub resolution_mode: ResolutionMode,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            regulation_innings: REGULATION_INNINGS,
            message_duration: DEFAULT_MESSAGE_DURATION,
            resolution_mode: ResolutionMode::default(),
        }
    }
}

/// What [`GameController::handle_action`] did with an action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionOutcome {
    /// A simple action was committed.
    #[display("applied")]
    Applied,
    /// A pending play is open and awaits confirmation.
    #[display("awaiting confirmation")]
    Proposed,
    /// A complex action with no real choice was committed directly.
    #[display("committed")]
    AutoCommitted,
    /// The action needs runners that are not on base.
    #[display("no eligible runners")]
    NoEligibleRunners,
    /// The game is over; the action was dropped.
    #[display("ignored")]
    Ignored,
    /// An auto-committed play failed validation.
    #[display("rejected: {_0}")]
    Rejected(PlayError),
}

/// Owns the base/out state, both scorelines and the open pending play.
#[derive(Debug)]
pub struct GameController<R: BattingRotation = NamePool> {
    matchup: Matchup,
    state: GameState,
    proposal: PlayProposal,
    rotation: R,
    messages: MessageBoard,
    options: ControllerOptions,
    game_number: u32,
}

impl Default for GameController<NamePool> {
    fn default() -> Self {
        Self::new(Matchup::default(), NamePool::default(), ControllerOptions::default())
    }
}

impl<R: BattingRotation> GameController<R> {
    /// Starts a game at the top of the first.
    #[instrument(skip(rotation), fields(away = %matchup.away.name, home = %matchup.home.name))]
    pub fn new(matchup: Matchup, rotation: R, options: ControllerOptions) -> Self {
        let state = GameState::new(
            &matchup,
            rotation.current_batter(Half::Top.batting_side()),
            rotation.pitcher(Half::Top.fielding_side()),
        );
        info!(regulation_innings = options.regulation_innings, "Game started");
        Self {
            matchup,
            state,
            proposal: PlayProposal::new(),
            rotation,
            messages: MessageBoard::new(options.message_duration),
            options,
            game_number: 1,
        }
    }

    /// Read-only view of the scoreboard.
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    /// The play awaiting confirmation, if any.
    pub fn pending_play(&self) -> Option<&PendingPlay> {
        self.proposal.current()
    }

    /// Message visible right now.
    pub fn transient_message(&self) -> Option<&str> {
        self.messages.current()
    }

    /// Message visible at `now`.
    pub fn transient_message_at(&self, now: Instant) -> Option<&str> {
        self.messages.current_at(now)
    }

    /// Most recent message regardless of expiry.
    pub fn latest_message(&self) -> Option<&str> {
        self.messages.latest()
    }

    /// Options this controller runs with.
    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Teams in this game.
    pub fn matchup(&self) -> &Matchup {
        &self.matchup
    }

    /// The batter and pitcher source.
    pub fn rotation(&self) -> &R {
        &self.rotation
    }

    /// Mutable rotation access, for substitutions.
    ///
    /// Call [`Self::refresh_players`] afterwards to update the displayed cards.
    pub fn rotation_mut(&mut self) -> &mut R {
        &mut self.rotation
    }

    /// Re-reads the displayed batter and pitcher from the rotation.
    #[instrument(skip(self))]
    pub fn refresh_players(&mut self) {
        let batter = self.rotation.current_batter(self.state.batting_side());
        let pitcher = self.rotation.pitcher(self.state.fielding_side());
        debug!(batter = %batter.name, pitcher = %pitcher.name, "Players refreshed");
        self.state.set_batter(batter);
        self.state.set_pitcher(pitcher);
    }

    /// Records one action.
    ///
    /// Once the game is over every action except `reset` is ignored.
    #[instrument(skip(self), fields(inning = self.state.situation().inning, half = %self.state.situation().half))]
    pub fn handle_action(&mut self, action: GameAction) -> ActionOutcome {
        if action == GameAction::Simple(SimpleAction::Reset) {
            self.reset();
            return ActionOutcome::Applied;
        }
        if self.state.is_game_over() {
            debug!("Game over, action ignored");
            return ActionOutcome::Ignored;
        }
        match action {
            GameAction::Simple(simple) => {
                if let Some(stale) = self.proposal.cancel() {
                    warn!(stale = %stale.action_label(), "Discarding open play");
                }
                #[cfg(debug_assertions)]
                let before = self.state.clone();
                self.apply_simple(simple);
                #[cfg(debug_assertions)]
                if let Err(e) = self.verify_transition(before) {
                    return ActionOutcome::Rejected(e);
                }
                ActionOutcome::Applied
            }
            GameAction::Complex(complex) => self.propose(complex),
        }
    }

    /// Changes one slot of the open play.
    ///
    /// # Errors
    ///
    /// Fails when no play is open, the slot does not exist or the destination
    /// is not one of the slot's options. The play is unchanged on error.
    #[instrument(skip(self))]
    pub fn update_pending_slot(&mut self, index: usize, destination: Destination) -> Result<(), PlayError> {
        self.proposal.update_slot(index, destination)
    }

    /// Discards the open play without touching the snapshot.
    #[instrument(skip(self))]
    pub fn cancel_pending(&mut self) -> Option<PendingPlay> {
        self.proposal.cancel()
    }

    /// Commits the open play.
    ///
    /// # Errors
    ///
    /// [`PlayError::NoPendingPlay`] when nothing is open, or the validation
    /// error that blocked the commit. A failed confirm leaves the play open.
    #[instrument(skip(self))]
    pub fn confirm_pending(&mut self) -> Result<(), PlayError> {
        let play = self.proposal.take().ok_or(PlayError::NoPendingPlay)?;
        if let Err(e) = self.commit(&play) {
            warn!(error = %e, "Confirm rejected, play stays open");
            self.proposal.restore(play);
            return Err(e);
        }
        Ok(())
    }

    /// Throws the game away and starts over from the first pitch.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.proposal.cancel();
        self.rotation.rewind();
        self.state = GameState::new(
            &self.matchup,
            self.rotation.current_batter(Half::Top.batting_side()),
            self.rotation.pitcher(Half::Top.fielding_side()),
        );
        self.game_number += 1;
        self.messages.clear();
        self.messages.post("Reset!");
        info!(game_number = self.game_number, "Game reset");
    }

    /// Record of the finished game, or `None` while it is still in progress.
    #[instrument(skip(self))]
    pub fn final_record(&self, date: NaiveDate) -> Option<GameRecord> {
        if !self.state.is_game_over() {
            return None;
        }
        let id = format!(
            "{}-{}-{}-{}",
            date,
            self.matchup.away.short_name,
            self.matchup.home.short_name,
            self.game_number
        );
        Some(GameRecord::from_state(id, date, &self.state))
    }

    fn propose(&mut self, action: ComplexAction) -> ActionOutcome {
        let Some(play) = build_pending_play(action, self.state.situation()) else {
            info!(%action, "No eligible runners");
            self.messages.post("No runners on base");
            return ActionOutcome::NoEligibleRunners;
        };

        if play.needs_confirmation() {
            self.proposal.propose(play);
            return ActionOutcome::Proposed;
        }

        if let Some(stale) = self.proposal.cancel() {
            warn!(stale = %stale.action_label(), "Discarding open play");
        }
        match self.commit(&play) {
            Ok(()) => ActionOutcome::AutoCommitted,
            Err(e) => {
                error!(error = %e, "Auto-commit rejected");
                ActionOutcome::Rejected(e)
            }
        }
    }

    #[instrument(skip_all, fields(play = %play.action_label()))]
    fn commit(&mut self, play: &PendingPlay) -> Result<(), PlayError> {
        let request = CommitRequest {
            play,
            mode: self.options.resolution_mode,
        };
        CommitContract::pre(&self.state, &request)?;
        #[cfg(debug_assertions)]
        let before = self.state.clone();

        self.state.ensure_inning_recorded();
        let result = tally(play);
        self.state.add_runs(result.runs);
        if *play.is_hit() {
            self.state.add_hits(1);
        }
        if *play.is_error() {
            self.state.add_errors(1);
        }
        self.state.reset_count();
        let situation = self.state.situation_mut();
        situation.outs = situation.outs.saturating_add(result.outs);
        situation.bases = result.bases;
        self.advance_batter();

        match result.runs {
            0 => self.messages.post(format!("{}!", play.action_label())),
            1 => self.messages.post("Run scores!"),
            n => self.messages.post(format!("{n} runs score!")),
        }
        info!(runs = result.runs, outs = result.outs, "Play committed");

        self.check_three_outs();

        #[cfg(debug_assertions)]
        self.verify_transition(before)?;
        Ok(())
    }

    /// Checks the invariant set after a transition, rolling back to `before`
    /// when it fails.
    #[cfg(debug_assertions)]
    fn verify_transition(&mut self, before: GameState) -> Result<(), PlayError> {
        if let Err(e) = CommitContract::post(&before, &self.state) {
            error!(error = %e, "Transition broke an invariant, snapshot restored");
            self.state = before;
            return Err(e);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn apply_simple(&mut self, action: SimpleAction) {
        self.state.ensure_inning_recorded();
        match action {
            SimpleAction::Ball => {
                let balls = self.state.situation().count.balls + 1;
                if balls >= BALLS_FOR_WALK {
                    self.award_first("Ball four!");
                } else {
                    self.state.situation_mut().count.balls = balls;
                }
            }
            SimpleAction::Strike => {
                let strikes = self.state.situation().count.strikes + 1;
                if strikes >= STRIKES_FOR_OUT {
                    self.messages.post("Strikeout!");
                    self.record_batter_out();
                } else {
                    self.state.situation_mut().count.strikes = strikes;
                }
            }
            SimpleAction::Foul => {
                let count = &mut self.state.situation_mut().count;
                if count.strikes < STRIKES_FOR_OUT - 1 {
                    count.strikes += 1;
                } else {
                    self.messages.post("Foul!");
                }
            }
            SimpleAction::Homerun => {
                let scored = self.state.situation().bases.count() + 1;
                let text = match scored {
                    4 => "Grand slam!!".to_string(),
                    1 => "Solo homer!".to_string(),
                    n => format!("{n}-run homer!"),
                };
                self.messages.post(text);
                self.state.add_runs(scored);
                self.state.add_hits(1);
                self.finish_plate_appearance(Bases::EMPTY);
            }
            SimpleAction::Triple => {
                let scored = self.state.situation().bases.count();
                self.messages.post("Triple!");
                self.state.add_runs(scored);
                self.state.add_hits(1);
                self.finish_plate_appearance(Bases::new(false, false, true));
            }
            SimpleAction::Out => {
                self.messages.post("Out!");
                self.record_batter_out();
            }
            SimpleAction::Walk => self.award_first("Walk!"),
            SimpleAction::HitByPitch => self.award_first("Hit by pitch!"),
            SimpleAction::IntentionalWalk => self.award_first("Intentional walk!"),
            SimpleAction::Reset => self.reset(),
        }
    }

    fn award_first(&mut self, text: &str) {
        self.messages.post(text);
        let forced = force_advance(self.state.situation().bases);
        self.state.add_runs(forced.runs);
        self.finish_plate_appearance(forced.bases);
    }

    fn record_batter_out(&mut self) {
        self.state.reset_count();
        let situation = self.state.situation_mut();
        situation.outs += 1;
        self.advance_batter();
        self.check_three_outs();
    }

    fn finish_plate_appearance(&mut self, bases: Bases) {
        self.state.reset_count();
        self.state.situation_mut().bases = bases;
        self.advance_batter();
    }

    fn advance_batter(&mut self) {
        let side = self.state.batting_side();
        let batter = self.rotation.advance(side);
        debug!(%side, batter = %batter.name, "Next batter");
        self.state.set_batter(batter);
    }

    #[instrument(skip(self))]
    fn check_three_outs(&mut self) {
        if self.state.situation().outs < OUTS_PER_HALF {
            return;
        }
        self.messages.post("Side retired!");
        self.state.ensure_inning_recorded();

        let situation = self.state.situation().clone();
        if situation.half == Half::Bottom && situation.inning >= self.options.regulation_innings {
            let state = self.state.situation_mut();
            state.outs = OUTS_PER_HALF;
            state.is_game_over = true;
            self.messages.post("Game over!");
            info!(
                away = *self.state.away().runs(),
                home = *self.state.home().runs(),
                inning = situation.inning,
                "Game over"
            );
            return;
        }

        let state = self.state.situation_mut();
        match situation.half {
            Half::Top => state.half = Half::Bottom,
            Half::Bottom => {
                state.inning += 1;
                state.half = Half::Top;
            }
        }
        state.count = Default::default();
        state.outs = 0;
        state.bases = Bases::EMPTY;
        info!(inning = state.inning, half = %state.half, "Side retired");
        self.refresh_players();
    }
}
