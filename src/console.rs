//! Text-command session that drives a game controller.

use crate::config::ScorebookConfig;
use crate::render;
use crate::store::{AppStore, ScorebookRotation};
use chrono::NaiveDate;
use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use std::str::FromStr;
use strictly_baseball::{ActionOutcome, Destination, GameAction, GameController, NamePool};
use tracing::{debug, info, instrument, warn};

/// One line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// A scoring action keyword.
    Action(GameAction),
    /// Set slot `index` (0-based) of the open play.
    Slot {
        /// Slot index.
        index: usize,
        /// New destination.
        destination: Destination,
    },
    /// Commit the open play.
    Confirm,
    /// Discard the open play.
    Cancel,
    /// Redraw the board.
    Show,
    /// Save the finished game.
    Save,
    /// List saved games, newest first.
    History,
    /// Line score of saved game `n` (1-based, as listed by `history`).
    Game(usize),
    /// List commands.
    Help,
    /// Leave the session.
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ConsoleError::new("Empty command".to_string()));
        };
        let command = match head.to_ascii_lowercase().as_str() {
            "slot" => {
                let (Some(n), Some(dest)) = (words.next(), words.next()) else {
                    return Err(ConsoleError::new("Usage: slot <n> <dest>".to_string()));
                };
                let n: usize = n
                    .parse()
                    .map_err(|_| ConsoleError::new(format!("Not a slot number: {}", n)))?;
                let index = n
                    .checked_sub(1)
                    .ok_or_else(|| ConsoleError::new("Slots are numbered from 1".to_string()))?;
                let destination = Destination::from_str(dest)
                    .map_err(|_| ConsoleError::new(format!("Unknown destination: {}", dest)))?;
                ConsoleCommand::Slot { index, destination }
            }
            "confirm" => ConsoleCommand::Confirm,
            "cancel" => ConsoleCommand::Cancel,
            "show" => ConsoleCommand::Show,
            "save" => ConsoleCommand::Save,
            "history" => ConsoleCommand::History,
            "game" => {
                let Some(n) = words.next() else {
                    return Err(ConsoleError::new("Usage: game <n>".to_string()));
                };
                let n: usize = n
                    .parse()
                    .map_err(|_| ConsoleError::new(format!("Not a game number: {}", n)))?;
                if n == 0 {
                    return Err(ConsoleError::new("Games are numbered from 1".to_string()));
                }
                ConsoleCommand::Game(n)
            }
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            keyword => GameAction::from_str(keyword)
                .map(ConsoleCommand::Action)
                .map_err(|_| ConsoleError::new(format!("Unknown command: {} (try `help`)", keyword)))?,
        };
        if let Some(extra) = words.next() {
            return Err(ConsoleError::new(format!("Unexpected argument: {}", extra)));
        }
        Ok(command)
    }
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop.
    Quit,
}

/// A live game plus the store it saves into.
#[derive(Debug)]
pub struct Session {
    controller: GameController<ScorebookRotation>,
    store: AppStore,
    date: NaiveDate,
}

impl Session {
    /// Starts a session dated today.
    pub fn new(config: &ScorebookConfig) -> Self {
        Self::with_date(config, chrono::Local::now().date_naive())
    }

    /// Starts a session whose saved games carry `date`.
    #[instrument(skip(config))]
    pub fn with_date(config: &ScorebookConfig, date: NaiveDate) -> Self {
        let store = AppStore::from_config(config);
        let pool = NamePool::new(config.lineup().batters().clone(), config.lineup().pitchers().clone());
        let rotation = store.rotation(pool);
        let controller = GameController::new(store.matchup(), rotation, config.controller_options());
        info!("Session started");
        Self {
            controller,
            store,
            date,
        }
    }

    /// The game being scored.
    pub fn controller(&self) -> &GameController<ScorebookRotation> {
        &self.controller
    }

    /// Teams and saved games.
    pub fn store(&self) -> &AppStore {
        &self.store
    }

    /// Runs one command and returns the text to show.
    ///
    /// # Errors
    ///
    /// Rejected slot edits, confirms and saves come back as [`ConsoleError`].
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: ConsoleCommand) -> Result<(Flow, String), ConsoleError> {
        let note = match command {
            ConsoleCommand::Action(action) => match self.controller.handle_action(action) {
                ActionOutcome::Ignored => Some("The game is over; only `reset` is accepted.".to_string()),
                ActionOutcome::Rejected(e) => Some(format!("Play rejected: {}", e)),
                outcome => {
                    debug!(%outcome, "Action handled");
                    None
                }
            },
            ConsoleCommand::Slot { index, destination } => {
                self.controller
                    .update_pending_slot(index, destination)
                    .map_err(|e| ConsoleError::new(e.to_string()))?;
                None
            }
            ConsoleCommand::Confirm => {
                self.controller
                    .confirm_pending()
                    .map_err(|e| ConsoleError::new(e.to_string()))?;
                None
            }
            ConsoleCommand::Cancel => self
                .controller
                .cancel_pending()
                .map(|play| format!("{} cancelled.", play.action_label())),
            ConsoleCommand::Show => None,
            ConsoleCommand::Save => Some(self.save()?),
            ConsoleCommand::History => return Ok((Flow::Continue, self.history())),
            ConsoleCommand::Game(n) => return Ok((Flow::Continue, self.game_detail(n)?)),
            ConsoleCommand::Help => return Ok((Flow::Continue, help())),
            ConsoleCommand::Quit => return Ok((Flow::Quit, String::new())),
        };

        let mut out = String::new();
        if let Some(note) = self.auto_save() {
            out.push_str(&note);
            out.push('\n');
        }
        out.push_str(&self.view());
        if let Some(note) = note {
            out.push_str(&note);
            out.push('\n');
        }
        Ok((Flow::Continue, out))
    }

    /// Parses and runs one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<(Flow, String), ConsoleError> {
        let command = ConsoleCommand::from_str(line)?;
        self.execute(command)
    }

    /// Scoreboard, open sheet and current announcement.
    pub fn view(&self) -> String {
        let mut out = render::scoreboard(self.controller.snapshot());
        if let Some(play) = self.controller.pending_play() {
            out.push_str(&render::pending_sheet(play));
        }
        if let Some(message) = self.controller.transient_message() {
            out.push_str(&format!(">> {}\n", message));
        }
        out
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line that is
    /// not valid UTF-8 is reported and skipped.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> std::io::Result<()> {
        writeln!(output, "{}", self.view())?;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!(len = buf.len(), "Input line is not UTF-8");
                writeln!(output, "! Input is not valid UTF-8, line skipped")?;
                continue;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match self.execute_line(trimmed) {
                Ok((Flow::Quit, _)) => break,
                Ok((Flow::Continue, text)) => writeln!(output, "{}", text)?,
                Err(e) => {
                    warn!(error = %e, "Command rejected");
                    writeln!(output, "! {}", e.message)?;
                }
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn save(&mut self) -> Result<String, ConsoleError> {
        let record = self
            .controller
            .final_record(self.date)
            .ok_or_else(|| ConsoleError::new("The game is not over yet".to_string()))?;
        let summary = render::record_summary(&record);
        if self.store.add_game_record(record) {
            Ok(format!("Saved: {}", summary))
        } else {
            Ok("Already saved.".to_string())
        }
    }

    fn history(&self) -> String {
        let records = self.store.records();
        if records.is_empty() {
            return "No saved games.\n".to_string();
        }
        records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{:>3}. {}\n", i + 1, render::record_summary(record)))
            .collect()
    }

    fn game_detail(&self, n: usize) -> Result<String, ConsoleError> {
        let record = n
            .checked_sub(1)
            .and_then(|i| self.store.records().get(i))
            .ok_or_else(|| {
                ConsoleError::new(format!("No saved game {} ({} saved)", n, self.store.records().len()))
            })?;
        Ok(render::record_detail(record))
    }

    fn auto_save(&mut self) -> Option<String> {
        let record = self.controller.final_record(self.date)?;
        let summary = render::record_summary(&record);
        self.store
            .add_game_record(record)
            .then(|| format!("Saved: {}", summary))
    }
}

fn help() -> String {
    let mut out = String::from("Actions:\n");
    for action in GameAction::all() {
        out.push_str(&format!("  {:<18} {}\n", action.to_string(), action.kind()));
    }
    out.push_str(
        "Commands:\n  slot <n> <dest>    set runner n to out|1B|2B|3B|home|stay\n  confirm            commit the open play\n  cancel             discard the open play\n  show               redraw the board\n  save               save the finished game\n  history            list saved games, newest first\n  game <n>           line score of saved game n\n  help               this list\n  quit               leave\n",
    );
    out
}

/// Console input error.
#[derive(Debug, Clone, Display, Error)]
#[display("Console error: {} at {}:{}", message, file, line)]
pub struct ConsoleError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConsoleError {
    /// Creates a new console error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_baseball::{ComplexAction, SimpleAction};

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ConsoleCommand::from_str("Hit-By-Pitch").unwrap(),
            ConsoleCommand::Action(SimpleAction::HitByPitch.into())
        );
        assert_eq!(
            ConsoleCommand::from_str("sacrifice-fly").unwrap(),
            ConsoleCommand::Action(ComplexAction::SacrificeFly.into())
        );
        assert_eq!(
            ConsoleCommand::from_str("slot 2 home").unwrap(),
            ConsoleCommand::Slot {
                index: 1,
                destination: Destination::Home
            }
        );
        assert_eq!(ConsoleCommand::from_str("  confirm ").unwrap(), ConsoleCommand::Confirm);
        assert_eq!(ConsoleCommand::from_str("history").unwrap(), ConsoleCommand::History);
        assert_eq!(ConsoleCommand::from_str("game 2").unwrap(), ConsoleCommand::Game(2));
    }

    #[test]
    fn test_parse_errors() {
        assert!(ConsoleCommand::from_str("").is_err());
        assert!(ConsoleCommand::from_str("slot 0 1B").is_err());
        assert!(ConsoleCommand::from_str("slot 1 4B").is_err());
        assert!(ConsoleCommand::from_str("bunt").is_err());
        assert!(ConsoleCommand::from_str("confirm now").is_err());
        assert!(ConsoleCommand::from_str("game").is_err());
        assert!(ConsoleCommand::from_str("game 0").is_err());
        assert!(ConsoleCommand::from_str("game two").is_err());
        assert!(ConsoleCommand::from_str("history 1").is_err());
    }

    #[test]
    fn test_error_records_location() {
        let err = ConsoleError::new("boom".to_string());
        assert!(err.file.ends_with("console.rs"));
        assert!(err.to_string().contains("boom"));
    }
}
