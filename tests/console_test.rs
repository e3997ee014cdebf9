//! Tests for the text console session.

use chrono::NaiveDate;
use strictly_baseball::{Bases, Half, Outcome, Side};
use strictly_scorebook::{Flow, GameSection, ScorebookConfig, Session};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 12).unwrap()
}

fn short_game() -> ScorebookConfig {
    ScorebookConfig::default().with_game(GameSection::default().with_regulation_innings(1))
}

fn run_script(session: &mut Session, script: &str) -> String {
    let mut output = Vec::new();
    session.run(script.as_bytes(), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_pending_play_through_console() {
    let mut session = Session::with_date(&ScorebookConfig::default(), date());
    session.execute_line("walk").unwrap();

    let (flow, view) = session.execute_line("single").unwrap();
    assert_eq!(flow, Flow::Continue);
    assert!(view.contains("Single (hit)"));

    session.execute_line("slot 1 3B").unwrap();
    session.execute_line("slot 2 first").unwrap();
    let (_, view) = session.execute_line("confirm").unwrap();
    assert!(!view.contains("Single (hit)"));

    let state = session.controller().snapshot();
    assert_eq!(state.situation().bases, Bases::new(true, false, true));
    assert_eq!(*state.away().hits(), 1);
}

#[test]
fn test_rejected_commands_are_not_fatal() {
    let mut session = Session::with_date(&ScorebookConfig::default(), date());
    assert!(session.execute_line("confirm").is_err());
    assert!(session.execute_line("slot 1 home").is_err());
    assert!(session.execute_line("save").is_err());
    assert!(session.execute_line("moonshot").is_err());

    let output = run_script(&mut session, "moonshot\nball\n");
    assert!(output.contains("! Unknown command: moonshot"));
    assert_eq!(session.controller().snapshot().situation().count.balls, 1);
}

#[test]
fn test_no_runners_message() {
    let mut session = Session::with_date(&ScorebookConfig::default(), date());
    let (_, view) = session.execute_line("stolen-base").unwrap();
    assert!(view.contains(">> No runners on base"));
}

#[test]
fn test_game_over_auto_saves_once() {
    let mut session = Session::with_date(&short_game(), date());
    let output = run_script(
        &mut session,
        "# visitors go down in order\nout\nout\nout\nhomerun\nout\nout\nout\nsave\nsingle\n",
    );

    assert!(output.contains("Saved:"));
    assert!(output.contains("Already saved."));
    assert!(output.contains("only `reset` is accepted"));
    assert!(output.contains("FINAL"));

    let records = session.store().records();
    assert_eq!(records.len(), 1);
    assert_eq!(*records[0].outcome(), Outcome::Winner(Side::Home));
    assert_eq!(*records[0].date(), date());
}

#[test]
fn test_reset_starts_a_new_game_to_save() {
    let mut session = Session::with_date(&short_game(), date());
    run_script(&mut session, "out\nout\nout\nout\nout\nout\nreset\nout\nout\nout\nout\nout\nout\n");
    assert_eq!(session.store().records().len(), 2);
}

#[test]
fn test_quit_stops_reading() {
    let mut session = Session::with_date(&ScorebookConfig::default(), date());
    run_script(&mut session, "out\nout\nquit\nout\n");
    let situation = session.controller().snapshot().situation();
    assert_eq!(situation.outs, 2);
    assert_eq!(situation.half, Half::Top);
}

#[test]
fn test_help_lists_actions() {
    let mut session = Session::with_date(&ScorebookConfig::default(), date());
    let (_, text) = session.execute_line("help").unwrap();
    assert!(text.contains("intentional-walk"));
    assert!(text.contains("fielders-choice"));
    assert!(text.contains("slot <n> <dest>"));
    assert!(text.contains("history"));
    assert!(text.contains("game <n>"));
}

#[test]
fn test_invalid_utf8_line_is_skipped() {
    let mut session = Session::with_date(&ScorebookConfig::default(), date());
    let mut output = Vec::new();
    session
        .run(&b"ball\n\xff\xfe\nball\nball\n"[..], &mut output)
        .unwrap();
    let output = String::from_utf8_lossy(&output);
    assert!(output.contains("! Input is not valid UTF-8"));
    assert_eq!(session.controller().snapshot().situation().count.balls, 3);
}

#[test]
fn test_history_lists_newest_first() {
    let mut session = Session::with_date(&short_game(), date());
    let (_, text) = session.execute_line("history").unwrap();
    assert_eq!(text, "No saved games.\n");

    run_script(
        &mut session,
        "out\nout\nout\nhomerun\nout\nout\nout\nreset\nhomerun\nout\nout\nout\nout\nout\nout\n",
    );
    let (_, text) = session.execute_line("history").unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("  1. "));
    assert!(lines[0].contains("POW 1 - 0 AKA (away wins)"));
    assert!(lines[1].starts_with("  2. "));
    assert!(lines[1].contains("POW 0 - 1 AKA (home wins)"));
}

#[test]
fn test_game_shows_saved_line_score() {
    let mut session = Session::with_date(&short_game(), date());
    run_script(&mut session, "out\nout\nout\nhomerun\nout\nout\nout\n");

    let (flow, text) = session.execute_line("game 1").unwrap();
    assert_eq!(flow, Flow::Continue);
    assert!(text.contains("Powerfuls at Akatsuki Prep"));
    assert!(text.contains("|  R  H  E"));
    assert!(text.contains("AKA     1  -"));
    assert!(text.contains("|  1  1  0"));
    assert!(text.contains("home wins"));

    let err = session.execute_line("game 2").unwrap_err();
    assert!(err.message.contains("No saved game 2"));
    let output = run_script(&mut session, "game 5\n");
    assert!(output.contains("! No saved game 5"));
}
