//! Plain-text views of the scoreboard and the resolution sheet.

use std::fmt::Write;
use strictly_baseball::{
    Base, GameRecord, GameState, Half, PendingPlay, PlayerCard, RecordLine, Side, TeamScoreline,
};

fn inning_cells(line: &[Option<u32>], innings: usize) -> String {
    (0..innings)
        .map(|i| match line.get(i).copied().flatten() {
            Some(runs) => format!("{:>3}", runs),
            None => format!("{:>3}", "-"),
        })
        .collect()
}

/// Header plus one row per side: short name, innings, R H E.
fn line_score(out: &mut String, rows: [(&str, &[Option<u32>], u32, u32, u32); 2]) {
    let innings = rows.iter().map(|row| row.1.len()).max().unwrap_or(0);
    let header: String = (1..=innings).map(|i| format!("{:>3}", i)).collect();
    let _ = writeln!(out, "{:<6}{} |  R  H  E", "", header);
    for (short_name, line, runs, hits, errors) in rows {
        let _ = writeln!(
            out,
            "{:<6}{} |{:>3}{:>3}{:>3}",
            short_name,
            inning_cells(line, innings),
            runs,
            hits,
            errors
        );
    }
}

fn scoreline_row(line: &TeamScoreline) -> (&str, &[Option<u32>], u32, u32, u32) {
    (
        line.team().short_name.as_str(),
        line.innings().as_slice(),
        *line.runs(),
        *line.hits(),
        *line.errors(),
    )
}

fn record_row(line: &RecordLine) -> (&str, &[Option<u32>], u32, u32, u32) {
    (
        line.short_name().as_str(),
        line.innings().as_slice(),
        *line.runs(),
        *line.hits(),
        *line.errors(),
    )
}

fn card(player: &PlayerCard) -> String {
    let mut out = format!("#{} {} ({})", player.number, player.name, player.position);
    if let Some(avg) = &player.avg {
        let _ = write!(out, " AVG {}", avg);
    }
    if let Some(era) = &player.era {
        let _ = write!(out, " ERA {}", era);
    }
    out
}

/// Line score, situation and the players on the field.
pub fn scoreboard(state: &GameState) -> String {
    let mut out = String::new();
    line_score(&mut out, [scoreline_row(state.away()), scoreline_row(state.home())]);

    let situation = state.situation();
    let half = match situation.half {
        Half::Top => "Top",
        Half::Bottom => "Bot",
    };
    if state.is_game_over() {
        let _ = writeln!(out, "FINAL after {} innings", situation.inning);
        return out;
    }

    let bases: Vec<&str> = [Base::First, Base::Second, Base::Third]
        .into_iter()
        .map(|base| {
            if situation.bases.occupied(base) {
                match base {
                    Base::First => "1B",
                    Base::Second => "2B",
                    Base::Third => "3B",
                }
            } else {
                "--"
            }
        })
        .collect();
    let _ = writeln!(
        out,
        "{} {} | B {} S {} | Outs {} | Bases [{}]",
        half,
        situation.inning,
        situation.count.balls,
        situation.count.strikes,
        situation.outs,
        bases.join(" ")
    );
    let _ = writeln!(out, "At bat:   {}", card(state.batter()));
    let _ = writeln!(out, "Pitching: {}", card(state.pitcher()));
    out
}

/// One line per runner slot with the chosen destination and the choices.
pub fn pending_sheet(play: &PendingPlay) -> String {
    let mut out = String::new();
    let kind = if *play.is_hit() {
        " (hit)"
    } else if *play.is_error() {
        " (error)"
    } else {
        ""
    };
    let _ = writeln!(out, "{}{}: adjust with `slot <n> <dest>`, then `confirm`", play.action_label(), kind);
    for (index, slot) in play.slots().iter().enumerate() {
        let options: Vec<String> = slot.options().iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "  {}. {:<14} -> {:<5} [{}]",
            index + 1,
            slot.label(),
            slot.destination(),
            options.join(", ")
        );
    }
    out
}

/// Short summary of a saved game.
pub fn record_summary(record: &GameRecord) -> String {
    let away = record.line(Side::Away);
    let home = record.line(Side::Home);
    format!(
        "{} {}: {} {} - {} {} ({})",
        record.date(),
        record.id(),
        away.short_name(),
        away.runs(),
        home.runs(),
        home.short_name(),
        record.outcome()
    )
}

/// Full line score of a saved game with R/H/E and the result.
pub fn record_detail(record: &GameRecord) -> String {
    let away = record.line(Side::Away);
    let home = record.line(Side::Home);
    let mut out = String::new();
    let _ = writeln!(out, "{} {}: {} at {}", record.date(), record.id(), away.name(), home.name());
    line_score(&mut out, [record_row(away), record_row(home)]);
    let _ = writeln!(out, "Final after {} innings: {}", record.innings_played(), record.outcome());
    out
}
