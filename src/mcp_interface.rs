//! Text-level scorebook actions for the MCP server and the demo CLI.
//!
//! Every function here takes 1-based batter and inning numbers as a scorer
//! would say them, drives the [`Scorebook`], and returns display text. Errors
//! come back as plain strings ready to show.

use crate::cell::{BattingOrder, Cell, RunSegment};
use crate::scorebook::Scorebook;
use crate::scoring::arming::Millis;
use crate::scoring::commands::CellCommand;
use crate::scoring::count::Count;
use crate::scoring::diamond::{ClickModifier, DiamondClick};
use crate::store::Store;
use crate::team::{Player, TeamSide};
use schema::{AwardType, Outcome, PitchMark, SegmentKind};

const CELL_WIDTH: usize = 12;

/// Convert a 1-based batter/inning pair into grid coordinates.
fn position<S: Store>(book: &Scorebook<S>, batter: usize, inning: usize) -> Result<(usize, usize), String> {
    let grid = book.grid();
    if batter == 0 || batter > grid.batter_count() {
        return Err(format!(
            "Invalid batter number {}. Use 1-{}.",
            batter,
            grid.batter_count()
        ));
    }
    if inning == 0 || inning > grid.innings() {
        return Err(format!(
            "Invalid inning {}. Use 1-{}.",
            inning,
            grid.innings()
        ));
    }
    Ok((batter - 1, inning - 1))
}

pub fn parse_pitch(text: &str) -> Result<PitchMark, String> {
    text.trim()
        .parse::<PitchMark>()
        .map_err(|_| format!("'{}' is not a pitch. Use ball, called, swinging, foul or dead.", text))
}

pub fn parse_outcome(text: &str) -> Result<Outcome, String> {
    text.trim()
        .parse::<Outcome>()
        .map_err(|_| format!("'{}' is not an outcome.", text))
}

pub fn parse_award(text: &str) -> Result<AwardType, String> {
    text.trim()
        .parse::<AwardType>()
        .map_err(|_| format!("'{}' is not an award. Use walk or hbp.", text))
}

/// Short scorecard text for one cell, e.g. `BCF 1B →2`.
fn cell_summary(cell: &Cell) -> String {
    let mut parts = Vec::new();
    if !cell.pitch_sequence.is_empty() {
        parts.push(cell.pitch_symbols());
    }
    if cell.outcome != Outcome::None {
        parts.push(cell.outcome.abbreviation().to_string());
    }
    if cell.base_reached > 0 {
        parts.push(if cell.base_reached == 4 {
            "R".to_string()
        } else {
            format!("→{}", cell.base_reached)
        });
    }
    if cell.outs_recorded > 0 {
        parts.push(format!("({})", cell.outs_recorded));
    }
    parts.join(" ")
}

/// The whole active scorecard as a fixed-width table.
pub fn display_scorecard<S: Store>(book: &Scorebook<S>) -> String {
    let team = book.team();
    let grid = book.grid();
    let mut output = format!("=== {} ({}) ===\n", team.team_name, book.active_side());

    output.push_str(&format!("{:<4}{:<18}", "#", "Batter"));
    for inning in 1..=grid.innings() {
        output.push_str(&format!("|{:^width$}", inning, width = CELL_WIDTH));
    }
    output.push('\n');

    for (row, cells) in grid.rows().iter().enumerate() {
        let name = team
            .players
            .get(row)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| Player::placeholder_name(row));
        output.push_str(&format!("{:<4}{:<18}", row + 1, name));
        for cell in cells {
            let summary: String = cell_summary(cell).chars().take(CELL_WIDTH).collect();
            output.push_str(&format!("|{:<width$}", summary, width = CELL_WIDTH));
        }
        output.push('\n');
    }

    output.push_str(&format!("{:<22}", "Outs"));
    for inning in 0..grid.innings() {
        output.push_str(&format!("|{:^width$}", grid.inning_out_total(inning), width = CELL_WIDTH));
    }
    output.push('\n');
    output
}

/// Everything recorded in one plate appearance.
pub fn display_cell_details<S: Store>(book: &Scorebook<S>, batter: usize, inning: usize) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    let cell = book.cell(row, column).map_err(|e| e.to_string())?;

    let mut output = format!("--- Batter {} / Inning {} ---\n", batter, inning);
    let pitches: Vec<String> = cell.pitch_sequence.iter().map(ToString::to_string).collect();
    output.push_str(&format!(
        "Pitches: {}\n",
        if pitches.is_empty() { "-".to_string() } else { pitches.join(", ") }
    ));
    output.push_str(&format!("Count:   {}\n", Count::of(&cell.pitch_sequence)));
    output.push_str(&format!("Outcome: {}\n", cell.outcome));
    output.push_str(&format!("Base:    {}\n", cell.base_reached));
    if cell.outs_recorded > 0 {
        output.push_str(&format!("Out #{} of the inning\n", cell.outs_recorded));
    }
    for (index, segment) in cell.run_path.iter().enumerate() {
        output.push_str(&format!("  {}. {}", index + 1, segment));
        if let Some(note) = &segment.note {
            output.push_str(&format!(" \"{}\"", note));
        }
        output.push('\n');
    }
    if !cell.notes.is_empty() {
        output.push_str(&format!("Notes: {}\n", cell.notes));
    }
    if book.is_locked(row, column) {
        output.push_str("(inning over; read-only)\n");
    }
    Ok(output)
}

pub fn display_box_score<S: Store>(book: &Scorebook<S>) -> String {
    format!("=== {} Box Score ===\n{}\n", book.team().team_name, book.box_score())
}

pub fn execute_add_player<S: Store>(
    book: &mut Scorebook<S>,
    name: &str,
    number: &str,
    position: &str,
    batting_order: Option<usize>,
) -> Result<String, String> {
    if name.trim().is_empty() {
        return Err("Player name cannot be empty.".to_string());
    }
    let row = batting_order
        .map(|order| order.saturating_sub(1))
        .unwrap_or(usize::MAX);
    let player = Player {
        name: name.trim().to_string(),
        number: number.trim().to_string(),
        position: position.trim().to_string(),
    };
    let at = book.add_player(row, player);
    Ok(format!("{} bats #{}.", name.trim(), at + 1))
}

pub fn execute_remove_player<S: Store>(book: &mut Scorebook<S>, batter: usize) -> Result<String, String> {
    let row = batter
        .checked_sub(1)
        .ok_or_else(|| "Batter numbers start at 1.".to_string())?;
    let player = book.remove_player(row).map_err(|e| e.to_string())?;
    Ok(format!("Removed {} from the lineup.", player.name))
}

fn describe_cell(cell: &Cell) -> String {
    format!(
        "Count {} | Outcome {} | Base {}",
        Count::of(&cell.pitch_sequence),
        cell.outcome,
        cell.base_reached
    )
}

pub fn execute_pitch_action<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    pitch: &str,
) -> Result<String, String> {
    let mark = parse_pitch(pitch)?;
    let (row, column) = position(book, batter, inning)?;
    let cell = book.record_pitch(row, column, mark).map_err(|e| e.to_string())?;
    Ok(format!("{}: {}", mark, describe_cell(cell)))
}

/// Remove a pitch by its 1-based position in the sequence.
pub fn execute_remove_pitch<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    pitch_number: usize,
) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    let index = pitch_number
        .checked_sub(1)
        .ok_or_else(|| "Pitch numbers start at 1.".to_string())?;
    let cell = book
        .apply(row, column, CellCommand::RemovePitch { index })
        .map_err(|e| e.to_string())?;
    Ok(format!("Pitch removed. {}", describe_cell(cell)))
}

pub fn execute_outcome_action<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    outcome: &str,
) -> Result<String, String> {
    let outcome = parse_outcome(outcome)?;
    let (row, column) = position(book, batter, inning)?;
    let cell = book
        .select_outcome(row, column, outcome)
        .map_err(|e| e.to_string())?;
    Ok(describe_cell(cell))
}

/// A diamond click at `now`; repeated clicks inside the merge window extend
/// the last segment.
pub fn execute_advance_action<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    modifier: &str,
    now: Millis,
) -> Result<String, String> {
    let modifier = modifier.parse::<ClickModifier>()?;
    let (row, column) = position(book, batter, inning)?;
    let click = DiamondClick {
        row,
        inning: column,
        modifier,
        at: now,
    };
    let cell = book.click_diamond(click).map_err(|e| e.to_string())?;
    let path: Vec<String> = cell.run_path.iter().map(ToString::to_string).collect();
    Ok(format!("Path: {} | {}", path.join(", "), describe_cell(cell)))
}

/// Replace a pitch by its 1-based position in the sequence.
pub fn execute_replace_pitch<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    pitch_number: usize,
    pitch: &str,
) -> Result<String, String> {
    let mark = parse_pitch(pitch)?;
    let (row, column) = position(book, batter, inning)?;
    let index = pitch_number
        .checked_sub(1)
        .ok_or_else(|| "Pitch numbers start at 1.".to_string())?;
    let cell = book
        .apply(row, column, CellCommand::ReplacePitch { index, mark })
        .map_err(|e| e.to_string())?;
    Ok(format!("Pitch {} is now {}. {}", pitch_number, mark, describe_cell(cell)))
}

pub fn execute_clear_pitches<S: Store>(book: &mut Scorebook<S>, batter: usize, inning: usize) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    let cell = book
        .apply(row, column, CellCommand::ClearPitches)
        .map_err(|e| e.to_string())?;
    Ok(format!("Pitches cleared. {}", describe_cell(cell)))
}

/// Rewrite one segment of the run path. Bases are clamped onto the diamond;
/// the segment's note is kept.
#[allow(clippy::too_many_arguments)]
pub fn execute_edit_segment<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    segment_number: usize,
    from: u8,
    to: u8,
    kind: &str,
    caused_by: Option<BattingOrder>,
) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    let index = segment_number
        .checked_sub(1)
        .ok_or_else(|| "Segment numbers start at 1.".to_string())?;
    let (kind, award) = match parse_award(kind) {
        Ok(award) => (SegmentKind::Award, Some(award)),
        Err(_) => (
            kind.trim()
                .parse::<SegmentKind>()
                .map_err(|_| format!("'{}' is not a segment kind. Use hit, advance, error, walk or hbp.", kind))?,
            None,
        ),
    };
    let note = book
        .cell(row, column)
        .map_err(|e| e.to_string())?
        .run_path
        .get(index)
        .and_then(|segment| segment.note.clone());

    let segment = RunSegment {
        award_type: award,
        caused_by_batter: caused_by,
        note,
        ..RunSegment::new(from, to, kind)
    };
    let cell = book
        .apply(row, column, CellCommand::EditSegment { index, segment })
        .map_err(|e| e.to_string())?;
    let path: Vec<String> = cell.run_path.iter().map(ToString::to_string).collect();
    Ok(format!("Path: {} | {}", path.join(", "), describe_cell(cell)))
}

/// Attach a note to one segment; a blank note removes it.
pub fn execute_set_segment_note<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    segment_number: usize,
    note: &str,
) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    let index = segment_number
        .checked_sub(1)
        .ok_or_else(|| "Segment numbers start at 1.".to_string())?;
    let cell = book
        .apply(
            row,
            column,
            CellCommand::SetSegmentNote {
                index,
                note: Some(note.to_string()),
            },
        )
        .map_err(|e| e.to_string())?;
    Ok(match cell.run_path.get(index).and_then(|segment| segment.note.as_deref()) {
        Some(note) => format!("Segment {} note: \"{}\"", segment_number, note),
        None => format!("Segment {} note removed.", segment_number),
    })
}

/// Return one plate appearance to blank.
pub fn execute_reset_cell<S: Store>(book: &mut Scorebook<S>, batter: usize, inning: usize) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    book.reset_cell(row, column).map_err(|e| e.to_string())?;
    Ok(format!("Cleared batter {} in inning {}.", batter, inning))
}

pub fn execute_reset_path<S: Store>(book: &mut Scorebook<S>, batter: usize, inning: usize) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    book.apply(row, column, CellCommand::ResetPath)
        .map_err(|e| e.to_string())?;
    Ok(format!("Cleared the path for batter {} in inning {}.", batter, inning))
}

pub fn execute_set_notes<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
    notes: &str,
) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    book.apply(row, column, CellCommand::SetNotes(notes.to_string()))
        .map_err(|e| e.to_string())?;
    Ok("Notes saved.".to_string())
}

pub fn execute_arm_batter<S: Store>(book: &mut Scorebook<S>, batter: usize, now: Millis) -> Result<String, String> {
    if batter == 0 || batter > book.grid().batter_count() {
        return Err(format!("Invalid batter number {}.", batter));
    }
    let order = u32::try_from(batter).map_err(|_| format!("Invalid batter number {}.", batter))?;
    book.arm_batter(order, now);
    Ok(format!(
        "Next advance is credited to batter #{} for {} ms.",
        batter,
        book.config().arming_ttl_ms
    ))
}

pub fn execute_arm_award<S: Store>(book: &mut Scorebook<S>, award: &str, now: Millis) -> Result<String, String> {
    let award = parse_award(award)?;
    book.arm_award(award, now);
    Ok(format!(
        "Next advance is a {} award for {} ms.",
        award,
        book.config().arming_ttl_ms
    ))
}

pub fn execute_cancel_arming<S: Store>(book: &mut Scorebook<S>) -> String {
    book.cancel_arming();
    "Arming cancelled.".to_string()
}

/// Drop expired arming. Returns true when something expired.
pub fn execute_arming_poll<S: Store>(book: &mut Scorebook<S>, now: Millis) -> bool {
    book.poll_arming(now)
}

pub fn execute_record_out<S: Store>(book: &mut Scorebook<S>, batter: usize, inning: usize) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    let total = book.record_out(row, column).map_err(|e| e.to_string())?;
    let mut output = format!("Out recorded. {} out(s) in inning {}.", total, inning);
    if total == 3 {
        output.push_str(" Side retired.");
    }
    Ok(output)
}

pub fn execute_reset_inning<S: Store>(book: &mut Scorebook<S>, inning: usize) -> Result<String, String> {
    let column = inning
        .checked_sub(1)
        .ok_or_else(|| "Innings start at 1.".to_string())?;
    book.reset_inning(column).map_err(|e| e.to_string())?;
    Ok(format!("Outs cleared for inning {}.", inning))
}

pub fn execute_reset_outs_from<S: Store>(
    book: &mut Scorebook<S>,
    batter: usize,
    inning: usize,
) -> Result<String, String> {
    let (row, column) = position(book, batter, inning)?;
    book.reset_outs_from(column, row)
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "Outs cleared from batter {} down. Inning {} now has {} out(s).",
        batter,
        inning,
        book.grid().inning_out_total(column)
    ))
}

pub fn execute_switch_team<S: Store>(book: &mut Scorebook<S>, side: &str) -> Result<String, String> {
    let side = side.parse::<TeamSide>()?;
    book.switch_team(side).map_err(|e| e.to_string())?;
    Ok(format!("Now scoring {} ({}).", book.team().team_name, side))
}

pub fn execute_save<S: Store>(book: &mut Scorebook<S>) -> Result<String, String> {
    book.save().map_err(|e| e.to_string())?;
    Ok(format!("Saved {}.", book.team().team_name))
}

pub fn export_scorecard_json<S: Store>(book: &Scorebook<S>) -> Result<String, String> {
    book.export().to_json_pretty().map_err(|e| e.to_string())
}
