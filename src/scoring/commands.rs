//! Cell commands and the reducer that turns one command into one next cell.
//!
//! Outcome and run path feed each other (a walk opens an award segment, a
//! `0→2` hit segment means a double). Both directions are resolved here in a
//! single pass so a command always yields exactly one authoritative
//! `(outcome, run_path, base_reached)` triple.

use crate::cell::{BattingOrder, Cell, RunSegment, HOME};
use crate::errors::{ScorebookError, ScorebookResult};
use crate::scoring::count::auto_outcome;
use schema::{AwardType, Outcome, PitchMark, SegmentKind};

/// One user intent against a single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellCommand {
    // Pitch sequence edits
    AppendPitch(PitchMark),
    RemovePitch { index: usize },
    ReplacePitch { index: usize, mark: PitchMark },
    ClearPitches,

    // Outcome control
    SelectOutcome(Outcome),

    // Baserunner path edits
    Advance(PathStep),
    EditSegment { index: usize, segment: RunSegment },
    ResetPath,

    // Free text
    SetSegmentNote { index: usize, note: Option<String> },
    SetNotes(String),
}

impl CellCommand {
    /// Annotations never change scoring and stay editable after the inning ends.
    pub fn is_annotation(&self) -> bool {
        matches!(
            self,
            CellCommand::SetSegmentNote { .. } | CellCommand::SetNotes(_)
        )
    }

    /// Commands accepted even on a closed inning: annotations and path resets.
    pub fn is_always_allowed(&self) -> bool {
        self.is_annotation() || matches!(self, CellCommand::ResetPath)
    }

    fn touches_pitches(&self) -> bool {
        matches!(
            self,
            CellCommand::AppendPitch(_)
                | CellCommand::RemovePitch { .. }
                | CellCommand::ReplacePitch { .. }
                | CellCommand::ClearPitches
        )
    }
}

/// A resolved diamond interaction: what to add to the path and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub kind: SegmentKind,
    pub award_type: Option<AwardType>,
    pub caused_by: Option<BattingOrder>,
    /// Stretch the last segment by one base instead of appending a new one.
    pub extend_last: bool,
}

impl PathStep {
    pub fn advance() -> Self {
        Self::of_kind(SegmentKind::Advance)
    }

    pub fn of_kind(kind: SegmentKind) -> Self {
        Self {
            kind,
            award_type: None,
            caused_by: None,
            extend_last: false,
        }
    }

    pub fn award(award_type: AwardType) -> Self {
        Self {
            award_type: Some(award_type),
            ..Self::of_kind(SegmentKind::Award)
        }
    }

    pub fn caused_by(mut self, batter: Option<BattingOrder>) -> Self {
        self.caused_by = batter;
        self
    }

    pub fn extending(mut self) -> Self {
        self.extend_last = true;
        self
    }
}

/// Who is batting in the cell being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext {
    pub batter: BattingOrder,
}

/// Follow-up work the grid performs after committing the next cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEffect {
    RecordOut,
}

/// The next state of a cell plus its follow-up effects.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTransition {
    pub cell: Cell,
    pub effects: Vec<CellEffect>,
}

/// Reduce `command` against `cell`, returning the complete next cell.
pub fn execute_cell_command(
    cell: &Cell,
    command: CellCommand,
    context: CellContext,
) -> ScorebookResult<CellTransition> {
    let mut next = cell.clone();
    let mut effects = Vec::new();
    let pitch_edit = command.touches_pitches();

    match command {
        CellCommand::AppendPitch(mark) => next.pitch_sequence.push(mark),
        CellCommand::RemovePitch { index } => {
            check_pitch_index(&next, index)?;
            next.pitch_sequence.remove(index);
        }
        CellCommand::ReplacePitch { index, mark } => {
            check_pitch_index(&next, index)?;
            next.pitch_sequence[index] = mark;
        }
        CellCommand::ClearPitches => next.pitch_sequence.clear(),
        CellCommand::SelectOutcome(outcome) => select_outcome(&mut next, outcome, context),
        CellCommand::Advance(step) => advance_path(&mut next, step),
        CellCommand::EditSegment { index, segment } => edit_segment(&mut next, index, segment)?,
        CellCommand::ResetPath => {
            next.run_path.clear();
            next.outcome = Outcome::None;
        }
        CellCommand::SetSegmentNote { index, note } => {
            let len = next.run_path.len();
            let segment = next
                .run_path
                .get_mut(index)
                .ok_or(ScorebookError::SegmentOutOfRange { index, len })?;
            segment.note = note.filter(|text| !text.trim().is_empty());
        }
        CellCommand::SetNotes(notes) => next.notes = notes,
    }

    if pitch_edit {
        apply_pitch_outcome(&mut next, context, &mut effects);
    }
    next.sync_base_reached();

    if next.outcome != cell.outcome {
        log::debug!(
            "batter #{} outcome {} -> {}",
            context.batter,
            cell.outcome,
            next.outcome
        );
    }

    Ok(CellTransition {
        cell: next,
        effects,
    })
}

fn check_pitch_index(cell: &Cell, index: usize) -> ScorebookResult<()> {
    let len = cell.pitch_sequence.len();
    if index < len {
        Ok(())
    } else {
        Err(ScorebookError::PitchOutOfRange { index, len })
    }
}

/// Apply the pitch-forced outcome, if the sequence forces a new one.
fn apply_pitch_outcome(cell: &mut Cell, context: CellContext, effects: &mut Vec<CellEffect>) {
    let Some(candidate) = auto_outcome(&cell.pitch_sequence) else {
        return;
    };
    if candidate == cell.outcome {
        return;
    }

    cell.outcome = candidate;
    match candidate {
        Outcome::Strikeout => effects.push(CellEffect::RecordOut),
        Outcome::Walk | Outcome::Hbp => {
            if let Some(award) = candidate.award_type() {
                cell.replace_leading_segment(Some(RunSegment::award(award, Some(context.batter))));
            }
        }
        _ => {}
    }
}

fn select_outcome(cell: &mut Cell, outcome: Outcome, context: CellContext) {
    cell.outcome = outcome;

    if let Some(bases) = outcome.hit_bases() {
        cell.replace_leading_segment(Some(RunSegment::hit(bases)));
    } else if let Some(award) = outcome.award_type() {
        cell.replace_leading_segment(Some(RunSegment::award(award, Some(context.batter))));
    } else if outcome == Outcome::None {
        cell.replace_leading_segment(None);
    }
}

/// Extend or append one base of progress. A path that already reached home
/// is left alone; only a reset starts a new chain.
fn advance_path(cell: &mut Cell, step: PathStep) {
    let from = cell.path_end();
    if from >= HOME {
        log::debug!("run path already reached home; ignoring advance");
        return;
    }

    let extend = step.extend_last && !cell.run_path.is_empty();
    if extend {
        if let Some(last) = cell.run_path.last_mut() {
            last.to = (last.to + 1).min(HOME);
            if step.caused_by.is_some() {
                last.caused_by_batter = step.caused_by;
            }
        }
    } else {
        cell.run_path.push(RunSegment {
            award_type: step.award_type,
            caused_by_batter: step.caused_by,
            ..RunSegment::new(from, (from + 1).min(HOME), step.kind)
        });
    }

    let touched_index = cell.run_path.len() - 1;
    if touched_index == 0 {
        derive_outcome_from_leading(cell);
    }
}

fn edit_segment(cell: &mut Cell, index: usize, segment: RunSegment) -> ScorebookResult<()> {
    let len = cell.run_path.len();
    let slot = cell
        .run_path
        .get_mut(index)
        .ok_or(ScorebookError::SegmentOutOfRange { index, len })?;
    *slot = clamp_segment(segment);

    if index == 0 {
        derive_outcome_from_leading(cell);
    }
    Ok(())
}

/// Pull a hand-edited segment back onto the diamond.
fn clamp_segment(mut segment: RunSegment) -> RunSegment {
    segment.from = segment.from.min(HOME - 1);
    segment.to = segment.to.clamp(segment.from + 1, HOME);
    if segment.kind != SegmentKind::Award {
        segment.award_type = None;
    }
    segment
}

/// Back-derive the outcome from a plate-originating hit or award segment.
fn derive_outcome_from_leading(cell: &mut Cell) {
    let Some(leading) = cell.leading_segment() else {
        return;
    };
    let derived = match leading.kind {
        SegmentKind::Hit => Outcome::from_hit_bases(leading.to),
        SegmentKind::Award => Some(leading.award_type.unwrap_or(AwardType::Walk).outcome()),
        SegmentKind::Advance | SegmentKind::Error => None,
    };
    if let Some(outcome) = derived {
        cell.outcome = outcome;
    }
}
