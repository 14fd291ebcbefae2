//! Plate-appearance records: the unit every scoring action rewrites.

use schema::{AwardType, Outcome, PitchMark, SegmentKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base 0: the batter is still at the plate.
pub const AT_BAT: u8 = 0;
/// Base 4: the runner has scored.
pub const HOME: u8 = 4;
/// Outs that end a half-inning.
pub const MAX_OUTS: u8 = 3;

/// 1-based position in the batting order.
pub type BattingOrder = u32;

/// One edge of a runner's path between two bases.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunSegment {
    pub from: u8,
    pub to: u8,
    pub kind: SegmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award_type: Option<AwardType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caused_by_batter: Option<BattingOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RunSegment {
    pub fn new(from: u8, to: u8, kind: SegmentKind) -> Self {
        Self {
            from,
            to,
            kind,
            award_type: None,
            caused_by_batter: None,
            note: None,
        }
    }

    /// A batter's trip from the plate on a clean hit of `bases` bases.
    pub fn hit(bases: u8) -> Self {
        Self::new(AT_BAT, bases.clamp(1, HOME), SegmentKind::Hit)
    }

    /// The dashed `0→1` segment opened by a walk or hit-by-pitch.
    pub fn award(award_type: AwardType, batter: Option<BattingOrder>) -> Self {
        Self {
            award_type: Some(award_type),
            caused_by_batter: batter,
            ..Self::new(AT_BAT, 1, SegmentKind::Award)
        }
    }

    pub fn with_cause(mut self, batter: Option<BattingOrder>) -> Self {
        self.caused_by_batter = batter;
        self
    }

    /// Whether this segment starts at the plate.
    pub fn is_leading(&self) -> bool {
        self.from == AT_BAT
    }

    pub fn scores(&self) -> bool {
        self.to == HOME
    }

    /// Well-formed segments move forward from a base in 0..=3 to one in 1..=4.
    pub fn is_well_formed(&self) -> bool {
        self.from < HOME && self.to <= HOME && self.to > self.from
    }
}

impl fmt::Display for RunSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{} {}", self.from, self.to, self.kind)?;
        if let Some(award) = self.award_type {
            write!(f, " ({})", award)?;
        }
        if let Some(batter) = self.caused_by_batter {
            write!(f, " [#{}]", batter)?;
        }
        Ok(())
    }
}

/// A single plate appearance at (batter row, inning column).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Cell {
    pub pitch_sequence: Vec<PitchMark>,
    pub outcome: Outcome,
    /// Denormalized copy of the last segment's `to`, 0 for an empty path.
    pub base_reached: u8,
    /// Cumulative inning outs stamped when this plate appearance recorded an out.
    pub outs_recorded: u8,
    pub run_path: Vec<RunSegment>,
    pub notes: String,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Base the path currently ends on.
    pub fn path_end(&self) -> u8 {
        self.run_path.last().map(|segment| segment.to).unwrap_or(AT_BAT)
    }

    /// Re-derive `base_reached` from the run path.
    pub fn sync_base_reached(&mut self) {
        self.base_reached = self.path_end();
    }

    pub fn leading_segment(&self) -> Option<&RunSegment> {
        self.run_path.first().filter(|segment| segment.is_leading())
    }

    /// Swap the plate-originating segments for `leading` (or drop them when
    /// `None`), keeping every continuation segment that starts on base.
    pub fn replace_leading_segment(&mut self, leading: Option<RunSegment>) {
        let continuation: Vec<RunSegment> = self
            .run_path
            .drain(..)
            .filter(|segment| !segment.is_leading())
            .collect();
        self.run_path = leading.into_iter().chain(continuation).collect();
        self.sync_base_reached();
    }

    /// Segments in this cell that brought a runner home.
    pub fn runs_scored(&self) -> usize {
        self.run_path.iter().filter(|segment| segment.scores()).count()
    }

    /// Pitch sequence in scorecard shorthand, e.g. `BCFS`.
    pub fn pitch_symbols(&self) -> String {
        self.pitch_sequence.iter().map(|mark| mark.symbol()).collect()
    }
}
