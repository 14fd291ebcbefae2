use crate::cell::{Cell, RunSegment};
use crate::config::ScorebookConfig;
use crate::grid::Grid;
use crate::scorebook::Scorebook;
use crate::scoring::arming::Millis;
use crate::scoring::commands::CellCommand;
use crate::scoring::diamond::{ClickModifier, DiamondClick};
use crate::store::MemoryStore;
use crate::team::TeamSide;
use schema::{Outcome, PitchMark};

/// A builder for test cells with common defaults.
///
/// # Example
/// ```
/// let cell = TestCellBuilder::new()
///     .with_outcome(Outcome::Single)
///     .with_path(vec![RunSegment::hit(1)])
///     .build();
/// ```
pub struct TestCellBuilder {
    cell: Cell,
}

impl TestCellBuilder {
    pub fn new() -> Self {
        Self { cell: Cell::default() }
    }

    pub fn with_pitches(mut self, pitches: &[PitchMark]) -> Self {
        self.cell.pitch_sequence = pitches.to_vec();
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.cell.outcome = outcome;
        self
    }

    /// Sets the run path; `base_reached` follows it.
    pub fn with_path(mut self, path: Vec<RunSegment>) -> Self {
        self.cell.run_path = path;
        self.cell.sync_base_reached();
        self
    }

    pub fn with_outs(mut self, outs: u8) -> Self {
        self.cell.outs_recorded = outs;
        self
    }

    pub fn build(self) -> Cell {
        self.cell
    }
}

/// A fresh in-memory session on the away team with default settings.
pub fn test_scorebook() -> Scorebook<MemoryStore> {
    test_scorebook_with(ScorebookConfig::default())
}

pub fn test_scorebook_with(config: ScorebookConfig) -> Scorebook<MemoryStore> {
    match Scorebook::open(MemoryStore::new(), config, TeamSide::Away) {
        Ok(book) => book,
        Err(err) => panic!("in-memory scorebook should open: {}", err),
    }
}

/// Feed a pitch sequence into one cell, one pitch at a time.
pub fn throw_pitches(grid: &mut Grid, row: usize, inning: usize, pitches: &[PitchMark]) {
    for mark in pitches {
        if let Err(err) = grid.apply(row, inning, CellCommand::AppendPitch(*mark)) {
            panic!("pitch {:?} at ({}, {}) failed: {}", mark, row, inning, err);
        }
    }
}

/// A plain diamond click at `at` milliseconds.
pub fn click(row: usize, inning: usize, modifier: ClickModifier, at: Millis) -> DiamondClick {
    DiamondClick {
        row,
        inning,
        modifier,
        at,
    }
}

/// `base_reached` must mirror the path after every mutation.
pub fn assert_base_invariant(cell: &Cell) {
    let expected = cell.run_path.last().map(|segment| segment.to).unwrap_or(0);
    assert_eq!(
        cell.base_reached, expected,
        "base_reached out of sync with path {:?}",
        cell.run_path
    );
}
