//! The scorecard matrix: one row per batter, one column per inning.

use crate::cell::{BattingOrder, Cell, MAX_OUTS};
use crate::errors::{ScorebookError, ScorebookResult};
use crate::scoring::commands::{execute_cell_command, CellCommand, CellContext, CellEffect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Vec<Vec<Cell>>,
    pub(crate) inning_outs: Vec<u8>,
    innings: usize,
}

impl Grid {
    /// An empty scorecard of `batters` rows by `innings` columns.
    pub fn new(batters: usize, innings: usize) -> Self {
        Self {
            cells: vec![vec![Cell::default(); innings]; batters],
            inning_outs: vec![0; innings],
            innings,
        }
    }

    /// Assemble a grid from stored parts, padding or truncating every row
    /// and the outs vector to exactly `innings` columns. Out counts are
    /// clamped to three.
    pub fn from_parts(mut cells: Vec<Vec<Cell>>, mut inning_outs: Vec<u8>, innings: usize) -> Self {
        for row in &mut cells {
            row.resize_with(innings, Cell::default);
            for cell in row.iter_mut() {
                cell.outs_recorded = cell.outs_recorded.min(MAX_OUTS);
            }
        }
        inning_outs.resize(innings, 0);
        for outs in &mut inning_outs {
            *outs = (*outs).min(MAX_OUTS);
        }
        Self {
            cells,
            inning_outs,
            innings,
        }
    }

    pub fn batter_count(&self) -> usize {
        self.cells.len()
    }

    pub fn innings(&self) -> usize {
        self.innings
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn inning_outs(&self) -> &[u8] {
        &self.inning_outs
    }

    /// Batting-order number of a row.
    pub fn batting_order(row: usize) -> BattingOrder {
        BattingOrder::try_from(row + 1).unwrap_or(BattingOrder::MAX)
    }

    pub fn cell(&self, row: usize, inning: usize) -> ScorebookResult<&Cell> {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(inning))
            .ok_or(ScorebookError::CellOutOfRange { row, inning })
    }

    pub(crate) fn cell_mut(&mut self, row: usize, inning: usize) -> ScorebookResult<&mut Cell> {
        self.cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(inning))
            .ok_or(ScorebookError::CellOutOfRange { row, inning })
    }

    pub(crate) fn check_inning(&self, inning: usize) -> ScorebookResult<()> {
        if inning < self.innings {
            Ok(())
        } else {
            Err(ScorebookError::InningOutOfRange(inning))
        }
    }

    /// Cells of one inning, top of the order first.
    pub fn column(&self, inning: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter_map(move |row| row.get(inning))
    }

    /// Add an empty row at `row` (clamped to the end of the lineup).
    pub fn insert_batter(&mut self, row: usize) {
        let at = row.min(self.cells.len());
        self.cells.insert(at, vec![Cell::default(); self.innings]);
    }

    pub fn push_batter(&mut self) {
        self.insert_batter(self.cells.len());
    }

    /// Drop a lineup row together with its plate appearances. Innings where
    /// the row held an out stamp get their totals rebuilt from what remains.
    pub fn remove_batter(&mut self, row: usize) -> ScorebookResult<Vec<Cell>> {
        if row >= self.cells.len() {
            return Err(ScorebookError::RowOutOfRange(row));
        }
        let removed = self.cells.remove(row);
        for (inning, cell) in removed.iter().enumerate() {
            if cell.outs_recorded > 0 {
                self.rebuild_inning_total(inning);
            }
        }
        Ok(removed)
    }

    /// Return a cell to its freshly-created state.
    pub fn reset_cell(&mut self, row: usize, inning: usize) -> ScorebookResult<()> {
        *self.cell_mut(row, inning)? = Cell::default();
        Ok(())
    }

    /// Run one command against a cell, commit the result, then apply its effects.
    pub fn apply(
        &mut self,
        row: usize,
        inning: usize,
        command: CellCommand,
    ) -> ScorebookResult<&Cell> {
        let context = CellContext {
            batter: Self::batting_order(row),
        };
        let transition = execute_cell_command(self.cell(row, inning)?, command, context)?;
        *self.cell_mut(row, inning)? = transition.cell;

        for effect in transition.effects {
            match effect {
                CellEffect::RecordOut => {
                    self.record_out(row, inning)?;
                }
            }
        }
        self.cell(row, inning)
    }
}
