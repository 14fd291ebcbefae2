//! Inning out tracking.
//!
//! Two views coexist. `inning_outs[c]` is the official running total for a
//! half-inning; each cell's `outs_recorded` is the total stamped when that
//! plate appearance made an out. Reads for a given row use the most recent
//! nonzero stamp at or above it, not the largest one.

use crate::cell::MAX_OUTS;
use crate::errors::ScorebookResult;
use crate::grid::Grid;

impl Grid {
    /// Record an out for the plate appearance at (row, inning) and return the
    /// new inning total. A fourth out is clamped to three.
    pub fn record_out(&mut self, row: usize, inning: usize) -> ScorebookResult<u8> {
        self.cell(row, inning)?;
        let total = self.inning_outs[inning].saturating_add(1).min(MAX_OUTS);
        self.inning_outs[inning] = total;
        self.cell_mut(row, inning)?.outs_recorded = total;
        log::debug!("inning {} out recorded at row {}: {} out", inning + 1, row, total);
        Ok(total)
    }

    /// Outs in effect at `row`: the stamp of the last row at or above it with
    /// a nonzero value, or 0.
    pub fn outs_up_to(&self, inning: usize, row: usize) -> u8 {
        self.column(inning)
            .take(row.saturating_add(1))
            .map(|cell| cell.outs_recorded)
            .filter(|outs| *outs > 0)
            .last()
            .unwrap_or(0)
    }

    /// Official out count for an inning.
    pub fn inning_out_total(&self, inning: usize) -> u8 {
        self.inning_outs.get(inning).copied().unwrap_or(0)
    }

    /// Clear every out in an inning.
    pub fn reset_inning(&mut self, inning: usize) -> ScorebookResult<()> {
        self.check_inning(inning)?;
        self.inning_outs[inning] = 0;
        for row in &mut self.cells {
            row[inning].outs_recorded = 0;
        }
        Ok(())
    }

    /// Clear stamps from `row` down, then rebuild the inning total from the
    /// largest stamp left in the column.
    pub fn reset_outs_from(&mut self, inning: usize, row: usize) -> ScorebookResult<()> {
        self.check_inning(inning)?;
        for cells in self.cells.iter_mut().skip(row) {
            cells[inning].outs_recorded = 0;
        }
        self.rebuild_inning_total(inning);
        Ok(())
    }

    /// Set an inning's total to the largest stamp left in its column.
    pub(crate) fn rebuild_inning_total(&mut self, inning: usize) {
        let total = self
            .column(inning)
            .map(|cell| cell.outs_recorded)
            .max()
            .unwrap_or(0);
        if let Some(slot) = self.inning_outs.get_mut(inning) {
            *slot = total;
        }
    }

    /// True for plate appearances after the third out: the outs in effect
    /// reached three and this cell did not make that out itself.
    pub fn is_beyond_inning_end(&self, row: usize, inning: usize) -> bool {
        match self.cell(row, inning) {
            Ok(cell) => self.outs_up_to(inning, row) == MAX_OUTS && cell.outs_recorded != MAX_OUTS,
            Err(_) => false,
        }
    }
}
