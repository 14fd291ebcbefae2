#[cfg(test)]
mod tests {
    use crate::cell::Cell;
    use crate::config::ScorebookConfig;
    use crate::errors::ScorebookError;
    use crate::grid::Grid;
    use crate::scoring::commands::CellCommand;
    use crate::scoring::tests::common::{
        test_scorebook, test_scorebook_with, throw_pitches, TestCellBuilder,
    };
    use pretty_assertions::assert_eq;
    use schema::{Outcome, PitchMark};

    #[test]
    fn test_record_out_stamps_running_total() {
        let mut grid = Grid::new(9, 9);
        assert_eq!(grid.record_out(0, 2).unwrap(), 1);
        assert_eq!(grid.record_out(3, 2).unwrap(), 2);

        assert_eq!(grid.cell(0, 2).unwrap().outs_recorded, 1);
        assert_eq!(grid.cell(3, 2).unwrap().outs_recorded, 2);
        assert_eq!(grid.inning_out_total(2), 2);
        assert_eq!(grid.inning_out_total(1), 0, "other innings untouched");
    }

    #[test]
    fn test_fourth_out_is_clamped() {
        let mut grid = Grid::new(9, 9);
        for row in 0..4 {
            grid.record_out(row, 0).unwrap();
        }
        assert_eq!(grid.inning_out_total(0), 3);
        assert_eq!(grid.cell(3, 0).unwrap().outs_recorded, 3);
    }

    #[test]
    fn test_outs_up_to_reads_the_nearest_stamp() {
        let mut grid = Grid::new(9, 9);
        grid.record_out(1, 0).unwrap();
        grid.record_out(4, 0).unwrap();

        assert_eq!(grid.outs_up_to(0, 0), 0);
        assert_eq!(grid.outs_up_to(0, 1), 1);
        assert_eq!(grid.outs_up_to(0, 3), 1);
        assert_eq!(grid.outs_up_to(0, 4), 2);
        assert_eq!(grid.outs_up_to(0, 8), 2);
    }

    #[test]
    fn test_outs_up_to_prefers_latest_stamp_over_largest() {
        let mut grid = Grid::new(9, 9);
        grid.record_out(0, 0).unwrap();
        grid.record_out(1, 0).unwrap();
        // A hand edit leaves a stale smaller stamp further down
        grid.cell_mut(2, 0).unwrap().outs_recorded = 1;

        assert_eq!(grid.outs_up_to(0, 1), 2);
        assert_eq!(grid.outs_up_to(0, 2), 1);
    }

    #[test]
    fn test_reset_inning_clears_column() {
        let mut grid = Grid::new(9, 9);
        grid.record_out(0, 5).unwrap();
        grid.record_out(1, 5).unwrap();
        grid.record_out(0, 6).unwrap();

        grid.reset_inning(5).unwrap();
        assert_eq!(grid.inning_out_total(5), 0);
        assert!(grid.column(5).all(|cell| cell.outs_recorded == 0));
        assert_eq!(grid.inning_out_total(6), 1);
        assert!(matches!(
            grid.reset_inning(9),
            Err(ScorebookError::InningOutOfRange(9))
        ));
    }

    #[test]
    fn test_partial_reset_uses_remaining_max() {
        let mut grid = Grid::new(9, 9);
        grid.record_out(0, 0).unwrap();
        grid.record_out(2, 0).unwrap();
        grid.record_out(5, 0).unwrap();

        grid.reset_outs_from(0, 2).unwrap();
        assert_eq!(grid.inning_out_total(0), 1);
        assert_eq!(grid.cell(5, 0).unwrap().outs_recorded, 0);

        // The next out continues from the rebuilt total
        assert_eq!(grid.record_out(2, 0).unwrap(), 2);
    }

    #[test]
    fn test_partial_reset_never_exceeds_remaining_stamps() {
        for from_row in 0..=9 {
            let mut grid = Grid::new(9, 9);
            for row in [0, 3, 6, 7] {
                grid.record_out(row, 0).unwrap();
            }
            grid.reset_outs_from(0, from_row).unwrap();

            let remaining_max = grid.column(0).map(|c| c.outs_recorded).max().unwrap_or(0);
            assert!(grid.inning_out_total(0) <= remaining_max);
        }
    }

    #[test]
    fn test_beyond_inning_end() {
        let mut grid = Grid::new(9, 9);
        grid.record_out(0, 0).unwrap();
        grid.record_out(1, 0).unwrap();
        grid.record_out(2, 0).unwrap();

        assert!(!grid.is_beyond_inning_end(2, 0), "the third-out cell itself is live");
        assert!(grid.is_beyond_inning_end(3, 0));
        assert!(grid.is_beyond_inning_end(8, 0));
        assert!(!grid.is_beyond_inning_end(3, 1));
    }

    #[test]
    fn test_locked_cells_refuse_scoring_but_take_notes() {
        let mut book = test_scorebook();
        for row in 0..3 {
            book.record_out(row, 0).unwrap();
        }

        assert!(matches!(
            book.record_pitch(3, 0, PitchMark::Ball),
            Err(ScorebookError::InningClosed { row: 3, inning: 0 })
        ));
        assert!(matches!(
            book.record_out(3, 0),
            Err(ScorebookError::InningClosed { .. })
        ));
        assert!(book.cell(3, 0).unwrap().is_empty());

        book.apply(3, 0, CellCommand::SetNotes("inning over".to_string()))
            .unwrap();
        assert_eq!(book.cell(3, 0).unwrap().notes, "inning over");

        // Undoing the third out unlocks the rest of the column
        book.reset_outs_from(0, 2).unwrap();
        book.select_outcome(3, 0, Outcome::Single).unwrap();
    }

    #[test]
    fn test_locked_cells_still_accept_path_reset() {
        let mut book = test_scorebook();
        book.select_outcome(3, 0, Outcome::Single).unwrap();
        for row in 0..3 {
            book.record_out(row, 0).unwrap();
        }
        assert!(book.is_locked(3, 0));

        let cell = book.apply(3, 0, CellCommand::ResetPath).unwrap();
        assert!(cell.run_path.is_empty());
        assert_eq!(cell.outcome, Outcome::None);
        assert_eq!(cell.base_reached, 0);
    }

    #[test]
    fn test_out_of_range_stored_totals_are_clamped() {
        let mut grid = Grid::from_parts(vec![vec![Cell::default(); 9]], vec![255], 9);
        assert_eq!(grid.inning_out_total(0), 3);
        assert_eq!(grid.record_out(0, 0).unwrap(), 3);

        let stamped = TestCellBuilder::new().with_outs(200).build();
        let grid = Grid::from_parts(vec![vec![stamped]], vec![], 9);
        assert_eq!(grid.cell(0, 0).unwrap().outs_recorded, 3);
    }

    #[test]
    fn test_removing_a_batter_rebuilds_inning_totals() {
        let mut grid = Grid::new(4, 9);
        grid.record_out(0, 0).unwrap();
        grid.record_out(2, 0).unwrap();
        grid.record_out(1, 1).unwrap();

        grid.remove_batter(2).unwrap();
        assert_eq!(grid.inning_out_total(0), 1);
        assert_eq!(grid.inning_out_total(1), 1);

        grid.remove_batter(0).unwrap();
        assert_eq!(grid.inning_out_total(0), 0);
        assert_eq!(grid.inning_out_total(1), 1);
    }

    #[test]
    fn test_lock_can_be_disabled() {
        let mut book = test_scorebook_with(ScorebookConfig {
            lock_after_third_out: false,
            ..ScorebookConfig::default()
        });
        for row in 0..3 {
            book.record_out(row, 0).unwrap();
        }

        assert!(book.grid().is_beyond_inning_end(3, 0));
        assert!(!book.is_locked(3, 0));
        book.select_outcome(3, 0, Outcome::Walk).unwrap();
    }

    #[test]
    fn test_three_strikeouts_end_the_inning() {
        let mut grid = Grid::new(9, 9);
        for row in 0..3 {
            throw_pitches(
                &mut grid,
                row,
                0,
                &[PitchMark::CalledStrike, PitchMark::Foul, PitchMark::SwingingStrike],
            );
        }

        let stamps: Vec<u8> = grid.column(0).take(3).map(|c| c.outs_recorded).collect();
        assert_eq!(stamps, vec![1, 2, 3]);
        assert_eq!(grid.inning_out_total(0), 3);
        assert!(grid.is_beyond_inning_end(3, 0));
    }
}
