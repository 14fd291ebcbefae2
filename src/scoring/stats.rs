//! Read-side statistics, recomputed from the whole grid on every call.

use crate::cell::{BattingOrder, Cell};
use crate::grid::Grid;
use crate::team::Player;
use schema::Outcome;
use std::fmt;

/// Per-batter counting stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattingLine {
    pub at_bats: u32,
    pub hits: u32,
    pub runs_batted_in: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

impl BattingLine {
    /// Line for the batter in `row`. RBI is collected from the whole grid.
    pub fn for_row(grid: &Grid, row: usize) -> Self {
        let cells = grid.rows().get(row).map(Vec::as_slice).unwrap_or(&[]);
        let count = |predicate: fn(Outcome) -> bool| {
            cells.iter().filter(|cell| predicate(cell.outcome)).count() as u32
        };

        Self {
            at_bats: count(Outcome::is_at_bat),
            hits: count(Outcome::is_hit),
            runs_batted_in: runs_batted_in(grid, Grid::batting_order(row)),
            walks: count(|outcome| outcome == Outcome::Walk),
            strikeouts: count(|outcome| outcome == Outcome::Strikeout),
        }
    }
}

/// Scoring segments anywhere on the card credited to `batter`.
///
/// Credit follows the scorer's tags, including segments recorded in other
/// batters' cells; no same-inning causality check is made.
pub fn runs_batted_in(grid: &Grid, batter: BattingOrder) -> u32 {
    grid.rows()
        .iter()
        .flatten()
        .flat_map(|cell| cell.run_path.iter())
        .filter(|segment| segment.scores() && segment.caused_by_batter == Some(batter))
        .count() as u32
}

/// Team runs scored in one inning column.
pub fn runs_in_inning(grid: &Grid, inning: usize) -> u32 {
    grid.column(inning).map(Cell::runs_scored).sum::<usize>() as u32
}

pub fn runs_by_inning(grid: &Grid) -> Vec<u32> {
    (0..grid.innings())
        .map(|inning| runs_in_inning(grid, inning))
        .collect()
}

pub fn total_runs(grid: &Grid) -> u32 {
    runs_by_inning(grid).iter().sum()
}

/// Every derived number a scorecard footer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxScore {
    pub batters: Vec<(String, BattingLine)>,
    pub runs_by_inning: Vec<u32>,
    pub total_runs: u32,
    pub total_hits: u32,
}

impl BoxScore {
    pub fn compute(grid: &Grid, players: &[Player]) -> Self {
        let batters: Vec<(String, BattingLine)> = (0..grid.batter_count())
            .map(|row| {
                let name = players
                    .get(row)
                    .map(|player| player.name.clone())
                    .unwrap_or_else(|| Player::placeholder_name(row));
                (name, BattingLine::for_row(grid, row))
            })
            .collect();
        let runs_by_inning = runs_by_inning(grid);

        Self {
            total_runs: runs_by_inning.iter().sum(),
            total_hits: batters.iter().map(|(_, line)| line.hits).sum(),
            batters,
            runs_by_inning,
        }
    }
}

impl fmt::Display for BoxScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<4}{:<20}{:>4}{:>4}{:>5}{:>4}{:>4}", "#", "Batter", "AB", "H", "RBI", "BB", "K")?;
        for (row, (name, line)) in self.batters.iter().enumerate() {
            writeln!(
                f,
                "{:<4}{:<20}{:>4}{:>4}{:>5}{:>4}{:>4}",
                row + 1,
                name,
                line.at_bats,
                line.hits,
                line.runs_batted_in,
                line.walks,
                line.strikeouts
            )?;
        }

        let innings: Vec<String> = (1..=self.runs_by_inning.len()).map(|i| format!("{:>3}", i)).collect();
        let runs: Vec<String> = self.runs_by_inning.iter().map(|r| format!("{:>3}", r)).collect();
        writeln!(f)?;
        writeln!(f, "Inning {}    R   H", innings.join(""))?;
        write!(
            f,
            "Runs   {}  {:>3} {:>3}",
            runs.join(""),
            self.total_runs,
            self.total_hits
        )
    }
}
