//! The scorekeeping session: active team, store and interaction state.
//!
//! All grid mutation from the outside goes through [`Scorebook`], which is
//! passed explicitly wherever a team is edited. There is no ambient
//! "current team".

use crate::cell::{BattingOrder, Cell, HOME};
use crate::config::ScorebookConfig;
use crate::errors::{ReportError, ScorebookError, ScorebookResult, StoreError};
use crate::export::{ExportDocument, ReportGenerator, ReportRequest};
use crate::grid::Grid;
use crate::normalize::normalize_snapshot;
use crate::scoring::arming::Millis;
use crate::scoring::commands::CellCommand;
use crate::scoring::diamond::{DiamondClick, DiamondInput};
use crate::scoring::stats::BoxScore;
use crate::store::Store;
use crate::team::{Player, Team, TeamSide};
use schema::{AwardType, Outcome, PitchMark};

pub struct Scorebook<S: Store> {
    config: ScorebookConfig,
    store: S,
    active_side: TeamSide,
    team: Team,
    input: DiamondInput,
}

impl<S: Store> Scorebook<S> {
    /// Open a session on `side`, restoring its stored scorecard if any.
    pub fn open(store: S, config: ScorebookConfig, side: TeamSide) -> ScorebookResult<Self> {
        let team = load_team(&store, side, &config)?;
        Ok(Self {
            config,
            store,
            active_side: side,
            team,
            input: DiamondInput::new(),
        })
    }

    pub fn config(&self) -> &ScorebookConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn active_side(&self) -> TeamSide {
        self.active_side
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn grid(&self) -> &Grid {
        &self.team.grid
    }

    pub fn cell(&self, row: usize, inning: usize) -> ScorebookResult<&Cell> {
        self.team.grid.cell(row, inning)
    }

    pub fn rename_team(&mut self, name: impl Into<String>) {
        self.team.team_name = name.into();
    }

    pub fn add_player(&mut self, row: usize, player: Player) -> usize {
        self.team.add_player(row, player)
    }

    pub fn remove_player(&mut self, row: usize) -> ScorebookResult<Player> {
        self.team.remove_player(row)
    }

    /// Whether edits at (row, inning) are refused because the inning is over.
    pub fn is_locked(&self, row: usize, inning: usize) -> bool {
        self.config.lock_after_third_out && self.team.grid.is_beyond_inning_end(row, inning)
    }

    fn ensure_editable(&self, row: usize, inning: usize) -> ScorebookResult<()> {
        if self.is_locked(row, inning) {
            log::warn!("refusing edit at row {} inning {}: inning over", row, inning + 1);
            return Err(ScorebookError::InningClosed { row, inning });
        }
        Ok(())
    }

    /// Apply one command to a cell. Annotations and path resets are always
    /// allowed; scoring edits after the third out are refused when the lock is on.
    pub fn apply(&mut self, row: usize, inning: usize, command: CellCommand) -> ScorebookResult<&Cell> {
        if !command.is_always_allowed() {
            self.ensure_editable(row, inning)?;
        }
        self.team.grid.apply(row, inning, command)
    }

    pub fn record_pitch(&mut self, row: usize, inning: usize, mark: PitchMark) -> ScorebookResult<&Cell> {
        self.apply(row, inning, CellCommand::AppendPitch(mark))
    }

    pub fn select_outcome(&mut self, row: usize, inning: usize, outcome: Outcome) -> ScorebookResult<&Cell> {
        self.apply(row, inning, CellCommand::SelectOutcome(outcome))
    }

    /// Handle a click on a cell's diamond, consuming any armed tags. A click
    /// on a path that already reached home changes nothing and keeps the tags.
    pub fn click_diamond(&mut self, click: DiamondClick) -> ScorebookResult<&Cell> {
        self.ensure_editable(click.row, click.inning)?;
        let cell = self.cell(click.row, click.inning)?;
        if cell.path_end() >= HOME {
            log::debug!("run path already reached home; keeping armed tags");
            return self.cell(click.row, click.inning);
        }
        let path_is_empty = cell.run_path.is_empty();
        let step = self
            .input
            .resolve(click, path_is_empty, self.config.merge_window_ms);
        self.team
            .grid
            .apply(click.row, click.inning, CellCommand::Advance(step))
    }

    pub fn arm_batter(&mut self, batter: BattingOrder, now: Millis) {
        self.input
            .arming
            .arm_batter(batter, now, self.config.arming_ttl_ms);
    }

    pub fn arm_award(&mut self, award: AwardType, now: Millis) {
        self.input
            .arming
            .arm_award(award, now, self.config.arming_ttl_ms);
    }

    pub fn cancel_arming(&mut self) {
        self.input.arming.cancel();
    }

    /// Expire stale arming; call every `config.arming_poll_ms`.
    pub fn poll_arming(&mut self, now: Millis) -> bool {
        self.input.arming.poll(now)
    }

    pub fn armed_batter(&self, now: Millis) -> Option<BattingOrder> {
        self.input.arming.armed_batter(now)
    }

    pub fn armed_award(&self, now: Millis) -> Option<AwardType> {
        self.input.arming.armed_award(now)
    }

    pub fn record_out(&mut self, row: usize, inning: usize) -> ScorebookResult<u8> {
        self.ensure_editable(row, inning)?;
        self.team.grid.record_out(row, inning)
    }

    pub fn reset_inning(&mut self, inning: usize) -> ScorebookResult<()> {
        self.team.grid.reset_inning(inning)
    }

    pub fn reset_outs_from(&mut self, inning: usize, row: usize) -> ScorebookResult<()> {
        self.team.grid.reset_outs_from(inning, row)
    }

    pub fn reset_cell(&mut self, row: usize, inning: usize) -> ScorebookResult<()> {
        self.team.grid.reset_cell(row, inning)
    }

    /// Persist the active team's snapshot under its side's key.
    pub fn save(&mut self) -> ScorebookResult<()> {
        let key = self.active_side.store_key();
        let value = serde_json::to_value(self.team.snapshot()).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.save(key, &value)?;
        Ok(())
    }

    /// Make `side` the active team: save the current one, then load the other.
    /// If the save fails nothing changes.
    pub fn switch_team(&mut self, side: TeamSide) -> ScorebookResult<()> {
        if side == self.active_side {
            return Ok(());
        }
        self.save()?;
        let team = load_team(&self.store, side, &self.config)?;

        log::info!("switched scorecard from {} to {}", self.active_side, side);
        self.team = team;
        self.active_side = side;
        self.input.clear();
        Ok(())
    }

    pub fn box_score(&self) -> BoxScore {
        BoxScore::compute(&self.team.grid, &self.team.players)
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument::from_team(&self.team)
    }

    /// Ask the external generator for a game report. Failures are returned
    /// for display and never touch scorebook state.
    pub fn generate_report<G: ReportGenerator>(
        &self,
        generator: &G,
        notes: &str,
        language: &str,
    ) -> Result<String, ReportError> {
        let request = ReportRequest {
            document: self.export(),
            notes: notes.to_string(),
            language: language.to_string(),
        };
        generator.generate(&request).inspect_err(|err| {
            log::warn!("report generation failed: {}", err);
        })
    }
}

fn load_team<S: Store>(store: &S, side: TeamSide, config: &ScorebookConfig) -> ScorebookResult<Team> {
    let Some(value) = store.load(side.store_key())? else {
        log::info!("no stored scorecard for {}, starting fresh", side);
        return Ok(Team::new(side.to_string(), config));
    };

    let mut team = Team::from_snapshot(normalize_snapshot(&value), config.innings);
    if team.team_name.trim().is_empty() {
        team.team_name = side.to_string();
    }
    Ok(team)
}
