//! Scorebook MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes the scorekeeping engine as tools, one scorer action per call.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use scorebook::mcp_interface::*;
use scorebook::{JsonFileStore, Millis, Scorebook, ScorebookConfig, TeamSide};
use serde::Deserialize;
use tokio::io::{stdin, stdout};

const CONFIG_ENV: &str = "SCOREBOOK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "scorebook.ron";

#[derive(Clone)]
pub struct ScorebookService {
    tool_router: ToolRouter<ScorebookService>,
    book: Arc<Mutex<Scorebook<JsonFileStore>>>,
    started: Instant,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlateAppearanceRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordPitchRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Pitch: 'ball', 'called', 'swinging', 'foul' or 'dead'")]
    pub pitch: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemovePitchRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Position of the pitch in the sequence (1-based)")]
    pub pitch_number: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetOutcomeRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(
        description = "Outcome: none, in_play, walk, hbp, strikeout, single, double, triple, home_run or out"
    )]
    pub outcome: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdvanceRunnerRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Optional modifier: 'hit' or 'error'. Omit for a plain advance")]
    pub modifier: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetNotesRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Free-text notes for the plate appearance")]
    pub notes: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReplacePitchRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Position of the pitch in the sequence (1-based)")]
    pub pitch_number: usize,
    #[schemars(description = "Replacement pitch: 'ball', 'called', 'swinging', 'foul' or 'dead'")]
    pub pitch: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EditSegmentRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Position of the segment in the run path (1-based)")]
    pub segment_number: usize,
    #[schemars(description = "Starting base: 0 home plate, 1-3 for the bases")]
    pub from: u8,
    #[schemars(description = "Ending base: 1-3 for the bases, 4 for a run")]
    pub to: u8,
    #[schemars(description = "Segment kind: 'hit', 'advance', 'error', 'walk' or 'hbp'")]
    pub kind: String,
    #[schemars(description = "Batting-order number credited with the advance")]
    pub caused_by: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SegmentNoteRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
    #[schemars(description = "Position of the segment in the run path (1-based)")]
    pub segment_number: usize,
    #[schemars(description = "Note text; empty removes the note")]
    pub note: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddPlayerRequest {
    #[schemars(description = "Player name")]
    pub name: String,
    #[schemars(description = "Uniform number")]
    pub number: Option<String>,
    #[schemars(description = "Fielding position")]
    pub position: Option<String>,
    #[schemars(description = "Batting-order slot to insert at (1-based); appended when omitted")]
    pub batting_order: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BatterRequest {
    #[schemars(description = "Batting-order number (1-based)")]
    pub batter: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ArmAwardRequest {
    #[schemars(description = "Award: 'walk' or 'hbp'")]
    pub award: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InningRequest {
    #[schemars(description = "Inning number (1-based)")]
    pub inning: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SwitchTeamRequest {
    #[schemars(description = "Team side: 'away' or 'home'")]
    pub side: String,
}

fn elapsed_millis(started: Instant) -> Millis {
    Millis::try_from(started.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

fn internal_error(message: impl Into<String>) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message.into()),
        data: None,
    }
}

/// Scorer-facing errors are part of the conversation, not protocol failures.
fn text_result(result: Result<String, String>) -> Result<CallToolResult, McpError> {
    let text = result.unwrap_or_else(|e| format!("Error: {}", e));
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl ScorebookService {
    pub fn new(book: Scorebook<JsonFileStore>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            book: Arc::new(Mutex::new(book)),
            started: Instant::now(),
        }
    }

    fn book(&self) -> Result<MutexGuard<'_, Scorebook<JsonFileStore>>, McpError> {
        self.book
            .lock()
            .map_err(|_| internal_error("scorebook state is poisoned"))
    }

    fn now(&self) -> Millis {
        elapsed_millis(self.started)
    }

    #[tool(description = "Show the active team's scorecard")]
    async fn get_scorecard(&self) -> Result<CallToolResult, McpError> {
        let text = display_scorecard(&*self.book()?);
        text_result(Ok(text))
    }

    #[tool(description = "Show everything recorded for one plate appearance")]
    async fn get_plate_appearance(
        &self,
        Parameters(request): Parameters<PlateAppearanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(display_cell_details(&*self.book()?, request.batter, request.inning))
    }

    #[tool(description = "Show batting lines, runs by inning and totals")]
    async fn get_box_score(&self) -> Result<CallToolResult, McpError> {
        let text = display_box_score(&*self.book()?);
        text_result(Ok(text))
    }

    #[tool(description = "Add a player to the lineup")]
    async fn add_player(
        &self,
        Parameters(request): Parameters<AddPlayerRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_add_player(
            &mut *self.book()?,
            &request.name,
            request.number.as_deref().unwrap_or(""),
            request.position.as_deref().unwrap_or(""),
            request.batting_order,
        ))
    }

    #[tool(description = "Remove a player and their row from the lineup")]
    async fn remove_player(
        &self,
        Parameters(request): Parameters<BatterRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_remove_player(&mut *self.book()?, request.batter))
    }

    #[tool(description = "Record a pitch; the outcome updates from the count")]
    async fn record_pitch(
        &self,
        Parameters(request): Parameters<RecordPitchRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_pitch_action(
            &mut *self.book()?,
            request.batter,
            request.inning,
            &request.pitch,
        ))
    }

    #[tool(description = "Remove one pitch from a plate appearance")]
    async fn remove_pitch(
        &self,
        Parameters(request): Parameters<RemovePitchRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_remove_pitch(
            &mut *self.book()?,
            request.batter,
            request.inning,
            request.pitch_number,
        ))
    }

    #[tool(description = "Replace one pitch in a plate appearance")]
    async fn replace_pitch(
        &self,
        Parameters(request): Parameters<ReplacePitchRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_replace_pitch(
            &mut *self.book()?,
            request.batter,
            request.inning,
            request.pitch_number,
            &request.pitch,
        ))
    }

    #[tool(description = "Remove every pitch from a plate appearance")]
    async fn clear_pitches(
        &self,
        Parameters(request): Parameters<PlateAppearanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_clear_pitches(&mut *self.book()?, request.batter, request.inning))
    }

    #[tool(description = "Set the official outcome of a plate appearance")]
    async fn set_outcome(
        &self,
        Parameters(request): Parameters<SetOutcomeRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_outcome_action(
            &mut *self.book()?,
            request.batter,
            request.inning,
            &request.outcome,
        ))
    }

    #[tool(description = "Advance the runner one base, as a click on the diamond")]
    async fn advance_runner(
        &self,
        Parameters(request): Parameters<AdvanceRunnerRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = self.now();
        text_result(execute_advance_action(
            &mut *self.book()?,
            request.batter,
            request.inning,
            request.modifier.as_deref().unwrap_or(""),
            now,
        ))
    }

    #[tool(description = "Clear a runner's path and outcome")]
    async fn reset_path(
        &self,
        Parameters(request): Parameters<PlateAppearanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_reset_path(&mut *self.book()?, request.batter, request.inning))
    }

    #[tool(description = "Rewrite one segment of a runner's path")]
    async fn edit_segment(
        &self,
        Parameters(request): Parameters<EditSegmentRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_edit_segment(
            &mut *self.book()?,
            request.batter,
            request.inning,
            request.segment_number,
            request.from,
            request.to,
            &request.kind,
            request.caused_by,
        ))
    }

    #[tool(description = "Attach a note to one segment of a runner's path")]
    async fn set_segment_note(
        &self,
        Parameters(request): Parameters<SegmentNoteRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_set_segment_note(
            &mut *self.book()?,
            request.batter,
            request.inning,
            request.segment_number,
            &request.note,
        ))
    }

    #[tool(description = "Clear a plate appearance back to blank")]
    async fn reset_plate_appearance(
        &self,
        Parameters(request): Parameters<PlateAppearanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_reset_cell(&mut *self.book()?, request.batter, request.inning))
    }

    #[tool(description = "Write notes on a plate appearance")]
    async fn set_notes(
        &self,
        Parameters(request): Parameters<SetNotesRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_set_notes(
            &mut *self.book()?,
            request.batter,
            request.inning,
            &request.notes,
        ))
    }

    #[tool(description = "Credit the next runner advance to a batter (expires after a few seconds)")]
    async fn arm_batter(
        &self,
        Parameters(request): Parameters<BatterRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = self.now();
        text_result(execute_arm_batter(&mut *self.book()?, request.batter, now))
    }

    #[tool(description = "Make the next runner advance a walk or HBP award")]
    async fn arm_award(
        &self,
        Parameters(request): Parameters<ArmAwardRequest>,
    ) -> Result<CallToolResult, McpError> {
        let now = self.now();
        text_result(execute_arm_award(&mut *self.book()?, &request.award, now))
    }

    #[tool(description = "Cancel any armed batter or award")]
    async fn cancel_arming(&self) -> Result<CallToolResult, McpError> {
        let text = execute_cancel_arming(&mut *self.book()?);
        text_result(Ok(text))
    }

    #[tool(description = "Record an out for a plate appearance")]
    async fn record_out(
        &self,
        Parameters(request): Parameters<PlateAppearanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_record_out(&mut *self.book()?, request.batter, request.inning))
    }

    #[tool(description = "Clear every out in an inning")]
    async fn reset_inning_outs(
        &self,
        Parameters(request): Parameters<InningRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_reset_inning(&mut *self.book()?, request.inning))
    }

    #[tool(description = "Clear outs from a batter down to the end of the lineup in one inning")]
    async fn reset_outs_from(
        &self,
        Parameters(request): Parameters<PlateAppearanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_reset_outs_from(&mut *self.book()?, request.batter, request.inning))
    }

    #[tool(description = "Save the active team and switch to the other side")]
    async fn switch_team(
        &self,
        Parameters(request): Parameters<SwitchTeamRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(execute_switch_team(&mut *self.book()?, &request.side))
    }

    #[tool(description = "Save the active team's scorecard")]
    async fn save(&self) -> Result<CallToolResult, McpError> {
        text_result(execute_save(&mut *self.book()?))
    }

    #[tool(description = "Export the active scorecard as JSON")]
    async fn export_scorecard(&self) -> Result<CallToolResult, McpError> {
        text_result(export_scorecard_json(&*self.book()?))
    }
}

impl ScorebookService {
    /// Expire armed tags on a fixed interval for the life of the server.
    fn spawn_arming_poll(&self, period: Duration) {
        let book = Arc::clone(&self.book);
        let started = self.started;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let now = elapsed_millis(started);
                match book.lock() {
                    Ok(mut guard) => {
                        if execute_arming_poll(&mut *guard, now) {
                            log::debug!("armed tags expired at {} ms", now);
                        }
                    }
                    Err(_) => {
                        log::error!("scorebook state is poisoned; stopping arming poll");
                        break;
                    }
                }
            }
        });
    }
}

#[tool_handler]
impl ServerHandler for ScorebookService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ScorebookConfig::load_or_default(&config_path)?;
    let poll_period = config.arming_poll_interval();
    let store = JsonFileStore::new(config.data_dir.clone());
    let book = Scorebook::open(store, config, TeamSide::Away)?;

    log::info!("Scorebook MCP server starting");
    let service = ScorebookService::new(book);
    service.spawn_arming_poll(poll_period);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    log::info!("Server running, waiting for shutdown");
    let quit_reason = server.waiting().await?;

    log::info!("Scorebook MCP server exiting: {:?}", quit_reason);
    Ok(())
}
