//! Hand-off document for external report generation.

use crate::cell::Cell;
use crate::errors::ReportError;
use crate::team::{Player, Team};
use serde::{Deserialize, Serialize};

/// Plain structured view of one team's scorecard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub team_name: String,
    pub players: Vec<Player>,
    pub grid: Vec<Vec<Cell>>,
    /// 1-based inning labels, one per grid column.
    pub innings: Vec<u32>,
}

impl ExportDocument {
    pub fn from_team(team: &Team) -> Self {
        let innings = (1..=team.grid.innings())
            .map(|inning| u32::try_from(inning).unwrap_or(u32::MAX))
            .collect();
        Self {
            team_name: team.team_name.clone(),
            players: team.players.clone(),
            grid: team.grid.rows().to_vec(),
            innings,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Everything the report generator receives.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub document: ExportDocument,
    pub notes: String,
    /// Language code for the prose, e.g. `en` or `ja`.
    pub language: String,
}

/// External prose generator. Its output is opaque text.
pub trait ReportGenerator {
    fn generate(&self, request: &ReportRequest) -> Result<String, ReportError>;
}

/// Message shown to the scorer for a finished report request.
pub fn report_message(result: &Result<String, ReportError>) -> String {
    match result {
        Ok(report) => report.clone(),
        Err(err) => format!("Could not generate the game report: {}", err),
    }
}
