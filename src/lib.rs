// In: src/lib.rs

//! Scorebook
//!
//! A pitch-by-pitch baseball scorekeeping engine. Each plate appearance
//! records its pitches, derives an official outcome, traces the runner's
//! path around the bases and rolls up into inning outs and batting lines.

// --- MODULE DECLARATIONS ---
pub mod cell;
pub mod config;
pub mod errors;
pub mod export;
pub mod grid;
pub mod mcp_interface;
pub mod normalize;
pub mod scorebook;
pub mod scoring;
pub mod store;
pub mod team;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{AwardType, Outcome, PitchMark, SegmentKind};

// --- From this crate's modules (`src/`) ---

// Core records and the scorecard.
pub use cell::{BattingOrder, Cell, RunSegment};
pub use grid::Grid;
pub use team::{Player, Team, TeamSide, TeamSnapshot};

// Scoring engine.
pub use scoring::arming::{Arming, Millis};
pub use scoring::commands::{execute_cell_command, CellCommand, CellContext, CellEffect, PathStep};
pub use scoring::count::{auto_outcome, ball_count, has_dead_ball, strike_count, Count};
pub use scoring::diamond::{ClickModifier, DiamondClick};
pub use scoring::stats::{BattingLine, BoxScore};

// Session, collaborators and configuration.
pub use config::ScorebookConfig;
pub use export::{ExportDocument, ReportGenerator, ReportRequest};
pub use scorebook::Scorebook;
pub use store::{JsonFileStore, MemoryStore, Store};

// Crate-specific error and result types.
pub use errors::{
    ConfigError, ConfigResult, ReportError, ScorebookError, ScorebookResult, StoreError,
    StoreResult,
};
