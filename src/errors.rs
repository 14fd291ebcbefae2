use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the scoring engine.
///
/// None of these are fatal: every failing operation leaves the scorebook
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum ScorebookError {
    /// No cell at the requested batter row / inning column
    #[error("no cell at batter row {row}, inning column {inning}")]
    CellOutOfRange { row: usize, inning: usize },
    /// Inning column outside the grid
    #[error("inning column {0} is outside the scorecard")]
    InningOutOfRange(usize),
    /// Batter row outside the lineup
    #[error("batter row {0} is outside the lineup")]
    RowOutOfRange(usize),
    /// Pitch index outside the cell's sequence
    #[error("pitch {index} does not exist (sequence has {len} pitches)")]
    PitchOutOfRange { index: usize, len: usize },
    /// Segment index outside the cell's run path
    #[error("run segment {index} does not exist (path has {len} segments)")]
    SegmentOutOfRange { index: usize, len: usize },
    /// Edit targeted a plate appearance after the inning's third out
    #[error("inning {} is over at batter row {row}; the cell is read-only", .inning + 1)]
    InningClosed { row: usize, inning: usize },
    /// Persistence collaborator failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Configuration failure
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by a persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access '{key}' at '{path}': {source}")]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while loading a [`crate::config::ScorebookConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Failure reported by the external report generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("report generator unavailable: {0}")]
    Unavailable(String),
    #[error("report generation failed: {0}")]
    Failed(String),
}

/// Type alias for Results using ScorebookError
pub type ScorebookResult<T> = Result<T, ScorebookError>;

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
