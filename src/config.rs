//! Tunables for a scorebook session, loadable from a RON file.

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INNINGS: usize = 9;
pub const DEFAULT_LINEUP_SIZE: usize = 9;
pub const DEFAULT_MERGE_WINDOW_MS: u64 = 350;
pub const DEFAULT_ARMING_TTL_MS: u64 = 3_000;
pub const DEFAULT_ARMING_POLL_MS: u64 = 250;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScorebookConfig {
    /// Inning columns on a new scorecard. Fixed once the grid exists.
    pub innings: usize,
    /// Batter rows on a new scorecard before any lineup edits.
    pub lineup_size: usize,
    /// Repeated same-kind diamond clicks inside this window extend the last segment.
    pub merge_window_ms: u64,
    /// How long an armed batter or award tag stays valid.
    pub arming_ttl_ms: u64,
    /// Interval at which hosts should call `Scorebook::poll_arming`.
    pub arming_poll_ms: u64,
    /// Reject scoring edits on cells past the inning's third out.
    pub lock_after_third_out: bool,
    /// Directory used by the JSON file store.
    pub data_dir: PathBuf,
}

impl Default for ScorebookConfig {
    fn default() -> Self {
        Self {
            innings: DEFAULT_INNINGS,
            lineup_size: DEFAULT_LINEUP_SIZE,
            merge_window_ms: DEFAULT_MERGE_WINDOW_MS,
            arming_ttl_ms: DEFAULT_ARMING_TTL_MS,
            arming_poll_ms: DEFAULT_ARMING_POLL_MS,
            lock_after_third_out: true,
            data_dir: PathBuf::from("scorebook_data"),
        }
    }
}

impl ScorebookConfig {
    /// Parse a config from RON source. Absent fields keep their defaults.
    pub fn from_ron(source: &str, path: &Path) -> ConfigResult<Self> {
        ron::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config from a RON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content, path)
    }

    /// Period for the host's arming expiry poll, never shorter than 1 ms.
    pub fn arming_poll_interval(&self) -> Duration {
        Duration::from_millis(self.arming_poll_ms.max(1))
    }

    /// Load a config from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            log::info!(
                "no config at {}, using default scorebook settings",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
