//! Persistence collaborators for team snapshots.
//!
//! Stores deal in raw JSON values; turning a value of unknown shape into a
//! well-formed team is [`crate::normalize`]'s job.

use crate::errors::{StoreError, StoreResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait Store {
    /// Stored value for `key`, or `None` when nothing usable is stored.
    fn load(&self, key: &str) -> StoreResult<Option<Value>>;

    fn save(&mut self, key: &str, value: &Value) -> StoreResult<()>;

    fn load_or(&self, key: &str, fallback: Value) -> StoreResult<Value> {
        Ok(self.load(key)?.unwrap_or(fallback))
    }
}

/// Process-local store, used by tests and the tool server's scratch games.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// One pretty-printed `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    path,
                    source,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                log::warn!("ignoring unreadable snapshot {}: {}", path.display(), err);
                Ok(None)
            }
        }
    }

    fn save(&mut self, key: &str, value: &Value) -> StoreResult<()> {
        let path = self.path_for(key);
        let io_error = |source| StoreError::Io {
            key: key.to_string(),
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_error)?;
        let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        fs::write(&path, content).map_err(io_error)?;
        log::info!("saved {} to {}", key, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scorebook-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_fallback() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_or("team_home", json!({})).unwrap(), json!({}));

        store.save("team_home", &json!({"teamName": "Bears"})).unwrap();
        assert_eq!(
            store.load("team_home").unwrap(),
            Some(json!({"teamName": "Bears"}))
        );
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = scratch_dir("round-trip");
        let mut store = JsonFileStore::new(&dir);

        assert_eq!(store.load("team_away").unwrap(), None);
        store.save("team_away", &json!({"teamName": "Owls"})).unwrap();
        assert_eq!(
            store.load("team_away").unwrap(),
            Some(json!({"teamName": "Owls"}))
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_treats_garbage_as_missing() {
        let dir = scratch_dir("garbage");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("team_home.json"), "{ not json").unwrap();

        let store = JsonFileStore::new(&dir);
        assert_eq!(store.load("team_home").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }
}
