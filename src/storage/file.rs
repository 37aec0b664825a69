//! File-backed store: the whole key space lives in one JSON document.

use crate::storage::kv::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Structure of the state file on disk.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct StateFile {
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Persists every write to `path` before returning.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<StateFile>,
}

impl JsonFileStore {
    /// Opens (or lazily creates) the state file. A missing, unreadable or
    /// malformed file starts an empty store instead of failing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = if path.exists() {
            match Self::load_from_file(&path) {
                Ok(state) => {
                    info!(
                        path = %path.display(),
                        keys = state.entries.len(),
                        "JsonFileStore: loaded state file"
                    );
                    state
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "JsonFileStore: failed to load state file, starting empty"
                    );
                    StateFile::default()
                }
            }
        } else {
            info!(path = %path.display(), "JsonFileStore: no state file yet, starting empty");
            StateFile::default()
        };

        Self {
            path,
            state: Mutex::new(state),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last successful write, if any write ever happened.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.state().updated_at
    }

    /// Re-reads the file, picking up writes made by another process.
    pub fn refresh(&self) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        let fresh = Self::load_from_file(&self.path)?;
        *self.state() = fresh;
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, StateFile> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load_from_file(path: &Path) -> Result<StateFile, StorageError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes through a sibling temp file so a crash never leaves half a document.
    fn save_to_file(path: &Path, state: &StateFile) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(state)?;
        let tmp = path.with_extension("json.tmp");
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
        let mut state = self.state();
        f(&mut state.entries);
        state.updated_at = Some(Utc::now());
        Self::save_to_file(&self.path, &state)?;
        debug!(path = %self.path.display(), "JsonFileStore: state file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.state().entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn ping(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::File::open(&self.path)?;
        }
        Ok(())
    }
}
