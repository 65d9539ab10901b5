use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use super::values::WorkLogValues;

/// Snapshot of unsaved work-log input, restorable on the next modal open.
pub type DraftRecord = WorkLogValues;

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Cannot determine data directory for drafts")]
    NoDataDir,
    #[error("Draft I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Draft {key} is not valid JSON: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode draft: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage key of the draft belonging to `issue_id`.
pub fn draft_key(issue_id: u64) -> String {
    format!("work_log_draft_{issue_id}")
}

/// Persistent key/value storage for drafts, one record per issue.
pub trait DraftStore {
    fn load(&self, issue_id: u64) -> Result<Option<DraftRecord>, DraftError>;
    /// Overwrites any previous record for the issue.
    fn save(&self, issue_id: u64, draft: &DraftRecord) -> Result<(), DraftError>;
    /// Returns whether a record existed.
    fn clear(&self, issue_id: u64) -> Result<bool, DraftError>;
}

fn decode(key: &str, raw: &str) -> Result<DraftRecord, DraftError> {
    serde_json::from_str(raw).map_err(|source| DraftError::Decode {
        key: key.to_string(),
        source,
    })
}

/// One JSON file per issue under a drafts directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    root: PathBuf,
}

impl FileDraftStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Drafts directory inside the user's local data directory.
    pub fn in_data_dir() -> Result<Self, DraftError> {
        let root = dirs::data_local_dir()
            .ok_or(DraftError::NoDataDir)?
            .join("worklog-tui")
            .join("drafts");
        Ok(Self::new(root))
    }

    pub fn path_for(&self, issue_id: u64) -> PathBuf {
        self.root.join(format!("{}.json", draft_key(issue_id)))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DraftError + '_ {
    move |source| DraftError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn secure_write(path: &Path, content: &str) -> Result<(), DraftError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .and_then(|mut file| file.write_all(content.as_bytes()))
            .map_err(io_error(path))?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content).map_err(io_error(path))?;
    }

    Ok(())
}

impl DraftStore for FileDraftStore {
    fn load(&self, issue_id: u64) -> Result<Option<DraftRecord>, DraftError> {
        let path = self.path_for(issue_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        decode(&draft_key(issue_id), &raw).map(Some)
    }

    fn save(&self, issue_id: u64, draft: &DraftRecord) -> Result<(), DraftError> {
        let raw = serde_json::to_string(draft)?;
        secure_write(&self.path_for(issue_id), &raw)
    }

    fn clear(&self, issue_id: u64) -> Result<bool, DraftError> {
        let path = self.path_for(issue_id);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path).map_err(io_error(&path))?;
        Ok(true)
    }
}

/// Process-local store, used by dev mode and tests. Holds the encoded JSON so
/// it exercises the same codec as the file store.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under the issue key, bypassing the encoder.
    #[cfg(test)]
    pub fn insert_raw(&self, issue_id: u64, raw: &str) {
        self.lock().insert(draft_key(issue_id), raw.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, issue_id: u64) -> Result<Option<DraftRecord>, DraftError> {
        let key = draft_key(issue_id);
        match self.lock().get(&key) {
            Some(raw) => decode(&key, raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, issue_id: u64, draft: &DraftRecord) -> Result<(), DraftError> {
        let raw = serde_json::to_string(draft)?;
        self.lock().insert(draft_key(issue_id), raw);
        Ok(())
    }

    fn clear(&self, issue_id: u64) -> Result<bool, DraftError> {
        Ok(self.lock().remove(&draft_key(issue_id)).is_some())
    }
}
