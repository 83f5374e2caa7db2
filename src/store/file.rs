//! JSON-file-backed work entry store
//!
//! One document per entry under `<root>/entries/`. Every access goes
//! through advisory locks; the conditional update holds the exclusive
//! lock across its read-check-write sequence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use crate::models::entry::{WorkEntry, WorkEntryStatus};
use crate::validation::validate_id;

use super::locking::{locked_read, locked_update, locked_write};
use super::{StoreError, WorkEntryStore};

pub struct FileEntryStore {
    root: PathBuf,
}

impl FileEntryStore {
    /// Open a store rooted at the given data directory, creating the
    /// entries directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let entries_dir = root.join("entries");
        fs::create_dir_all(&entries_dir).with_context(|| {
            format!(
                "Failed to create entries directory: {}",
                entries_dir.display()
            )
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        // Ids become file names; refuse anything path-unsafe
        validate_id(id).map_err(StoreError::Io)?;
        Ok(self.root.join("entries").join(format!("{id}.json")))
    }
}

impl WorkEntryStore for FileEntryStore {
    fn load(&self, id: &str) -> Result<WorkEntry, StoreError> {
        let path = self.entry_path(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        let content = locked_read(&path)?;
        let entry = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse work entry: {}", path.display()))?;
        Ok(entry)
    }

    fn insert(&self, entry: &WorkEntry) -> Result<(), StoreError> {
        let path = self.entry_path(&entry.id)?;
        if path.exists() {
            return Err(StoreError::AlreadyExists {
                id: entry.id.clone(),
            });
        }
        let content = serde_json::to_string_pretty(entry)
            .with_context(|| format!("Failed to serialize work entry: {}", entry.id))?;
        locked_write(&path, &content)?;
        Ok(())
    }

    fn update(
        &self,
        entry: &WorkEntry,
        expected_status: WorkEntryStatus,
    ) -> Result<(), StoreError> {
        let path = self.entry_path(&entry.id)?;
        if !path.exists() {
            return Err(StoreError::NotFound {
                id: entry.id.clone(),
            });
        }

        let replacement = serde_json::to_string_pretty(entry)
            .with_context(|| format!("Failed to serialize work entry: {}", entry.id))?;

        locked_update(&path, |current| {
            let stored: WorkEntry = serde_json::from_str(current).map_err(|e| {
                StoreError::Io(anyhow!(
                    "Failed to parse work entry {}: {e}",
                    path.display()
                ))
            })?;
            if stored.status != expected_status {
                return Err(StoreError::StatusMismatch {
                    id: entry.id.clone(),
                    expected: expected_status,
                    found: stored.status,
                });
            }
            Ok(Some(replacement))
        })?
    }

    fn list(&self) -> Result<Vec<WorkEntry>, StoreError> {
        let entries_dir = self.root.join("entries");
        let mut entries = Vec::new();

        let dir = fs::read_dir(&entries_dir).with_context(|| {
            format!("Failed to read entries directory: {}", entries_dir.display())
        })?;

        for item in dir {
            let item = item.map_err(|e| StoreError::Io(e.into()))?;
            let path = item.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match locked_read(&path).and_then(|content| {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse work entry: {}", path.display()))
            }) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable work entry");
                }
            }
        }

        Ok(entries)
    }
}
