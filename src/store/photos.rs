//! Directory-backed photo/evidence storage
//!
//! Stored photos live under `<root>/photos/<entry-id>/` with fresh uuid
//! file names; attachment metadata is appended to an `index.json` next
//! to the files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::{AttachMetadata, PhotoStorage, StoredPhotoRef};
use crate::validation::validate_id;

use super::locking::{locked_read, locked_write};

/// Index record for one stored photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub file_name: String,
    pub original_name: String,
    pub stage: String,
    pub issue_type: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub attached_at: DateTime<Utc>,
}

pub struct FsPhotoStorage {
    root: PathBuf,
}

impl FsPhotoStorage {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_dir(&self, entry_id: &str) -> Result<PathBuf> {
        validate_id(entry_id)?;
        Ok(self.root.join("photos").join(entry_id))
    }

    /// Index records for an entry's stored photos.
    pub fn index(&self, entry_id: &str) -> Result<Vec<PhotoRecord>> {
        let index_path = self.entry_dir(entry_id)?.join("index.json");
        if !index_path.exists() {
            return Ok(Vec::new());
        }
        let content = locked_read(&index_path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse photo index: {}", index_path.display()))
    }

    fn append_records(&self, entry_id: &str, records: &[PhotoRecord]) -> Result<()> {
        let index_path = self.entry_dir(entry_id)?.join("index.json");
        let mut all = self.index(entry_id)?;
        all.extend_from_slice(records);
        let content =
            serde_json::to_string_pretty(&all).context("Failed to serialize photo index")?;
        locked_write(&index_path, &content)
    }
}

impl PhotoStorage for FsPhotoStorage {
    fn attach(
        &self,
        entry_id: &str,
        files: &[PathBuf],
        metadata: &AttachMetadata,
    ) -> Result<Vec<StoredPhotoRef>> {
        let dir = self.entry_dir(entry_id)?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create photo directory: {}", dir.display()))?;

        let mut stored = Vec::new();
        let mut records = Vec::new();

        for file in files {
            let id = Uuid::new_v4().to_string();
            let file_name = match file.extension().and_then(|e| e.to_str()) {
                Some(ext) => format!("{id}.{ext}"),
                None => id.clone(),
            };
            let target = dir.join(&file_name);
            fs::copy(file, &target).with_context(|| {
                format!(
                    "Failed to copy photo {} -> {}",
                    file.display(),
                    target.display()
                )
            })?;

            records.push(PhotoRecord {
                id: id.clone(),
                file_name,
                original_name: file_name_of(file),
                stage: metadata.stage.clone(),
                issue_type: metadata.issue_type.clone(),
                caption: metadata.description.clone(),
                attached_at: Utc::now(),
            });
            stored.push(StoredPhotoRef { id, path: target });
        }

        self.append_records(entry_id, &records)?;
        Ok(stored)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
