//! Rejection-evidence contract with the external photo storage
//!
//! Evidence photos uploaded alongside a rejection are a convenience
//! linkage, not part of the state machine: attachment is best-effort and
//! a failure never rolls back the rejection itself.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Classification slot for rejection evidence photos.
pub const EVIDENCE_STAGE: &str = "issue";

/// Issue type recorded on rejection evidence.
pub const EVIDENCE_ISSUE_TYPE: &str = "quality";

/// Maximum caption length carried over from the rejection reason.
pub const CAPTION_MAX_CHARS: usize = 120;

/// Metadata recorded with attached photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachMetadata {
    /// Photo classification (before/during/after/quality_check/issue).
    pub stage: String,
    /// Caption shown with the photos.
    #[serde(default)]
    pub description: Option<String>,
    pub issue_type: String,
}

impl AttachMetadata {
    /// Metadata for photos documenting a rejection, captioned with a
    /// truncated copy of the rejection reason.
    pub fn rejection_evidence(reason: &str) -> Self {
        Self {
            stage: EVIDENCE_STAGE.to_string(),
            description: Some(truncate_caption(reason)),
            issue_type: EVIDENCE_ISSUE_TYPE.to_string(),
        }
    }
}

/// Reference to a photo accepted by the storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPhotoRef {
    pub id: String,
    pub path: PathBuf,
}

/// External photo/evidence storage collaborator.
pub trait PhotoStorage {
    /// Store the given files against a work entry and return references
    /// to the stored photos.
    fn attach(
        &self,
        entry_id: &str,
        files: &[PathBuf],
        metadata: &AttachMetadata,
    ) -> Result<Vec<StoredPhotoRef>>;
}

/// Storage that accepts nothing; for callers without a photo backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhotoStorage;

impl PhotoStorage for NoPhotoStorage {
    fn attach(
        &self,
        _entry_id: &str,
        _files: &[PathBuf],
        _metadata: &AttachMetadata,
    ) -> Result<Vec<StoredPhotoRef>> {
        Ok(Vec::new())
    }
}

/// Truncate a caption to [`CAPTION_MAX_CHARS`] characters on a character
/// boundary.
pub fn truncate_caption(reason: &str) -> String {
    reason.chars().take(CAPTION_MAX_CHARS).collect()
}
