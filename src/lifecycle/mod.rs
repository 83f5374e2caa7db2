//! Work entry lifecycle manager
//!
//! Owns the approval state machine for submitted work entries: pending,
//! approved, rejected, and resubmission back to pending. The entry record
//! itself is owned by the persistence collaborator; concurrent transition
//! attempts on the same entry are serialized by the store's conditional
//! update, which only applies a write when the stored status still
//! matches the pre-transition status.

mod clock;
mod evidence;


pub use clock::{Clock, FixedClock, SystemClock};
pub use evidence::{
    truncate_caption, AttachMetadata, NoPhotoStorage, PhotoStorage, StoredPhotoRef,
    CAPTION_MAX_CHARS, EVIDENCE_ISSUE_TYPE, EVIDENCE_STAGE,
};

use std::path::PathBuf;

use crate::error::WorkflowError;
use crate::models::entry::{EntryAction, WorkEntry, WorkEntryStatus};
use crate::store::{StoreError, WorkEntryStore};

/// Drives approval-state transitions against an injected store, clock,
/// and photo storage.
pub struct LifecycleManager<S, C, P> {
    store: S,
    clock: C,
    photos: P,
}

impl<S, C, P> LifecycleManager<S, C, P>
where
    S: WorkEntryStore,
    C: Clock,
    P: PhotoStorage,
{
    pub fn new(store: S, clock: C, photos: P) -> Self {
        Self {
            store,
            clock,
            photos,
        }
    }

    /// Approve a pending entry.
    ///
    /// # Errors
    /// `EntryNotFound` for an unknown id; `InvalidTransition` if the
    /// entry is not pending, including when a concurrent reviewer moved
    /// it first.
    pub fn approve(&self, entry_id: &str, approver: &str) -> Result<WorkEntry, WorkflowError> {
        let mut entry = self.load(entry_id)?;
        let expected = entry.status;
        entry.approve(approver, self.clock.now())?;
        self.persist(entry, expected, EntryAction::Approve)
    }

    /// Reject a pending entry with a reason, optionally attaching
    /// evidence photos documenting the problem.
    ///
    /// Evidence attachment is a best-effort side channel: a storage
    /// failure is logged and does not roll back the rejection.
    ///
    /// # Errors
    /// `EmptyRejectionReason` for a blank reason; `EntryNotFound` /
    /// `InvalidTransition` as for [`approve`](Self::approve).
    pub fn reject(
        &self,
        entry_id: &str,
        approver: &str,
        reason: &str,
        evidence: &[PathBuf],
    ) -> Result<WorkEntry, WorkflowError> {
        let mut entry = self.load(entry_id)?;
        let expected = entry.status;
        entry.reject(approver, reason, self.clock.now())?;
        let entry = self.persist(entry, expected, EntryAction::Reject)?;

        if !evidence.is_empty() {
            self.attach_evidence(&entry, reason, evidence);
        }

        Ok(entry)
    }

    /// Return a rejected entry to pending for another review round.
    ///
    /// # Errors
    /// `EntryNotFound` / `InvalidTransition` as for
    /// [`approve`](Self::approve).
    pub fn resubmit(&self, entry_id: &str) -> Result<WorkEntry, WorkflowError> {
        let mut entry = self.load(entry_id)?;
        let expected = entry.status;
        entry.resubmit(self.clock.now())?;
        self.persist(entry, expected, EntryAction::Resubmit)
    }

    fn load(&self, entry_id: &str) -> Result<WorkEntry, WorkflowError> {
        self.store.load(entry_id).map_err(|e| match e {
            StoreError::NotFound { id } => WorkflowError::EntryNotFound { id },
            other => WorkflowError::Store(other),
        })
    }

    fn persist(
        &self,
        entry: WorkEntry,
        expected: WorkEntryStatus,
        action: EntryAction,
    ) -> Result<WorkEntry, WorkflowError> {
        match self.store.update(&entry, expected) {
            Ok(()) => Ok(entry),
            Err(StoreError::NotFound { id }) => Err(WorkflowError::EntryNotFound { id }),
            // Lost the race against a concurrent transition: same caller
            // error as acting on stale state, reported with the status
            // that actually won.
            Err(StoreError::StatusMismatch { found, .. }) => Err(WorkflowError::InvalidTransition {
                action,
                current: found,
            }),
            Err(other) => Err(WorkflowError::Store(other)),
        }
    }

    fn attach_evidence(&self, entry: &WorkEntry, reason: &str, files: &[PathBuf]) {
        let metadata = AttachMetadata::rejection_evidence(reason);
        match self.photos.attach(&entry.id, files, &metadata) {
            Ok(stored) => {
                tracing::debug!(
                    entry_id = %entry.id,
                    count = stored.len(),
                    "attached rejection evidence"
                );
            }
            Err(e) => {
                tracing::warn!(
                    entry_id = %entry.id,
                    error = %e,
                    "failed to attach rejection evidence"
                );
            }
        }
    }
}
