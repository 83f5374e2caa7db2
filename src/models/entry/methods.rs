use chrono::{DateTime, Utc};

use crate::error::WorkflowError;

use super::types::{EntryAction, WorkEntry, WorkEntryStatus};

impl WorkEntry {
    /// Approve a pending entry.
    ///
    /// Sets `approved_at`/`approved_by` and stamps `updated_at`. Allowed
    /// only from `Pending`; the entry is left untouched on failure.
    ///
    /// # Errors
    /// `InvalidTransition` if the entry is not pending.
    pub fn approve(&mut self, approver: &str, now: DateTime<Utc>) -> Result<(), WorkflowError> {
        self.ensure_transition(EntryAction::Approve, WorkEntryStatus::Approved)?;
        self.status = WorkEntryStatus::Approved;
        self.approved_by = Some(approver.to_string());
        self.approved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Reject a pending entry with a reason.
    ///
    /// Records the rejection payload and permanently sets
    /// `was_rejected_before`. Allowed only from `Pending`; the entry is
    /// left untouched on failure.
    ///
    /// # Errors
    /// `EmptyRejectionReason` if the trimmed reason is empty,
    /// `InvalidTransition` if the entry is not pending.
    pub fn reject(
        &mut self,
        approver: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::EmptyRejectionReason);
        }
        self.ensure_transition(EntryAction::Reject, WorkEntryStatus::Rejected)?;
        self.status = WorkEntryStatus::Rejected;
        self.rejected_by = Some(approver.to_string());
        self.rejected_at = Some(now);
        self.rejection_reason = Some(reason.trim().to_string());
        self.was_rejected_before = true;
        self.updated_at = now;
        Ok(())
    }

    /// Return a rejected entry to pending for another review round.
    ///
    /// Clears the rejection payload so the entry reads as freshly
    /// pending, but retains `was_rejected_before` forever - that flag is
    /// the audit signal a reviewer sees on a resubmitted entry.
    ///
    /// # Errors
    /// `InvalidTransition` if the entry is not rejected.
    pub fn resubmit(&mut self, now: DateTime<Utc>) -> Result<(), WorkflowError> {
        self.ensure_transition(EntryAction::Resubmit, WorkEntryStatus::Pending)?;
        self.status = WorkEntryStatus::Pending;
        self.rejected_by = None;
        self.rejected_at = None;
        self.rejection_reason = None;
        self.updated_at = now;
        Ok(())
    }

    fn ensure_transition(
        &self,
        action: EntryAction,
        target: WorkEntryStatus,
    ) -> Result<(), WorkflowError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                action,
                current: self.status,
            })
        }
    }
}
