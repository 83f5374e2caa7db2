//! Error taxonomy for the work-stage workflow core.
//!
//! Validation and transition failures are returned as structured errors to
//! the immediate caller and are never logged-and-swallowed. The only
//! operation allowed to fail silently (with a logged warning) is the
//! rejection-evidence side channel in the lifecycle manager.

use thiserror::Error;

use crate::catalog::CatalogIssue;
use crate::models::entry::{EntryAction, WorkEntryStatus};
use crate::store::StoreError;
use crate::validator::ValidationIssue;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A stage code did not resolve to a catalog entry. Caller error
    /// (stale or malformed stage code), never retried automatically.
    #[error("stage not found: {code}")]
    StageNotFound { code: String },

    /// A work entry id did not resolve to a stored entry.
    #[error("work entry not found: {id}")]
    EntryNotFound { id: String },

    /// Structural defect in the static stage definitions. Fatal at
    /// catalog load, never surfaced per-request.
    #[error("invalid stage catalog ({} issue(s))", .0.len())]
    InvalidCatalog(Vec<CatalogIssue>),

    /// The candidate work entry does not meet its stage's requirements.
    /// Recoverable by the caller correcting the submission.
    #[error("work entry does not meet stage requirements ({} error(s))", .0.len())]
    ValidationFailed(Vec<ValidationIssue>),

    /// An approval-state transition was attempted from a state that
    /// forbids it. Surfaced verbatim so the caller can explain it
    /// ("already approved") instead of retrying.
    #[error("cannot {action} a work entry in '{current}' status")]
    InvalidTransition {
        action: EntryAction,
        current: WorkEntryStatus,
    },

    /// A rejection was attempted without a reason.
    #[error("rejection reason must not be empty")]
    EmptyRejectionReason,

    /// Persistence failure unrelated to transition preconditions.
    #[error(transparent)]
    Store(StoreError),
}
