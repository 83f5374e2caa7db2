//! Work entry persistence
//!
//! The lifecycle core defines transition logic and its precondition; the
//! store provides the actual mutual exclusion via a conditional update
//! that only writes when the persisted status still matches the expected
//! pre-transition status.

mod file;
pub mod locking;
mod memory;
mod photos;

pub use file::FileEntryStore;
pub use memory::MemoryEntryStore;
pub use photos::{FsPhotoStorage, PhotoRecord};

use thiserror::Error;

use crate::models::entry::{WorkEntry, WorkEntryStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("work entry not found: {id}")]
    NotFound { id: String },

    #[error("work entry already exists: {id}")]
    AlreadyExists { id: String },

    /// The conditional update found a different status than expected;
    /// a concurrent transition won the race.
    #[error("work entry {id} is in '{found}' status, expected '{expected}'")]
    StatusMismatch {
        id: String,
        expected: WorkEntryStatus,
        found: WorkEntryStatus,
    },

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Persistence collaborator for work entries.
pub trait WorkEntryStore {
    fn load(&self, id: &str) -> Result<WorkEntry, StoreError>;

    /// Persist a newly created entry. Fails if the id already exists.
    fn insert(&self, entry: &WorkEntry) -> Result<(), StoreError>;

    /// Persist a transitioned entry, but only if the stored entry's
    /// status still equals `expected_status`. The check and the write
    /// are atomic with respect to other store users.
    fn update(&self, entry: &WorkEntry, expected_status: WorkEntryStatus)
        -> Result<(), StoreError>;

    /// All stored entries, in unspecified order.
    fn list(&self) -> Result<Vec<WorkEntry>, StoreError>;
}
