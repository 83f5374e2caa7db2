//! In-memory work entry store for tests and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::entry::{WorkEntry, WorkEntryStatus};

use super::{StoreError, WorkEntryStore};

#[derive(Default)]
pub struct MemoryEntryStore {
    entries: Mutex<HashMap<String, WorkEntry>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkEntryStore for MemoryEntryStore {
    fn load(&self, id: &str) -> Result<WorkEntry, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn insert(&self, entry: &WorkEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.contains_key(&entry.id) {
            return Err(StoreError::AlreadyExists {
                id: entry.id.clone(),
            });
        }
        entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    fn update(
        &self,
        entry: &WorkEntry,
        expected_status: WorkEntryStatus,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let stored = entries
            .get_mut(&entry.id)
            .ok_or_else(|| StoreError::NotFound {
                id: entry.id.clone(),
            })?;
        if stored.status != expected_status {
            return Err(StoreError::StatusMismatch {
                id: entry.id.clone(),
                expected: expected_status,
                found: stored.status,
            });
        }
        *stored = entry.clone();
        Ok(())
    }

    fn list(&self) -> Result<Vec<WorkEntry>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.values().cloned().collect())
    }
}
