//! Full approval lifecycle against the file-backed store

use std::path::Path;

use fiberwork::error::WorkflowError;
use fiberwork::lifecycle::{FixedClock, LifecycleManager, NoPhotoStorage};
use fiberwork::models::entry::{EntryAction, WorkEntryStatus};
use fiberwork::store::{FileEntryStore, FsPhotoStorage, WorkEntryStore};

use super::helpers::{fixed_now, marking_draft};

fn manager_at(
    root: &Path,
) -> LifecycleManager<FileEntryStore, FixedClock, FsPhotoStorage> {
    LifecycleManager::new(
        FileEntryStore::open(root).unwrap(),
        FixedClock(fixed_now()),
        FsPhotoStorage::open(root),
    )
}

fn submit_entry(root: &Path) -> String {
    let entry = marking_draft().into_entry(fixed_now());
    let store = FileEntryStore::open(root).unwrap();
    store.insert(&entry).unwrap();
    entry.id
}

#[test]
fn test_reject_resubmit_approve_cycle() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let id = submit_entry(root);
    let manager = manager_at(root);

    let evidence = root.join("crooked-markings.jpg");
    std::fs::write(&evidence, b"jpeg bytes").unwrap();

    // Reject with evidence
    let rejected = manager
        .reject(&id, "supervisor-1", "markings deviate from plan", &[evidence])
        .unwrap();
    assert_eq!(rejected.status, WorkEntryStatus::Rejected);
    assert_eq!(rejected.rejected_by.as_deref(), Some("supervisor-1"));
    assert!(rejected.was_rejected_before);

    // Evidence landed in photo storage with the rejection metadata
    let photos = FsPhotoStorage::open(root);
    let index = photos.index(&id).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].stage, "issue");
    assert_eq!(index[0].issue_type, "quality");
    assert_eq!(index[0].caption.as_deref(), Some("markings deviate from plan"));

    // Resubmit clears the rejection payload but keeps the audit flag
    let resubmitted = manager.resubmit(&id).unwrap();
    assert_eq!(resubmitted.status, WorkEntryStatus::Pending);
    assert!(resubmitted.rejection_reason.is_none());
    assert!(resubmitted.rejected_at.is_none());
    assert!(resubmitted.rejected_by.is_none());
    assert!(resubmitted.was_rejected_before);

    // Approve the resubmitted entry
    let approved = manager.approve(&id, "supervisor-2").unwrap();
    assert_eq!(approved.status, WorkEntryStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("supervisor-2"));
    assert_eq!(approved.approved_at, Some(fixed_now()));
    assert!(approved.was_rejected_before);

    // The store agrees with the returned record
    let store = FileEntryStore::open(root).unwrap();
    let stored = store.load(&id).unwrap();
    assert_eq!(stored.status, WorkEntryStatus::Approved);
    assert!(stored.was_rejected_before);
    assert!(stored.rejected_at.is_none());
}

#[test]
fn test_approval_is_terminal() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let id = submit_entry(root);
    let manager = manager_at(root);

    manager.approve(&id, "supervisor-1").unwrap();

    let result = manager.reject(&id, "supervisor-2", "second thoughts", &[]);
    match result {
        Err(WorkflowError::InvalidTransition { action, current }) => {
            assert_eq!(action, EntryAction::Reject);
            assert_eq!(current, WorkEntryStatus::Approved);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    // The approval record is untouched
    let store = FileEntryStore::open(root).unwrap();
    let stored = store.load(&id).unwrap();
    assert_eq!(stored.status, WorkEntryStatus::Approved);
    assert_eq!(stored.approved_by.as_deref(), Some("supervisor-1"));
}

#[test]
fn test_empty_reason_leaves_stored_entry_pending() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let id = submit_entry(root);
    let manager = manager_at(root);

    let result = manager.reject(&id, "supervisor-1", "  ", &[]);
    assert!(matches!(result, Err(WorkflowError::EmptyRejectionReason)));

    let store = FileEntryStore::open(root).unwrap();
    assert_eq!(store.load(&id).unwrap().status, WorkEntryStatus::Pending);
}

#[test]
fn test_two_managers_race_on_the_same_entry() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let id = submit_entry(root);

    // Two reviewers working against the same data directory
    let first = manager_at(root);
    let second = LifecycleManager::new(
        FileEntryStore::open(root).unwrap(),
        FixedClock(fixed_now()),
        NoPhotoStorage,
    );

    first.approve(&id, "supervisor-1").unwrap();

    // The second reviewer's transition finds the approval that won
    let result = second.reject(&id, "supervisor-2", "quality concerns", &[]);
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidTransition {
            action: EntryAction::Reject,
            current: WorkEntryStatus::Approved,
        })
    ));
}

#[test]
fn test_unknown_entry_id_is_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let manager = manager_at(temp.path());

    let result = manager.approve("entry-missing", "supervisor-1");
    assert!(matches!(
        result,
        Err(WorkflowError::EntryNotFound { id }) if id == "entry-missing"
    ));
}
