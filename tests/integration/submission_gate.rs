//! Submission-time validation gate against the embedded catalog

use fiberwork::catalog::StageCatalog;
use fiberwork::store::{FileEntryStore, WorkEntryStore};
use fiberwork::validator;

use super::helpers::{fixed_now, marking_draft, photo, weather};

#[test]
fn test_complete_draft_passes_gate_and_persists_pending() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = StageCatalog::load().unwrap();

    let draft = marking_draft();
    draft.check().unwrap();

    let stage = catalog.get(&draft.stage_code).unwrap();
    let entry = draft.into_entry(fixed_now());
    let result = validator::validate(stage, &entry);
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    assert!(result.can_submit);
    assert!(result.warnings.is_empty());

    let store = FileEntryStore::open(temp.path()).unwrap();
    store.insert(&entry).unwrap();

    let stored = store.load(&entry.id).unwrap();
    assert_eq!(stored.status.to_string(), "pending");
    assert_eq!(stored.stage_code, "stage_1_marking");
    assert!(!stored.was_rejected_before);
}

#[test]
fn test_missing_photo_blocks_submission_and_persists_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = StageCatalog::load().unwrap();

    let mut draft = marking_draft();
    draft.photos = vec![photo(1)];

    let stage = catalog.get(&draft.stage_code).unwrap();
    let entry = draft.into_entry(fixed_now());
    let result = validator::validate(stage, &entry);

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, "PHOTOS_INSUFFICIENT");

    // Gate refused; the caller never persists the entry
    let store = FileEntryStore::open(temp.path()).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_second_photo_makes_the_same_draft_valid() {
    let catalog = StageCatalog::load().unwrap();

    let mut draft = marking_draft();
    draft.photos = vec![photo(1)];
    let stage = catalog.get(&draft.stage_code).unwrap();
    assert!(!validator::validate(stage, &draft.clone().into_entry(fixed_now())).is_valid);

    draft.photos.push(photo(2));
    assert!(validator::validate(stage, &draft.into_entry(fixed_now())).is_valid);
}

#[test]
fn test_heavy_rain_blocks_marking_work() {
    let catalog = StageCatalog::load().unwrap();

    let mut draft = marking_draft();
    draft.weather_conditions = Some(weather(7.0));

    let stage = catalog.get(&draft.stage_code).unwrap();
    let result = validator::validate(stage, &draft.into_entry(fixed_now()));

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, "WEATHER_RESTRICTION");
}

#[test]
fn test_light_rain_and_unreported_weather_pass() {
    let catalog = StageCatalog::load().unwrap();
    let stage = catalog.get("stage_1_marking").unwrap();

    let mut draft = marking_draft();
    draft.weather_conditions = Some(weather(3.0));
    assert!(validator::validate(stage, &draft.into_entry(fixed_now())).is_valid);

    let mut draft = marking_draft();
    draft.weather_conditions = None;
    assert!(validator::validate(stage, &draft.into_entry(fixed_now())).is_valid);
}

#[test]
fn test_skipped_quality_check_warns_without_blocking() {
    let catalog = StageCatalog::load().unwrap();
    let stage = catalog.get("stage_1_marking").unwrap();

    let mut draft = marking_draft();
    draft.quality_checks = vec!["route_clearance".to_string()];
    let result = validator::validate(stage, &draft.into_entry(fixed_now()));

    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, "QUALITY_CHECK_UNCONFIRMED");
    assert!(result.warnings[0].can_override);
}
