
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::types::{WorkEntry, WorkEntryStatus};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap()
}

pub(super) fn test_entry(status: WorkEntryStatus) -> WorkEntry {
    let now = fixed_now();
    WorkEntry {
        id: "entry-1".to_string(),
        project_id: "proj-1".to_string(),
        segment_id: None,
        house_id: None,
        stage_code: "stage_1_marking".to_string(),
        user_id: "worker-1".to_string(),
        team_id: None,
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        start_time: None,
        end_time: None,
        meters_start: None,
        meters_end: None,
        meters_done: 25.0,
        photos: Vec::new(),
        measurements: Default::default(),
        gps_location: None,
        weather_conditions: None,
        quality_checks: Vec::new(),
        material_used: Vec::new(),
        tools_used: Vec::new(),
        notes: None,
        status,
        approved_by: None,
        approved_at: None,
        rejected_by: None,
        rejected_at: None,
        rejection_reason: None,
        was_rejected_before: false,
        created_at: now,
        updated_at: now,
    }
}
