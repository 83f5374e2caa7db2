
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::catalog::{MaterialRequirement, Stage, StageRequirements};
use crate::models::entry::{
    GpsCoordinate, MaterialUsage, PhotoKind, WeatherSnapshot, WorkEntry, WorkEntryStatus,
    WorkPhoto,
};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
}

/// A stage with no requirements at all; tests tighten what they need.
pub(super) fn bare_stage(code: &str) -> Stage {
    let mut name = BTreeMap::new();
    name.insert("en".to_string(), "Test Stage".to_string());
    Stage {
        code: code.to_string(),
        name,
        description: BTreeMap::new(),
        requirements: StageRequirements::default(),
        next_stages: Vec::new(),
        estimated_duration_minutes: 30,
        required_tools: Vec::new(),
        safety_requirements: Vec::new(),
        quality_standards: Vec::new(),
        is_active: true,
    }
}

pub(super) fn required_material(code: &str) -> MaterialRequirement {
    MaterialRequirement {
        material_code: code.to_string(),
        material_name: None,
        quantity: 1.0,
        unit: "pieces".to_string(),
        is_optional: false,
    }
}

pub(super) fn optional_material(code: &str) -> MaterialRequirement {
    MaterialRequirement {
        is_optional: true,
        ..required_material(code)
    }
}

pub(super) fn used_material(code: &str, quantity: f64) -> MaterialUsage {
    MaterialUsage {
        material_code: code.to_string(),
        material_name: None,
        quantity_used: quantity,
        unit: "pieces".to_string(),
        lot_number: None,
        notes: None,
    }
}

pub(super) fn photo(n: u32) -> WorkPhoto {
    WorkPhoto {
        id: format!("photo-{n}"),
        kind: PhotoKind::During,
        timestamp: fixed_now(),
        gps: None,
        caption: None,
    }
}

pub(super) fn photos(count: u32) -> Vec<WorkPhoto> {
    (0..count).map(photo).collect()
}

pub(super) fn gps() -> GpsCoordinate {
    GpsCoordinate {
        latitude: 52.52,
        longitude: 13.405,
        altitude: None,
        accuracy: Some(4.0),
    }
}

pub(super) fn clear_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 18.0,
        humidity: 40.0,
        wind_speed: 8.0,
        precipitation: 0.0,
        conditions: Some("clear".to_string()),
        timestamp: Some(fixed_now()),
    }
}

/// A pending entry that satisfies no requirements; tests fill in fields.
pub(super) fn bare_entry(stage_code: &str) -> WorkEntry {
    let now = fixed_now();
    WorkEntry {
        id: "entry-1".to_string(),
        project_id: "proj-1".to_string(),
        segment_id: None,
        house_id: None,
        stage_code: stage_code.to_string(),
        user_id: "worker-1".to_string(),
        team_id: None,
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        start_time: None,
        end_time: None,
        meters_start: None,
        meters_end: None,
        meters_done: 10.0,
        photos: Vec::new(),
        measurements: BTreeMap::new(),
        gps_location: None,
        weather_conditions: None,
        quality_checks: Vec::new(),
        material_used: Vec::new(),
        tools_used: Vec::new(),
        notes: None,
        status: WorkEntryStatus::Pending,
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

/// Error codes present in a result, in reported order.
pub(super) fn error_codes(result: &crate::validator::StageValidationResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.code.as_str()).collect()
}
