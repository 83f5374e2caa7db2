//! Shared fixtures for integration tests

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fiberwork::models::entry::{
    GpsCoordinate, MaterialUsage, PhotoKind, WeatherSnapshot, WorkEntryDraft, WorkPhoto,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
}

pub fn photo(n: u32) -> WorkPhoto {
    WorkPhoto {
        id: format!("photo-{n}"),
        kind: PhotoKind::During,
        timestamp: fixed_now(),
        gps: None,
        caption: None,
    }
}

fn material(code: &str, quantity: f64, unit: &str) -> MaterialUsage {
    MaterialUsage {
        material_code: code.to_string(),
        material_name: None,
        quantity_used: quantity,
        unit: unit.to_string(),
        lot_number: None,
        notes: None,
    }
}

/// A draft that satisfies every requirement of `stage_1_marking`:
/// two photos, both measurements, a GPS fix, and both marking materials.
pub fn marking_draft() -> WorkEntryDraft {
    let mut measurements = BTreeMap::new();
    measurements.insert("length".to_string(), 120.5);
    measurements.insert("width".to_string(), 0.4);

    WorkEntryDraft {
        project_id: "proj-42".to_string(),
        segment_id: Some("seg-7".to_string()),
        house_id: None,
        stage_code: "stage_1_marking".to_string(),
        user_id: "worker-3".to_string(),
        team_id: Some("team-north".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        start_time: Some(fixed_now()),
        end_time: None,
        meters_start: Some(0.0),
        meters_end: Some(120.0),
        meters_done: 120.0,
        photos: vec![photo(1), photo(2)],
        measurements,
        gps_location: Some(GpsCoordinate {
            latitude: 52.52,
            longitude: 13.405,
            altitude: None,
            accuracy: Some(3.5),
        }),
        weather_conditions: None,
        quality_checks: vec![
            "route_clearance".to_string(),
            "utility_conflicts".to_string(),
        ],
        material_used: vec![
            material("marking_spray", 1.0, "bottle"),
            material("marking_flags", 12.0, "pieces"),
        ],
        tools_used: vec!["measuring_tape".to_string(), "gps_device".to_string()],
        notes: None,
    }
}

pub fn weather(precipitation: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 16.0,
        humidity: 55.0,
        wind_speed: 10.0,
        precipitation,
        conditions: None,
        timestamp: Some(fixed_now()),
    }
}
