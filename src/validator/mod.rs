//! Stage requirement validator
//!
//! A pure function from (stage, candidate work entry) to a validation
//! result. No side effects, no I/O: it only reads the two inputs, and the
//! caller is responsible for supplying weather data and any other live
//! context on the entry. All violations are collected; check order only
//! determines which error a caller surfaces first when it shows a single
//! message.

mod result;
mod time;
mod weather;

#[cfg(test)]
mod tests;

pub use result::{codes, StageValidationResult, ValidationIssue, ValidationWarning};
pub use weather::EQUALS_EPSILON;

use crate::catalog::Stage;
use crate::models::entry::WorkEntry;

/// Validate a candidate work entry against a stage's requirements.
pub fn validate(stage: &Stage, entry: &WorkEntry) -> StageValidationResult {
    let req = &stage.requirements;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Photo count
    let photo_count = entry.photos.len() as u32;
    if photo_count < req.min_photos {
        errors.push(ValidationIssue {
            field: "photos".to_string(),
            code: codes::PHOTOS_INSUFFICIENT.to_string(),
            message: format!(
                "Minimum {} photo(s) required, {photo_count} provided",
                req.min_photos
            ),
        });
    }
    if let Some(max) = req.max_photos {
        if photo_count > max {
            errors.push(ValidationIssue {
                field: "photos".to_string(),
                code: codes::PHOTOS_EXCESS.to_string(),
                message: format!("At most {max} photo(s) accepted, {photo_count} provided"),
            });
        }
    }

    // Required measurements: present and finite. Zero is a valid reading.
    for name in &req.required_measurements {
        let present = entry
            .measurements
            .get(name)
            .map(|v| v.is_finite())
            .unwrap_or(false);
        if !present {
            errors.push(ValidationIssue {
                field: "measurements".to_string(),
                code: codes::MEASUREMENT_MISSING.to_string(),
                message: format!("Measurement '{name}' is required"),
            });
        }
    }

    // GPS
    if req.required_gps && entry.gps_location.is_none() {
        errors.push(ValidationIssue {
            field: "gps".to_string(),
            code: codes::GPS_REQUIRED.to_string(),
            message: "GPS location is required for this stage".to_string(),
        });
    }

    // Non-optional materials must appear with quantity > 0. Optional
    // materials absent from the entry are silently acceptable.
    for material in req.material_usage.iter().filter(|m| !m.is_optional) {
        let consumed = entry
            .material_used
            .iter()
            .any(|used| used.material_code == material.material_code && used.quantity_used > 0.0);
        if !consumed {
            errors.push(ValidationIssue {
                field: "material_used".to_string(),
                code: codes::MATERIAL_MISSING.to_string(),
                message: format!(
                    "Material '{}' must be recorded with a quantity above zero",
                    material.material_code
                ),
            });
        }
    }

    // Weather restrictions: only evaluable when the entry carries a
    // snapshot. A missing snapshot is not itself penalized.
    if let Some(snapshot) = &entry.weather_conditions {
        for restriction in &req.weather_restrictions {
            let Some(reading) = weather::condition_reading(snapshot, restriction.condition) else {
                continue;
            };
            if weather::is_violated(reading, restriction) {
                errors.push(ValidationIssue {
                    field: "weather".to_string(),
                    code: codes::WEATHER_RESTRICTION.to_string(),
                    message: format!(
                        "{} ({}: {reading}{} {} {})",
                        restriction.reason,
                        restriction.condition,
                        restriction.unit,
                        restriction.operator,
                        restriction.value
                    ),
                });
            }
        }
    }

    // Time-of-day restrictions, evaluable only with a start time
    if let Some(start) = entry.start_time {
        for restriction in &req.time_of_day_restrictions {
            if time::is_within_window(start, restriction) {
                errors.push(ValidationIssue {
                    field: "start_time".to_string(),
                    code: codes::TIME_RESTRICTION.to_string(),
                    message: format!(
                        "{} (restricted {}-{})",
                        restriction.reason,
                        restriction.start_time.format("%H:%M"),
                        restriction.end_time.format("%H:%M")
                    ),
                });
            }
        }
    }

    // Expected quality checks not recorded as performed are surfaced to
    // the reviewer, never blocking.
    for check in &req.quality_checks {
        if !entry.quality_checks.contains(check) {
            warnings.push(ValidationWarning {
                field: "quality_checks".to_string(),
                code: codes::QUALITY_CHECK_UNCONFIRMED.to_string(),
                message: format!("Quality check '{check}' not recorded as performed"),
                can_override: true,
            });
        }
    }

    StageValidationResult::new(errors, warnings, Some(stage.estimated_duration_minutes))
}
