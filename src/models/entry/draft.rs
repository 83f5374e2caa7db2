use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WorkflowError;
use crate::validator::ValidationIssue;

use super::types::{
    GpsCoordinate, MaterialUsage, WeatherSnapshot, WorkEntry, WorkEntryStatus, WorkPhoto,
};

/// Submission payload for a new work entry, before an id and lifecycle
/// timestamps are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntryDraft {
    pub project_id: String,
    #[serde(default)]
    pub segment_id: Option<String>,
    #[serde(default)]
    pub house_id: Option<String>,
    pub stage_code: String,
    pub user_id: String,
    #[serde(default)]
    pub team_id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meters_start: Option<f64>,
    #[serde(default)]
    pub meters_end: Option<f64>,
    #[serde(default)]
    pub meters_done: f64,
    #[serde(default)]
    pub photos: Vec<WorkPhoto>,
    #[serde(default)]
    pub measurements: BTreeMap<String, f64>,
    #[serde(default)]
    pub gps_location: Option<GpsCoordinate>,
    #[serde(default)]
    pub weather_conditions: Option<WeatherSnapshot>,
    #[serde(default)]
    pub quality_checks: Vec<String>,
    #[serde(default)]
    pub material_used: Vec<MaterialUsage>,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkEntryDraft {
    /// Basic payload checks independent of any stage's requirements.
    ///
    /// # Errors
    /// `ValidationFailed` listing every defective field.
    pub fn check(&self) -> Result<(), WorkflowError> {
        let mut issues = Vec::new();

        if !self.meters_done.is_finite() || self.meters_done < 0.0 {
            issues.push(ValidationIssue {
                field: "meters_done".to_string(),
                code: "METERS_INVALID".to_string(),
                message: "meters_done must be a number >= 0".to_string(),
            });
        }

        if let (Some(start), Some(end)) = (self.meters_start, self.meters_end) {
            if end < start {
                issues.push(ValidationIssue {
                    field: "meters_end".to_string(),
                    code: "METERS_INVALID".to_string(),
                    message: "meters_end must not be less than meters_start".to_string(),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::ValidationFailed(issues))
        }
    }

    /// Convert the draft into a pending work entry with a fresh id and
    /// lifecycle timestamps.
    pub fn into_entry(self, now: DateTime<Utc>) -> WorkEntry {
        WorkEntry {
            id: Uuid::new_v4().to_string(),
            project_id: self.project_id,
            segment_id: self.segment_id,
            house_id: self.house_id,
            stage_code: self.stage_code,
            user_id: self.user_id,
            team_id: self.team_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            meters_start: self.meters_start,
            meters_end: self.meters_end,
            meters_done: self.meters_done,
            photos: self.photos,
            measurements: self.measurements,
            gps_location: self.gps_location,
            weather_conditions: self.weather_conditions,
            quality_checks: self.quality_checks,
            material_used: self.material_used,
            tools_used: self.tools_used,
            notes: self.notes,
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
}
