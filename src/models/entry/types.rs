use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A submission of work performed at one construction stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Assigned at creation, immutable.
    pub id: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    pub stage_code: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters_end: Option<f64>,
    /// Progress quantity, must be >= 0.
    #[serde(default)]
    pub meters_done: f64,
    #[serde(default)]
    pub photos: Vec<WorkPhoto>,
    /// Named numeric readings taken during the work.
    #[serde(default)]
    pub measurements: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_location: Option<GpsCoordinate>,
    /// Snapshot used for weather restriction checks, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_conditions: Option<WeatherSnapshot>,
    /// Names of quality checks the worker recorded as performed.
    #[serde(default)]
    pub quality_checks: Vec<String>,
    #[serde(default)]
    pub material_used: Vec<MaterialUsage>,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: WorkEntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Permanent audit signal: set on the first rejection and retained
    /// through resubmission and later approval.
    #[serde(default)]
    pub was_rejected_before: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Approval state of a work entry.
///
/// State machine transitions:
/// - `Pending` -> `Approved` (approve)
/// - `Pending` -> `Rejected` (reject, requires a reason)
/// - `Rejected` -> `Pending` (resubmit; `was_rejected_before` is retained)
/// - `Approved` is a terminal state
///
/// Resubmission is not a persisted state of its own: a resubmitted entry
/// is a pending entry that carries `was_rejected_before = true`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkEntryStatus {
    /// Awaiting review by an approver.
    #[serde(rename = "pending", alias = "submitted")]
    Pending,

    /// Accepted by an approver; terminal.
    #[serde(rename = "approved")]
    Approved,

    /// Sent back by an approver with a reason; may be resubmitted.
    #[serde(rename = "rejected")]
    Rejected,
}

impl std::fmt::Display for WorkEntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkEntryStatus::Pending => "pending",
            WorkEntryStatus::Approved => "approved",
            WorkEntryStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// Approval-state operation attempted on a work entry, used in
/// transition error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Approve,
    Reject,
    Resubmit,
}

impl std::fmt::Display for EntryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntryAction::Approve => "approve",
            EntryAction::Reject => "reject",
            EntryAction::Resubmit => "resubmit",
        };
        write!(f, "{s}")
    }
}

/// Photo attached to a work entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPhoto {
    pub id: String,
    pub kind: PhotoKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsCoordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    Before,
    During,
    After,
    Quality,
    Safety,
    Issue,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters, if the device reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Weather readings at the time of work, as reported by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Celsius.
    pub temperature: f64,
    /// Percent relative humidity.
    pub humidity: f64,
    /// km/h.
    pub wind_speed: f64,
    /// mm/h.
    pub precipitation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Material consumed during the work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub material_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_name: Option<String>,
    pub quantity_used: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
