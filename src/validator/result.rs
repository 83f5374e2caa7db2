use serde::{Deserialize, Serialize};

/// Machine-readable codes for validation findings.
pub mod codes {
    pub const PHOTOS_INSUFFICIENT: &str = "PHOTOS_INSUFFICIENT";
    pub const PHOTOS_EXCESS: &str = "PHOTOS_EXCESS";
    pub const MEASUREMENT_MISSING: &str = "MEASUREMENT_MISSING";
    pub const GPS_REQUIRED: &str = "GPS_REQUIRED";
    pub const MATERIAL_MISSING: &str = "MATERIAL_MISSING";
    pub const WEATHER_RESTRICTION: &str = "WEATHER_RESTRICTION";
    pub const TIME_RESTRICTION: &str = "TIME_RESTRICTION";
    pub const QUALITY_CHECK_UNCONFIRMED: &str = "QUALITY_CHECK_UNCONFIRMED";
}

/// A blocking validation finding. Any single one is sufficient to block
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// A non-blocking finding, surfaced to a human reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub field: String,
    pub code: String,
    pub message: String,
    pub can_override: bool,
}

/// Outcome of validating a candidate work entry against a stage's
/// requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageValidationResult {
    /// True only with zero blocking errors.
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationWarning>,
    /// Equals `is_valid` in the base design. Kept as a separate field so
    /// a deployment can add policy that permits submission despite
    /// certain errors (supervisor override).
    pub can_submit: bool,
    /// Planning estimate from the stage, informational.
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
}

impl StageValidationResult {
    pub(super) fn new(
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationWarning>,
        estimated_duration_minutes: Option<u32>,
    ) -> Self {
        let is_valid = errors.is_empty();
        Self {
            is_valid,
            errors,
            warnings,
            can_submit: is_valid,
            estimated_duration_minutes,
        }
    }
}
