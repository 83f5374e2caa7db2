//! Stage catalog type definitions
//!
//! Stages are declarative data: they are deserialized once from the embedded
//! YAML table at startup and never mutated afterwards. Changing the catalog
//! is a deployment-time action, not a runtime operation.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Root structure of the embedded stage table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTable {
    pub version: u32,
    pub stages: Vec<Stage>,
}

/// A single construction stage with its completion requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Unique identifier, `stage_<n>_<name>` form.
    pub code: String,
    /// Display name per language code (en, de, ru, uz, tr).
    pub name: BTreeMap<String, String>,
    /// Display description per language code.
    pub description: BTreeMap<String, String>,
    pub requirements: StageRequirements,
    /// Stage codes reachable from this stage; empty = terminal stage.
    #[serde(default)]
    pub next_stages: Vec<String>,
    /// Planning estimate, informational only.
    pub estimated_duration_minutes: u32,
    /// Informational labels, not mechanically enforced.
    #[serde(default)]
    pub required_tools: Vec<String>,
    #[serde(default)]
    pub safety_requirements: Vec<String>,
    #[serde(default)]
    pub quality_standards: Vec<String>,
    /// Whether the stage may currently be selected for new entries.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Stage {
    /// Display name in the requested language, falling back to English
    /// and then to the stage code.
    pub fn display_name(&self, lang: &str) -> &str {
        self.name
            .get(lang)
            .or_else(|| self.name.get("en"))
            .map(String::as_str)
            .unwrap_or(&self.code)
    }

    /// Display description in the requested language, English fallback.
    pub fn display_description(&self, lang: &str) -> &str {
        self.description
            .get(lang)
            .or_else(|| self.description.get("en"))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// A terminal stage has no successors.
    pub fn is_terminal(&self) -> bool {
        self.next_stages.is_empty()
    }
}

/// Structured completion requirements checked at submission time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageRequirements {
    /// Inclusive lower bound on photo count.
    #[serde(default)]
    pub min_photos: u32,
    /// Inclusive upper bound on photo count; `None` = unbounded.
    #[serde(default)]
    pub max_photos: Option<u32>,
    /// Named numeric fields that must be present in a submitted entry.
    #[serde(default)]
    pub required_measurements: Vec<String>,
    /// Whether a GPS coordinate must be attached.
    #[serde(default)]
    pub required_gps: bool,
    /// Named checks expected to have been performed (presence-only).
    #[serde(default)]
    pub quality_checks: Vec<String>,
    #[serde(default)]
    pub material_usage: Vec<MaterialRequirement>,
    #[serde(default)]
    pub weather_restrictions: Vec<WeatherRestriction>,
    #[serde(default)]
    pub time_of_day_restrictions: Vec<TimeRestriction>,
}

/// Material expected to be consumed during a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub material_code: String,
    #[serde(default)]
    pub material_name: Option<String>,
    /// Nominal quantity for planning; consumption is checked for
    /// presence with quantity > 0, not for exact amounts.
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub is_optional: bool,
}

/// Weather condition under which a stage may not be performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRestriction {
    pub condition: WeatherCondition,
    pub operator: RestrictionOperator,
    pub value: f64,
    pub unit: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Rain,
    Snow,
    Wind,
    Temperature,
    Humidity,
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WeatherCondition::Rain => "rain",
            WeatherCondition::Snow => "snow",
            WeatherCondition::Wind => "wind",
            WeatherCondition::Temperature => "temperature",
            WeatherCondition::Humidity => "humidity",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionOperator {
    Above,
    Below,
    Equals,
}

impl std::fmt::Display for RestrictionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RestrictionOperator::Above => "above",
            RestrictionOperator::Below => "below",
            RestrictionOperator::Equals => "equals",
        };
        write!(f, "{s}")
    }
}

/// Window during which a stage may not be performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRestriction {
    /// Window start, inclusive.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Window end, exclusive. An end before the start wraps past midnight.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub reason: String,
    /// Days the window applies to, 0 = Sunday. `None` = every day.
    #[serde(default)]
    pub days_of_week: Option<Vec<u32>>,
}

/// `HH:MM` serialization for restriction window bounds.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}
