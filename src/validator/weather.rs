//! Weather restriction evaluation

use crate::catalog::{RestrictionOperator, WeatherCondition, WeatherRestriction};
use crate::models::entry::WeatherSnapshot;

/// Tolerance for `equals` comparisons. Restriction thresholds and entry
/// readings may both come through unit conversions, so exact float
/// equality would make `equals` restrictions unmatchable in practice.
pub const EQUALS_EPSILON: f64 = 1e-6;

/// The snapshot reading a restriction condition is checked against, if
/// the snapshot carries one. Snowfall has no reading of its own, so
/// `snow` restrictions are unevaluable and skipped.
pub(super) fn condition_reading(
    snapshot: &WeatherSnapshot,
    condition: WeatherCondition,
) -> Option<f64> {
    match condition {
        WeatherCondition::Rain => Some(snapshot.precipitation),
        WeatherCondition::Wind => Some(snapshot.wind_speed),
        WeatherCondition::Temperature => Some(snapshot.temperature),
        WeatherCondition::Humidity => Some(snapshot.humidity),
        WeatherCondition::Snow => None,
    }
}

/// Whether the restriction's adverse condition is present in the reading.
pub(super) fn is_violated(reading: f64, restriction: &WeatherRestriction) -> bool {
    match restriction.operator {
        RestrictionOperator::Above => reading > restriction.value,
        RestrictionOperator::Below => reading < restriction.value,
        RestrictionOperator::Equals => (reading - restriction.value).abs() <= EQUALS_EPSILON,
    }
}
