//! Time-of-day restriction evaluation

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::catalog::TimeRestriction;

/// Whether the work start falls inside a restricted window.
///
/// The window start is inclusive and the end exclusive; an end before
/// the start wraps past midnight. Day-of-week scoping (0 = Sunday) is
/// checked against the day the work started.
pub(super) fn is_within_window(start: DateTime<Utc>, restriction: &TimeRestriction) -> bool {
    if let Some(days) = &restriction.days_of_week {
        if !days.contains(&start.weekday().num_days_from_sunday()) {
            return false;
        }
    }

    let time = start.time();
    // Compare at minute resolution, matching the HH:MM window bounds
    let minute_of_day = time.hour() * 60 + time.minute();
    let from = restriction.start_time.hour() * 60 + restriction.start_time.minute();
    let to = restriction.end_time.hour() * 60 + restriction.end_time.minute();

    if from <= to {
        minute_of_day >= from && minute_of_day < to
    } else {
        // Window wraps midnight, e.g. 22:00-06:00
        minute_of_day >= from || minute_of_day < to
    }
}
