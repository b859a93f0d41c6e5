//! Current-time indicator.

use chrono::{DateTime, NaiveDate, Utc};

use crate::timezone::TimeZoneChoice;

const MINUTES_PER_HOUR: f32 = 60.0;

/// Vertical offset of the "now" line within the day grid, or `None` when
/// the selected day is not today. Cheap enough to recompute on every
/// now/zoom/navigation change; nothing is cached.
pub fn position_for(
    now: DateTime<Utc>,
    selected_day: NaiveDate,
    hour_height: f32,
    timezone: &TimeZoneChoice,
) -> Option<f32> {
    if timezone.day_key(&now) != selected_day {
        return None;
    }

    Some(timezone.minutes_from_midnight(&now) * hour_height / MINUTES_PER_HOUR)
}
