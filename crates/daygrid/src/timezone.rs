//! The injected calendar context for the engine.
//!
//! Every instant-to-day conversion goes through a [`TimeZoneChoice`] passed
//! in by the caller, so there is no ambient shared calendar state and tests
//! can pin a fixed zone instead of inheriting the host's.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneChoice {
    Local,
    Named(Tz),
}

impl Default for TimeZoneChoice {
    fn default() -> Self {
        Self::Local
    }
}

impl TimeZoneChoice {
    /// The calendar day the instant falls on in this zone. Two instants on
    /// the same wall-clock day map to the same key regardless of
    /// time-of-day.
    pub fn day_key(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            TimeZoneChoice::Local => instant.with_timezone(&Local).date_naive(),
            TimeZoneChoice::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    /// Wall-clock time-of-day of the instant in this zone.
    pub fn time_of_day(&self, instant: &DateTime<Utc>) -> NaiveTime {
        match self {
            TimeZoneChoice::Local => instant.with_timezone(&Local).time(),
            TimeZoneChoice::Named(tz) => instant.with_timezone(tz).time(),
        }
    }

    pub fn minutes_from_midnight(&self, instant: &DateTime<Utc>) -> f32 {
        minutes_from_time(self.time_of_day(instant))
    }
}

pub fn minutes_from_time(time: NaiveTime) -> f32 {
    time.hour() as f32 * 60.0
        + time.minute() as f32
        + time.second() as f32 / 60.0
        + time.nanosecond() as f32 / 60_000_000_000.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Tz;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn same_day_instants_share_a_key() {
        let tz = TimeZoneChoice::Named(Tz::UTC);
        let morning = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 6, 1, 23, 59, 59).unwrap();
        assert_eq!(tz.day_key(&morning), tz.day_key(&night));
    }

    #[test]
    fn named_zone_shifts_the_day_key() {
        // 01:00 UTC is still the previous evening in Denver
        let tz = TimeZoneChoice::Named(Tz::America__Denver);
        let instant = Utc.with_ymd_and_hms(2024, 6, 2, 1, 0, 0).unwrap();
        assert_eq!(
            tz.day_key(&instant),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn minutes_from_time_counts_from_midnight() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(minutes_from_time(noon), 720.0);

        let half_past = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(minutes_from_time(half_past), 570.0);
    }
}
