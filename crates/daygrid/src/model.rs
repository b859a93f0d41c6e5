//! Event model and per-day interval math.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use egui::Color32;
use uuid::Uuid;

use crate::error::Error;
use crate::timezone::{minutes_from_time, TimeZoneChoice};

pub type EventId = Uuid;

pub const MINUTES_PER_DAY: f32 = 24.0 * 60.0;

/// A time-ranged calendar event occupying the half-open interval
/// `[start, end)`. Construction rejects `end < start`; `start == end` is a
/// zero-duration event that still gets a minimum visual height at layout
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: EventId,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    color: Color32,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        color: Color32,
    ) -> Result<Self, Error> {
        Self::with_id(Uuid::new_v4(), title, start, end, color)
    }

    pub fn with_id(
        id: EventId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        color: Color32,
    ) -> Result<Self, Error> {
        if end < start {
            return Err(Error::DegenerateEvent { start, end });
        }

        Ok(Self {
            id,
            title: title.into(),
            start,
            end,
            color,
        })
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Inclusive range of calendar days the event touches. An end landing
    /// exactly on midnight belongs to the previous day (half-open
    /// interval), so such an event does not show up on the following day.
    pub fn day_span(&self, timezone: &TimeZoneChoice) -> (NaiveDate, NaiveDate) {
        let first = timezone.day_key(&self.start);
        let mut last = timezone.day_key(&self.end);

        if self.end > self.start && timezone.time_of_day(&self.end) == NaiveTime::MIN {
            last = last.pred_opt().unwrap_or(last);
        }

        if last < first {
            last = first;
        }

        (first, last)
    }

    pub fn occurs_on(&self, day: NaiveDate, timezone: &TimeZoneChoice) -> bool {
        let (first, last) = self.day_span(timezone);
        day >= first && day <= last
    }

    /// The event's sub-interval on `day`, clipped to that day's span and
    /// expressed in minutes from midnight. `None` when the event does not
    /// occur on `day`; a normal empty result, not an error.
    pub fn portion_on(&self, day: NaiveDate, timezone: &TimeZoneChoice) -> Option<DayPortion> {
        let (first, last) = self.day_span(timezone);
        if day < first || day > last {
            return None;
        }

        let start_minutes = if day == first {
            minutes_from_time(timezone.time_of_day(&self.start))
        } else {
            0.0
        };

        let end_minutes = if day == timezone.day_key(&self.end) {
            minutes_from_time(timezone.time_of_day(&self.end))
        } else {
            MINUTES_PER_DAY
        };

        let start_minutes = start_minutes.max(0.0).min(MINUTES_PER_DAY);
        let end_minutes = end_minutes.max(start_minutes).min(MINUTES_PER_DAY);

        Some(DayPortion {
            start_minutes,
            end_minutes,
        })
    }

    /// Display label for the event's times as seen from `day`, with ends
    /// that fall outside the day clipped to "00:00" / "24:00".
    pub fn time_label_on(&self, day: NaiveDate, timezone: &TimeZoneChoice) -> Option<String> {
        let (first, last) = self.day_span(timezone);
        if day < first || day > last {
            return None;
        }

        let start_label = if day == first {
            timezone
                .time_of_day(&self.start)
                .format("%H:%M")
                .to_string()
        } else {
            "00:00".to_string()
        };

        let end_label = if day == timezone.day_key(&self.end) {
            timezone.time_of_day(&self.end).format("%H:%M").to_string()
        } else {
            "24:00".to_string()
        };

        if end_label == start_label {
            Some(start_label)
        } else {
            Some(format!("{start_label} – {end_label}"))
        }
    }
}

/// A clipped event interval within one day, in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayPortion {
    pub start_minutes: f32,
    pub end_minutes: f32,
}

impl DayPortion {
    pub fn duration_minutes(&self) -> f32 {
        self.end_minutes - self.start_minutes
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Tz;
    use pretty_assertions::assert_eq;

    use super::*;

    fn utc() -> TimeZoneChoice {
        TimeZoneChoice::Named(Tz::UTC)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: (u32, u32), end_day: u32, end: (u32, u32)) -> Event {
        Event::new(
            "meeting",
            Utc.with_ymd_and_hms(2024, 5, 1, start.0, start.1, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, end_day, end.0, end.1, 0).unwrap(),
            Color32::LIGHT_BLUE,
        )
        .unwrap()
    }

    #[test]
    fn rejects_degenerate_events() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let result = Event::new("backwards", start, end, Color32::RED);
        assert_eq!(result, Err(Error::DegenerateEvent { start, end }));
    }

    #[test]
    fn midnight_end_belongs_to_the_previous_day() {
        // [09:00 day 1, 00:00 day 2) occurs only on day 1
        let ev = event((9, 0), 2, (0, 0));
        assert!(ev.occurs_on(date(2024, 5, 1), &utc()));
        assert!(!ev.occurs_on(date(2024, 5, 2), &utc()));
        assert_eq!(ev.portion_on(date(2024, 5, 2), &utc()), None);
    }

    #[test]
    fn occurs_and_portion_agree() {
        let ev = event((9, 0), 1, (10, 30));
        for offset in 0..5 {
            let day = date(2024, 4, 29) + chrono::Duration::days(offset);
            assert_eq!(
                ev.occurs_on(day, &utc()),
                ev.portion_on(day, &utc()).is_some(),
                "disagreement on {day}"
            );
        }
    }

    #[test]
    fn portion_is_clipped_to_the_day() {
        let ev = event((22, 0), 3, (7, 30));

        let first = ev.portion_on(date(2024, 5, 1), &utc()).unwrap();
        assert_eq!(first.start_minutes, 22.0 * 60.0);
        assert_eq!(first.end_minutes, MINUTES_PER_DAY);

        let middle = ev.portion_on(date(2024, 5, 2), &utc()).unwrap();
        assert_eq!(middle.start_minutes, 0.0);
        assert_eq!(middle.end_minutes, MINUTES_PER_DAY);

        let last = ev.portion_on(date(2024, 5, 3), &utc()).unwrap();
        assert_eq!(last.start_minutes, 0.0);
        assert_eq!(last.end_minutes, 7.0 * 60.0 + 30.0);
    }

    #[test]
    fn zero_duration_event_still_occurs() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
        let ev = Event::new("reminder", at, at, Color32::GOLD).unwrap();

        assert!(ev.occurs_on(date(2024, 5, 1), &utc()));
        let portion = ev.portion_on(date(2024, 5, 1), &utc()).unwrap();
        assert_eq!(portion.duration_minutes(), 0.0);
        assert_eq!(portion.start_minutes, 14.0 * 60.0);
    }

    #[test]
    fn spring_forward_portion_stays_coherent() {
        // 2024-03-10 in Denver skips 02:00-03:00. Wall clock 01:30 MST is
        // 08:30Z, wall clock 03:30 MDT is 09:30Z.
        let tz = TimeZoneChoice::Named(Tz::America__Denver);
        let ev = Event::new(
            "early call",
            Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap(),
            Color32::GREEN,
        )
        .unwrap();

        let portion = ev.portion_on(date(2024, 3, 10), &tz).unwrap();
        assert!(portion.duration_minutes() >= 0.0);
        assert!(portion.duration_minutes() <= 120.0);
    }

    #[test]
    fn time_label_clips_to_day_bounds() {
        let ev = event((22, 0), 2, (7, 30));
        assert_eq!(
            ev.time_label_on(date(2024, 5, 1), &utc()).unwrap(),
            "22:00 – 24:00"
        );
        assert_eq!(
            ev.time_label_on(date(2024, 5, 2), &utc()).unwrap(),
            "00:00 – 07:30"
        );
        assert_eq!(ev.time_label_on(date(2024, 5, 3), &utc()), None);
    }
}
