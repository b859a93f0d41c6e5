//! Virtual week axis.
//!
//! A scrolling list abstraction cannot be truly infinite, so the axis
//! models a fixed number of week-sized sections with the middle section
//! anchored to the week containing the reference date. Sections map to
//! concrete dates with calendar-day arithmetic only; never fixed
//! 86 400-second steps, which drift across DST transitions.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::warn;

use crate::error::Error;

pub const DEFAULT_TOTAL_SECTIONS: i64 = 10_001;

pub(crate) fn week_start_of(date: NaiveDate, monday_first: bool) -> NaiveDate {
    let days = if monday_first {
        date.weekday().num_days_from_monday()
    } else {
        date.weekday().num_days_from_sunday()
    } as i64;
    date - Duration::days(days)
}

#[derive(Debug, Clone)]
pub struct WeekAxis {
    anchor: NaiveDate,
    total_sections: i64,
    middle_section: i64,
    monday_first: bool,
}

impl WeekAxis {
    /// The anchor is the week start of `reference` under the given
    /// convention, so `date_for_index(middle_section, 0)` is that week
    /// start.
    pub fn new(reference: NaiveDate, total_sections: i64, monday_first: bool) -> Self {
        let total_sections = total_sections.max(1);
        Self {
            anchor: week_start_of(reference, monday_first),
            total_sections,
            middle_section: total_sections / 2,
            monday_first,
        }
    }

    pub fn total_sections(&self) -> i64 {
        self.total_sections
    }

    pub fn middle_section(&self) -> i64 {
        self.middle_section
    }

    /// Sections outside the virtual range stop at the boundary instead of
    /// wrapping; an infinite-scroll surface should never visibly dead-end.
    pub fn clamp_section(&self, section: i64) -> i64 {
        let clamped = section.max(0).min(self.total_sections - 1);
        if clamped != section {
            warn!(
                section,
                total = self.total_sections,
                "virtual section out of range, clamping"
            );
        }
        clamped
    }

    pub fn date_for_index(&self, section: i64, day_of_week: u32) -> NaiveDate {
        let section = self.clamp_section(section);
        let day_of_week = i64::from(day_of_week.min(6));
        self.anchor + Duration::weeks(section - self.middle_section) + Duration::days(day_of_week)
    }

    /// Like [`WeekAxis::date_for_index`] but reports an out-of-range
    /// section instead of clamping.
    pub fn try_date_for_index(&self, section: i64, day_of_week: u32) -> Result<NaiveDate, Error> {
        if section < 0 || section >= self.total_sections {
            return Err(Error::section_out_of_range(section, self.total_sections));
        }
        Ok(self.date_for_index(section, day_of_week))
    }

    pub fn index_for_date(&self, date: NaiveDate) -> (i64, u32) {
        let week = week_start_of(date, self.monday_first);
        let weeks = (week - self.anchor).num_days() / 7;
        let section = self.clamp_section(self.middle_section + weeks);
        let day_of_week = (date - week).num_days() as u32;
        (section, day_of_week)
    }

    /// The seven dates of a section's week, in axis order.
    pub fn week_days(&self, section: i64) -> [NaiveDate; 7] {
        let start = self.date_for_index(section, 0);
        std::array::from_fn(|offset| start + Duration::days(offset as i64))
    }

    /// The six-week grid span the month view populates for the month
    /// containing `date`, aligned to the week-start convention.
    pub fn month_grid(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .expect("valid month start date");
        let grid_start = week_start_of(first, self.monday_first);
        (grid_start, grid_start + Duration::days(6 * 7 - 1))
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid month");
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn axis() -> WeekAxis {
        // 2024-01-01 is a Monday; middle section is 5000
        WeekAxis::new(date(2024, 1, 1), DEFAULT_TOTAL_SECTIONS, true)
    }

    #[test]
    fn middle_section_maps_to_the_reference_week() {
        let axis = axis();
        assert_eq!(axis.middle_section(), 5000);
        assert_eq!(axis.date_for_index(5000, 0), date(2024, 1, 1));
        assert_eq!(axis.date_for_index(5001, 0), date(2024, 1, 8));
    }

    #[test]
    fn round_trips_across_boundaries() {
        let axis = axis();
        // spans the 2023/2024 year boundary, the Feb 29 leap day, and the
        // 2024-03-10 US DST transition
        for section in 4995..5015 {
            for day_of_week in 0..7 {
                let mapped = axis.date_for_index(section, day_of_week);
                assert_eq!(
                    axis.index_for_date(mapped),
                    (section, day_of_week),
                    "round trip failed at {mapped}"
                );
            }
        }
    }

    #[test]
    fn year_boundary_dates_map_to_adjacent_slots() {
        let axis = axis();
        let (dec_section, dec_day) = axis.index_for_date(date(2023, 12, 31));
        let (jan_section, jan_day) = axis.index_for_date(date(2024, 1, 1));
        // Dec 31 2023 is the Sunday closing the week before the anchor
        assert_eq!((dec_section, dec_day), (4999, 6));
        assert_eq!((jan_section, jan_day), (5000, 0));
    }

    #[test]
    fn out_of_range_sections_clamp() {
        let axis = axis();
        assert_eq!(axis.date_for_index(-3, 0), axis.date_for_index(0, 0));
        assert_eq!(
            axis.date_for_index(99_999, 0),
            axis.date_for_index(DEFAULT_TOTAL_SECTIONS - 1, 0)
        );

        assert_eq!(
            axis.try_date_for_index(-3, 0),
            Err(Error::SectionOutOfRange {
                section: -3,
                total: DEFAULT_TOTAL_SECTIONS
            })
        );
        assert!(axis.try_date_for_index(5000, 3).is_ok());
    }

    #[test]
    fn sunday_first_convention_round_trips() {
        // 2024-01-07 is a Sunday
        let axis = WeekAxis::new(date(2024, 1, 7), 101, false);
        assert_eq!(axis.date_for_index(50, 0), date(2024, 1, 7));
        for section in 45..55 {
            for day_of_week in 0..7 {
                let mapped = axis.date_for_index(section, day_of_week);
                assert_eq!(axis.index_for_date(mapped), (section, day_of_week));
            }
        }
    }

    #[test]
    fn week_days_cover_the_section() {
        let axis = axis();
        let days = axis.week_days(5000);
        assert_eq!(days[0], date(2024, 1, 1));
        assert_eq!(days[6], date(2024, 1, 7));
    }

    #[test]
    fn month_grid_is_six_week_aligned() {
        let axis = axis();
        // March 2024 starts on a Friday; the Monday-aligned grid opens on
        // Feb 26 and covers 42 days
        let (start, end) = axis.month_grid(date(2024, 3, 15));
        assert_eq!(start, date(2024, 2, 26));
        assert_eq!(end, date(2024, 4, 7));
        assert_eq!((end - start).num_days(), 41);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }
}
