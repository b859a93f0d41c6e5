//! Day-column layout.
//!
//! Pure geometry: a day's clipped event intervals plus an hour-pixel scale
//! and the column width in, one rectangle per event out, in the same order.
//! The origin is the day column's top-left; the time axis is the caller's
//! concern.

use egui::{pos2, vec2, Rect};

use crate::model::DayPortion;

/// Floor so zero- and short-duration events stay visible and tappable.
pub const MIN_EVENT_HEIGHT: f32 = 20.0;

/// Horizontal gap carved out of each column for visual separation.
pub const EVENT_INSET: f32 = 2.0;

const MINUTES_PER_HOUR: f32 = 60.0;

/// Lay out one day's events. Overlap is resolved with equal-width columns
/// sized by the day's total event count; `x` follows the caller's (start
/// sorted) order. Events that never overlap in time still share the day's
/// column division, which keeps the rule cheap and stable frame to frame.
pub fn layout_day(portions: &[DayPortion], hour_height: f32, available_width: f32) -> Vec<Rect> {
    if portions.is_empty() {
        return Vec::new();
    }

    let column_width = available_width / portions.len() as f32;

    portions
        .iter()
        .enumerate()
        .map(|(index, portion)| {
            let y = portion.start_minutes * hour_height / MINUTES_PER_HOUR;
            let height = (portion.duration_minutes() * hour_height / MINUTES_PER_HOUR)
                .max(MIN_EVENT_HEIGHT);
            let x = column_width * index as f32;
            let width = (column_width - EVENT_INSET).max(0.0);
            Rect::from_min_size(pos2(x, y), vec2(width, height))
        })
        .collect()
}
