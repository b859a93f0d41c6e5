//! Widget configuration, supplied once at construction.

use serde::{Deserialize, Serialize};

use crate::axis::DEFAULT_TOTAL_SECTIONS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub week_starts_on_monday: bool,
    /// Baseline pixels per hour; zoom gestures scale from this value.
    pub hour_height: f32,
    pub min_hour_height: f32,
    pub max_hour_height: f32,
    /// Weeks eagerly populated either side of the selection at startup.
    pub buffer_weeks: u32,
    /// Extent of the virtual week axis.
    pub total_sections: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_starts_on_monday: true,
            hour_height: 60.0,
            min_hour_height: 20.0,
            max_hour_height: 120.0,
            buffer_weeks: 4,
            total_sections: DEFAULT_TOTAL_SECTIONS,
        }
    }
}

impl CalendarConfig {
    /// The hour height a completed zoom gesture resolves to. Overshooting
    /// gesture input is routine, so out-of-bounds scales clamp silently.
    pub fn clamped_zoom(&self, scale: f32) -> f32 {
        (self.hour_height * scale)
            .max(self.min_hour_height)
            .min(self.max_hour_height)
    }
}
