//! daygrid
//!
//! The data and layout engine behind an hour-grid calendar widget: a
//! per-day event index with windowed population, a virtual week axis that
//! maps an "infinite" scroll position to concrete dates, and the geometry
//! of events (and the current-time line) inside a day column. Rendering,
//! gestures, and view plumbing are the caller's job; everything here is
//! synchronous, allocation-light, and free of UI framework bindings.

pub mod axis;
pub mod cache;
pub mod config;
pub mod cursor;
mod error;
pub mod layout;
pub mod model;
pub mod state;
pub mod timezone;

pub use axis::{days_in_month, WeekAxis, DEFAULT_TOTAL_SECTIONS};
pub use cache::DayIndexCache;
pub use config::CalendarConfig;
pub use error::{Error, Result};
pub use layout::{layout_day, EVENT_INSET, MIN_EVENT_HEIGHT};
pub use model::{DayPortion, Event, EventId, MINUTES_PER_DAY};
pub use state::{CalendarState, StateChange};
pub use timezone::TimeZoneChoice;
