//! Selection and zoom state.
//!
//! The single writer for the selected day, the hour-pixel scale, and the
//! sampled "now" instant. Navigation re-windows the day cache; observers
//! subscribe over a channel instead of binding to any UI framework. All
//! mutation happens on the owning thread; the periodic now-refresh is a
//! pull-based interval gate, not a background task.

use std::time::{Duration as StdDuration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::Rect;

use crate::axis::WeekAxis;
use crate::cache::DayIndexCache;
use crate::config::CalendarConfig;
use crate::cursor;
use crate::layout;
use crate::model::{DayPortion, Event};
use crate::timezone::TimeZoneChoice;

const NOW_REFRESH_INTERVAL: StdDuration = StdDuration::from_secs(60);

/// Change notifications delivered to subscribers after each mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange {
    EventsReplaced,
    SelectionChanged(NaiveDate),
    ZoomChanged(f32),
    MonthViewToggled(bool),
    NowRefreshed(DateTime<Utc>),
}

pub struct CalendarState {
    config: CalendarConfig,
    timezone: TimeZoneChoice,
    cache: DayIndexCache,
    axis: WeekAxis,
    selected: NaiveDate,
    hour_height: f32,
    month_view_expanded: bool,
    now: DateTime<Utc>,
    last_refresh: Instant,
    listeners: Vec<Sender<StateChange>>,
}

impl CalendarState {
    pub fn new(config: CalendarConfig, timezone: TimeZoneChoice) -> Self {
        Self::with_now(config, timezone, Utc::now())
    }

    /// Construct with an explicit reference instant. The instant anchors
    /// the virtual axis, seeds the selection, and is the first "now"
    /// sample. The wide buffer window loads here, once; later navigation
    /// only extends by a week either side.
    pub fn with_now(config: CalendarConfig, timezone: TimeZoneChoice, now: DateTime<Utc>) -> Self {
        let today = timezone.day_key(&now);
        let axis = WeekAxis::new(today, config.total_sections, config.week_starts_on_monday);

        let mut cache = DayIndexCache::new(config.buffer_weeks);
        cache.load_window(
            today,
            config.buffer_weeks,
            config.buffer_weeks,
            &timezone,
            config.week_starts_on_monday,
        );

        let hour_height = config.clamped_zoom(1.0);

        Self {
            config,
            timezone,
            cache,
            axis,
            selected: today,
            hour_height,
            month_view_expanded: false,
            now,
            last_refresh: Instant::now(),
            listeners: Vec::new(),
        }
    }

    /// Register an observer. Disconnected receivers are dropped on the
    /// next emission.
    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        let (tx, rx) = unbounded();
        self.listeners.push(tx);
        rx
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn timezone(&self) -> TimeZoneChoice {
        self.timezone
    }

    pub fn axis(&self) -> &WeekAxis {
        &self.axis
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected
    }

    pub fn hour_height(&self) -> f32 {
        self.hour_height
    }

    pub fn month_view_expanded(&self) -> bool {
        self.month_view_expanded
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn is_today(&self, day: NaiveDate) -> bool {
        self.timezone.day_key(&self.now) == day
    }

    /// Whether the selection sits on the first or last virtual week, i.e.
    /// further navigation in that direction will clamp.
    pub fn selection_at_axis_edge(&self) -> bool {
        let (section, _) = self.axis.index_for_date(self.selected);
        section == 0 || section == self.axis.total_sections() - 1
    }

    /// Wholesale event replacement. Clears every cached day, then
    /// re-primes the week either side of the selection so the visible day
    /// never pays a synchronous populate on the next frame.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.cache.set_events(events);
        self.cache.load_window(
            self.selected,
            1,
            1,
            &self.timezone,
            self.config.week_starts_on_monday,
        );
        self.emit(StateChange::EventsReplaced);
    }

    /// Events occurring on `day`, sorted by start time ascending.
    pub fn events_for_day(&mut self, day: NaiveDate) -> Vec<&Event> {
        let timezone = self.timezone;
        self.cache.day_events(day, &timezone)
    }

    /// One rectangle per event, aligned 1:1 with
    /// [`CalendarState::events_for_day`]. The hour height is a parameter
    /// so a transient pinch scale can be rendered without committing it.
    pub fn layout_for_day(&mut self, day: NaiveDate, hour_height: f32, width: f32) -> Vec<Rect> {
        let timezone = self.timezone;
        let portions: Vec<DayPortion> = self
            .cache
            .day_events(day, &timezone)
            .iter()
            .map(|event| event.portion_on(day, &timezone).unwrap_or_default())
            .collect();

        layout::layout_day(&portions, hour_height, width)
    }

    pub fn now_cursor_position(&self, hour_height: f32) -> Option<f32> {
        cursor::position_for(self.now, self.selected, hour_height, &self.timezone)
    }

    pub fn select_date(&mut self, instant: DateTime<Utc>) {
        self.select_day(self.timezone.day_key(&instant));
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected = day;
        self.cache.load_window(
            day,
            1,
            1,
            &self.timezone,
            self.config.week_starts_on_monday,
        );
        self.emit(StateChange::SelectionChanged(day));
    }

    pub fn move_to_next_day(&mut self) {
        if let Some(next) = self.selected.succ_opt() {
            self.select_day(next);
        }
    }

    pub fn move_to_previous_day(&mut self) {
        if let Some(previous) = self.selected.pred_opt() {
            self.select_day(previous);
        }
    }

    pub fn move_to_today(&mut self) {
        self.select_date(self.now);
    }

    /// Commit a completed zoom gesture. Intermediate gesture samples
    /// should drive a transient visual scale instead; committing on every
    /// sample would thrash layout mid-gesture.
    pub fn update_zoom(&mut self, scale: f32) {
        let clamped = self.config.clamped_zoom(scale);
        if clamped != self.hour_height {
            self.hour_height = clamped;
            self.emit(StateChange::ZoomChanged(clamped));
        }
    }

    pub fn toggle_month_view(&mut self) {
        self.month_view_expanded = !self.month_view_expanded;
        self.emit(StateChange::MonthViewToggled(self.month_view_expanded));
    }

    pub fn date_for_virtual_index(&self, section: i64, day_of_week: u32) -> NaiveDate {
        self.axis.date_for_index(section, day_of_week)
    }

    pub fn virtual_index_for_date(&self, date: NaiveDate) -> (i64, u32) {
        self.axis.index_for_date(date)
    }

    pub fn week_days(&self, section: i64) -> [NaiveDate; 7] {
        self.axis.week_days(section)
    }

    pub fn month_grid_range(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        self.axis.month_grid(date)
    }

    /// Poll the now-refresh gate. Call from the host's frame loop or
    /// timer; the sample only advances once the 60 s interval elapses.
    pub fn tick(&mut self) {
        if self.last_refresh.elapsed() < NOW_REFRESH_INTERVAL {
            return;
        }
        self.set_now(Utc::now());
    }

    /// Directly replace the sampled "now". Hosts with their own timer and
    /// tests use this instead of [`CalendarState::tick`].
    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
        self.last_refresh = Instant::now();
        self.emit(StateChange::NowRefreshed(now));
    }

    fn emit(&mut self, change: StateChange) {
        self.listeners.retain(|listener| listener.send(change).is_ok());
    }
}
