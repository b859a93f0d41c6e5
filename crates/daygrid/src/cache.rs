//! Per-day event index.
//!
//! Maps a Day Key to the events occurring on it, populated lazily on first
//! access and eagerly for the buffered window around the selection so
//! scrolling inside the window never pays a synchronous filter. Entries
//! are bounded by LRU eviction sized to the window.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::axis::week_start_of;
use crate::model::Event;
use crate::timezone::TimeZoneChoice;

/// Headroom beyond the buffer window so revisiting a just-left week does
/// not immediately evict and repopulate.
const LRU_SLACK: usize = 7;

struct DayEntry {
    /// Indices into the event store, in filter order. Stable but not
    /// meaningful; callers sort by start time where order matters.
    indices: Vec<usize>,
    last_used: u64,
}

pub struct DayIndexCache {
    events: Vec<Event>,
    entries: HashMap<NaiveDate, DayEntry>,
    capacity: usize,
    tick: u64,
    populations: u64,
}

impl DayIndexCache {
    pub fn new(buffer_weeks: u32) -> Self {
        let capacity = (2 * buffer_weeks as usize + 1) * 7 + LRU_SLACK;
        Self {
            events: Vec::new(),
            entries: HashMap::new(),
            capacity,
            tick: 0,
            populations: 0,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Wholesale replacement of the event collection. Every cached entry
    /// is dropped; no incremental diffing.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.entries.clear();
    }

    /// Event indices for `day` in filter order, populating the entry on
    /// first access. A second call without an intervening
    /// [`DayIndexCache::set_events`] returns the stored entry unchanged.
    pub fn events_for_day(&mut self, day: NaiveDate, timezone: &TimeZoneChoice) -> &[usize] {
        self.tick += 1;
        let tick = self.tick;

        if !self.entries.contains_key(&day) {
            let indices = self.filter_day(day, timezone);
            self.populations += 1;
            self.entries.insert(
                day,
                DayEntry {
                    indices,
                    last_used: tick,
                },
            );
            self.evict_to_capacity();
        }

        let entry = self
            .entries
            .get_mut(&day)
            .expect("entry populated just above");
        entry.last_used = tick;
        &entry.indices
    }

    /// Events for `day` sorted by start time ascending, ready for layout.
    pub fn day_events(&mut self, day: NaiveDate, timezone: &TimeZoneChoice) -> Vec<&Event> {
        let indices = self.events_for_day(day, timezone).to_vec();
        let mut events: Vec<&Event> = indices.into_iter().map(|idx| &self.events[idx]).collect();
        events.sort_by_key(|event| event.start());
        events
    }

    /// Eagerly populate every day of the inclusive week range around
    /// `center`, aligned to the week-start convention.
    pub fn load_window(
        &mut self,
        center: NaiveDate,
        weeks_before: u32,
        weeks_after: u32,
        timezone: &TimeZoneChoice,
        monday_first: bool,
    ) {
        let first = week_start_of(center, monday_first) - Duration::weeks(weeks_before as i64);
        let day_count = (weeks_before + weeks_after + 1) as i64 * 7;

        for offset in 0..day_count {
            self.events_for_day(first + Duration::days(offset), timezone);
        }
    }

    /// How many day entries have been computed since construction. Cached
    /// hits do not count; tests use this to observe memoization.
    pub fn population_count(&self) -> u64 {
        self.populations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn filter_day(&self, day: NaiveDate, timezone: &TimeZoneChoice) -> Vec<usize> {
        self.events
            .iter()
            .enumerate()
            .filter_map(|(idx, event)| {
                if event.occurs_on(day, timezone) {
                    Some(idx)
                } else {
                    None
                }
            })
            .collect()
    }

    fn evict_to_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(day, _)| *day);

            let Some(day) = oldest else {
                return;
            };

            self.entries.remove(&day);
            debug!(day = %day, "evicted day entry");
        }
    }
}
