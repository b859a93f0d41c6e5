use chrono::{DateTime, Utc};

/// Engine related errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("degenerate event: end {end} precedes start {start}")]
    DegenerateEvent {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("virtual section {section} outside 0..{total}")]
    SectionOutOfRange { section: i64, total: i64 },
}

impl Error {
    pub fn section_out_of_range(section: i64, total: i64) -> Self {
        Error::SectionOutOfRange { section, total }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
