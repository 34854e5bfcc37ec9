//! Purpose: Supply insertion timestamps for the store.
//! Exports: `Clock`, `LocalClock`, `TIMESTAMP_FORMAT`, `format_timestamp`, `parse_timestamp`.
//! Invariants: Stored timestamps are local wall time at second precision.
//! Invariants: The textual format is fixed; lexical order equals chronological order.

use chrono::{Local, NaiveDateTime};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Strict parse; rejects fractional seconds and offsets.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if text.len() != 19 {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}
