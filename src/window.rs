use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Unix epoch seconds.
pub type Secs = i64;

/// Formats accepted for naive (offset-less) date-times, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Half-open interval `[start, end)` in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: Secs,
    pub end: Secs,
}

impl TimeWindow {
    pub fn new(start: Secs, end: Secs) -> Self {
        debug_assert!(start < end, "TimeWindow start must be before end");
        Self { start, end }
    }

    /// Parse a pair of boundary strings. Naive values are read in `offset`.
    pub fn parse(start: &str, end: &str, offset: FixedOffset) -> AppResult<Self> {
        let start = parse_instant(start, offset)?;
        let end = parse_instant(end, offset)?;
        if start >= end {
            return Err(AppError::InvalidWindow { start, end });
        }
        Ok(Self::new(start, end))
    }

    /// Disjoint when one ends at or before the other starts; touching is not overlap.
    /// `db::application::COUNT_OVERLAPPING_SQL` states the same rule in SQL.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        !(self.start >= other.end || self.end <= other.start)
    }

    pub fn duration_secs(&self) -> Secs {
        self.end - self.start
    }
}

/// Convert a human-readable date-time into epoch seconds.
pub fn parse_instant(input: &str, offset: FixedOffset) -> AppResult<Secs> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.timestamp());
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))
}
