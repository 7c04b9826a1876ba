use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Accepts "14:30" (24-hour) and "2:30 PM" / "2:30pm" / "2:30 p.m." (12-hour).
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})(?:\s*([AaPp])\.?[Mm]\.?)?\s*$").unwrap());

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("unrecognized time format: {0:?}")]
    UnrecognizedFormat(String),
    #[error("hour or minute out of range: {0:?}")]
    ComponentOutOfRange(String),
    #[error("slot does not end after it starts: {start:?} -> {end:?}")]
    EmptySlot { start: String, end: String },
}

/// Minutes since midnight (0-1439).
///
/// 24-hour hours run 0-23; 12-hour hours run 1-12 with an AM/PM marker,
/// where 12 AM maps to 0 and 12 PM to 720.
pub fn parse_to_minutes(raw: &str) -> Result<u32, TimeParseError> {
    let caps = TIME_RE
        .captures(raw)
        .ok_or_else(|| TimeParseError::UnrecognizedFormat(raw.to_string()))?;

    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| TimeParseError::UnrecognizedFormat(raw.to_string()))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| TimeParseError::UnrecognizedFormat(raw.to_string()))?;

    if minute > 59 {
        return Err(TimeParseError::ComponentOutOfRange(raw.to_string()));
    }

    match caps.get(3) {
        None => {
            if hour > 23 {
                return Err(TimeParseError::ComponentOutOfRange(raw.to_string()));
            }
            Ok(hour * 60 + minute)
        }
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return Err(TimeParseError::ComponentOutOfRange(raw.to_string()));
            }
            let is_pm = meridiem.as_str().eq_ignore_ascii_case("p");
            let hour = match (is_pm, hour) {
                (false, 12) => 0,
                (true, 12) => 12,
                (true, h) => h + 12,
                (false, h) => h,
            };
            Ok(hour * 60 + minute)
        }
    }
}

/// A single contiguous interval within one day, as stored upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Parse both endpoints. Inverted or zero-length slots are rejected so
    /// downstream code only ever sees ranges with start < end.
    pub fn minute_range(&self) -> Result<MinuteRange, TimeParseError> {
        let start = parse_to_minutes(&self.start_time)?;
        let end = parse_to_minutes(&self.end_time)?;
        if start >= end {
            return Err(TimeParseError::EmptySlot {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok(MinuteRange { start, end })
    }
}

/// Parsed slot endpoints in minutes since midnight, start < end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRange {
    pub start: u32,
    pub end: u32,
}

impl MinuteRange {
    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    /// Half-open overlap test. Back-to-back ranges that only touch at a
    /// boundary do not overlap.
    pub fn overlaps(&self, other: &MinuteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Slot-level overlap; a slot that fails to parse never overlaps anything.
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    match (a.minute_range(), b.minute_range()) {
        (Ok(a), Ok(b)) => a.overlaps(&b),
        _ => false,
    }
}
