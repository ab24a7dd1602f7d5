//! Date and time handling utilities including display offsets and formatting.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Rendered in place of an absent timestamp, in every output format
pub const NO_TIMESTAMP: &str = "N/A";

/// FILETIME epoch difference (1601-01-01 to 1970-01-01) in 100-nanosecond intervals
const FILETIME_EPOCH_DIFF: u64 = 116_444_736_000_000_000;

/// Largest offsets in use worldwide: UTC-12 and UTC+14
const MIN_OFFSET_MINUTES: i32 = -12 * 60;
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Zero offset, used for exports
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parse a display offset: "UTC", "UTC+8", "UTC-5" or "UTC+5:30".
///
/// The result is a fixed offset with no daylight saving rules, so the same
/// instant always renders the same way regardless of season.
pub fn parse_timezone(timezone_str: &str) -> Result<FixedOffset> {
    let invalid = || {
        Error::InvalidInput(format!(
            "Invalid timezone '{}'. Use 'UTC' or UTC offset notation like 'UTC+8', 'UTC-5' or 'UTC+5:30'",
            timezone_str
        ))
    };

    let offset_part = timezone_str.strip_prefix("UTC").ok_or_else(invalid)?;
    if offset_part.is_empty() {
        return Ok(utc_offset());
    }

    let (sign, rest) = match offset_part.as_bytes()[0] {
        b'+' => (1, &offset_part[1..]),
        b'-' => (-1, &offset_part[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "0"),
    };
    let hours = parse_offset_field(hours).ok_or_else(invalid)?;
    let minutes = parse_offset_field(minutes).ok_or_else(invalid)?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let total_minutes = sign * (hours * 60 + minutes);
    if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&total_minutes) {
        return Err(Error::InvalidInput(format!(
            "Unsupported UTC offset '{}'. Offsets range from UTC-12 to UTC+14",
            timezone_str
        )));
    }

    FixedOffset::east_opt(total_minutes * 60).ok_or_else(invalid)
}

/// One or two ASCII digits
fn parse_offset_field(field: &str) -> Option<i32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Convert UTC datetime to the display offset
pub fn convert_to_timezone(utc_dt: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    utc_dt.with_timezone(&offset)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an optional UTC timestamp at the display offset, `N/A` when absent
pub fn format_run_time(timestamp: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    match timestamp {
        Some(ts) => format_timestamp(&convert_to_timezone(ts, offset)),
        None => NO_TIMESTAMP.to_string(),
    }
}

/// Convert a Windows FILETIME to a UTC timestamp with second precision.
/// Zero means "never" and yields `None`.
pub fn filetime_to_datetime(filetime: u64) -> Option<DateTime<Utc>> {
    if filetime == 0 {
        return None;
    }

    let unix_time = filetime.saturating_sub(FILETIME_EPOCH_DIFF) / 10_000_000;
    DateTime::from_timestamp(unix_time as i64, 0)
}
