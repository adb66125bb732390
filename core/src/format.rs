//! Display formatting for server-assigned timestamps.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::types::CreationTime;

/// `Mar 05 2024, 02:30 PM`
pub const CREATION_TIME_FORMAT: &str = "%b %d %Y, %I:%M %p";

const NAIVE_ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Render a creation time as a local-style date/time string in `tz`.
///
/// Offset-qualified RFC 3339 values and epoch seconds are converted into
/// `tz`. Naive ISO-8601 values carry no zone and are shown as written.
/// Anything unparseable is returned verbatim.
pub fn format_creation_time<Tz>(raw: &CreationTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let s = raw.as_str().trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(tz).format(CREATION_TIME_FORMAT).to_string();
    }

    for fmt in NAIVE_ISO_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.format(CREATION_TIME_FORMAT).to_string();
        }
    }

    if let Some(dt) = s.parse::<i64>().ok().and_then(|secs| DateTime::from_timestamp(secs, 0)) {
        return dt.with_timezone(tz).format(CREATION_TIME_FORMAT).to_string();
    }

    s.to_string()
}
