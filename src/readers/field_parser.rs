use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::utils::constants::NULL_TOKENS;

/// Date-only layouts tried in order; ISO first so ambiguous inputs resolve to it
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Date-time layouts; the time of day is dropped
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

pub fn is_null_token(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    NULL_TOKENS.contains(&lowered.as_str())
}

/// Parse a calendar date from the common textual layouts.
///
/// Unparsable or missing values yield `None` instead of an error, so a bad
/// date only removes its own row during cleaning.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if is_null_token(trimmed) {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
    {
        return Some(date);
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(datetime.date());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a finite number; null tokens, garbage and infinities yield `None`
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if is_null_token(trimmed) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
