//! Long-form date formatting and its inverse, plus item-date parsing.
//!
//! Digest grouping keys are long-form strings such as
//! `"Monday, 15 January 2024"`. The formatter and the parser that reads those
//! keys back live side by side here so they share one month vocabulary and
//! cannot drift apart.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{NewsError, Result};

/// English month names in calendar order; index + 1 is the month number.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `<day> <Month> <year>` anywhere in a long-form string. The weekday is ignored.
static LONG_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+(\w+)\s+(\d+)").unwrap());

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%a %b %d %Y",
];

/// Render a date as `"<Weekday>, <day> <Month> <year>"`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use digest_news::dates::format_long_date;
///
/// let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(format_long_date(d), "Monday, 15 January 2024");
/// ```
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Read back a string produced by [`format_long_date`].
///
/// Returns `None` when the day/month/year triple is missing, the month name
/// is not one of [`MONTHS`], or the triple is not a real calendar date.
pub fn parse_long_date(s: &str) -> Option<NaiveDate> {
    let caps = LONG_DATE_RE.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = MONTHS.iter().position(|m| *m == &caps[2])? as u32 + 1;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse the free-text date suffix of a digest item.
///
/// Blank input is treated as absent. Zoned timestamps keep the wall-clock
/// time as written; date-only values land on midnight.
pub fn parse_item_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| parse_long_date(s))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `"Today"` / `"Yesterday"` when `date` is `today` or the day before.
pub fn relative_label(date: NaiveDate, today: NaiveDate) -> Option<&'static str> {
    if date == today {
        Some("Today")
    } else if date == today - Duration::days(1) {
        Some("Yesterday")
    } else {
        None
    }
}

/// Parse a `YYYY-MM-DD` date supplied by a user.
pub fn parse_cli_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| NewsError::InvalidDate(format!("{s}: {e}")))
}
