//! Date Utilities
//!
//! Rows carry ISO `yyyy-mm-dd` strings. Only the calendar day matters, so any
//! time-of-day suffix is ignored before parsing.

use chrono::NaiveDate;

/// Parses the leading `yyyy-mm-dd` of `raw`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Short English month name of `date` (`Aug`); unparseable input is returned unchanged.
pub fn month_label(date: &str) -> String {
    match parse_day(date) {
        Some(day) => day.format("%b").to_string(),
        None => date.to_string(),
    }
}
