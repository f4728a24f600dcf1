//! Date helpers used while rendering a grid.
//!
//! Everything here runs inside render loops, so malformed input degrades to a
//! fallback instead of failing.

use chrono::{Local, NaiveDate};

use crate::{
    COMPACT_DATE_FORMAT, CalendarError, DATE_SEPARATOR, DISPLAY_DATE_FORMAT, DISPLAY_FALLBACK,
    ISO_DATE_FORMAT,
};

/// `YYYY-MM-DD` form of `date`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// `YYYYMMDD` form of `date`.
pub fn compact_date(date: NaiveDate) -> String {
    date.format(COMPACT_DATE_FORMAT).to_string()
}

fn is_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

fn from_parts(year: &str, month: &str, day: &str, raw: &str) -> Result<NaiveDate, CalendarError> {
    let malformed = || CalendarError::MalformedDate(raw.to_owned());
    let year = year.parse::<i32>().map_err(|_| malformed())?;
    let month = month.parse::<u32>().map_err(|_| malformed())?;
    let day = day.parse::<u32>().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `CalendarError::MalformedDate` unless `s` is exactly ten characters
/// naming a real date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, CalendarError> {
    let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
    match parts.as_slice() {
        [year, month, day]
            if year.len() == 4
                && month.len() == 2
                && day.len() == 2
                && parts.iter().all(|part| is_digits(part)) =>
        {
            from_parts(year, month, day, s)
        },
        _ => Err(CalendarError::MalformedDate(s.to_owned())),
    }
}

/// Parses a strict `YYYYMMDD` date.
///
/// # Errors
/// Returns `CalendarError::MalformedDate` unless `s` is eight digits naming a
/// real date.
pub fn parse_compact_date(s: &str) -> Result<NaiveDate, CalendarError> {
    if s.len() != 8 || !is_digits(s) {
        return Err(CalendarError::MalformedDate(s.to_owned()));
    }
    from_parts(&s[..4], &s[4..6], &s[6..], s)
}

/// Whether `compact` (`YYYYMMDD`) is the local wall-clock date.
pub fn is_today(compact: &str) -> bool {
    is_today_on(compact, Local::now().date_naive())
}

/// Whether `compact` (`YYYYMMDD`) names `today`. Malformed input is never today.
pub fn is_today_on(compact: &str, today: NaiveDate) -> bool {
    if compact.is_empty() {
        return false;
    }
    match parse_compact_date(compact) {
        Ok(date) => date == today,
        Err(error) => {
            tracing::debug!(%error, "not comparing malformed compact date");
            false
        },
    }
}

/// Long-form date such as `March 5, 2025`, or `"--"` for bad input.
pub fn format_for_display(iso: &str) -> String {
    format_for_display_or(iso, DISPLAY_FALLBACK)
}

/// Long-form date such as `March 5, 2025`, or `fallback` for bad input.
pub fn format_for_display_or(iso: &str, fallback: &str) -> String {
    match parse_iso_date(iso) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(error) => {
            if !iso.is_empty() {
                tracing::debug!(%error, "rendering display fallback");
            }
            fallback.to_owned()
        },
    }
}
