mod config;
mod consts;
mod display;
mod grid;
mod prelude;
mod types;

pub use config::{CalendarConfig, ConfigError, PadNumbering};
pub use consts::*;
pub use display::{
    compact_date, format_for_display, format_for_display_or, is_today, is_today_on, iso_date,
    parse_compact_date, parse_iso_date,
};
pub use grid::{
    CalendarError, CellKind, DayCell, MonthGrid, build_month_grid, build_month_grid_with,
    week_count, week_row,
};
pub use types::{Month, Year, days_in_month, is_leap_year, weekday_name};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate};
use std::str::FromStr;

/// A calendar month of a specific year, written `YYYY-MM`.
/// This is the unit a month grid is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid year-month format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Empty year-month string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Digits in the year part of `YYYY-MM`
const YEAR_WIDTH: usize = 4;
/// Digits allowed in the month part of `YYYY-MM`
const MONTH_WIDTH: std::ops::RangeInclusive<usize> = 1..=2;

impl YearMonth {
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth` when a
    /// component is out of range.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    /// Combines components that are already validated.
    pub const fn from_parts(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// The year-month containing `date`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for dates past `MAX_YEAR`, or
    /// `ParseError::InvalidFormat` for years that do not fit a `u16`.
    pub fn from_date(date: NaiveDate) -> Result<Self, ParseError> {
        let out_of_range = || ParseError::InvalidFormat(date.to_string());
        let year = u16::try_from(date.year()).map_err(|_| out_of_range())?;
        let month = u8::try_from(date.month()).map_err(|_| out_of_range())?;
        Self::new(year, month)
    }

    /// The year-month of the local wall clock.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the clock is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn current() -> Result<Self, ParseError> {
        Self::from_date(Local::now().date_naive())
    }

    /// Returns the year value as u16
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month value as u8 (1-based)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the number of days in this month, leap years included
    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    /// Sunday-first column (0..=6) of the 1st of the month.
    pub fn first_weekday(&self) -> u8 {
        self.first_day()
            .and_then(|date| u8::try_from(date.weekday().num_days_from_sunday()).ok())
            .unwrap_or(SUNDAY)
    }

    /// Sunday-first column (0..=6) of the last day of the month.
    pub fn last_weekday(&self) -> u8 {
        (self.first_weekday() + self.days_in_month() - 1) % DAYS_IN_WEEK
    }

    /// The concrete date for `day`, or `None` when the month has no such day.
    pub fn day(&self, day: u8) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(day),
        )
    }

    /// Returns the 1st of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.day(1)
    }

    /// Returns the last day of the month
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.day(self.days_in_month())
    }

    /// The following month, or `None` past December `MAX_YEAR`.
    pub fn next(&self) -> Option<Self> {
        if self.month.is_december() {
            let year = self.year.succ()?;
            return Some(Self::from_parts(year, Month::new(JANUARY).ok()?));
        }
        Some(Self::from_parts(self.year, Month::new(self.month() + 1).ok()?))
    }

    /// The preceding month, or `None` before January `MIN_YEAR`.
    pub fn previous(&self) -> Option<Self> {
        if self.month.is_january() {
            let year = self.year.pred()?;
            return Some(Self::from_parts(year, Month::new(DECEMBER).ok()?));
        }
        Some(Self::from_parts(self.year, Month::new(self.month() - 1).ok()?))
    }

    /// Key for callers that memoise grids per month.
    pub fn key(&self) -> String {
        self.to_string()
    }

    fn parse_component<T: FromStr>(
        part: &str,
        width: std::ops::RangeInclusive<usize>,
        whole: &str,
    ) -> Result<T, ParseError> {
        if !width.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(whole.to_owned()));
        }
        part.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(whole.to_owned()))
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "{trimmed} (expected YYYY{DATE_SEPARATOR}MM, found {} separators)",
                parts.len() - 1
            )));
        };

        let year = Self::parse_component::<u16>(year, YEAR_WIDTH..=YEAR_WIDTH, trimmed)?;
        let month = Self::parse_component::<u8>(month, MONTH_WIDTH, trimmed)?;
        Self::new(year, month)
    }
}

impl TryFrom<(u16, u8)> for YearMonth {
    type Error = ParseError;

    fn try_from((year, month): (u16, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month)
    }
}

impl serde::Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::YearMonth;
    use chrono::NaiveDate;

    pub fn ym(year: u16, month: u8) -> YearMonth {
        YearMonth::new(year, month).expect("valid year-month in test")
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date in test")
    }
}
