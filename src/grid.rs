use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    CalendarConfig, DAYS_IN_WEEK, PadNumbering, ParseError, SATURDAY, SUNDAY, YearMonth,
    display, prelude::*, weekday_name,
};

/// Error type for grid construction and date helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The year-month could not be parsed or is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ParseError),

    /// A `YYYY-MM-DD` or `YYYYMMDD` string is not a real calendar date.
    #[error("Malformed date: {0:?}")]
    MalformedDate(String),
}

/// What a grid position stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    /// A real day of the grid's month.
    Day,
    /// Filler before the 1st, standing in for the previous month.
    LeadingPad,
    /// Filler after the last day, standing in for the next month.
    TrailingPad,
    /// A slot `week_row` found nothing for.
    Empty,
}

/// One position of a month grid.
///
/// Serialises with camelCase keys. `kind` names the cell class, and
/// `isLeadingPad` / `isTrailingPad` mirror it for renderers that only read the
/// two flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    day:             u8,
    day_of_week:     u8,
    weekday_name:    &'static str,
    date:            Option<NaiveDate>,
    iso_date:        String,
    compact_date:    String,
    year:            u16,
    month:           String,
    week_index:      u8,
    kind:            CellKind,
    is_leading_pad:  bool,
    is_trailing_pad: bool,
}

impl DayCell {
    fn real(year_month: YearMonth, day: u8, day_of_week: u8, week_index: u8) -> Self {
        let date = year_month.day(day);
        Self {
            day,
            day_of_week,
            weekday_name: weekday_name(day_of_week),
            date,
            iso_date: date.map(display::iso_date).unwrap_or_default(),
            compact_date: date.map(display::compact_date).unwrap_or_default(),
            year: year_month.year(),
            month: year_month.month_typed().zero_padded(),
            week_index,
            kind: CellKind::Day,
            is_leading_pad: false,
            is_trailing_pad: false,
        }
    }

    fn placeholder(kind: CellKind, year: u16, month: String, day_of_week: u8, week_index: u8) -> Self {
        Self {
            day: 0,
            day_of_week,
            weekday_name: weekday_name(day_of_week),
            date: None,
            iso_date: String::new(),
            compact_date: String::new(),
            year,
            month,
            week_index,
            kind,
            is_leading_pad: matches!(kind, CellKind::LeadingPad),
            is_trailing_pad: matches!(kind, CellKind::TrailingPad),
        }
    }

    fn pad(year_month: YearMonth, kind: CellKind, day_of_week: u8, week_index: u8) -> Self {
        Self::placeholder(
            kind,
            year_month.year(),
            year_month.month_typed().zero_padded(),
            day_of_week,
            week_index,
        )
    }

    /// Day of month, 0 for anything that is not a real day.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Sunday-first column, 0..=6.
    pub const fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Returns the lowercase English weekday name of `day_of_week`
    pub const fn weekday_name(&self) -> &'static str {
        self.weekday_name
    }

    /// Returns the concrete date, `None` for placeholders
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// `YYYY-MM-DD`, empty for placeholders.
    pub fn iso_date(&self) -> &str {
        &self.iso_date
    }

    /// `YYYYMMDD`, empty for placeholders.
    pub fn compact_date(&self) -> &str {
        &self.compact_date
    }

    /// Returns the year the grid was built for
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Two-digit month, e.g. `"02"`.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// 1-based week row.
    pub const fn week_index(&self) -> u8 {
        self.week_index
    }

    /// Returns what this position stands for
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Returns true for a real day of the month
    pub const fn is_real(&self) -> bool {
        matches!(self.kind, CellKind::Day)
    }

    /// Returns true for filler before the 1st
    pub const fn is_leading_pad(&self) -> bool {
        self.is_leading_pad
    }

    /// Returns true for filler after the last day
    pub const fn is_trailing_pad(&self) -> bool {
        self.is_trailing_pad
    }

    /// Returns true for a slot `week_row` synthesised
    pub const fn is_blank(&self) -> bool {
        matches!(self.kind, CellKind::Empty)
    }

    /// Whether this cell is the local wall-clock date.
    pub fn is_today(&self) -> bool {
        display::is_today(&self.compact_date)
    }

    /// Whether this cell is `today`.
    pub fn is_today_on(&self, today: NaiveDate) -> bool {
        self.date == Some(today)
    }
}

/// The padded Sunday-first grid of one month.
///
/// Leading pads, one real cell per day, then trailing pads; the length is
/// always a multiple of 7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    year_month: YearMonth,
    #[deref]
    cells:      Vec<DayCell>,
}

impl MonthGrid {
    /// Builds the grid for an already-validated month.
    pub fn build(year_month: YearMonth, numbering: PadNumbering) -> Self {
        let first_weekday = year_month.first_weekday();

        // The week counter moves on after every Saturday.
        let real: Vec<DayCell> = (1..=year_month.days_in_month())
            .scan(1u8, |week, day| {
                let day_of_week = (first_weekday + day - 1) % DAYS_IN_WEEK;
                let cell = DayCell::real(year_month, day, day_of_week, *week);
                if day_of_week == SATURDAY {
                    *week += 1;
                }
                Some(cell)
            })
            .collect();

        let first_week_len = real.iter().filter(|cell| cell.week_index == 1).count();
        let leading = usize::from(DAYS_IN_WEEK).saturating_sub(first_week_len);
        let leading_pads = (0..leading).map(|slot| {
            // Legacy numbering counts 1, 2, 3...; calendar numbering is the true column.
            let first_column = match numbering {
                PadNumbering::Legacy => SUNDAY + 1,
                PadNumbering::Calendar => SUNDAY,
            };
            let day_of_week = u8::try_from(slot).map_or(SATURDAY, |slot| first_column + slot);
            DayCell::pad(year_month, CellKind::LeadingPad, day_of_week, 1)
        });

        let (last_weekday, last_week) = real
            .last()
            .map_or((SATURDAY, 1), |cell| (cell.day_of_week, cell.week_index));
        let trailing = SATURDAY - last_weekday;
        let trailing_pads = (1..=trailing).map(|step| {
            let day_of_week = (last_weekday + step) % DAYS_IN_WEEK;
            DayCell::pad(year_month, CellKind::TrailingPad, day_of_week, last_week)
        });

        let cells: Vec<DayCell> = leading_pads
            .chain(real)
            .chain(trailing_pads)
            .collect();

        tracing::debug!(
            year_month = %year_month,
            days = year_month.days_in_month(),
            leading,
            trailing,
            weeks = last_week,
            ?numbering,
            "built month grid"
        );

        Self { year_month, cells }
    }

    /// Returns the month this grid was built for
    pub const fn year_month(&self) -> YearMonth {
        self.year_month
    }

    /// Returns every cell in grid order
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Consumes the grid, returning its cells
    pub fn into_cells(self) -> Vec<DayCell> {
        self.cells
    }

    /// Number of 7-cell rows to render.
    pub fn week_count(&self) -> u8 {
        week_count(&self.cells)
    }

    /// Returns the seven cells of `week_index`, Sunday first
    pub fn week_row(&self, week_index: u8) -> [DayCell; 7] {
        week_row(&self.cells, week_index)
    }

    /// Every row, first week first.
    pub fn weeks(&self) -> impl Iterator<Item = [DayCell; 7]> + '_ {
        (1..=self.week_count()).map(|week| self.week_row(week))
    }

    /// Returns the real days, in order
    pub fn real_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| cell.is_real())
    }

    /// Returns how many cells pad the first week
    pub fn leading_pad_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_leading_pad()).count()
    }

    /// Returns how many cells pad the last week
    pub fn trailing_pad_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_trailing_pad()).count()
    }

    /// The real cell for `day`, if the month has one.
    pub fn cell_for_day(&self, day: u8) -> Option<&DayCell> {
        self.real_cells().find(|cell| cell.day == day)
    }
}

impl IntoIterator for MonthGrid {
    type Item = DayCell;
    type IntoIter = std::vec::IntoIter<DayCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a DayCell;
    type IntoIter = std::slice::Iter<'a, DayCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Builds the grid for a `YYYY-MM` string with legacy pad numbering.
///
/// # Errors
/// Returns `CalendarError::InvalidArgument` when the input is not a valid
/// year-month.
pub fn build_month_grid(year_month: &str) -> Result<MonthGrid, CalendarError> {
    build_month_grid_with(year_month, &CalendarConfig::default())
}

/// Builds the grid for a `YYYY-MM` string using `config`.
///
/// # Errors
/// Returns `CalendarError::InvalidArgument` when the input is not a valid
/// year-month.
pub fn build_month_grid_with(
    year_month: &str,
    config: &CalendarConfig,
) -> Result<MonthGrid, CalendarError> {
    let parsed = year_month.parse::<YearMonth>().inspect_err(|error| {
        tracing::debug!(input = year_month, %error, "rejected year-month");
    })?;
    Ok(MonthGrid::build(parsed, config.pad_numbering))
}

/// Week index of the final cell, 0 for an empty grid.
pub fn week_count(grid: &[DayCell]) -> u8 {
    grid.last().map_or(0, DayCell::week_index)
}

/// The seven cells of `week_index` in Sunday-first order.
///
/// Slots with no matching cell are filled with `CellKind::Empty`. When two
/// cells claim a slot, a real day wins over a pad, otherwise the first one in
/// grid order is kept.
pub fn week_row(grid: &[DayCell], week_index: u8) -> [DayCell; 7] {
    let mut slots: [Option<&DayCell>; 7] = [None; 7];
    for cell in grid.iter().filter(|cell| cell.week_index == week_index) {
        let slot = &mut slots[usize::from(cell.day_of_week % DAYS_IN_WEEK)];
        let keep = slot.is_some_and(|kept| kept.is_real() || !cell.is_real());
        if !keep {
            *slot = Some(cell);
        }
    }

    let (year, month) = grid
        .first()
        .map_or((0, String::new()), |cell| (cell.year, cell.month.clone()));

    std::array::from_fn(|column| {
        slots[column].cloned().unwrap_or_else(|| {
            let day_of_week = u8::try_from(column).unwrap_or(SATURDAY);
            DayCell::placeholder(CellKind::Empty, year, month.clone(), day_of_week, week_index)
        })
    })
}
