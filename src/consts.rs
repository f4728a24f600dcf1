/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Columns in a grid row
pub const DAYS_IN_WEEK: u8 = 7;
/// Column of the first grid slot
pub const SUNDAY: u8 = 0;
/// Column of the last grid slot; a new week row starts after it
pub const SATURDAY: u8 = 6;

/// Lowercase English weekday names, indexed by Sunday-first column
pub const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Year-month component separator (`YYYY-MM`)
pub const DATE_SEPARATOR: char = '-';

/// `chrono` pattern for `YYYY-MM-DD`
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// `chrono` pattern for `YYYYMMDD`
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";
/// `chrono` pattern for long-form dates such as `March 5, 2025`
pub const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Rendered in place of a date that could not be parsed
pub const DISPLAY_FALLBACK: &str = "--";
