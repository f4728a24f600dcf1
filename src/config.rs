use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{CalendarError, DISPLAY_FALLBACK, MonthGrid, build_month_grid_with, format_for_display_or};

/// How pad cells are assigned a `day_of_week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadNumbering {
    /// Leading pads count 1, 2, 3... regardless of the column they sit in.
    /// Existing attendance screens key off this numbering.
    #[default]
    Legacy,
    /// Every pad carries the column it actually occupies.
    Calendar,
}

/// Settings for building and rendering grids.
///
/// Read from TOML, every key optional:
///
/// ```toml
/// pad_numbering = "calendar"
/// display_fallback = "n/a"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub pad_numbering:    PadNumbering,
    /// Shown by `format_for_display` when a date cannot be parsed.
    pub display_fallback: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            pad_numbering:    PadNumbering::default(),
            display_fallback: DISPLAY_FALLBACK.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing calendar config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CalendarConfig {
    /// # Errors
    /// Returns `ConfigError::Parse` for invalid TOML, unknown keys, or an
    /// unknown `pad_numbering`.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        tracing::info!(
            pad_numbering = ?config.pad_numbering,
            display_fallback = %config.display_fallback,
            "loaded calendar config"
        );
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Like `load`, but falls back to defaults when the file is missing or bad.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|error| {
            tracing::warn!(%error, "using default calendar config");
            Self::default()
        })
    }

    /// # Errors
    /// Returns `CalendarError::InvalidArgument` when `year_month` is not a
    /// valid `YYYY-MM`.
    pub fn build_grid(&self, year_month: &str) -> Result<MonthGrid, CalendarError> {
        build_month_grid_with(year_month, self)
    }

    pub fn format_for_display(&self, iso: &str) -> String {
        format_for_display_or(iso, &self.display_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.pad_numbering, PadNumbering::Legacy);
        assert_eq!(config.display_fallback, "--");
        assert_eq!(CalendarConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_from_toml_str() {
        let config = CalendarConfig::from_toml_str(
            r#"
pad_numbering = "calendar"
display_fallback = "n/a"
"#,
        )
        .unwrap();
        assert_eq!(config.pad_numbering, PadNumbering::Calendar);
        assert_eq!(config.format_for_display(""), "n/a");
        assert_eq!(config.format_for_display("2025-03-05"), "March 5, 2025");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = CalendarConfig::from_toml_str(r#"display_fallback = "?""#).unwrap();
        assert_eq!(config.pad_numbering, PadNumbering::Legacy);
        assert_eq!(config.display_fallback, "?");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CalendarConfig::from_toml_str(r#"pad_numbering = "monday_first""#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CalendarConfig::from_toml_str("week_start = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"pad_numbering = "calendar""#).unwrap();

        let config = CalendarConfig::load(file.path()).unwrap();
        assert_eq!(config.pad_numbering, PadNumbering::Calendar);

        let grid = config.build_grid("2024-02").unwrap();
        assert_eq!(grid[0].day_of_week(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.toml");

        let err = CalendarConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("reading "));

        assert_eq!(CalendarConfig::load_or_default(&path), CalendarConfig::default());
    }

    #[test]
    fn test_build_grid_rejects_invalid_input() {
        let config = CalendarConfig::default();
        assert!(matches!(
            config.build_grid("2025-13"),
            Err(CalendarError::InvalidArgument(_))
        ));
    }
}
