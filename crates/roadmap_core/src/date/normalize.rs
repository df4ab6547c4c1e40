//! Lenient date-text normalization.
//!
//! # Responsibility
//! - Turn user-typed date text into a canonical `CalendarDate`.
//! - Classify failures so callers can apply the corrective fallback.
//!
//! # Invariants
//! - Blank input is a valid "no date" value, never an error.
//! - Two-digit years always expand to `20YY`.
//! - Never panics on arbitrary input.

use crate::model::date::CalendarDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MONTH_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})$").expect("valid month-first regex")
});
static YEAR_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,4})[-/](\d{1,2})[-/](\d{1,2})$").expect("valid year-first regex")
});

const TWO_DIGIT_YEAR_BASE: i32 = 2000;

/// Date text that could not be interpreted as a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
    /// Trimmed input text.
    pub input: String,
    /// Whether the input contains at least one digit.
    pub looks_like_date: bool,
}

impl InvalidDate {
    /// Corrective value for the field that produced this error.
    ///
    /// Digit-bearing input is replaced with `today`; other text keeps the
    /// prior value (`None`).
    pub fn fallback(&self, today: CalendarDate) -> Option<CalendarDate> {
        if self.looks_like_date {
            Some(today)
        } else {
            None
        }
    }
}

impl Display for InvalidDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`", self.input)
    }
}

impl Error for InvalidDate {}

/// Normalizes free-form date text.
///
/// Accepted shapes, tried in order:
/// - `M-D-Y` / `M/D/Y` with 1-2 digit month/day and 2-4 digit year;
/// - `Y-M-D` / `Y/M/D` with 2-4 digit year;
/// - strict `YYYY-MM-DD`.
///
/// Returns `Ok(None)` for blank input.
///
/// # Errors
/// - Returns `InvalidDate` when no shape matches or the extracted triple is
///   not a real calendar day.
pub fn normalize(input: &str) -> Result<Option<CalendarDate>, InvalidDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    parse_date_text(trimmed).map(Some).ok_or_else(|| InvalidDate {
        input: trimmed.to_string(),
        looks_like_date: trimmed.chars().any(|c| c.is_ascii_digit()),
    })
}

/// Normalizes `input` and renders the result as canonical text.
///
/// Blank input yields an empty string.
pub fn normalize_to_text(input: &str) -> Result<String, InvalidDate> {
    normalize(input).map(|date| date.map(|d| d.to_canonical()).unwrap_or_default())
}

fn parse_date_text(value: &str) -> Option<CalendarDate> {
    let (year, month, day) = if let Some(caps) = MONTH_FIRST_RE.captures(value) {
        let month = caps[1].parse::<u32>().ok()?;
        let day = caps[2].parse::<u32>().ok()?;
        let year = caps[3].parse::<i32>().ok()?;
        (expand_year(year), month, day)
    } else if let Some(caps) = YEAR_FIRST_RE.captures(value) {
        let year = caps[1].parse::<i32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        let day = caps[3].parse::<u32>().ok()?;
        (expand_year(year), month, day)
    } else {
        let date = CalendarDate::parse_canonical(value).ok()?;
        return Some(date);
    };

    CalendarDate::from_ymd(year, month, day).ok()
}

fn expand_year(year: i32) -> i32 {
    if year < 100 {
        year + TWO_DIGIT_YEAR_BASE
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, normalize_to_text};
    use crate::model::date::CalendarDate;

    #[test]
    fn blank_input_is_no_date() {
        assert_eq!(normalize(""), Ok(None));
        assert_eq!(normalize("   \t"), Ok(None));
        assert_eq!(normalize_to_text(" ").unwrap(), "");
    }

    #[test]
    fn accepts_month_first_and_year_first_shapes() {
        assert_eq!(normalize_to_text("03/07/2025").unwrap(), "2025-03-07");
        assert_eq!(normalize_to_text("2025/3/7").unwrap(), "2025-03-07");
        assert_eq!(normalize_to_text("3-7-25").unwrap(), "2025-03-07");
        assert_eq!(normalize_to_text("25-3-7").unwrap(), "2025-03-07");
        assert_eq!(normalize_to_text(" 2025-03-07 ").unwrap(), "2025-03-07");
    }

    #[test]
    fn two_digit_years_are_always_this_century() {
        assert_eq!(normalize_to_text("12/31/99").unwrap(), "2099-12-31");
    }

    #[test]
    fn three_digit_year_is_taken_literally() {
        assert_eq!(normalize_to_text("1/2/999").unwrap(), "0999-01-02");
    }

    #[test]
    fn impossible_dates_are_invalid_and_fall_back_to_today() {
        let today = CalendarDate::from_ymd(2026, 10, 16).unwrap();
        let err = normalize("02/30/2025").unwrap_err();
        assert!(err.looks_like_date);
        assert_eq!(err.fallback(today), Some(today));
    }

    #[test]
    fn wordy_text_is_invalid_without_fallback() {
        let today = CalendarDate::from_ymd(2026, 10, 16).unwrap();
        let err = normalize("not a date").unwrap_err();
        assert!(!err.looks_like_date);
        assert_eq!(err.fallback(today), None);
    }

    #[test]
    fn malformed_shapes_fall_through_and_fail() {
        assert!(normalize("2025-03").is_err());
        assert!(normalize("03.07.2025").is_err());
        assert!(normalize("2025-13-01").is_err());
        assert!(normalize("Q3 2025").unwrap_err().looks_like_date);
    }

    #[test]
    fn canonical_input_round_trips() {
        for text in ["2024-02-29", "2025-01-01", "2030-12-31"] {
            let date = normalize(text).unwrap().unwrap();
            assert_eq!(normalize_to_text(&date.to_canonical()).unwrap(), text);
        }
    }
}
