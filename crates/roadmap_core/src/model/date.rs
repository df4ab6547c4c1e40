//! Calendar date value type.
//!
//! # Responsibility
//! - Hold one valid Gregorian date with a canonical `YYYY-MM-DD` text form.
//! - Provide strict parsing and day-count arithmetic for date floating.
//!
//! # Invariants
//! - A constructed `CalendarDate` is always a real calendar day.
//! - `Display` and serde always emit zero-padded `YYYY-MM-DD`.
//!
//! # See also
//! - crate::date::normalize for lenient user-text parsing.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// strftime pattern for the canonical date text.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// One calendar day, stored and compared in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

/// Error returned when a triple or strict text is not a real calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeError {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Display for DateRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no such calendar date: year={} month={} day={}",
            self.year, self.month, self.day
        )
    }
}

impl Error for DateRangeError {}

/// Error returned by strict canonical parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalParseError(pub String);

impl Display for CanonicalParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a YYYY-MM-DD date", self.0)
    }
}

impl Error for CanonicalParseError {}

fn is_canonical_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl CalendarDate {
    /// Builds a date from a year/month/day triple.
    ///
    /// # Errors
    /// - Returns `DateRangeError` for out-of-range month/day or days that do
    ///   not exist in that month (e.g. Feb 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateRangeError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateRangeError { year, month, day })
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Strict `YYYY-MM-DD` parse: exactly four, two and two ASCII digits.
    /// Signs, whitespace and unpadded fields are rejected.
    pub fn parse_canonical(value: &str) -> Result<Self, CanonicalParseError> {
        if !is_canonical_shape(value) {
            return Err(CanonicalParseError(value.to_string()));
        }
        NaiveDate::parse_from_str(value, CANONICAL_DATE_FORMAT)
            .map(Self)
            .map_err(|_| CanonicalParseError(value.to_string()))
    }

    /// Whole days from `earlier` to `self`. Negative when `self` precedes it.
    pub fn days_since(&self, earlier: CalendarDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// Returns this date moved by `days`, or `None` on calendar overflow.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    /// Canonical text form.
    pub fn to_canonical(&self) -> String {
        self.0.format(CANONICAL_DATE_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = CanonicalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_canonical(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_canonical())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse_canonical(&raw).map_err(serde::de::Error::custom)
    }
}
