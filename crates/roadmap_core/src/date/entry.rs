//! Toolkit-free model of a date text field.
//!
//! # Responsibility
//! - Hold the visible text of one date field.
//! - Apply normalization on default assignment and on edit completion.
//!
//! # Invariants
//! - After a successful commit the text is canonical (or empty).
//! - After a failed commit the text is either `today` (digit-bearing input)
//!   or exactly what the user typed.

use crate::date::normalize::{normalize, InvalidDate};
use crate::model::date::CalendarDate;

/// Date text field state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateEntry {
    text: String,
}

impl DateEntry {
    /// Creates a field with a default value, normalizing it eagerly.
    ///
    /// An invalid default is corrected the same way a user edit would be.
    pub fn new(initial: impl Into<String>, today: CalendarDate) -> Self {
        let mut entry = Self {
            text: initial.into(),
        };
        let _ = entry.commit(today);
        entry
    }

    /// Creates an empty field without normalization.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw visible text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Parsed value; `None` while the text is blank or not yet canonical
    /// (mid-edit).
    pub fn date(&self) -> Option<CalendarDate> {
        CalendarDate::parse_canonical(&self.text).ok()
    }

    /// Replaces the visible text without normalizing (keystroke editing).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces the text and normalizes it immediately.
    pub fn set_date(&mut self, text: impl Into<String>, today: CalendarDate) -> Result<(), InvalidDate> {
        self.text = text.into();
        self.commit(today)
    }

    /// Sets the field to `today`.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.text = today.to_canonical();
    }

    /// Edit-completion hook (focus lost or equivalent).
    ///
    /// # Errors
    /// - Returns `InvalidDate` after applying the corrective fallback, so the
    ///   caller can surface a warning. The field is always left usable.
    pub fn commit(&mut self, today: CalendarDate) -> Result<(), InvalidDate> {
        match normalize(&self.text) {
            Ok(Some(date)) => {
                self.text = date.to_canonical();
                Ok(())
            }
            Ok(None) => {
                self.text.clear();
                Ok(())
            }
            Err(err) => {
                if let Some(fallback) = err.fallback(today) {
                    self.text = fallback.to_canonical();
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DateEntry;
    use crate::model::date::CalendarDate;

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2026, 10, 16).unwrap()
    }

    #[test]
    fn default_value_is_normalized_eagerly() {
        let entry = DateEntry::new("3/7/2025", today());
        assert_eq!(entry.text(), "2025-03-07");
    }

    #[test]
    fn blank_default_stays_blank() {
        let entry = DateEntry::new("  ", today());
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn commit_replaces_digit_garbage_with_today() {
        let mut entry = DateEntry::empty();
        entry.set_text("02/30/2025");
        assert!(entry.commit(today()).is_err());
        assert_eq!(entry.text(), "2026-10-16");
    }

    #[test]
    fn commit_keeps_wordy_text() {
        let mut entry = DateEntry::empty();
        entry.set_text("tbd");
        let err = entry.commit(today()).unwrap_err();
        assert!(!err.looks_like_date);
        assert_eq!(entry.text(), "tbd");
    }

    #[test]
    fn set_today_and_set_date() {
        let mut entry = DateEntry::empty();
        entry.set_today(today());
        assert_eq!(entry.text(), "2026-10-16");
        entry.set_date("2025/1/2", today()).unwrap();
        assert_eq!(entry.text(), "2025-01-02");
    }

    #[test]
    fn date_is_parsed_only_for_committed_text() {
        let mut entry = DateEntry::new("2025-03-07", today());
        assert_eq!(entry.date(), CalendarDate::from_ymd(2025, 3, 7).ok());

        entry.set_text("3/8/02");
        assert_eq!(entry.date(), None);
        entry.commit(today()).unwrap();
        assert_eq!(entry.date(), CalendarDate::from_ymd(2002, 3, 8).ok());

        entry.set_text("");
        assert_eq!(entry.date(), None);
    }
}
