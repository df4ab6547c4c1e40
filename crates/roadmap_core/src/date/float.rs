//! Roadmap date floating.
//!
//! # Responsibility
//! - Advance the dates of floating items by the whole days elapsed since
//!   their anchor, then re-anchor them to today.
//!
//! # Invariants
//! - Disabled or dateless ranges are never modified.
//! - The anchor always equals `today` after a float pass on an enabled,
//!   dated range.
//! - Two passes on the same day shift at most once.
//! - Corrupt anchors heal silently; no error leaves this module.

use crate::date::normalize::normalize;
use crate::model::date::CalendarDate;
use crate::model::float_range::FloatableDateRange;

/// What a float pass did to one range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloatOutcome {
    /// Floating is off for this item.
    Disabled,
    /// Floating is on but no date slot is populated.
    NoDates,
    /// First activation: anchor set, dates untouched.
    Anchored,
    /// Anchor could not be parsed and was reset to today.
    Healed { corrupt_anchor: String },
    /// Anchor was today or in the future; only re-anchored.
    Unchanged,
    /// Dates moved forward by `days`.
    Shifted {
        days: i64,
        /// Slots whose text could not be parsed and were left as-is.
        skipped_slots: Vec<String>,
    },
}

/// Returns a copy of `range` with floating applied for `today`.
pub fn apply_float(range: &FloatableDateRange, today: CalendarDate) -> FloatableDateRange {
    let mut floated = range.clone();
    float_in_place(&mut floated, today);
    floated
}

/// Applies floating to `range` in place and reports what happened.
pub fn float_in_place(range: &mut FloatableDateRange, today: CalendarDate) -> FloatOutcome {
    if !range.float_enabled {
        return FloatOutcome::Disabled;
    }
    if !range.slots.has_any() {
        return FloatOutcome::NoDates;
    }

    let anchor_text = range.float_anchor.trim().to_string();
    let today_text = today.to_canonical();

    if anchor_text.is_empty() {
        range.float_anchor = today_text;
        return FloatOutcome::Anchored;
    }

    let anchor = match CalendarDate::parse_canonical(&anchor_text) {
        Ok(anchor) => anchor,
        Err(_) => {
            range.float_anchor = today_text;
            return FloatOutcome::Healed {
                corrupt_anchor: anchor_text,
            };
        }
    };

    let days = today.days_since(anchor);
    range.float_anchor = today_text;
    if days <= 0 {
        return FloatOutcome::Unchanged;
    }

    let mut skipped_slots = Vec::new();
    for slot in range.slots.slots_mut() {
        if slot.trim().is_empty() {
            continue;
        }
        match normalize(slot).ok().flatten().and_then(|d| d.add_days(days)) {
            Some(shifted) => *slot = shifted.to_canonical(),
            None => skipped_slots.push(slot.clone()),
        }
    }

    FloatOutcome::Shifted {
        days,
        skipped_slots,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_float, float_in_place, FloatOutcome};
    use crate::model::date::CalendarDate;
    use crate::model::float_range::FloatableDateRange;

    fn day(text: &str) -> CalendarDate {
        CalendarDate::parse_canonical(text).unwrap()
    }

    #[test]
    fn disabled_range_is_untouched() {
        let range = FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(false, "2025-01-01");
        assert_eq!(apply_float(&range, day("2025-03-01")), range);
    }

    #[test]
    fn dateless_range_does_not_get_anchored() {
        let mut range = FloatableDateRange::range("", " ").with_float(true, "");
        assert_eq!(float_in_place(&mut range, day("2025-03-01")), FloatOutcome::NoDates);
        assert!(range.float_anchor.is_empty());
    }

    #[test]
    fn first_activation_sets_anchor_only() {
        let range = FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(true, "");
        let floated = apply_float(&range, day("2025-01-11"));
        assert_eq!(floated.start(), Some("2025-02-01"));
        assert_eq!(floated.end(), Some("2025-02-15"));
        assert_eq!(floated.float_anchor, "2025-01-11");
    }

    #[test]
    fn shifts_by_elapsed_days_and_reanchors() {
        let range =
            FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(true, "2025-01-01");
        let floated = apply_float(&range, day("2025-01-11"));
        assert_eq!(floated.start(), Some("2025-02-11"));
        assert_eq!(floated.end(), Some("2025-02-25"));
        assert_eq!(floated.float_anchor, "2025-01-11");
    }

    #[test]
    fn same_day_repeat_does_not_double_shift() {
        let range =
            FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(true, "2025-01-01");
        let once = apply_float(&range, day("2025-01-11"));
        let twice = apply_float(&once, day("2025-01-11"));
        assert_eq!(once, twice);
    }

    #[test]
    fn clock_skew_only_reanchors() {
        let mut range = FloatableDateRange::single("2025-06-01").with_float(true, "2025-05-10");
        let outcome = float_in_place(&mut range, day("2025-05-01"));
        assert_eq!(outcome, FloatOutcome::Unchanged);
        assert_eq!(range.date(), Some("2025-06-01"));
        assert_eq!(range.float_anchor, "2025-05-01");
    }

    #[test]
    fn corrupt_anchor_heals_without_shift() {
        let mut range = FloatableDateRange::single("2025-06-01").with_float(true, "yesterday-ish");
        let outcome = float_in_place(&mut range, day("2025-05-01"));
        assert_eq!(
            outcome,
            FloatOutcome::Healed {
                corrupt_anchor: "yesterday-ish".to_string()
            }
        );
        assert_eq!(range.date(), Some("2025-06-01"));
        assert_eq!(range.float_anchor, "2025-05-01");
    }

    #[test]
    fn single_date_and_partial_ranges_shift() {
        let milestone = FloatableDateRange::single("2025-12-30").with_float(true, "2025-01-01");
        assert_eq!(
            apply_float(&milestone, day("2025-01-04")).date(),
            Some("2026-01-02")
        );

        let open_ended = FloatableDateRange::range("3/1/2025", "").with_float(true, "2025-01-01");
        let floated = apply_float(&open_ended, day("2025-01-02"));
        assert_eq!(floated.start(), Some("2025-03-02"));
        assert_eq!(floated.end(), Some(""));
    }

    #[test]
    fn unparseable_slot_is_reported_and_kept() {
        let mut range = FloatableDateRange::range("2025-02-01", "soon").with_float(true, "2025-01-01");
        let outcome = float_in_place(&mut range, day("2025-01-03"));
        assert_eq!(
            outcome,
            FloatOutcome::Shifted {
                days: 2,
                skipped_slots: vec!["soon".to_string()]
            }
        );
        assert_eq!(range.start(), Some("2025-02-03"));
        assert_eq!(range.end(), Some("soon"));
    }
}
