use roadmap_core::{apply_float, float_in_place, CalendarDate, FloatOutcome, FloatableDateRange};

fn day(text: &str) -> CalendarDate {
    CalendarDate::parse_canonical(text).unwrap()
}

#[test]
fn disabled_float_changes_nothing() {
    let range =
        FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(false, "2025-01-01");
    let floated = apply_float(&range, day("2025-06-01"));
    assert_eq!(floated.start(), Some("2025-02-01"));
    assert_eq!(floated.end(), Some("2025-02-15"));
    assert_eq!(floated.float_anchor, "2025-01-01");
}

#[test]
fn first_activation_only_anchors() {
    let mut range = FloatableDateRange::single("2025-05-05").with_float(true, "");
    assert_eq!(
        float_in_place(&mut range, day("2025-01-11")),
        FloatOutcome::Anchored
    );
    assert_eq!(range.date(), Some("2025-05-05"));
    assert_eq!(range.float_anchor, "2025-01-11");
}

#[test]
fn ten_days_elapsed_shift_both_ends() {
    let range =
        FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(true, "2025-01-01");
    let floated = apply_float(&range, day("2025-01-11"));
    assert_eq!(floated.start(), Some("2025-02-11"));
    assert_eq!(floated.end(), Some("2025-02-25"));
    assert_eq!(floated.float_anchor, "2025-01-11");
}

#[test]
fn applying_twice_on_one_day_equals_once() {
    let range =
        FloatableDateRange::range("2025-02-01", "2025-02-15").with_float(true, "2024-12-01");
    let today = day("2025-01-11");
    let once = apply_float(&range, today);
    assert_eq!(apply_float(&once, today), once);
}

#[test]
fn shifting_across_a_leap_day() {
    let range = FloatableDateRange::single("2024-02-28").with_float(true, "2024-01-01");
    let floated = apply_float(&range, day("2024-01-03"));
    assert_eq!(floated.date(), Some("2024-03-01"));
}

#[test]
fn corrupt_anchor_is_reset_without_error() {
    let range = FloatableDateRange::range("2025-02-01", "").with_float(true, "13/45/2025");
    let floated = apply_float(&range, day("2025-01-11"));
    assert_eq!(floated.start(), Some("2025-02-01"));
    assert_eq!(floated.float_anchor, "2025-01-11");
}
