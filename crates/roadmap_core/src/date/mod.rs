//! Date normalization and roadmap date floating.
//!
//! # Responsibility
//! - Parse loosely formatted user date text into canonical form.
//! - Keep floating roadmap items anchored relative to the current day.
//!
//! # Invariants
//! - Everything here is pure: no I/O, no clock reads (callers pass `today`).

pub mod entry;
pub mod float;
pub mod normalize;
