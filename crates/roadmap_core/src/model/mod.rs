//! Roadmap domain model.
//!
//! # Responsibility
//! - Define canonical value types used by date and document logic.
//! - Stay independent of any UI toolkit and of the storage format.
//!
//! # Invariants
//! - Dates are compared and stored in canonical `YYYY-MM-DD` form.
//! - Floatable items keep raw text so corrupt values can be healed later.

pub mod date;
pub mod float_range;
pub mod section;
