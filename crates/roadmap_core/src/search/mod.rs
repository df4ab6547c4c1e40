//! Search module entry points.
//!
//! # Responsibility
//! - Provide record lookup by free text for list/tree views.

pub mod substring;
