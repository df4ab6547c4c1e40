//! Repository layer abstractions over the roadmap document.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate JSON array manipulation from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`)
//!   instead of silently ignoring bad requests.

pub mod record_repo;
