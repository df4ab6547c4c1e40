//! Core domain logic for the roadmap manager.
//! This crate is the single source of truth for date and document invariants.

pub mod config;
pub mod date;
pub mod document;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::RoadmapConfig;
pub use date::entry::DateEntry;
pub use date::float::{apply_float, float_in_place, FloatOutcome};
pub use date::normalize::{normalize, normalize_to_text, InvalidDate};
pub use document::{
    load_document, read_document, save_document, DocumentError, DocumentResult, RoadmapDocument,
};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::date::CalendarDate;
pub use model::float_range::{DateSlots, FieldNaming, FloatableDateRange};
pub use model::section::Section;
pub use repo::record_repo::{JsonSectionRepository, RecordRepository, RepoError, RepoResult};
pub use search::substring::{search_records, SearchHit, SearchQuery};
pub use service::document_service::{DocumentService, OpenReport};
pub use service::float_service::{float_document, DateWarning, FloatSummary};
pub use service::record_service::{RecordService, RecordWrite};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
