//! Flutter bridge for the roadmap core.

pub mod api;
