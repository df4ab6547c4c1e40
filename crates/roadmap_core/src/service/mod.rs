//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and date passes into use-case APIs.
//! - Keep UI/FFI layers decoupled from document storage details.

pub mod document_service;
pub mod float_service;
pub mod record_service;
