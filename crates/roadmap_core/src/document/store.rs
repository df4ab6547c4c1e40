//! Whole-file JSON load/save.
//!
//! # Responsibility
//! - Read the roadmap JSON file into a `RoadmapDocument`, repairing
//!   missing sections.
//! - Create a fresh document file when none exists yet, unless the caller
//!   only reads (`read_document`).
//! - Write the document back as pretty-printed JSON.
//!
//! # Invariants
//! - A successful load never returns a document without all sections.
//! - Save creates missing parent directories.

use super::{DocumentError, DocumentResult, RoadmapDocument};
use crate::model::section::Section;
use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Result of loading a document file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub document: RoadmapDocument,
    /// `true` when the file did not exist and was created with empty sections.
    pub created: bool,
    /// `true` when the file did not exist; `read_document` leaves it absent.
    pub missing: bool,
    /// Sections that were missing or not arrays and have been reset.
    pub repaired_sections: Vec<Section>,
}

/// Loads the roadmap document at `path`.
///
/// # Side effects
/// - Creates the file (and parent directories) with an empty document when
///   it does not exist.
/// - Emits `document_load` logging events with duration and status.
///
/// # Errors
/// - `DocumentError::Io` for read/create failures.
/// - `DocumentError::Json` for unparseable content.
/// - `DocumentError::InvalidRoot` when the root is not an object.
pub fn load_document(path: impl AsRef<Path>) -> DocumentResult<LoadOutcome> {
    load(path.as_ref(), true)
}

/// Loads the roadmap document at `path` without touching the filesystem.
///
/// A missing file yields an empty in-memory document with `missing = true`;
/// nothing is created.
///
/// # Errors
/// Same as `load_document`, minus create failures.
pub fn read_document(path: impl AsRef<Path>) -> DocumentResult<LoadOutcome> {
    load(path.as_ref(), false)
}

fn load(path: &Path, create_if_missing: bool) -> DocumentResult<LoadOutcome> {
    let started_at = Instant::now();
    info!("event=document_load module=document status=start");

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let document = RoadmapDocument::new();
            if create_if_missing {
                save_document(path, &document)?;
            }
            info!(
                "event=document_load module=document status=ok missing=true created={} duration_ms={}",
                create_if_missing,
                started_at.elapsed().as_millis()
            );
            return Ok(LoadOutcome {
                document,
                created: create_if_missing,
                missing: true,
                repaired_sections: Vec::new(),
            });
        }
        Err(err) => {
            error!(
                "event=document_load module=document status=error error_code=read_failed error={}",
                err
            );
            return Err(DocumentError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|err| {
        error!(
            "event=document_load module=document status=error error_code=invalid_json error={}",
            err
        );
        DocumentError::Json {
            path: path.to_path_buf(),
            source: err,
        }
    })?;

    let Some((document, repaired_sections)) = RoadmapDocument::from_value(value) else {
        error!("event=document_load module=document status=error error_code=invalid_root");
        return Err(DocumentError::InvalidRoot(path.to_path_buf()));
    };

    if !repaired_sections.is_empty() {
        warn!(
            "event=document_repair module=document status=ok sections={}",
            repaired_sections
                .iter()
                .map(Section::key)
                .collect::<Vec<_>>()
                .join(",")
        );
    }
    info!(
        "event=document_load module=document status=ok created=false records={} duration_ms={}",
        document.record_count(),
        started_at.elapsed().as_millis()
    );

    Ok(LoadOutcome {
        document,
        created: false,
        missing: false,
        repaired_sections,
    })
}

/// Writes `document` to `path` as pretty-printed JSON.
///
/// # Errors
/// - `DocumentError::Io` when the directory or file cannot be written.
/// - `DocumentError::Json` if serialization fails.
pub fn save_document(path: impl AsRef<Path>, document: &RoadmapDocument) -> DocumentResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let io_error = |source: std::io::Error| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let body = serde_json::to_string_pretty(&document.to_value()).map_err(|err| {
        DocumentError::Json {
            path: path.to_path_buf(),
            source: err,
        }
    })?;

    if let Err(err) = fs::write(path, body) {
        error!(
            "event=document_save module=document status=error error_code=write_failed error={}",
            err
        );
        return Err(io_error(err));
    }

    info!(
        "event=document_save module=document status=ok records={} duration_ms={}",
        document.record_count(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}
