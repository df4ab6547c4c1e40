//! Document lifecycle service.
//!
//! # Responsibility
//! - Own the roadmap file path and its in-memory document.
//! - Run the save pipeline: float pass, `lastSaveDate` stamp, file write.
//!
//! # Invariants
//! - There is exactly one owner of the document; repositories borrow it.
//! - `save` never fails because of date content, only because of I/O.

use crate::document::{
    load_document, read_document, save_document, DocumentResult, LoadOutcome, RoadmapDocument,
};
use crate::model::date::CalendarDate;
use crate::model::section::Section;
use crate::repo::record_repo::JsonSectionRepository;
use crate::service::float_service::{float_document, FloatSummary};
use crate::service::record_service::RecordService;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Record key stamped on every product at save time.
pub const LAST_SAVE_DATE_KEY: &str = "lastSaveDate";

/// Owner of one roadmap document file.
pub struct DocumentService {
    path: PathBuf,
    document: RoadmapDocument,
}

/// What `open`/`reload` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenReport {
    pub created: bool,
    /// File was absent; only set by `open_read_only`.
    pub missing: bool,
    pub repaired_sections: Vec<Section>,
}

impl DocumentService {
    /// Loads (or creates) the document at `path`.
    pub fn open(path: impl Into<PathBuf>) -> DocumentResult<(Self, OpenReport)> {
        let path = path.into();
        let outcome = load_document(&path)?;
        let (document, report) = split_outcome(outcome);
        Ok((Self { path, document }, report))
    }

    /// Loads the document at `path` for reading; a missing file is an empty
    /// document and is not created. `save` still writes it.
    pub fn open_read_only(path: impl Into<PathBuf>) -> DocumentResult<(Self, OpenReport)> {
        let path = path.into();
        let outcome = read_document(&path)?;
        let (document, report) = split_outcome(outcome);
        Ok((Self { path, document }, report))
    }

    /// Wraps an in-memory document that will be saved to `path`.
    pub fn from_document(path: impl Into<PathBuf>, document: RoadmapDocument) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &RoadmapDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut RoadmapDocument {
        &mut self.document
    }

    /// Discards in-memory changes and re-reads the file.
    pub fn reload(&mut self) -> DocumentResult<OpenReport> {
        let outcome = load_document(&self.path)?;
        let (document, report) = split_outcome(outcome);
        self.document = document;
        Ok(report)
    }

    /// Record use-cases for one section, borrowing this document.
    pub fn records(&mut self, section: Section) -> RecordService<JsonSectionRepository<'_>> {
        RecordService::new(JsonSectionRepository::new(&mut self.document, section))
    }

    /// Floats every floatable item, stamps products and writes the file.
    pub fn save(&mut self, today: CalendarDate) -> DocumentResult<FloatSummary> {
        let summary = self.prepare_save(today);
        save_document(&self.path, &self.document)?;
        Ok(summary)
    }

    /// Runs the in-memory part of `save` without writing.
    pub fn prepare_save(&mut self, today: CalendarDate) -> FloatSummary {
        let summary = float_document(&mut self.document, today);
        for product in self.document.records_mut(Section::Products).iter_mut() {
            if let Some(map) = product.as_object_mut() {
                map.insert(
                    LAST_SAVE_DATE_KEY.to_string(),
                    Value::String(today.to_canonical()),
                );
            }
        }
        summary
    }
}

fn split_outcome(outcome: LoadOutcome) -> (RoadmapDocument, OpenReport) {
    (
        outcome.document,
        OpenReport {
            created: outcome.created,
            missing: outcome.missing,
            repaired_sections: outcome.repaired_sections,
        },
    )
}
