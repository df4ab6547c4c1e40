//! JSON document storage and the in-memory document handle.
//!
//! # Responsibility
//! - Load and save the whole roadmap document as one JSON file.
//! - Expose section arrays through an explicit `RoadmapDocument` handle.
//!
//! # Invariants
//! - A loaded document always has all six section arrays.
//! - Unknown top-level keys survive load/save untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod handle;
mod store;

pub use handle::RoadmapDocument;
pub use store::{load_document, read_document, save_document, LoadOutcome};

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug)]
pub enum DocumentError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Document root is valid JSON but not an object.
    InvalidRoot(PathBuf),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "{}: invalid JSON: {source}", path.display())
            }
            Self::InvalidRoot(path) => {
                write!(f, "{}: document root must be a JSON object", path.display())
            }
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidRoot(_) => None,
        }
    }
}
