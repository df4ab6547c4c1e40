//! Record repository contracts and JSON-section implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over one section of the roadmap document.
//! - Generate prefix-based IDs for sections that have an ID scheme, and
//!   `PUR<n>` IDs for pursuits nested in funding opportunities.
//!
//! # Invariants
//! - Write paths require a JSON object with non-empty `id` and `name`.
//! - IDs are unique within a section.
//! - Read paths return records as stored; they never rewrite them.

use crate::document::RoadmapDocument;
use crate::model::section::{Section, PURSUIT_ID_SCHEME};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    NotFound { section: Section, id: String },
    DuplicateId { section: Section, id: String },
    MissingId,
    MissingName,
    InvalidRecord(String),
    NoIdScheme(Section),
    /// The highest stored numeric suffix leaves no next ID.
    IdSpaceExhausted(Section),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { section, id } => write!(f, "{section} record not found: {id}"),
            Self::DuplicateId { section, id } => {
                write!(f, "{section} record already exists: {id}")
            }
            Self::MissingId => write!(f, "record `id` is required"),
            Self::MissingName => write!(f, "record `name` is required"),
            Self::InvalidRecord(message) => write!(f, "invalid record: {message}"),
            Self::NoIdScheme(section) => {
                write!(f, "{section} records have no generated ID scheme")
            }
            Self::IdSpaceExhausted(section) => {
                write!(f, "{section} ID space is exhausted")
            }
        }
    }
}

impl Error for RepoError {}

/// Repository interface for record CRUD operations within one section.
pub trait RecordRepository {
    fn section(&self) -> Section;
    fn create_record(&mut self, record: Value) -> RepoResult<String>;
    fn update_record(&mut self, record: Value) -> RepoResult<()>;
    fn get_record(&self, id: &str) -> RepoResult<Option<Value>>;
    fn list_records(&self) -> RepoResult<Vec<Value>>;
    fn delete_record(&mut self, id: &str) -> RepoResult<Value>;
    fn next_id(&self) -> RepoResult<String>;
}

/// Repository over one section of a borrowed in-memory document.
pub struct JsonSectionRepository<'doc> {
    document: &'doc mut RoadmapDocument,
    section: Section,
}

impl<'doc> JsonSectionRepository<'doc> {
    pub fn new(document: &'doc mut RoadmapDocument, section: Section) -> Self {
        Self { document, section }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.document
            .records(self.section)
            .iter()
            .position(|record| record_id(record) == Some(id))
    }
}

impl RecordRepository for JsonSectionRepository<'_> {
    fn section(&self) -> Section {
        self.section
    }

    fn create_record(&mut self, record: Value) -> RepoResult<String> {
        let id = validate_record(&record)?;
        if self.position(&id).is_some() {
            return Err(RepoError::DuplicateId {
                section: self.section,
                id,
            });
        }

        self.document.records_mut(self.section).push(record);
        Ok(id)
    }

    fn update_record(&mut self, record: Value) -> RepoResult<()> {
        let id = validate_record(&record)?;
        let Some(index) = self.position(&id) else {
            return Err(RepoError::NotFound {
                section: self.section,
                id,
            });
        };

        self.document.records_mut(self.section)[index] = record;
        Ok(())
    }

    fn get_record(&self, id: &str) -> RepoResult<Option<Value>> {
        Ok(self
            .position(id)
            .map(|index| self.document.records(self.section)[index].clone()))
    }

    fn list_records(&self) -> RepoResult<Vec<Value>> {
        Ok(self.document.records(self.section).to_vec())
    }

    fn delete_record(&mut self, id: &str) -> RepoResult<Value> {
        let Some(index) = self.position(id) else {
            return Err(RepoError::NotFound {
                section: self.section,
                id: id.to_string(),
            });
        };
        Ok(self.document.records_mut(self.section).remove(index))
    }

    fn next_id(&self) -> RepoResult<String> {
        let scheme = self
            .section
            .id_scheme()
            .ok_or(RepoError::NoIdScheme(self.section))?;
        scheme
            .next_after(self.document.records(self.section).iter().filter_map(record_id))
            .ok_or(RepoError::IdSpaceExhausted(self.section))
    }
}

/// Returns the string `id` of a record, if any.
pub fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// Returns the string `name` of a record, if any.
pub fn record_name(record: &Value) -> Option<&str> {
    record.get("name").and_then(Value::as_str)
}

/// Key of the pursuit list on a funding opportunity.
pub const PURSUITS_KEY: &str = "pursuits";
/// ID key on each pursuit.
pub const PURSUIT_ID_KEY: &str = "pursuitID";

/// Next `PUR<n>` ID for a new pursuit on `opportunity`.
pub fn next_pursuit_id(opportunity: &Value) -> RepoResult<String> {
    PURSUIT_ID_SCHEME
        .next_after(pursuits(opportunity).iter().filter_map(pursuit_id))
        .ok_or(RepoError::IdSpaceExhausted(Section::FundingOpps))
}

/// Gives every pursuit object without a non-blank `pursuitID` a fresh one,
/// in list order. Returns the assigned IDs.
pub fn assign_pursuit_ids(opportunity: &mut Value) -> RepoResult<Vec<String>> {
    let mut assigned = Vec::new();
    let Some(list) = opportunity
        .get_mut(PURSUITS_KEY)
        .and_then(Value::as_array_mut)
    else {
        return Ok(assigned);
    };

    for index in 0..list.len() {
        let needs_id = list[index].is_object()
            && !matches!(list[index].get(PURSUIT_ID_KEY), Some(Value::String(id)) if !id.trim().is_empty());
        if !needs_id {
            continue;
        }
        let id = PURSUIT_ID_SCHEME
            .next_after(list.iter().filter_map(pursuit_id))
            .ok_or(RepoError::IdSpaceExhausted(Section::FundingOpps))?;
        if let Some(map) = list[index].as_object_mut() {
            map.insert(PURSUIT_ID_KEY.to_string(), Value::String(id.clone()));
        }
        assigned.push(id);
    }
    Ok(assigned)
}

fn pursuits(opportunity: &Value) -> &[Value] {
    opportunity
        .get(PURSUITS_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn pursuit_id(pursuit: &Value) -> Option<&str> {
    pursuit.get(PURSUIT_ID_KEY).and_then(Value::as_str)
}

fn validate_record(record: &Value) -> RepoResult<String> {
    let map: &Map<String, Value> = record
        .as_object()
        .ok_or_else(|| RepoError::InvalidRecord("record must be a JSON object".to_string()))?;

    let id = match map.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => return Err(RepoError::MissingId),
    };
    match map.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        _ => return Err(RepoError::MissingName),
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::{assign_pursuit_ids, next_pursuit_id, RepoError};
    use serde_json::json;

    #[test]
    fn next_pursuit_id_uses_highest_suffix() {
        let opportunity = json!({
            "id": "FO-1",
            "pursuits": [{"pursuitID": "PUR2"}, {"pursuitID": "PUR7"}, {"pursuitID": "draft"}]
        });
        assert_eq!(next_pursuit_id(&opportunity).unwrap(), "PUR8");
        assert_eq!(next_pursuit_id(&json!({"id": "FO-2"})).unwrap(), "PUR1");
    }

    #[test]
    fn assign_pursuit_ids_fills_blanks_in_order() {
        let mut opportunity = json!({
            "pursuits": [
                {"title": "Phase I"},
                {"pursuitID": "PUR4", "title": "Phase II"},
                {"pursuitID": "  ", "title": "Phase III"},
                "not an object"
            ]
        });
        let assigned = assign_pursuit_ids(&mut opportunity).unwrap();
        assert_eq!(assigned, vec!["PUR5".to_string(), "PUR6".to_string()]);
        assert_eq!(opportunity["pursuits"][0]["pursuitID"], "PUR5");
        assert_eq!(opportunity["pursuits"][1]["pursuitID"], "PUR4");
        assert_eq!(opportunity["pursuits"][2]["pursuitID"], "PUR6");
        assert_eq!(opportunity["pursuits"][3], "not an object");
    }

    #[test]
    fn pursuit_ids_report_exhaustion() {
        let opportunity = json!({"pursuits": [{"pursuitID": "PUR18446744073709551615"}]});
        assert!(matches!(
            next_pursuit_id(&opportunity),
            Err(RepoError::IdSpaceExhausted(_))
        ));
    }
}
