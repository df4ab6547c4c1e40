//! Record use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for front ends over one document section.
//! - Fill generated IDs (records and funding pursuits) and normalize item
//!   dates before writes.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Invalid item dates never abort a write; they come back as warnings.

use crate::model::date::CalendarDate;
use crate::model::section::Section;
use crate::repo::record_repo::{
    assign_pursuit_ids, next_pursuit_id, RecordRepository, RepoError, RepoResult,
};
use crate::search::substring::{search_values, SearchHit, SearchQuery};
use crate::service::float_service::{sanitize_record_dates, DateWarning};
use log::info;
use serde_json::Value;

/// Result of a create/update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWrite {
    pub id: String,
    pub date_warnings: Vec<DateWarning>,
}

/// Use-case service wrapper for record CRUD operations.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a record, generating its ID when the section has a scheme and
    /// the record has none.
    ///
    /// # Contract
    /// - Item dates are normalized against `today` before persistence.
    /// - Returns the stored ID plus any date warnings.
    pub fn create_record(&mut self, mut record: Value, today: CalendarDate) -> RepoResult<RecordWrite> {
        let needs_id = !matches!(record.get("id"), Some(Value::String(id)) if !id.trim().is_empty());
        if needs_id && self.repo.section().id_scheme().is_some() {
            let id = self.repo.next_id()?;
            if let Some(map) = record.as_object_mut() {
                map.insert("id".to_string(), Value::String(id));
            }
        }

        self.fill_pursuit_ids(&mut record)?;
        let date_warnings = sanitize_record_dates(&mut record, today);
        let id = self.repo.create_record(record)?;
        info!(
            "event=record_create module=service status=ok section={} id={}",
            self.repo.section(),
            id
        );
        Ok(RecordWrite { id, date_warnings })
    }

    /// Replaces an existing record by ID.
    pub fn update_record(&mut self, mut record: Value, today: CalendarDate) -> RepoResult<RecordWrite> {
        self.fill_pursuit_ids(&mut record)?;
        let date_warnings = sanitize_record_dates(&mut record, today);
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.repo.update_record(record)?;
        info!(
            "event=record_update module=service status=ok section={} id={}",
            self.repo.section(),
            id
        );
        Ok(RecordWrite { id, date_warnings })
    }

    pub fn get_record(&self, id: &str) -> RepoResult<Option<Value>> {
        self.repo.get_record(id)
    }

    pub fn list_records(&self) -> RepoResult<Vec<Value>> {
        self.repo.list_records()
    }

    /// Deletes a record and returns what was removed.
    pub fn delete_record(&mut self, id: &str) -> RepoResult<Value> {
        let removed = self.repo.delete_record(id)?;
        info!(
            "event=record_delete module=service status=ok section={} id={}",
            self.repo.section(),
            id
        );
        Ok(removed)
    }

    /// Next generated ID for this section.
    pub fn next_id(&self) -> RepoResult<String> {
        self.repo.next_id()
    }

    /// Next `PUR<n>` ID for a pursuit on the funding opportunity `opportunity_id`.
    pub fn next_pursuit_id(&self, opportunity_id: &str) -> RepoResult<String> {
        let section = self.repo.section();
        if section != Section::FundingOpps {
            return Err(RepoError::NoIdScheme(section));
        }
        let opportunity = self
            .repo
            .get_record(opportunity_id)?
            .ok_or_else(|| RepoError::NotFound {
                section,
                id: opportunity_id.to_string(),
            })?;
        next_pursuit_id(&opportunity)
    }

    /// Substring search over this section.
    pub fn search(&self, query: &SearchQuery) -> RepoResult<Vec<SearchHit>> {
        let records = self.repo.list_records()?;
        Ok(search_values(&records, query))
    }

    fn fill_pursuit_ids(&self, record: &mut Value) -> RepoResult<()> {
        if self.repo.section() != Section::FundingOpps {
            return Ok(());
        }
        let assigned = assign_pursuit_ids(record)?;
        if !assigned.is_empty() {
            info!(
                "event=pursuit_ids_assigned module=service status=ok count={}",
                assigned.len()
            );
        }
        Ok(())
    }
}
