//! Case-insensitive substring search over section records.
//!
//! # Invariants
//! - Matching only looks at string fields; nested arrays are not searched.
//! - Result order follows document order.
//! - A blank term matches every record (the "clear search" listing).

use crate::document::RoadmapDocument;
use crate::model::section::Section;
use crate::repo::record_repo::{record_id, record_name};
use serde::Serialize;
use serde_json::Value;

const DEFAULT_SEARCH_LIMIT: u32 = 50;
const MAX_SEARCH_LIMIT: u32 = 200;

/// Substring search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Restrict matching to these top-level keys; all string fields when `None`.
    pub fields: Option<Vec<String>>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// One matching record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    /// First field that matched; `None` for blank-term listings.
    pub matched_field: Option<String>,
}

/// Applies default and cap to a requested limit.
pub fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => DEFAULT_SEARCH_LIMIT,
        Some(value) if value > MAX_SEARCH_LIMIT => MAX_SEARCH_LIMIT,
        Some(value) => value,
    }
}

/// Searches one section of `document`.
pub fn search_records(
    document: &RoadmapDocument,
    section: Section,
    query: &SearchQuery,
) -> Vec<SearchHit> {
    search_values(document.records(section), query)
}

/// Searches an already-loaded record slice.
pub fn search_values(records: &[Value], query: &SearchQuery) -> Vec<SearchHit> {
    let needle = query.text.trim().to_lowercase();
    let limit = normalize_search_limit(query.limit) as usize;

    records
        .iter()
        .filter_map(|record| {
            let map = record.as_object()?;
            let matched_field = if needle.is_empty() {
                None
            } else {
                let field = map.iter().find_map(|(key, value)| {
                    let allowed = query
                        .fields
                        .as_ref()
                        .map_or(true, |fields| fields.iter().any(|f| f == key));
                    match value {
                        Value::String(text) if allowed && text.to_lowercase().contains(&needle) => {
                            Some(key.clone())
                        }
                        _ => None,
                    }
                })?;
                Some(field)
            };

            Some(SearchHit {
                id: record_id(record).unwrap_or_default().to_string(),
                name: record_name(record).unwrap_or_default().to_string(),
                matched_field,
            })
        })
        .take(limit)
        .collect()
}
