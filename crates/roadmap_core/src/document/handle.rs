//! In-memory roadmap document.

use crate::model::section::Section;
use serde_json::{Map, Value};

/// Explicit handle over the JSON root object.
///
/// Owned by one caller (normally `DocumentService`) and lent to
/// repositories and passes that need it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapDocument {
    root: Map<String, Value>,
}

impl Default for RoadmapDocument {
    fn default() -> Self {
        let mut root = Map::new();
        for section in Section::ALL {
            root.insert(section.key().to_string(), Value::Array(Vec::new()));
        }
        Self { root }
    }
}

impl RoadmapDocument {
    /// Empty document with all sections present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON root object, adding missing or non-array sections.
    ///
    /// Returns `None` when `value` is not an object; otherwise the document
    /// plus the sections that had to be repaired.
    pub fn from_value(value: Value) -> Option<(Self, Vec<Section>)> {
        let Value::Object(mut root) = value else {
            return None;
        };

        let mut repaired = Vec::new();
        for section in Section::ALL {
            let is_array = matches!(root.get(section.key()), Some(Value::Array(_)));
            if !is_array {
                root.insert(section.key().to_string(), Value::Array(Vec::new()));
                repaired.push(section);
            }
        }

        Some((Self { root }, repaired))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Records of one section.
    pub fn records(&self, section: Section) -> &[Value] {
        match self.root.get(section.key()) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Mutable records of one section, recreating the array if a caller
    /// replaced it with something else.
    pub fn records_mut(&mut self, section: Section) -> &mut Vec<Value> {
        let slot = self
            .root
            .entry(section.key().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => items,
            _ => unreachable!("section slot was just set to an array"),
        }
    }

    /// Total record count over all sections.
    pub fn record_count(&self) -> usize {
        Section::ALL
            .iter()
            .map(|section| self.records(*section).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::RoadmapDocument;
    use crate::model::section::Section;
    use serde_json::json;

    #[test]
    fn from_value_repairs_missing_and_mistyped_sections() {
        let value = json!({
            "programs": [{"id": "PRG1", "name": "Alpha"}],
            "products": {"not": "an array"},
            "schemaNote": "kept"
        });
        let (doc, repaired) = RoadmapDocument::from_value(value).unwrap();

        assert_eq!(doc.records(Section::Programs).len(), 1);
        assert!(doc.records(Section::Products).is_empty());
        assert!(repaired.contains(&Section::Products));
        assert!(repaired.contains(&Section::FundingOpps));
        assert!(!repaired.contains(&Section::Programs));
        assert_eq!(doc.as_map()["schemaNote"], "kept");
    }

    #[test]
    fn from_value_rejects_non_object_root() {
        assert!(RoadmapDocument::from_value(json!([1, 2, 3])).is_none());
    }

    #[test]
    fn records_mut_appends() {
        let mut doc = RoadmapDocument::new();
        doc.records_mut(Section::FundingOpps)
            .push(json!({"id": "F1", "name": "BAA"}));
        assert_eq!(doc.record_count(), 1);
    }
}
