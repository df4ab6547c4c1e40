//! Document-wide date passes.
//!
//! # Responsibility
//! - Apply roadmap floating to every floatable item of every record.
//! - Normalize item date text on record writes, collecting warnings.
//!
//! # Invariants
//! - Neither pass fails: bad dates become warnings or heal silently.
//! - Items without a recognizable date shape are skipped untouched.

use crate::date::entry::DateEntry;
use crate::date::float::{float_in_place, FloatOutcome};
use crate::document::RoadmapDocument;
use crate::model::date::CalendarDate;
use crate::model::float_range::FieldNaming;
use crate::model::section::{Section, FLOATABLE_ITEM_KEYS};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

/// Counters for one float pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FloatSummary {
    pub items: usize,
    pub disabled: usize,
    pub anchored: usize,
    pub shifted: usize,
    pub unchanged: usize,
    pub healed: usize,
    /// Date slots left as-is because their text did not parse.
    pub skipped_slots: usize,
}

impl FloatSummary {
    fn record(&mut self, outcome: &FloatOutcome) {
        self.items += 1;
        match outcome {
            FloatOutcome::Disabled | FloatOutcome::NoDates => self.disabled += 1,
            FloatOutcome::Anchored => self.anchored += 1,
            FloatOutcome::Healed { .. } => self.healed += 1,
            FloatOutcome::Unchanged => self.unchanged += 1,
            FloatOutcome::Shifted { skipped_slots, .. } => {
                self.shifted += 1;
                self.skipped_slots += skipped_slots.len();
            }
        }
    }
}

/// An item date that failed normalization during a record write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWarning {
    /// Item list key, e.g. `roadmap` or `milestones`.
    pub list: String,
    pub index: usize,
    pub field: String,
    pub input: String,
    /// Replacement written to the field, if any.
    pub corrected_to: Option<String>,
}

/// Applies floating to every floatable item of the document.
pub fn float_document(document: &mut RoadmapDocument, today: CalendarDate) -> FloatSummary {
    let mut summary = FloatSummary::default();
    for section in Section::ALL {
        if !section.has_floatable_items() {
            continue;
        }
        for record in document.records_mut(section).iter_mut() {
            float_record(record, today, &mut summary);
        }
    }

    info!(
        "event=float_pass module=service status=ok today={} items={} shifted={} anchored={} healed={}",
        today,
        summary.items,
        summary.shifted,
        summary.anchored,
        summary.healed
    );
    summary
}

/// Applies floating to the items of one record.
pub fn float_record(record: &mut Value, today: CalendarDate, summary: &mut FloatSummary) {
    for_each_item(record, |list, index, item, naming| {
        let mut range = naming.read(item);
        let outcome = float_in_place(&mut range, today);
        match &outcome {
            FloatOutcome::Disabled | FloatOutcome::NoDates => {}
            FloatOutcome::Healed { corrupt_anchor } => {
                warn!(
                    "event=float_heal module=service status=ok list={} index={} anchor={:?}",
                    list, index, corrupt_anchor
                );
                naming.write(item, &range);
            }
            FloatOutcome::Shifted {
                days,
                skipped_slots,
            } => {
                debug!(
                    "event=float_shift module=service status=ok list={} index={} days={} skipped={}",
                    list,
                    index,
                    days,
                    skipped_slots.len()
                );
                naming.write(item, &range);
            }
            FloatOutcome::Anchored | FloatOutcome::Unchanged => naming.write(item, &range),
        }
        summary.record(&outcome);
    });
}

/// Normalizes every date slot of every floatable item of `record`.
///
/// Digit-bearing invalid text is replaced by `today`; other invalid text is
/// kept. Each failure yields a `DateWarning`.
pub fn sanitize_record_dates(record: &mut Value, today: CalendarDate) -> Vec<DateWarning> {
    let mut warnings = Vec::new();
    for_each_item(record, |list, index, item, naming| {
        for key in naming.slot_keys() {
            let Some(Value::String(text)) = item.get(key) else {
                continue;
            };
            let mut entry = DateEntry::empty();
            entry.set_text(text.clone());
            let result = entry.commit(today);
            if entry.text() != text.as_str() {
                item.insert(key.to_string(), Value::String(entry.text().to_string()));
            }
            if let Err(err) = result {
                warnings.push(DateWarning {
                    list: list.to_string(),
                    index,
                    field: key.to_string(),
                    corrected_to: err.fallback(today).map(|d| d.to_canonical()),
                    input: err.input,
                });
            }
        }
    });

    if !warnings.is_empty() {
        warn!(
            "event=date_sanitize module=service status=warning invalid_dates={}",
            warnings.len()
        );
    }
    warnings
}

fn for_each_item<F>(record: &mut Value, mut visit: F)
where
    F: FnMut(&str, usize, &mut serde_json::Map<String, Value>, FieldNaming),
{
    let Some(record) = record.as_object_mut() else {
        return;
    };
    for list in FLOATABLE_ITEM_KEYS {
        let Some(Value::Array(items)) = record.get_mut(*list) else {
            continue;
        };
        for (index, item) in items.iter_mut().enumerate() {
            let Some(item) = item.as_object_mut() else {
                continue;
            };
            if let Some(naming) = FieldNaming::detect(item) {
                visit(list, index, item, naming);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{float_record, sanitize_record_dates, FloatSummary};
    use crate::model::date::CalendarDate;
    use serde_json::json;

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2025, 1, 11).unwrap()
    }

    #[test]
    fn float_record_handles_every_item_shape() {
        let mut product = json!({
            "id": "P001",
            "name": "Bracket",
            "roadmap": [
                {"task": "Qual build", "start": "2025-02-01", "end": "2025-02-15", "float": true, "floatDate": "2025-01-01"},
                {"task": "Fixed", "start": "2025-02-01", "end": "2025-02-15", "float": false, "floatDate": "2025-01-01"}
            ],
            "specialNDT": [
                {"name": "CT", "startDate": "2025-03-01", "endDate": "2025-03-05", "float": true, "floatDate": ""}
            ],
            "milestones": [
                {"name": "CDR", "date": "2025-04-01", "floatOnRoadmap": true, "floatDate": "bogus"}
            ]
        });
        let mut summary = FloatSummary::default();
        float_record(&mut product, today(), &mut summary);

        assert_eq!(product["roadmap"][0]["start"], "2025-02-11");
        assert_eq!(product["roadmap"][0]["end"], "2025-02-25");
        assert_eq!(product["roadmap"][0]["floatDate"], "2025-01-11");
        assert_eq!(product["roadmap"][1]["start"], "2025-02-01");
        assert_eq!(product["roadmap"][1]["floatDate"], "2025-01-01");
        assert_eq!(product["specialNDT"][0]["startDate"], "2025-03-01");
        assert_eq!(product["specialNDT"][0]["floatDate"], "2025-01-11");
        assert_eq!(product["milestones"][0]["date"], "2025-04-01");
        assert_eq!(product["milestones"][0]["floatDate"], "2025-01-11");

        assert_eq!(summary.items, 4);
        assert_eq!(summary.shifted, 1);
        assert_eq!(summary.disabled, 1);
        assert_eq!(summary.anchored, 1);
        assert_eq!(summary.healed, 1);
    }

    #[test]
    fn sanitize_normalizes_and_warns() {
        let mut material = json!({
            "id": "MAT1",
            "name": "Ti64",
            "roadmap": [
                {"task": "Allowables", "start": "3/7/25", "end": "02/30/2025"},
                {"task": "Spec", "start": "tbd", "end": ""}
            ]
        });
        let warnings = sanitize_record_dates(&mut material, today());

        assert_eq!(material["roadmap"][0]["start"], "2025-03-07");
        assert_eq!(material["roadmap"][0]["end"], "2025-01-11");
        assert_eq!(material["roadmap"][1]["start"], "tbd");
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field, "end");
        assert_eq!(warnings[0].corrected_to.as_deref(), Some("2025-01-11"));
        assert_eq!(warnings[1].input, "tbd");
        assert_eq!(warnings[1].corrected_to, None);
    }
}
