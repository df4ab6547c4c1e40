//! Floatable date range model and JSON field-name mapping.
//!
//! # Responsibility
//! - Represent the date slots of a roadmap item plus its float state.
//! - Read/write that state from JSON-shaped items under any of the key
//!   conventions used by the roadmap document.
//!
//! # Invariants
//! - Date slots and the anchor are raw text; empty text means "unset".
//! - Writing a range back only touches the keys of its `FieldNaming`.
//! - Keys not owned by the range (name, status, funding...) are preserved.

use serde_json::{Map, Value};

/// Date slots of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSlots {
    /// Task-like item with start and end dates.
    Range { start: String, end: String },
    /// Milestone-like item with one date.
    Single { date: String },
}

impl DateSlots {
    /// Returns whether at least one slot holds non-blank text.
    pub fn has_any(&self) -> bool {
        match self {
            Self::Range { start, end } => !start.trim().is_empty() || !end.trim().is_empty(),
            Self::Single { date } => !date.trim().is_empty(),
        }
    }

    /// Mutable access to every slot, in document order.
    pub fn slots_mut(&mut self) -> Vec<&mut String> {
        match self {
            Self::Range { start, end } => vec![start, end],
            Self::Single { date } => vec![date],
        }
    }
}

/// Date range attached to a roadmap task, milestone or similar item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatableDateRange {
    pub slots: DateSlots,
    pub float_enabled: bool,
    /// Last date the range was anchored/shifted. Empty when never anchored.
    pub float_anchor: String,
}

impl FloatableDateRange {
    /// Creates a start/end range with floating disabled.
    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            slots: DateSlots::Range {
                start: start.into(),
                end: end.into(),
            },
            float_enabled: false,
            float_anchor: String::new(),
        }
    }

    /// Creates a single-date range with floating disabled.
    pub fn single(date: impl Into<String>) -> Self {
        Self {
            slots: DateSlots::Single { date: date.into() },
            float_enabled: false,
            float_anchor: String::new(),
        }
    }

    /// Builder-style helper used by forms and tests.
    pub fn with_float(mut self, enabled: bool, anchor: impl Into<String>) -> Self {
        self.float_enabled = enabled;
        self.float_anchor = anchor.into();
        self
    }

    pub fn start(&self) -> Option<&str> {
        match &self.slots {
            DateSlots::Range { start, .. } => Some(start.as_str()),
            DateSlots::Single { .. } => None,
        }
    }

    pub fn end(&self) -> Option<&str> {
        match &self.slots {
            DateSlots::Range { end, .. } => Some(end.as_str()),
            DateSlots::Single { .. } => None,
        }
    }

    pub fn date(&self) -> Option<&str> {
        match &self.slots {
            DateSlots::Single { date } => Some(date.as_str()),
            DateSlots::Range { .. } => None,
        }
    }
}

/// Shape of the date slots for one key convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKeys {
    Range {
        start: &'static str,
        end: &'static str,
    },
    Single {
        date: &'static str,
    },
}

/// JSON key convention for one floatable item shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNaming {
    pub slots: SlotKeys,
    pub float_key: &'static str,
    pub anchor_key: &'static str,
}

impl FieldNaming {
    /// Roadmap tasks, design tools and documentation items.
    pub const ROADMAP_TASK: FieldNaming = FieldNaming {
        slots: SlotKeys::Range {
            start: "start",
            end: "end",
        },
        float_key: "float",
        anchor_key: "floatDate",
    };

    /// Special NDT and part-acceptance items.
    pub const QUALIFICATION_ITEM: FieldNaming = FieldNaming {
        slots: SlotKeys::Range {
            start: "startDate",
            end: "endDate",
        },
        float_key: "float",
        anchor_key: "floatDate",
    };

    /// Milestones.
    pub const MILESTONE: FieldNaming = FieldNaming {
        slots: SlotKeys::Single { date: "date" },
        float_key: "floatOnRoadmap",
        anchor_key: "floatDate",
    };

    /// Picks the convention whose date keys are present on `item`.
    ///
    /// Returns `None` for items carrying none of the known date keys.
    pub fn detect(item: &Map<String, Value>) -> Option<FieldNaming> {
        if item.contains_key("startDate") || item.contains_key("endDate") {
            return Some(Self::QUALIFICATION_ITEM);
        }
        if item.contains_key("start") || item.contains_key("end") {
            return Some(Self::ROADMAP_TASK);
        }
        if item.contains_key("date") || item.contains_key("floatOnRoadmap") {
            return Some(Self::MILESTONE);
        }
        None
    }

    /// Keys of the date slots, in document order.
    pub fn slot_keys(&self) -> Vec<&'static str> {
        match self.slots {
            SlotKeys::Range { start, end } => vec![start, end],
            SlotKeys::Single { date } => vec![date],
        }
    }

    /// Reads the floatable part of `item`.
    ///
    /// Missing or non-string date values read as empty text; a missing float
    /// flag reads as `false`.
    pub fn read(&self, item: &Map<String, Value>) -> FloatableDateRange {
        let slots = match self.slots {
            SlotKeys::Range { start, end } => DateSlots::Range {
                start: read_text(item, start),
                end: read_text(item, end),
            },
            SlotKeys::Single { date } => DateSlots::Single {
                date: read_text(item, date),
            },
        };

        FloatableDateRange {
            slots,
            float_enabled: read_flag(item, self.float_key),
            float_anchor: read_text(item, self.anchor_key),
        }
    }

    /// Writes date slots and anchor of `range` back into `item`.
    ///
    /// The float flag is left as stored; floating never toggles it.
    pub fn write(&self, item: &mut Map<String, Value>, range: &FloatableDateRange) {
        match (self.slots, &range.slots) {
            (SlotKeys::Range { start, end }, DateSlots::Range { start: s, end: e }) => {
                write_text(item, start, s);
                write_text(item, end, e);
            }
            (SlotKeys::Single { date }, DateSlots::Single { date: d }) => {
                write_text(item, date, d);
            }
            _ => {
                log::warn!(
                    "event=float_write module=model status=skipped reason=slot_shape_mismatch"
                );
                return;
            }
        }

        if range.float_anchor.is_empty() && !item.contains_key(self.anchor_key) {
            return;
        }
        item.insert(
            self.anchor_key.to_string(),
            Value::String(range.float_anchor.clone()),
        );
    }
}

fn read_text(item: &Map<String, Value>, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(value)) => value.clone(),
        _ => String::new(),
    }
}

fn read_flag(item: &Map<String, Value>, key: &str) -> bool {
    match item.get(key) {
        Some(Value::Bool(value)) => *value,
        // Hand-edited files sometimes carry "true"/"false" strings.
        Some(Value::String(value)) => value.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn write_text(item: &mut Map<String, Value>, key: &str, value: &str) {
    if value.is_empty() && !item.contains_key(key) {
        return;
    }
    item.insert(key.to_string(), Value::String(value.to_string()));
}
