//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose date normalization, floating and document use-cases to Dart.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Dates cross the boundary as canonical `YYYY-MM-DD` strings.

use roadmap_core::{
    core_version as core_version_inner, float_in_place, init_logging as init_logging_inner,
    normalize, ping as ping_inner, search_records as search_records_inner, CalendarDate,
    DocumentService, FloatOutcome, FloatableDateRange, RoadmapConfig, SearchQuery, Section,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

static DATA_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the roadmap document path for this process.
///
/// # FFI contract
/// - First call wins; repeating the same path is accepted.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_data_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "data path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DATA_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "data path already configured as `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Result of normalizing one date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNormalizeResponse {
    /// Whether the input parsed.
    pub ok: bool,
    /// Text the field should show: canonical date, empty, today's date
    /// (digit-bearing invalid input) or the input unchanged.
    pub value: String,
    pub message: String,
}

/// Normalizes one date field's text.
///
/// `today` overrides the local date (canonical text); blank uses the clock.
#[flutter_rust_bridge::frb(sync)]
pub fn normalize_date(text: String, today: Option<String>) -> DateNormalizeResponse {
    let today = match resolve_today(today) {
        Ok(today) => today,
        Err(message) => {
            return DateNormalizeResponse {
                ok: false,
                value: text,
                message,
            }
        }
    };

    match normalize(&text) {
        Ok(date) => DateNormalizeResponse {
            ok: true,
            value: date.map(|d| d.to_canonical()).unwrap_or_default(),
            message: String::new(),
        },
        Err(err) => {
            let value = match err.fallback(today) {
                Some(fallback) => fallback.to_canonical(),
                None => text,
            };
            DateNormalizeResponse {
                ok: false,
                value,
                message: err.to_string(),
            }
        }
    }
}

/// Floated state of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatRangeResponse {
    pub ok: bool,
    pub start: String,
    pub end: String,
    pub float_anchor: String,
    /// `disabled|no_dates|anchored|healed|unchanged|shifted`.
    pub outcome: String,
    pub shifted_days: i64,
    pub message: String,
}

/// Applies roadmap floating to a start/end item.
#[flutter_rust_bridge::frb(sync)]
pub fn float_range(
    start: String,
    end: String,
    float_enabled: bool,
    float_anchor: String,
    today: Option<String>,
) -> FloatRangeResponse {
    let range = FloatableDateRange::range(start, end).with_float(float_enabled, float_anchor);
    float_response(range, today)
}

/// Applies roadmap floating to a single-date item (milestone).
///
/// The floated date is returned in `start`; `end` stays empty.
#[flutter_rust_bridge::frb(sync)]
pub fn float_single_date(
    date: String,
    float_enabled: bool,
    float_anchor: String,
    today: Option<String>,
) -> FloatRangeResponse {
    let range = FloatableDateRange::single(date).with_float(float_enabled, float_anchor);
    float_response(range, today)
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Optional result value (generated ID, record count...).
    pub value: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, value: Option<String>) -> Self {
        Self {
            ok: true,
            value,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            message: message.into(),
        }
    }
}

/// Loads the configured document, floats it and writes it back.
#[flutter_rust_bridge::frb(sync)]
pub fn save_document(today: Option<String>) -> ActionResponse {
    let today = match resolve_today(today) {
        Ok(today) => today,
        Err(message) => return ActionResponse::failure(message),
    };
    let result = DocumentService::open(resolve_data_path())
        .and_then(|(mut service, _)| service.save(today));
    match result {
        Ok(summary) => ActionResponse::success(
            format!(
                "Saved. {} floating item(s) shifted, {} anchored.",
                summary.shifted, summary.anchored
            ),
            Some(summary.items.to_string()),
        ),
        Err(err) => {
            warn!("event=ffi_save module=ffi status=error error={err}");
            ActionResponse::failure(format!("save_document failed: {err}"))
        }
    }
}

/// Returns the next generated ID for a section (`programs`, `products`).
#[flutter_rust_bridge::frb(sync)]
pub fn next_record_id(section: String) -> ActionResponse {
    let section = match section.parse::<Section>() {
        Ok(section) => section,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };
    let (mut service, _) = match DocumentService::open_read_only(resolve_data_path()) {
        Ok(opened) => opened,
        Err(err) => return ActionResponse::failure(format!("next_record_id failed: {err}")),
    };
    match service.records(section).next_id() {
        Ok(id) => ActionResponse::success("ok", Some(id)),
        Err(err) => ActionResponse::failure(format!("next_record_id failed: {err}")),
    }
}

/// Returns the next `PUR<n>` pursuit ID for one funding opportunity.
#[flutter_rust_bridge::frb(sync)]
pub fn next_pursuit_id(opportunity_id: String) -> ActionResponse {
    let (mut service, _) = match DocumentService::open_read_only(resolve_data_path()) {
        Ok(opened) => opened,
        Err(err) => return ActionResponse::failure(format!("next_pursuit_id failed: {err}")),
    };
    match service
        .records(Section::FundingOpps)
        .next_pursuit_id(opportunity_id.trim())
    {
        Ok(id) => ActionResponse::success("ok", Some(id)),
        Err(err) => ActionResponse::failure(format!("next_pursuit_id failed: {err}")),
    }
}

/// Search item returned by the record search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    pub name: String,
    pub matched_field: Option<String>,
}

/// Search response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
    pub message: String,
}

/// Case-insensitive substring search over one section.
#[flutter_rust_bridge::frb(sync)]
pub fn search_records(section: String, text: String, limit: Option<u32>) -> SearchResponse {
    let failure = |message: String| SearchResponse {
        items: Vec::new(),
        message,
    };
    let section = match section.parse::<Section>() {
        Ok(section) => section,
        Err(err) => return failure(err.to_string()),
    };
    let (service, _) = match DocumentService::open_read_only(resolve_data_path()) {
        Ok(opened) => opened,
        Err(err) => return failure(format!("search_records failed: {err}")),
    };

    let query = SearchQuery {
        text,
        fields: None,
        limit,
    };
    let items = search_records_inner(service.document(), section, &query)
        .into_iter()
        .map(|hit| SearchItem {
            id: hit.id,
            name: hit.name,
            matched_field: hit.matched_field,
        })
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} result(s).", items.len())
    };
    SearchResponse { items, message }
}

fn float_response(mut range: FloatableDateRange, today: Option<String>) -> FloatRangeResponse {
    let today = match resolve_today(today) {
        Ok(today) => today,
        Err(message) => {
            let (start, end) = range_text(&range);
            return FloatRangeResponse {
                ok: false,
                start,
                end,
                float_anchor: range.float_anchor,
                outcome: String::new(),
                shifted_days: 0,
                message,
            };
        }
    };

    let outcome = float_in_place(&mut range, today);
    let (label, shifted_days, message) = match &outcome {
        FloatOutcome::Disabled => ("disabled", 0, String::new()),
        FloatOutcome::NoDates => ("no_dates", 0, String::new()),
        FloatOutcome::Anchored => ("anchored", 0, String::new()),
        FloatOutcome::Healed { corrupt_anchor } => (
            "healed",
            0,
            format!("float anchor `{corrupt_anchor}` was invalid and has been reset"),
        ),
        FloatOutcome::Unchanged => ("unchanged", 0, String::new()),
        FloatOutcome::Shifted {
            days,
            skipped_slots,
        } => {
            let message = if skipped_slots.is_empty() {
                String::new()
            } else {
                format!("unparseable dates left unchanged: {}", skipped_slots.join(", "))
            };
            ("shifted", *days, message)
        }
    };

    let (start, end) = range_text(&range);
    FloatRangeResponse {
        ok: true,
        start,
        end,
        float_anchor: range.float_anchor,
        outcome: label.to_string(),
        shifted_days,
        message,
    }
}

fn range_text(range: &FloatableDateRange) -> (String, String) {
    match (range.start(), range.end(), range.date()) {
        (Some(start), Some(end), _) => (start.to_string(), end.to_string()),
        (_, _, Some(date)) => (date.to_string(), String::new()),
        _ => (String::new(), String::new()),
    }
}

fn resolve_today(today: Option<String>) -> Result<CalendarDate, String> {
    match today.as_deref().map(str::trim) {
        None | Some("") => Ok(CalendarDate::today()),
        Some(text) => CalendarDate::parse_canonical(text).map_err(|err| err.to_string()),
    }
}

fn resolve_data_path() -> PathBuf {
    DATA_PATH
        .get_or_init(|| RoadmapConfig::from_env().data_path)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::{
        configure_data_path, core_version, float_range, float_single_date, init_logging,
        next_pursuit_id, next_record_id, normalize_date, ping, save_document, search_records,
    };
    use std::path::PathBuf;

    fn test_data_path() -> PathBuf {
        std::env::temp_dir().join(format!("roadmap-ffi-test-{}.json", std::process::id()))
    }

    fn configure_test_document() {
        let path = test_data_path();
        let error = configure_data_path(path.to_str().unwrap().to_string());
        assert!(error.is_empty(), "{error}");
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_arguments() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn normalize_date_reports_value_for_each_branch() {
        let today = Some("2026-10-16".to_string());

        let ok = normalize_date("3/7/25".to_string(), today.clone());
        assert!(ok.ok);
        assert_eq!(ok.value, "2025-03-07");

        let corrected = normalize_date("02/30/2025".to_string(), today.clone());
        assert!(!corrected.ok);
        assert_eq!(corrected.value, "2026-10-16");

        let kept = normalize_date("later".to_string(), today.clone());
        assert!(!kept.ok);
        assert_eq!(kept.value, "later");

        let blank = normalize_date("  ".to_string(), today);
        assert!(blank.ok);
        assert_eq!(blank.value, "");
    }

    #[test]
    fn normalize_date_rejects_bad_today_override() {
        let response = normalize_date("2025-01-01".to_string(), Some("tomorrow".to_string()));
        assert!(!response.ok);
        assert_eq!(response.value, "2025-01-01");
    }

    #[test]
    fn float_range_shifts_and_reanchors() {
        let response = float_range(
            "2025-02-01".to_string(),
            "2025-02-15".to_string(),
            true,
            "2025-01-01".to_string(),
            Some("2025-01-11".to_string()),
        );
        assert!(response.ok);
        assert_eq!(response.outcome, "shifted");
        assert_eq!(response.shifted_days, 10);
        assert_eq!(response.start, "2025-02-11");
        assert_eq!(response.end, "2025-02-25");
        assert_eq!(response.float_anchor, "2025-01-11");
    }

    #[test]
    fn float_single_date_heals_corrupt_anchor() {
        let response = float_single_date(
            "2025-06-01".to_string(),
            true,
            "??".to_string(),
            Some("2025-01-11".to_string()),
        );
        assert_eq!(response.outcome, "healed");
        assert_eq!(response.start, "2025-06-01");
        assert_eq!(response.float_anchor, "2025-01-11");
    }

    #[test]
    fn configure_data_path_rejects_switching() {
        configure_test_document();
        let error = configure_data_path("/elsewhere/roadmap.json".to_string());
        assert!(error.contains("refusing to switch"));
        assert!(!configure_data_path("   ".to_string()).is_empty());
    }

    #[test]
    fn document_calls_use_configured_path() {
        configure_test_document();

        let saved = save_document(Some("2025-01-11".to_string()));
        assert!(saved.ok, "{}", saved.message);
        assert!(test_data_path().exists());

        let next = next_record_id("products".to_string());
        assert!(next.ok, "{}", next.message);
        assert_eq!(next.value.as_deref(), Some("P001"));

        let unknown = search_records("gizmos".to_string(), "x".to_string(), None);
        assert!(unknown.items.is_empty());
        assert!(unknown.message.contains("unknown section"));

        let empty = search_records("programs".to_string(), "alpha".to_string(), Some(5));
        assert_eq!(empty.message, "No results.");

        let pursuit = next_pursuit_id("FO-404".to_string());
        assert!(!pursuit.ok);
        assert!(pursuit.message.contains("not found"));
    }
}
