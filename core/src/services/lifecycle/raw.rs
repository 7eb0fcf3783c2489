//! Readers for loosely-typed booking records
//!
//! Every reader returns `None` for absent, null, empty or mistyped values.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Non-empty trimmed string at `key`
pub(crate) fn text(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(as_text)
}

pub(crate) fn as_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-empty string among `keys` of a nested object
pub(crate) fn nested_text(parent: Option<&Value>, keys: &[&str]) -> Option<String> {
    let parent = parent?;
    keys.iter().find_map(|key| text(parent, key))
}

/// Document id as a plain string, a number, or `{"$oid": "..."}`
pub(crate) fn document_id(value: Option<&Value>) -> Option<String> {
    let value = value?;
    match value {
        Value::String(_) => as_text(value),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("$oid").and_then(as_text),
        _ => None,
    }
}

/// Id of an embedded reference, which may be a bare id or an object
pub(crate) fn reference_id(value: Option<&Value>) -> Option<String> {
    let value = value?;
    match value {
        Value::Object(map) if !map.contains_key("$oid") => {
            document_id(map.get("_id")).or_else(|| document_id(map.get("id")))
        }
        _ => document_id(Some(value)),
    }
}

/// Loose truthiness: booleans, "true"/"yes"/"1" strings and non-zero numbers
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
        _ => false,
    }
}

/// Finite number, or a string holding one
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Timestamp from RFC 3339, plain date-time, plain date, epoch millis or
/// `{"$date": ...}`
///
/// Years outside 0000..=9999 have no RFC 3339 form and count as absent.
pub(crate) fn date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    parse_date(value?).filter(|dt| (0..=9999).contains(&dt.year()))
}

fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::Object(map) => map.get("$date").and_then(parse_date),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
