//! Key search over metadata JSON.
//!
//! Metadata records nest the APPL ID at varying depths (`gen3_discovery`,
//! `nih_reporter`, ...), so lookups walk the whole document depth-first in
//! document order and take the first usable value.

use serde_json::Value;

/// Find the first occurrence of `key` whose value is a usable identifier:
/// a non-empty string or a number.
#[must_use]
pub fn find_id(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Object(map) => map.iter().find_map(|(k, v)| {
            if k == key {
                if let Some(id) = as_id(v) {
                    return Some(id);
                }
            }
            find_id(v, key)
        }),
        Value::Array(items) => items.iter().find_map(|item| find_id(item, key)),
        _ => None,
    }
}

fn as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Project title from an MDS study record (`nih_reporter.project_title`).
#[must_use]
pub fn project_title(record: &Value) -> Option<String> {
    record
        .get("nih_reporter")
        .and_then(|reporter| reporter.get("project_title"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

/// HDP ID of the first study in an award query response
/// (`{ "<guid>": { "gen3_discovery": { "_hdp_uid": ... } } }`).
#[must_use]
pub fn first_hdp_uid(response: &Value) -> Option<String> {
    response
        .as_object()?
        .values()
        .next()?
        .get("gen3_discovery")?
        .get("_hdp_uid")
        .and_then(as_id)
}
