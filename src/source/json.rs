//! JSON renditions of the search table.
//!
//! Two element shapes are accepted inside a top-level array and may be mixed:
//!
//! - the pair form, `["key", ["Label", "page.html#anchor"]]` or
//!   `["key", [["Label", "a.html"], ["Label", "b.html"]]]`;
//! - the normalized form written by `docsearch export`,
//!   `{"key": ..., "label": ..., "targets": [{"url": ..., "scope": ...}]}`.

use serde_json::Value;
use std::path::Path;

use super::{RawRecord, RawTarget};
use crate::error::{IndexError, Result};

/// Parse a JSON table into raw records.
///
/// Only the top-level array is enforced here. Elements of the wrong shape
/// come out with missing fields so that validation reports their position.
pub fn parse(source: &str, path: &Path) -> Result<Vec<RawRecord>> {
    let records: Vec<Value> = serde_json::from_str(source).map_err(|source| IndexError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(records.into_iter().map(record_from_value).collect())
}

fn record_from_value(value: Value) -> RawRecord {
    match value {
        Value::Array(parts) => record_from_pair_form(parts),
        Value::Object(_) => record_from_normalized(&value),
        _ => RawRecord::default(),
    }
}

/// `["key", ["Label", "url"]]` or `["key", [["Label", "url"], ...]]`
fn record_from_pair_form(parts: Vec<Value>) -> RawRecord {
    let mut parts = parts.into_iter();
    let key = parts.next().and_then(into_string);

    let pairs = match parts.next() {
        // A single pair starts with its label, a list starts with a pair
        Some(Value::Array(items)) if items.iter().all(Value::is_array) => items,
        Some(pair @ Value::Array(_)) => vec![pair],
        _ => Vec::new(),
    };

    let mut label = None;
    let targets = pairs
        .into_iter()
        .map(|pair| {
            let mut fields = match pair {
                Value::Array(fields) => fields.into_iter(),
                _ => Vec::new().into_iter(),
            };
            let pair_label = fields.next().and_then(into_string);
            let url = fields.next().and_then(into_string);

            if label.is_none() {
                label = pair_label.clone();
            }

            RawTarget {
                url,
                scope: pair_label,
                open_in_parent: None,
            }
        })
        .collect();

    RawRecord {
        key,
        label,
        targets,
    }
}

/// `{"key": ..., "label": ..., "targets": [{"url": ..., "scope": ...}]}`
fn record_from_normalized(value: &Value) -> RawRecord {
    let targets = value
        .get("targets")
        .and_then(Value::as_array)
        .map(|targets| {
            targets
                .iter()
                .map(|t| RawTarget {
                    url: string_field(t, "url"),
                    scope: string_field(t, "scope"),
                    open_in_parent: t.get("open_in_parent").and_then(Value::as_bool),
                })
                .collect()
        })
        .unwrap_or_default();

    RawRecord {
        key: string_field(value, "key"),
        label: string_field(value, "label"),
        targets,
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}
