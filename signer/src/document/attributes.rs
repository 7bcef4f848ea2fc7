//! Attribute list merge.
//!
//! OTLP attribute lists are ordered sequences of `{"key": ..., "value": AnyValue}`
//! entries. Merging sets one key without disturbing any other entry.

use crate::error::SignError;
use serde_json::{json, Map, Value};

/// Field holding the attribute list on resources, scopes and records.
pub const ATTRIBUTES: &str = "attributes";

const KEY: &str = "key";
const VALUE: &str = "value";

/// Wraps a string in the OTLP `AnyValue` form: `{"stringValue": ...}`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use signer::document::string_value;
///
/// assert_eq!(string_value("abc"), json!({"stringValue": "abc"}));
/// ```
#[must_use]
pub fn string_value(value: impl Into<String>) -> Value {
    let value: String = value.into();
    json!({ "stringValue": value })
}

/// Sets `key` to `value` in an attribute list.
///
/// The first entry whose key matches has its value replaced in place. Any later
/// entries with the same key are dropped so the key appears exactly once.
/// When no entry matches, a new one is appended. All other entries keep their
/// relative order.
///
/// # Errors
///
/// Returns [`SignError::MalformedTree`] if any entry is not a mapping. The list
/// is left untouched in that case.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use signer::document::{merge_attribute, string_value};
///
/// let mut attrs = vec![
///     json!({"key": "service.name", "value": {"stringValue": "api"}}),
///     json!({"key": "signed", "value": {"stringValue": "old"}}),
///     json!({"key": "host", "value": {"stringValue": "a"}}),
/// ];
/// merge_attribute(&mut attrs, "signed", string_value("new"), "/attributes").unwrap();
/// assert_eq!(attrs.len(), 3);
/// assert_eq!(attrs[1]["value"]["stringValue"], "new");
/// ```
pub fn merge_attribute(
    list: &mut Vec<Value>,
    key: &str,
    value: Value,
    path: &str,
) -> Result<(), SignError> {
    if let Some(index) = list.iter().position(|entry| !entry.is_object()) {
        return Err(SignError::malformed(
            format!("{path}/{index}"),
            "an attribute mapping",
        ));
    }

    let mut pending = Some(value);
    list.retain_mut(|entry| {
        let Some(entry) = entry.as_object_mut() else {
            return true;
        };
        if entry.get(KEY).and_then(Value::as_str) != Some(key) {
            return true;
        }
        match pending.take() {
            Some(value) => {
                entry.insert(VALUE.to_string(), value);
                true
            }
            None => false,
        }
    });

    if let Some(value) = pending {
        list.push(json!({ "key": key, "value": value }));
    }
    Ok(())
}

/// Writes `token` as a string attribute named `key` into `node`'s attribute list.
///
/// A missing or `null` attribute list is created.
///
/// # Errors
///
/// Returns [`SignError::MalformedTree`] if `attributes` exists but is not a list,
/// or holds an entry that is not a mapping.
pub fn set_string_attribute(
    node: &mut Map<String, Value>,
    key: &str,
    token: String,
    path: &str,
) -> Result<(), SignError> {
    let attributes = node
        .entry(ATTRIBUTES)
        .or_insert_with(|| Value::Array(Vec::new()));
    if attributes.is_null() {
        *attributes = Value::Array(Vec::new());
    }

    let list_path = format!("{path}/{ATTRIBUTES}");
    match attributes {
        Value::Array(list) => merge_attribute(list, key, string_value(token), &list_path),
        _ => Err(SignError::malformed(list_path, "a list")),
    }
}
