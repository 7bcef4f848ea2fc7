//! Checked accessors over the document tree.
//!
//! Paths are JSON-pointer style (`/resourceSpans/0/scopeSpans/1`) and only
//! used to build error messages.

use crate::error::SignError;
use serde_json::{Map, Value};

/// Borrows a node as a mapping.
///
/// # Errors
///
/// Returns [`SignError::MalformedTree`] if the node is anything but a mapping.
pub fn as_object_mut<'a>(
    node: &'a mut Value,
    path: &str,
) -> Result<&'a mut Map<String, Value>, SignError> {
    node.as_object_mut()
        .ok_or_else(|| SignError::malformed(display_path(path), "a mapping"))
}

/// Borrows the child collection stored under `key`.
///
/// An absent or `null` collection is reported as `None` (zero children).
///
/// # Errors
///
/// Returns [`SignError::MalformedTree`] if the field holds something other than a list.
pub fn child_list<'a>(
    node: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a mut Vec<Value>>, SignError> {
    match node.get_mut(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(SignError::malformed(format!("{path}/{key}"), "a list")),
    }
}

/// What a node holds under a nested sub-mapping key such as `resource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubObject {
    /// The field is missing or `null`.
    Absent,
    /// The field is a mapping.
    Present,
}

/// Inspects the field `key` without borrowing it mutably.
///
/// # Errors
///
/// Returns [`SignError::MalformedTree`] if the field exists and is neither a
/// mapping nor `null`.
pub fn sub_object_state(
    node: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<SubObject, SignError> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(SubObject::Absent),
        Some(Value::Object(_)) => Ok(SubObject::Present),
        Some(_) => Err(SignError::malformed(format!("{path}/{key}"), "a mapping")),
    }
}

pub(crate) fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}
