//! Claim-signing tree walker.
//!
//! Visits every resource, scope and record of a batch and, at each level with
//! a configured attribute name, signs that level's own mapping and merges the
//! token into its attribute list.
//!
//! Resource and scope wrappers are signed through their `resource`/`scope`
//! sub-mapping when one is present; otherwise the wrapper itself is both the
//! claim set and the merge target. Every node is signed before any of its
//! descendants is touched.
//!
//! A batch is transformed all-or-nothing: the walk runs on a working copy that
//! replaces the caller's document only once every node has been signed.

use crate::config::AttributeNames;
use crate::document::access::display_path;
use crate::document::{
    as_object_mut, child_list, set_string_attribute, sub_object_state, SubObject,
};
use crate::error::SignError;
use crate::otlp::{DataPointKind, TelemetryBatch, TelemetryKind, DATA_POINTS, RESOURCE, SCOPE};
use crate::signing::{sign, Algorithm, SigningKey};
use serde_json::{Map, Value};

/// Number of nodes that received a token at each level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Signed resources.
    pub resources: usize,
    /// Signed scopes.
    pub scopes: usize,
    /// Signed log records, spans or metric data points.
    pub records: usize,
}

impl WalkSummary {
    /// Total number of tokens written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.resources + self.scopes + self.records
    }
}

/// Walks telemetry batches, signing the configured levels.
///
/// A walker only borrows its key and names, so it is cheap to build per batch
/// and can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    algorithm: Algorithm,
    key: &'a SigningKey,
    names: &'a AttributeNames,
}

impl<'a> Walker<'a> {
    /// Creates a walker signing with `algorithm` and `key`.
    #[must_use]
    pub fn new(algorithm: Algorithm, key: &'a SigningKey, names: &'a AttributeNames) -> Self {
        Self {
            algorithm,
            key,
            names,
        }
    }

    /// Signs a batch in place.
    ///
    /// # Errors
    ///
    /// Returns the first signing or shape error encountered. The batch is left
    /// exactly as it was passed in when an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use signer::config::AttributeNames;
    /// use signer::otlp::{TelemetryBatch, TelemetryKind};
    /// use signer::signing::SigningKey;
    /// use signer::walker::Walker;
    ///
    /// let (algorithm, key) = SigningKey::resolve("HS256", "c2VjcmV0").unwrap();
    /// let names = AttributeNames::new("", "", "signed.record");
    /// let mut batch = TelemetryBatch::from_value(
    ///     TelemetryKind::Logs,
    ///     json!({"resourceLogs": [{"scopeLogs": [{"logRecords": [{"body": {"stringValue": "hi"}}]}]}]}),
    /// )
    /// .unwrap();
    ///
    /// let summary = Walker::new(algorithm, &key, &names).transform(&mut batch).unwrap();
    /// assert_eq!(summary.records, 1);
    /// ```
    pub fn transform(&self, batch: &mut TelemetryBatch) -> Result<WalkSummary, SignError> {
        let mut working = batch.document().clone();
        let summary = self.walk(batch.kind(), &mut working)?;
        batch.replace_document(working);
        Ok(summary)
    }

    fn walk(&self, kind: TelemetryKind, document: &mut Value) -> Result<WalkSummary, SignError> {
        let hierarchy = kind.hierarchy();
        let mut summary = WalkSummary::default();
        // Levels below the deepest enabled one are neither visited nor shape-checked.
        let descend_to_records = !self.names.record.is_empty();
        let descend_to_scopes = descend_to_records || !self.names.scope.is_empty();
        if self.names.is_empty() {
            return Ok(summary);
        }

        let root = as_object_mut(document, "")?;
        let Some(resources) = child_list(root, hierarchy.resources, "")? else {
            return Ok(summary);
        };

        for (r, resource) in resources.iter_mut().enumerate() {
            let resource_path = format!("/{}/{r}", hierarchy.resources);
            let resource = as_object_mut(resource, &resource_path)?;
            if self.sign_wrapper(resource, RESOURCE, &self.names.resource, &resource_path)? {
                summary.resources += 1;
            }

            if !descend_to_scopes {
                continue;
            }
            let Some(scopes) = child_list(resource, hierarchy.scopes, &resource_path)? else {
                continue;
            };
            for (s, scope) in scopes.iter_mut().enumerate() {
                let scope_path = format!("{resource_path}/{}/{s}", hierarchy.scopes);
                let scope = as_object_mut(scope, &scope_path)?;
                if self.sign_wrapper(scope, SCOPE, &self.names.scope, &scope_path)? {
                    summary.scopes += 1;
                }

                if !descend_to_records {
                    continue;
                }
                let Some(records) = child_list(scope, hierarchy.records, &scope_path)? else {
                    continue;
                };
                for (i, record) in records.iter_mut().enumerate() {
                    let record_path = format!("{scope_path}/{}/{i}", hierarchy.records);
                    let record = as_object_mut(record, &record_path)?;
                    summary.records += match kind {
                        TelemetryKind::Metrics => self.sign_data_points(record, &record_path)?,
                        TelemetryKind::Logs | TelemetryKind::Traces => {
                            usize::from(self.sign_node(record, &self.names.record, &record_path)?)
                        }
                    };
                }
            }
        }

        Ok(summary)
    }

    /// Signs a resource or scope wrapper, preferring its `sub` mapping.
    fn sign_wrapper(
        &self,
        wrapper: &mut Map<String, Value>,
        sub: &str,
        name: &str,
        path: &str,
    ) -> Result<bool, SignError> {
        if name.is_empty() {
            return Ok(false);
        }
        match sub_object_state(wrapper, sub, path)? {
            SubObject::Absent => self.sign_node(wrapper, name, path),
            SubObject::Present => {
                let sub_path = format!("{path}/{sub}");
                let target = wrapper
                    .get_mut(sub)
                    .ok_or_else(|| SignError::malformed(sub_path.clone(), "a mapping"))?;
                let target = as_object_mut(target, &sub_path)?;
                self.sign_node(target, name, &sub_path)
            }
        }
    }

    /// Signs every data point of every populated data-point container of a metric.
    fn sign_data_points(
        &self,
        metric: &mut Map<String, Value>,
        path: &str,
    ) -> Result<usize, SignError> {
        let mut signed = 0;
        for kind in DataPointKind::ALL {
            for &field in kind.fields() {
                let container_path = format!("{path}/{field}");
                let container = match metric.get_mut(field) {
                    None | Some(Value::Null) => continue,
                    Some(Value::Object(container)) => container,
                    Some(_) => return Err(SignError::malformed(container_path, "a mapping")),
                };

                let Some(points) = child_list(container, DATA_POINTS, &container_path)? else {
                    continue;
                };
                for (i, point) in points.iter_mut().enumerate() {
                    let point_path = format!("{container_path}/{DATA_POINTS}/{i}");
                    let point = as_object_mut(point, &point_path)?;
                    if self.sign_node(point, &self.names.record, &point_path)? {
                        signed += 1;
                    }
                }
            }
        }
        Ok(signed)
    }

    /// Signs `node`'s own mapping and stores the token under `name`.
    ///
    /// Returns false without doing anything when `name` is empty.
    fn sign_node(
        &self,
        node: &mut Map<String, Value>,
        name: &str,
        path: &str,
    ) -> Result<bool, SignError> {
        if name.is_empty() {
            return Ok(false);
        }
        let token = sign(self.algorithm, self.key, node)?;
        set_string_attribute(node, name, token, path)?;
        tracing::trace!(path = %display_path(path), attribute = name, "Signed node");
        Ok(true)
    }
}
