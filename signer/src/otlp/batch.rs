//! OTLP/JSON batch codec.

use crate::error::SignError;
use crate::otlp::TelemetryKind;
use serde_json::Value;

/// One decoded OTLP/JSON export request together with its telemetry kind.
///
/// The document keeps its original field order, and fields the walker does not
/// know about are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryBatch {
    kind: TelemetryKind,
    document: Value,
}

impl TelemetryBatch {
    /// Wraps an already decoded document.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::MalformedTree`] if the root is not a mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use signer::otlp::{TelemetryBatch, TelemetryKind};
    ///
    /// let batch = TelemetryBatch::from_value(TelemetryKind::Logs, json!({"resourceLogs": []}));
    /// assert!(batch.is_ok());
    /// assert!(TelemetryBatch::from_value(TelemetryKind::Logs, json!([])).is_err());
    /// ```
    pub fn from_value(kind: TelemetryKind, document: Value) -> Result<Self, SignError> {
        if !document.is_object() {
            return Err(SignError::malformed("/", "a mapping"));
        }
        Ok(Self { kind, document })
    }

    /// Decodes OTLP/JSON bytes.
    ///
    /// A root without the kind's resource list is accepted and holds zero resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON ([`SignError::Codec`]) or the
    /// root is not a mapping ([`SignError::MalformedTree`]).
    pub fn from_json(kind: TelemetryKind, bytes: &[u8]) -> Result<Self, SignError> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_value(kind, document)
    }

    /// Decodes OTLP/JSON bytes, inferring the kind from the root key.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON, or the root carries none of
    /// `resourceLogs`, `resourceMetrics` or `resourceSpans`.
    pub fn detect_json(bytes: &[u8]) -> Result<Self, SignError> {
        let document: Value = serde_json::from_slice(bytes)?;
        let kind = TelemetryKind::detect(&document).ok_or_else(|| {
            SignError::malformed("/", "resourceLogs, resourceMetrics or resourceSpans")
        })?;
        Self::from_value(kind, document)
    }

    /// Returns the telemetry kind.
    #[must_use]
    pub fn kind(&self) -> TelemetryKind {
        self.kind
    }

    /// Returns the document tree.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Consumes the batch and returns the document tree.
    #[must_use]
    pub fn into_document(self) -> Value {
        self.document
    }

    pub(crate) fn replace_document(&mut self, document: Value) {
        self.document = document;
    }

    /// Encodes the batch as compact OTLP/JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Codec`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, SignError> {
        Ok(serde_json::to_vec(&self.document)?)
    }

    /// Encodes the batch as indented OTLP/JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Codec`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, SignError> {
        Ok(serde_json::to_vec_pretty(&self.document)?)
    }
}
