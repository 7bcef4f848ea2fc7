//! Signing processor configuration.
//!
//! Field names follow the collector configuration keys (`alg`, `private_key`,
//! `resource_attribute`, `scope_attribute`, `attribute`), so an existing
//! processor block can be carried over as JSON.

use crate::error::SignError;
use crate::signing::{Algorithm, SigningKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use validator::Validate;

/// Attribute names written at each tree level. An empty name disables signing
/// at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeNames {
    /// Attribute written into each resource.
    #[serde(default)]
    pub resource: String,
    /// Attribute written into each instrumentation scope.
    #[serde(default)]
    pub scope: String,
    /// Attribute written into each log record, span or metric data point.
    #[serde(default)]
    pub record: String,
}

impl AttributeNames {
    /// Creates attribute names for the three levels.
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        scope: impl Into<String>,
        record: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            scope: scope.into(),
            record: record.into(),
        }
    }

    /// Returns true when no level is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource.is_empty() && self.scope.is_empty() && self.record.is_empty()
    }
}

/// Configuration of a signing processor.
///
/// # Example
///
/// ```
/// use signer::config::ProcessorConfig;
///
/// let config = ProcessorConfig::new("HS256", "c2VjcmV0")
///     .with_resource_attribute("signed.resource")
///     .with_attribute("signed.record");
///
/// assert!(config.validate_config().is_ok());
/// assert!(config.attribute_names().scope.is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProcessorConfig {
    /// Signing algorithm identifier, e.g. `RS256`.
    #[validate(length(min = 1, message = "alg cannot be empty"))]
    pub alg: String,

    /// PEM private key, or base64-encoded secret for HMAC algorithms.
    #[validate(length(min = 1, message = "private_key cannot be empty"))]
    pub private_key: String,

    /// Attribute name for resource-level tokens.
    #[serde(default)]
    pub resource_attribute: String,

    /// Attribute name for scope-level tokens.
    #[serde(default)]
    pub scope_attribute: String,

    /// Attribute name for record-level tokens.
    #[serde(default)]
    pub attribute: String,
}

impl ProcessorConfig {
    /// Creates a configuration with no signing levels enabled.
    #[must_use]
    pub fn new(alg: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            private_key: private_key.into(),
            ..Self::default()
        }
    }

    /// Sets the resource-level attribute name.
    #[must_use]
    pub fn with_resource_attribute(mut self, name: impl Into<String>) -> Self {
        self.resource_attribute = name.into();
        self
    }

    /// Sets the scope-level attribute name.
    #[must_use]
    pub fn with_scope_attribute(mut self, name: impl Into<String>) -> Self {
        self.scope_attribute = name.into();
        self
    }

    /// Sets the record-level attribute name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = name.into();
        self
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Codec`] if the document is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, SignError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SignError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the per-level attribute names.
    #[must_use]
    pub fn attribute_names(&self) -> AttributeNames {
        AttributeNames::new(
            self.resource_attribute.clone(),
            self.scope_attribute.clone(),
            self.attribute.clone(),
        )
    }

    /// Parses the algorithm and resolves the key material.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::UnsupportedAlgorithm`] or [`SignError::InvalidKeyEncoding`].
    pub fn resolve_key(&self) -> Result<(Algorithm, SigningKey), SignError> {
        SigningKey::resolve(&self.alg, &self.private_key)
    }

    /// Validates the configuration, including resolving the signing key.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `alg` or `private_key` is empty ([`SignError::Config`])
    /// - the algorithm is not supported
    /// - the key material does not match the algorithm
    pub fn validate_config(&self) -> Result<(), SignError> {
        self.validate()?;
        self.resolve_key()?;
        Ok(())
    }
}

impl fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("alg", &self.alg)
            .field("private_key", &"<redacted>")
            .field("resource_attribute", &self.resource_attribute)
            .field("scope_attribute", &self.scope_attribute)
            .field("attribute", &self.attribute)
            .finish()
    }
}
