//! Signing processor.
//!
//! The per-batch entry point a pipeline host calls. A processor resolves its
//! key once at construction, so a bad algorithm/key combination fails before
//! any batch is seen, and then signs each batch independently. It holds no
//! mutable state and can be shared across worker threads.

use crate::config::{AttributeNames, ProcessorConfig};
use crate::error::SignError;
use crate::otlp::{TelemetryBatch, TelemetryKind};
use crate::signing::{algorithm_name, Algorithm, SigningKey};
use crate::walker::{WalkSummary, Walker};

/// Signs OTLP batches with one key and one set of attribute names.
#[derive(Debug, Clone)]
pub struct SigningProcessor {
    algorithm: Algorithm,
    key: SigningKey,
    names: AttributeNames,
}

impl SigningProcessor {
    /// Validates `config`, resolves its key and builds a processor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the key material does
    /// not match the algorithm.
    ///
    /// # Example
    ///
    /// ```
    /// use signer::config::ProcessorConfig;
    /// use signer::processor::SigningProcessor;
    ///
    /// let config = ProcessorConfig::new("HS256", "c2VjcmV0").with_attribute("signed.record");
    /// let processor = SigningProcessor::new(&config).unwrap();
    ///
    /// let output = processor.process_logs(br#"{"resourceLogs": []}"#).unwrap();
    /// assert_eq!(output, br#"{"resourceLogs":[]}"#);
    ///
    /// assert!(SigningProcessor::new(&ProcessorConfig::new("RS256", "not-a-pem-string")).is_err());
    /// ```
    pub fn new(config: &ProcessorConfig) -> Result<Self, SignError> {
        use validator::Validate;

        config.validate()?;
        let (algorithm, key) = config.resolve_key()?;
        let names = config.attribute_names();

        tracing::info!(
            algorithm = algorithm_name(algorithm),
            resource_attribute = %names.resource,
            scope_attribute = %names.scope,
            attribute = %names.record,
            "JWT signing processor created"
        );
        if names.is_empty() {
            tracing::warn!("No attribute names configured; batches will pass through unsigned");
        }

        Ok(Self {
            algorithm,
            key,
            names,
        })
    }

    /// Returns the signing algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the configured attribute names.
    #[must_use]
    pub fn attribute_names(&self) -> &AttributeNames {
        &self.names
    }

    /// The processor rewrites the batches it is given.
    #[must_use]
    pub const fn mutates_data(&self) -> bool {
        true
    }

    /// Returns a walker bound to this processor's key and names.
    #[must_use]
    pub fn walker(&self) -> Walker<'_> {
        Walker::new(self.algorithm, &self.key, &self.names)
    }

    /// Signs a decoded batch in place.
    ///
    /// # Errors
    ///
    /// Returns the walker's error; the batch is unchanged in that case.
    pub fn process(&self, batch: &mut TelemetryBatch) -> Result<WalkSummary, SignError> {
        let kind = batch.kind();
        match self.walker().transform(batch) {
            Ok(summary) => {
                tracing::debug!(
                    kind = %kind,
                    resources = summary.resources,
                    scopes = summary.scopes,
                    records = summary.records,
                    "Signed telemetry batch"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "Failed to sign telemetry batch");
                Err(e)
            }
        }
    }

    /// Decodes an OTLP/JSON batch of `kind`, signs it and re-encodes it.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding, signing or encoding fails.
    pub fn process_json(&self, kind: TelemetryKind, input: &[u8]) -> Result<Vec<u8>, SignError> {
        let mut batch = TelemetryBatch::from_json(kind, input)?;
        self.process(&mut batch)?;
        batch.to_json()
    }

    /// Signs an OTLP/JSON logs export request.
    ///
    /// # Errors
    ///
    /// See [`SigningProcessor::process_json`].
    pub fn process_logs(&self, input: &[u8]) -> Result<Vec<u8>, SignError> {
        self.process_json(TelemetryKind::Logs, input)
    }

    /// Signs an OTLP/JSON metrics export request.
    ///
    /// # Errors
    ///
    /// See [`SigningProcessor::process_json`].
    pub fn process_metrics(&self, input: &[u8]) -> Result<Vec<u8>, SignError> {
        self.process_json(TelemetryKind::Metrics, input)
    }

    /// Signs an OTLP/JSON traces export request.
    ///
    /// # Errors
    ///
    /// See [`SigningProcessor::process_json`].
    pub fn process_traces(&self, input: &[u8]) -> Result<Vec<u8>, SignError> {
        self.process_json(TelemetryKind::Traces, input)
    }
}
