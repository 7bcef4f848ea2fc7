//! Error type shared by every stage of the signing pipeline.

use crate::signing::KeyFamily;
use jsonwebtoken::Algorithm;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving keys, signing claims or walking a batch.
#[derive(Debug, Error)]
pub enum SignError {
    /// The algorithm identifier is not one of the supported signing algorithms.
    ///
    /// This includes `ES512`, which has no P-521 signer in `jsonwebtoken`.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The key material does not match the encoding the algorithm expects.
    #[error("Invalid key encoding for {algorithm:?}: {reason}")]
    InvalidKeyEncoding {
        /// The algorithm the key was resolved for.
        algorithm: Algorithm,
        /// Why the key material was rejected.
        reason: String,
    },

    /// The key handle belongs to a different algorithm family.
    #[error("Algorithm {algorithm:?} cannot sign with a {key_family} key")]
    KeyAlgorithmMismatch {
        /// The requested algorithm.
        algorithm: Algorithm,
        /// The family the key was resolved for.
        key_family: KeyFamily,
    },

    /// The document does not have the shape expected for its telemetry kind.
    #[error("Malformed telemetry tree at {path}: expected {expected}")]
    MalformedTree {
        /// Location of the offending node, e.g. `/resourceLogs/0/scopeLogs`.
        path: String,
        /// What was expected at that location.
        expected: &'static str,
    },

    /// The token library failed to produce a signature.
    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// The interchange document could not be decoded or encoded.
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Configuration field validation failed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] validator::ValidationErrors),

    /// A configuration or key file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SignError {
    /// Builds a [`SignError::MalformedTree`] for the given location.
    pub(crate) fn malformed(path: impl Into<String>, expected: &'static str) -> Self {
        Self::MalformedTree {
            path: path.into(),
            expected,
        }
    }
}
