//! otelsign Signing Library
//!
//! This crate signs OpenTelemetry batches: for each resource, instrumentation
//! scope and record of an OTLP/JSON export request it can compute a JWT over
//! that node's own data and store it as a string attribute on the node.
//!
//! # Modules
//!
//! - [`signing`] - Key resolution and the token engine
//! - [`document`] - Checked document access and attribute list merge
//! - [`otlp`] - Telemetry kinds, hierarchy names and the OTLP/JSON codec
//! - [`walker`] - The resource/scope/record tree walker
//! - [`config`] - Processor configuration
//! - [`processor`] - Per-batch processing entry points
//!
//! # Example
//!
//! ```
//! use signer::config::ProcessorConfig;
//! use signer::processor::SigningProcessor;
//!
//! let config = ProcessorConfig::new("HS256", "c2VjcmV0").with_attribute("signed.record");
//! let processor = SigningProcessor::new(&config).unwrap();
//!
//! let input = br#"{"resourceLogs":[{"scopeLogs":[{"logRecords":[{"body":{"stringValue":"hi"}}]}]}]}"#;
//! let output = processor.process_logs(input).unwrap();
//! assert!(String::from_utf8(output).unwrap().contains("signed.record"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod document;
pub mod error;
pub mod otlp;
pub mod processor;
pub mod signing;
pub mod walker;

pub use error::SignError;

/// Re-export common dependencies for convenience.
pub use jsonwebtoken;
pub use serde_json;
