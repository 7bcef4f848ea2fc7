//! Common test utilities and helpers for integration tests.
//!
//! This module provides key fixtures, token verification and small helpers
//! for digging signed attributes out of OTLP/JSON documents.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use signer::config::ProcessorConfig;
use signer::otlp::{TelemetryBatch, TelemetryKind};
use signer::processor::SigningProcessor;

/// base64 of `"secret"`.
pub const HMAC_SECRET: &str = "c2VjcmV0";

pub const RSA_PRIVATE: &str = include_str!("../../fixtures/rsa_private.pem");
pub const RSA_PUBLIC: &str = include_str!("../../fixtures/rsa_public.pem");
pub const EC_PRIVATE: &str = include_str!("../../fixtures/ec_private.pem");
pub const EC_PUBLIC: &str = include_str!("../../fixtures/ec_public.pem");
pub const EC384_PRIVATE: &str = include_str!("../../fixtures/ec384_private.pem");
pub const EC384_PUBLIC: &str = include_str!("../../fixtures/ec384_public.pem");
pub const EC_SEC1_PRIVATE: &str = include_str!("../../fixtures/ec_sec1_private.pem");
pub const EC_SEC1_PUBLIC: &str = include_str!("../../fixtures/ec_sec1_public.pem");
pub const EC384_SEC1_PRIVATE: &str = include_str!("../../fixtures/ec384_sec1_private.pem");
pub const EC384_SEC1_PUBLIC: &str = include_str!("../../fixtures/ec384_sec1_public.pem");
pub const ED25519_PRIVATE: &str = include_str!("../../fixtures/ed25519_private.pem");
pub const ED25519_PUBLIC: &str = include_str!("../../fixtures/ed25519_public.pem");

const LOGS: &str = include_str!("../../fixtures/logs.json");
const METRICS: &str = include_str!("../../fixtures/metrics.json");
const TRACES: &str = include_str!("../../fixtures/traces.json");

/// Returns the private key material and matching verification key for an algorithm.
pub fn key_pair(algorithm: Algorithm) -> (&'static str, DecodingKey) {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            (HMAC_SECRET, DecodingKey::from_secret(b"secret"))
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => (
            RSA_PRIVATE,
            DecodingKey::from_rsa_pem(RSA_PUBLIC.as_bytes()).unwrap(),
        ),
        Algorithm::ES256 => (
            EC_PRIVATE,
            DecodingKey::from_ec_pem(EC_PUBLIC.as_bytes()).unwrap(),
        ),
        Algorithm::ES384 => (
            EC384_PRIVATE,
            DecodingKey::from_ec_pem(EC384_PUBLIC.as_bytes()).unwrap(),
        ),
        Algorithm::EdDSA => (
            ED25519_PRIVATE,
            DecodingKey::from_ed_pem(ED25519_PUBLIC.as_bytes()).unwrap(),
        ),
    }
}

/// Verifies a token and returns its claims.
///
/// The tokens carry telemetry rather than registered claims, so expiry and
/// required-claim checks are switched off; the signature is still checked.
pub fn verify(token: &str, algorithm: Algorithm, key: &DecodingKey) -> Map<String, Value> {
    let mut validation = Validation::new(algorithm);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    jsonwebtoken::decode::<Map<String, Value>>(token, key, &validation)
        .expect("token should verify")
        .claims
}

/// Builds an HMAC processor with the given per-level attribute names.
pub fn hmac_processor(resource: &str, scope: &str, record: &str) -> SigningProcessor {
    let config = ProcessorConfig::new("HS256", HMAC_SECRET)
        .with_resource_attribute(resource)
        .with_scope_attribute(scope)
        .with_attribute(record);
    SigningProcessor::new(&config).unwrap()
}

/// Loads one of the sample batches under `tests/fixtures`.
pub fn sample_batch(kind: TelemetryKind) -> TelemetryBatch {
    let json = match kind {
        TelemetryKind::Logs => LOGS,
        TelemetryKind::Metrics => METRICS,
        TelemetryKind::Traces => TRACES,
    };
    TelemetryBatch::from_json(kind, json.as_bytes()).unwrap()
}

/// Returns the attribute entries whose key is `key`.
pub fn attributes_named<'a>(node: &'a Value, key: &str) -> Vec<&'a Value> {
    node.get("attributes")
        .and_then(Value::as_array)
        .map(|attrs| attrs.iter().filter(|a| a["key"] == key).collect())
        .unwrap_or_default()
}

/// Returns the token stored under `key`, asserting there is exactly one.
pub fn token<'a>(node: &'a Value, key: &str) -> &'a str {
    let entries = attributes_named(node, key);
    assert_eq!(entries.len(), 1, "expected exactly one '{key}' attribute");
    entries[0]["value"]["stringValue"]
        .as_str()
        .expect("signature should be a stringValue")
}
