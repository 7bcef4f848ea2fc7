//! Integration tests for signing OTLP traces.
//!
//! Tests cover:
//! - Span signing with RSA and ECDSA keys
//! - Wrappers without a `resource`/`scope` mapping are signed whole
//! - Malformed batches are rejected and left untouched

use jsonwebtoken::Algorithm;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use signer::config::ProcessorConfig;
use signer::otlp::{TelemetryBatch, TelemetryKind};
use signer::processor::SigningProcessor;
use signer::SignError;

use super::common::{attributes_named, hmac_processor, key_pair, sample_batch, token, verify};

fn processor_for(algorithm: Algorithm, name: &str) -> SigningProcessor {
    let (material, _) = key_pair(algorithm);
    let config = ProcessorConfig::new(name, material)
        .with_resource_attribute("signed.resource")
        .with_attribute("signed.span");
    SigningProcessor::new(&config).unwrap()
}

#[test]
fn test_spans_signed_with_asymmetric_keys() {
    for (algorithm, name) in [(Algorithm::RS256, "RS256"), (Algorithm::ES256, "ES256")] {
        let processor = processor_for(algorithm, name);
        let original = sample_batch(TelemetryKind::Traces);
        let mut batch = original.clone();

        let summary = processor.process(&mut batch).unwrap();
        assert_eq!((summary.resources, summary.scopes, summary.records), (1, 0, 2));

        let (_, decoding) = key_pair(algorithm);
        let spans = &batch.document()["resourceSpans"][0]["scopeSpans"][0]["spans"];
        let before = &original.document()["resourceSpans"][0]["scopeSpans"][0]["spans"];
        for i in 0..2 {
            let claims = verify(token(&spans[i], "signed.span"), algorithm, &decoding);
            assert_eq!(Value::Object(claims), before[i], "{name} span {i}");
        }
    }
}

#[test]
fn test_wrapper_without_resource_mapping_signs_whole_subtree() {
    let processor = hmac_processor("signed.resource", "", "");
    let wrapper = json!({
        "scopeSpans": [{"spans": [{"name": "a"}]}],
        "schemaUrl": "https://opentelemetry.io/schemas/1.21.0"
    });
    let mut batch = TelemetryBatch::from_value(
        TelemetryKind::Traces,
        json!({"resourceSpans": [wrapper.clone()]}),
    )
    .unwrap();
    processor.process(&mut batch).unwrap();

    let signed = &batch.document()["resourceSpans"][0];
    let (_, decoding) = key_pair(Algorithm::HS256);
    let claims = verify(token(signed, "signed.resource"), Algorithm::HS256, &decoding);
    assert_eq!(Value::Object(claims), wrapper);
    assert_eq!(signed["scopeSpans"], wrapper["scopeSpans"]);
}

#[test]
fn test_missing_collections_are_zero_children() {
    let processor = hmac_processor("r", "s", "a");
    let mut batch = TelemetryBatch::from_value(
        TelemetryKind::Traces,
        json!({"resourceSpans": [{"resource": {}}, {"resource": {}, "scopeSpans": [{"scope": {}}]}]}),
    )
    .unwrap();
    let summary = processor.process(&mut batch).unwrap();
    assert_eq!((summary.resources, summary.scopes, summary.records), (2, 1, 0));
}

#[test]
fn test_malformed_attributes_reject_whole_batch() {
    let processor = hmac_processor("signed.resource", "", "signed.span");
    let input = json!({"resourceSpans": [
        {"resource": {}, "scopeSpans": [{"spans": [{"name": "ok"}]}]},
        {"resource": {"attributes": "service.name=x"}}
    ]});
    let mut batch = TelemetryBatch::from_value(TelemetryKind::Traces, input.clone()).unwrap();

    let err = processor.process(&mut batch).unwrap_err();
    assert!(matches!(
        err,
        SignError::MalformedTree { ref path, .. } if path == "/resourceSpans/1/resource/attributes"
    ));
    assert_eq!(batch.document(), &input);
    assert!(attributes_named(&batch.document()["resourceSpans"][0]["resource"], "signed.resource").is_empty());
}
