//! Token engine: compact JWS over an arbitrary claim mapping.

use crate::error::SignError;
use crate::signing::{KeyFamily, SigningKey};
use jsonwebtoken::{Algorithm, Header};
use serde_json::{Map, Value};

/// Signs `claims` verbatim as the payload of a compact signed token.
///
/// No registered claims (`iss`, `exp`, ...) are added; the payload is exactly the
/// mapping given, in its insertion order. The header is `{"typ":"JWT","alg":...}`.
///
/// # Errors
///
/// Returns an error if:
/// - the key was resolved for a different algorithm family ([`SignError::KeyAlgorithmMismatch`])
/// - the underlying signer rejects the key ([`SignError::Token`])
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use signer::signing::{sign, SigningKey};
///
/// let (algorithm, key) = SigningKey::resolve("HS256", "c2VjcmV0").unwrap();
/// let claims = json!({"name": "checkout"});
/// let token = sign(algorithm, &key, claims.as_object().unwrap()).unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn sign(
    algorithm: Algorithm,
    key: &SigningKey,
    claims: &Map<String, Value>,
) -> Result<String, SignError> {
    let key_family = key.family();
    if KeyFamily::of(algorithm) != key_family {
        return Err(SignError::KeyAlgorithmMismatch {
            algorithm,
            key_family,
        });
    }

    let token = jsonwebtoken::encode(&Header::new(algorithm), claims, key.encoding_key())?;
    Ok(token)
}
