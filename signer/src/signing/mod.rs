//! Key resolution and token signing.
//!
//! The closed set of supported algorithms is the one `jsonwebtoken` implements.
//! Every algorithm belongs to exactly one [`KeyFamily`], and a [`SigningKey`]
//! resolved for one family can sign with any algorithm of that family.

pub mod key;
pub mod token;

pub use key::{KeyFamily, SigningKey};
pub use token::sign;

pub use jsonwebtoken::Algorithm;

use crate::error::SignError;
use std::str::FromStr;

/// Every algorithm identifier accepted by [`parse_algorithm`].
pub const SUPPORTED_ALGORITHMS: [Algorithm; 12] = [
    Algorithm::HS256,
    Algorithm::HS384,
    Algorithm::HS512,
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
    Algorithm::ES256,
    Algorithm::ES384,
    Algorithm::EdDSA,
];

/// Parses an algorithm identifier such as `"HS256"` or `"EdDSA"`.
///
/// Identifiers are case-sensitive, matching the `alg` header values they produce.
/// `ES512` (ECDSA over P-521) is not in the set: `jsonwebtoken` has no P-521
/// signer, so configurations using it must move to `ES384` or `EdDSA`.
///
/// # Errors
///
/// Returns [`SignError::UnsupportedAlgorithm`] for any identifier outside the supported set.
///
/// # Example
///
/// ```
/// use signer::signing::{parse_algorithm, Algorithm};
///
/// assert_eq!(parse_algorithm("ES256").unwrap(), Algorithm::ES256);
/// assert!(parse_algorithm("none").is_err());
/// ```
pub fn parse_algorithm(name: &str) -> Result<Algorithm, SignError> {
    Algorithm::from_str(name).map_err(|_| SignError::UnsupportedAlgorithm(name.to_string()))
}

/// Returns the canonical identifier of an algorithm.
#[must_use]
pub fn algorithm_name(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::HS256 => "HS256",
        Algorithm::HS384 => "HS384",
        Algorithm::HS512 => "HS512",
        Algorithm::RS256 => "RS256",
        Algorithm::RS384 => "RS384",
        Algorithm::RS512 => "RS512",
        Algorithm::PS256 => "PS256",
        Algorithm::PS384 => "PS384",
        Algorithm::PS512 => "PS512",
        Algorithm::ES256 => "ES256",
        Algorithm::ES384 => "ES384",
        Algorithm::EdDSA => "EdDSA",
    }
}
