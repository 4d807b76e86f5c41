use jsonwebtoken::{encode, EncodingKey, Header};
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// How long a signed request JWT remains valid for, in seconds. Short-lived by design: each
/// request gets a fresh token rather than a reusable session credential.
const TOKEN_TTL_SECS: i64 = 55;

/// The claims carried by every signed request, per the custodial signer's auth contract.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    uri: &'a str,
    nonce: u64,
    iat: i64,
    exp: i64,
    sub: &'a str,
    #[serde(rename = "bodyHash")]
    body_hash: String,
}

/// Signs request JWTs with an RSA private key loaded once at startup.
///
/// Holding the key in an immutable struct (rather than re-reading the PEM file per request)
/// matches the orchestrator's "KMS private key material is loaded once at startup into an
/// immutable signer object" design constraint.
pub struct RequestSigner {
    encoding_key: EncodingKey,
    api_key: String,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").field("api_key", &"<redacted>").finish()
    }
}

impl RequestSigner {
    /// Build a signer from a PEM-encoded RSA private key and the API key that identifies the
    /// caller to the signer.
    pub fn new(rsa_pem: &[u8], api_key: impl Into<String>) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(rsa_pem)?;
        Ok(Self { encoding_key, api_key: api_key.into() })
    }

    /// Sign a fresh request JWT for `uri` with the given request `body` (empty string for
    /// bodyless requests).
    pub fn sign(&self, uri: &str, body: &str) -> Result<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64;
        let claims = Claims {
            uri,
            nonce: fresh_nonce(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
            sub: &self.api_key,
            body_hash: body_hash(body),
        };
        let header = Header::new(jsonwebtoken::Algorithm::RS256);
        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// The API key carried as `X-API-Key` alongside the JWT.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// A fresh 63-bit positive integer drawn from a cryptographically secure RNG.
fn fresh_nonce() -> u64 {
    rand::rngs::OsRng.next_u64() & 0x7FFF_FFFF_FFFF_FFFF
}

fn body_hash(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_the_empty_body_to_the_known_empty_sha256() {
        assert_eq!(
            body_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn nonces_are_always_positive_and_within_63_bits() {
        for _ in 0..100 {
            let nonce = fresh_nonce();
            assert!(nonce <= 0x7FFF_FFFF_FFFF_FFFF);
        }
    }
}
