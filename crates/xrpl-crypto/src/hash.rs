use sha2::{Digest, Sha512};
use std::fmt;

/// Errors raised while computing a pre-image hash.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The prefix or blob was not valid hex.
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl fmt::Display for HashSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of hex characters to keep from the full SHA-512 digest.
///
/// XRPL's own prefixes (`TXN\0` and `STX\0`) truncate to the first 32 bytes, but the hash size
/// is configuration, not a baked-in literal: a 32-byte digest is 64 hex characters, and callers
/// supply that count explicitly so a differently configured prefix doesn't silently get the
/// wrong truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSize(pub usize);

impl HashSize {
    /// The conventional XRPL half-SHA-512 size: 32 bytes, i.e. 64 hex characters.
    pub const STANDARD: Self = Self(64);
}

/// Compute `SHA-512(decode_hex(prefix || blob))` and return the first `hash_size.0` hex
/// characters, uppercased.
///
/// `prefix` is a short uppercase-hex domain separator (e.g. XRPL's `"53545800"` for
/// transaction-id hashes, or `"534E4400"` for signing pre-images) and `blob` is the hex-encoded
/// transaction bytes. Both are concatenated as hex strings, *then* decoded once as a whole: the
/// prefix and blob share one hex alphabet, not two independently-decoded byte strings.
pub fn halved_sha512(prefix: &str, blob: &str, hash_size: HashSize) -> Result<String, HashError> {
    let mut combined = String::with_capacity(prefix.len() + blob.len());
    combined.push_str(prefix);
    combined.push_str(blob);

    let bytes = hex::decode(&combined)?;
    let digest = Sha512::digest(bytes);
    let full_hex = hex::encode(digest);

    Ok(full_hex[..hash_size.0].to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_a_known_vector() {
        // prefix = "00000000", blob = "00" -> sha512(decode_hex("0000000000"))
        let expected_full = hex::encode(Sha512::digest(hex::decode("0000000000").unwrap()));
        let expected = expected_full[..64].to_ascii_uppercase();
        let got = halved_sha512("00000000", "00", HashSize::STANDARD).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn truncates_to_the_requested_hash_size() {
        let got = halved_sha512("00000000", "00", HashSize(16)).unwrap();
        assert_eq!(got.len(), 16);
    }

    #[test]
    fn output_is_uppercase() {
        let got = halved_sha512("DEADBEEF", "00", HashSize::STANDARD).unwrap();
        assert_eq!(got, got.to_ascii_uppercase());
    }

    #[test]
    fn rejects_non_hex_input() {
        assert!(halved_sha512("zz", "00", HashSize::STANDARD).is_err());
    }
}
