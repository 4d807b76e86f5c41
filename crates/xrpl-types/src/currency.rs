use crate::error::{Result, TypesError};

/// The 160-bit (20-byte) wire representation of an XRPL currency code.
///
/// A three-character-or-shorter ISO-style code (`"USD"`) canonicalizes into the "standard"
/// layout: 12 zero bytes, the ASCII bytes, then zero-padding to 20 bytes. A longer symbolic code
/// (`"BBRL"`) is front-loaded instead: the ASCII bytes occupy the front of the 20 bytes, zero-padded
/// on the right, matching the ledger's non-standard-code convention. Anything already a
/// 40-hex-character non-standard code is taken as-is.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency([u8; 20]);

impl Currency {
    /// The raw 20-byte wire form.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Canonicalize a token abbreviation (`"USD"`, `"BBRL"`, or a 40-hex-character non-standard
    /// code) into its 20-byte wire representation.
    pub fn canonicalize(abbr: &str) -> Result<Self> {
        if abbr.len() == 40 && abbr.bytes().all(|b| b.is_ascii_hexdigit()) {
            let mut bytes = [0u8; 20];
            hex::decode_to_slice(abbr, &mut bytes)
                .map_err(|_| TypesError::InvalidCurrencyCode(abbr.to_string()))?;
            return Ok(Self(bytes));
        }

        if abbr.is_empty() || abbr.len() > 20 || !abbr.is_ascii() {
            return Err(TypesError::InvalidCurrencyCode(abbr.to_string()));
        }

        let mut bytes = [0u8; 20];
        if abbr.len() <= 3 {
            // XRPL's standard currency form: 12 zero bytes, then the ASCII code, then
            // zero-padding to 20 bytes.
            bytes[12..12 + abbr.len()].copy_from_slice(abbr.as_bytes());
        } else {
            // Longer symbolic codes are non-standard: the ASCII bytes are front-loaded and the
            // remainder zero-padded, matching the ledger's hex-encode-then-right-pad-to-40-chars
            // convention for abbreviations longer than 3 characters.
            bytes[..abbr.len()].copy_from_slice(abbr.as_bytes());
        }
        Ok(Self(bytes))
    }

    /// `true` if this is the native "XRP" pseudo-currency code (all zero bytes).
    pub fn is_xrp(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl std::fmt::Debug for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Currency").field(&hex::encode_upper(self.0)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_a_three_letter_code() {
        let currency = Currency::canonicalize("BBR").unwrap();
        let mut expected = [0u8; 20];
        expected[12..15].copy_from_slice(b"BBR");
        assert_eq!(currency.as_bytes(), &expected);
    }

    #[test]
    fn accepts_a_non_standard_hex_code() {
        let hex_code = "0158415500000000C1F76FF6ECB0BAC600000000";
        let currency = Currency::canonicalize(hex_code).unwrap();
        assert_eq!(hex::encode_upper(currency.as_bytes()), hex_code);
    }

    #[test]
    fn front_loads_a_longer_symbolic_code() {
        // "BBRL" -> ASCII bytes front-loaded, zero-padded to 20 bytes: 4242524C + 16 zero bytes.
        let currency = Currency::canonicalize("BBRL").unwrap();
        assert_eq!(hex::encode_upper(currency.as_bytes()), "4242524C00000000000000000000000000000000");
    }

    #[test]
    fn rejects_invalid_codes() {
        assert!(Currency::canonicalize("").is_err());
        assert!(Currency::canonicalize(&"A".repeat(21)).is_err());
        assert!(Currency::canonicalize("caf\u{e9}").is_err());
    }
}
