/// Errors raised while assembling a DER-encoded ECDSA signature.
#[derive(Debug, thiserror::Error)]
pub enum DerError {
    /// `r` or `s` was not valid hex.
    #[error("invalid hex scalar: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// `r` or `s` decoded to an empty byte string.
    #[error("empty scalar")]
    EmptyScalar,
    /// A scalar (after the canonical leading-zero pad) is too long for DER's single-byte length
    /// field, which this crate only supports up to 127 bytes.
    #[error("scalar too long for a single-byte DER length: {len} bytes")]
    TooLong {
        /// The padded scalar length that didn't fit.
        len: usize,
    },
}

/// Encode ECDSA scalars `r` and `s` (given as hex strings, as returned by the custodial signer)
/// into a DER `SEQUENCE { INTEGER r, INTEGER s }`, returned as uppercase hex.
///
/// Each scalar is left as-is except for DER's canonical leading-zero rule: a `0x00` byte is
/// prepended iff the scalar's high bit is set, so it can't be misread as a negative two's
/// complement integer. No low-`s` normalization is performed — the signer is trusted to return
/// canonical values (see the crate-level docs and the orchestrator's design notes).
pub fn encode_der(r_hex: &str, s_hex: &str) -> Result<String, DerError> {
    let r = pad_scalar(hex::decode(r_hex)?)?;
    let s = pad_scalar(hex::decode(s_hex)?)?;

    if r.len() > 127 {
        return Err(DerError::TooLong { len: r.len() });
    }
    if s.len() > 127 {
        return Err(DerError::TooLong { len: s.len() });
    }

    let mut out = Vec::with_capacity(6 + r.len() + s.len());
    out.push(0x30);
    out.push((2 + r.len() + 2 + s.len()) as u8);
    out.push(0x02);
    out.push(r.len() as u8);
    out.extend_from_slice(&r);
    out.push(0x02);
    out.push(s.len() as u8);
    out.extend_from_slice(&s);

    Ok(hex::encode_upper(out))
}

fn pad_scalar(bytes: Vec<u8>) -> Result<Vec<u8>, DerError> {
    if bytes.is_empty() {
        return Err(DerError::EmptyScalar);
    }
    if bytes[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.push(0x00);
        padded.extend_from_slice(&bytes);
        Ok(padded)
    } else {
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_two_low_bit_scalars() {
        let der = encode_der("01", "02").unwrap();
        // 30 06 02 01 01 02 01 02
        assert_eq!(der, "3006020101020102");
    }

    #[test]
    fn pads_high_bit_scalars_with_a_leading_zero() {
        let der = encode_der("FF", "FE").unwrap();
        // r: 00 FF (len 2), s: 00 FE (len 2) -> total len 2+2+2+2 = 8
        assert_eq!(der, "3008020100FF020100FE");
    }

    #[test]
    fn round_trips_a_32_byte_pair() {
        let r = "A1B2C3D4E5F6070809101112131415161718192021222324252627282930313";
        // trim to valid 32-byte hex (64 chars)
        let r = &r[..64.min(r.len())];
        let s = "7FEDCBA9876543210FEDCBA9876543210FEDCBA9876543210FEDCBA98765432";
        let der = encode_der(r, s).unwrap();
        assert!(der.starts_with("30"));
        let len = usize::from_str_radix(&der[2..4], 16).unwrap();
        assert_eq!(der.len(), 4 + len * 2);
    }

    #[test]
    fn rejects_non_hex_scalars() {
        assert!(encode_der("zz", "02").is_err());
    }

    #[test]
    fn rejects_empty_scalars() {
        assert!(encode_der("", "02").is_err());
    }
}
