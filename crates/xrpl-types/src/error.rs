use thiserror::Error;

/// Errors raised while parsing or constructing XRPL value types.
#[derive(Debug, Error)]
pub enum TypesError {
    /// The base58 alphabet rejected a character in the input.
    #[error("invalid base58 address: {0}")]
    InvalidBase58(String),
    /// The decoded payload did not have the expected length for a classic address.
    #[error("invalid account id length: expected 20 bytes, got {0}")]
    InvalidAccountIdLength(usize),
    /// The trailing 4-byte checksum did not match the double-SHA256 of the payload.
    #[error("base58 checksum mismatch")]
    BadChecksum,
    /// A currency code string was neither a 3-character ISO-style code nor a 40-character hex string.
    #[error("invalid currency code: {0}")]
    InvalidCurrencyCode(String),
    /// An amount value could not be represented in the XRPL issued-currency mantissa/exponent scheme.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),
    /// An amount string was not a valid decimal.
    #[error("invalid decimal amount: {0}")]
    InvalidDecimal(String),
}

/// Result alias for [`TypesError`].
pub type Result<T> = std::result::Result<T, TypesError>;
