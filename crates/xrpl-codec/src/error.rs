use thiserror::Error;

/// Errors raised while encoding or decoding an XRPL transaction.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A field name was not found in the [`crate::definitions`] table.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// A variable-length field's payload was too long to fit XRPL's length-prefix scheme.
    #[error("invalid length for field {field}: {len} bytes")]
    InvalidLength { field: &'static str, len: usize },
    /// An `Amount` field could not be serialized.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] xrpl_types::TypesError),
    /// An `AccountID` field failed to decode from its classic address.
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),
    /// A base58 checksum did not match during decode.
    #[error("bad checksum decoding account id")]
    BadChecksum,
}

/// Result alias for [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
