use thiserror::Error;

/// Errors raised while talking to the custodial signer.
#[derive(Debug, Error)]
pub enum KmsError {
    /// The HTTP request itself failed (DNS, connect, timeout, TLS). Safe to retry.
    #[error("kms request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The signer responded with its sentinel "unsupported asset" error code. Callers should
    /// translate this into a client-facing bad request rather than a 500.
    #[error("kms rejected the request: unsupported asset")]
    UnsupportedAsset,
    /// A non-2xx response whose body doesn't match the unsupported-asset sentinel; the body is
    /// included verbatim for operator diagnosis.
    #[error("kms returned {status}: {body}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },
    /// The response body could not be parsed into the expected shape.
    #[error("kms response did not match the expected shape: {0}")]
    BadResponse(#[from] serde_json::Error),
    /// Signing the request JWT failed.
    #[error("failed to sign request jwt: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Result alias for [`KmsError`].
pub type Result<T> = std::result::Result<T, KmsError>;
