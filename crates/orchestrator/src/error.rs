use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The single error type the orchestrator's public surface returns, encompassing every failure
/// mode in the preparation path. The completion worker never surfaces these to a caller — it
/// records them in the operation log instead (see [`crate::worker`]).
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Validation, missing reference, or malformed request field.
    #[error("bad request: {field}: {reason}")]
    BadRequest {
        /// The field or resource that failed validation.
        field: &'static str,
        /// Why it failed.
        reason: String,
    },
    /// Another operation is currently running; admission rejected this one.
    #[error("another operation is currently being executed")]
    AnotherInFlight,
    /// The binary codec failed to encode a transaction. Deterministic — treated as a bug.
    #[error("codec error: {0}")]
    Codec(#[from] xrpl_codec::CodecError),
    /// DER assembly of the KMS signature failed. Deterministic — treated as a bug.
    #[error("der encode error: {0}")]
    DerEncode(#[from] xrpl_crypto::DerError),
    /// The pre-image hash could not be computed.
    #[error("hash error: {0}")]
    Hash(#[from] xrpl_crypto::HashError),
    /// The custodial signer rejected or could not be reached.
    #[error("kms error: {0}")]
    Kms(#[from] kms_client::KmsError),
    /// The XRPL node rejected or could not be reached.
    #[error("ledger error: {0}")]
    Ledger(#[from] xrpl_client::NodeError),
    /// The document store failed. Logs are still attempted best-effort by callers.
    #[error("persistence error: {0}")]
    Persistence(#[from] store::StoreError),
    /// A value read back from the document store (a wallet address, a cached public key) failed
    /// to parse as the XRPL primitive it's supposed to be. Treated as a bug in stored data, not a
    /// caller error.
    #[error("invalid xrpl value: {0}")]
    Types(#[from] xrpl_types::TypesError),
    /// A hex string read from the document store or the KMS did not decode.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The KMS reported the transaction COMPLETED but supplied no signed message.
    #[error("kms completed signing but returned no signature")]
    MissingSignature,
    /// The completion worker exceeded its configured KMS poll timeout.
    #[error("timed out waiting for kms to complete signing")]
    Timeout,
}

/// The JSON body returned alongside an error status.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for OrchestratorError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::AnotherInFlight => StatusCode::LOCKED,
            Self::Kms(kms_client::KmsError::UnsupportedAsset) => StatusCode::BAD_REQUEST,
            Self::Codec(_) | Self::DerEncode(_) | Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Types(_) | Self::Hex(_) | Self::MissingSignature => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Kms(_) | Self::Ledger(_) | Self::Persistence(_) | Self::Timeout => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody { error: self.to_string() };
        (status, axum::Json(body)).into_response()
    }
}
