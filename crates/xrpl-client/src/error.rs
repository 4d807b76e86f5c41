use thiserror::Error;

/// Errors raised while talking to the XRPL node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The HTTP request itself failed. Safe to retry.
    #[error("xrpl node request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The node's `submit` response carried an `engine_result` other than `tesSUCCESS`.
    #[error("ledger rejected the transaction: {engine_result}")]
    EngineReject {
        /// The engine result code the node returned (e.g. `"tefPAST_SEQ"`).
        engine_result: String,
    },
    /// The response body did not match the expected JSON-RPC result shape.
    #[error("xrpl node response did not match the expected shape: {0}")]
    BadResponse(#[from] serde_json::Error),
}

/// Result alias for [`NodeError`].
pub type Result<T> = std::result::Result<T, NodeError>;
