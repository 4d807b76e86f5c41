use serde::{Deserialize, Serialize};

/// The single XRPL JSON-RPC 1.0 envelope every request on this client uses: one method name and
/// a single positional params object.
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<P> {
    pub(crate) method: &'static str,
    pub(crate) params: [P; 1],
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse<R> {
    pub(crate) result: R,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccountInfoParams<'a> {
    pub(crate) account: &'a str,
    pub(crate) ledger_index: &'static str,
    pub(crate) queue: bool,
}

/// The fields of `account_info`'s result this client cares about: the account's current
/// sequence number and the ledger's current index (used to compute `LastLedgerSequence`).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "account_data")]
    pub account_data: AccountData,
    pub ledger_current_index: u32,
}

/// The subset of `account_data` this client decodes.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData {
    #[serde(rename = "Sequence")]
    pub sequence: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitParams<'a> {
    pub(crate) tx_blob: &'a str,
}

/// The fields of `submit`'s result this client cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResult {
    pub engine_result: String,
    #[serde(default)]
    pub tx_json: SubmitTxJson,
}

impl SubmitResult {
    /// `true` iff the ledger accepted the transaction.
    pub fn is_success(&self) -> bool {
        self.engine_result == "tesSUCCESS"
    }
}

/// The `tx_json.hash` field of a `submit` response, when the node echoes it back.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SubmitTxJson {
    #[serde(default, rename = "hash")]
    pub hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccountLinesParams<'a> {
    pub(crate) account: &'a str,
}

/// `account_lines`'s result: the set of trust lines held by `account`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountLines {
    pub account: String,
    #[serde(default)]
    pub lines: Vec<TrustLine>,
}

/// One trust line, as returned by `account_lines`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrustLine {
    pub account: String,
    pub balance: String,
    pub currency: String,
    pub limit: String,
    pub limit_peer: String,
    #[serde(default)]
    pub no_ripple: bool,
    #[serde(default)]
    pub no_ripple_peer: bool,
    #[serde(default)]
    pub quality_in: u32,
    #[serde(default)]
    pub quality_out: u32,
}
