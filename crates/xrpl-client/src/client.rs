use crate::error::{NodeError, Result};
use crate::types::{
    AccountInfo, AccountInfoParams, AccountLines, AccountLinesParams, JsonRpcRequest,
    JsonRpcResponse, SubmitParams, SubmitResult,
};

/// JSON-RPC 1.0 client for an XRPL node's `account_info`, `submit`, and `account_lines` methods.
#[derive(Debug, Clone)]
pub struct XrplNodeClient {
    http: reqwest::Client,
    node_url: String,
}

impl XrplNodeClient {
    /// Build a client pointed at `node_url`.
    pub fn new(http: reqwest::Client, node_url: impl Into<String>) -> Self {
        Self { http, node_url: node_url.into() }
    }

    /// `account_info` with `{account, ledger_index: "current", queue: true}`.
    pub async fn account_info(&self, account: &str) -> Result<AccountInfo> {
        let request = JsonRpcRequest {
            method: "account_info",
            params: [AccountInfoParams { account, ledger_index: "current", queue: true }],
        };
        self.call(&request).await
    }

    /// `submit` with `{tx_blob}`. Always returns the parsed result on a successful HTTP call,
    /// regardless of `engine_result` — callers use [`SubmitResult::is_success`] to distinguish a
    /// ledger-level rejection from a transport failure.
    pub async fn submit(&self, tx_blob: &str) -> Result<SubmitResult> {
        let request = JsonRpcRequest { method: "submit", params: [SubmitParams { tx_blob }] };
        self.call(&request).await
    }

    /// `account_lines` with `{account}`.
    pub async fn account_lines(&self, account: &str) -> Result<AccountLines> {
        let request =
            JsonRpcRequest { method: "account_lines", params: [AccountLinesParams { account }] };
        self.call(&request).await
    }

    async fn call<P: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        request: &JsonRpcRequest<P>,
    ) -> Result<R> {
        let response = self.http.post(&self.node_url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(%status, %body, "xrpl node returned a non-success status");
        }

        let parsed: JsonRpcResponse<R> = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_result_recognizes_success() {
        let result = SubmitResult { engine_result: "tesSUCCESS".into(), tx_json: Default::default() };
        assert!(result.is_success());
    }

    #[test]
    fn submit_result_recognizes_failure() {
        let result = SubmitResult { engine_result: "tefPAST_SEQ".into(), tx_json: Default::default() };
        assert!(!result.is_success());
    }
}
