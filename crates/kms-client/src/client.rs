use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{KmsError, Result};
use crate::jwt::RequestSigner;
use crate::types::{
    PublicKeyResponse, RawMessageContent, RawMessageData, RawSignExtraParameters, RawSignRequest,
    RawSignSource, SubmitRawResponse, TransactionStatus,
};

/// The signer's sentinel error code for "this vault/asset combination cannot sign this asset
/// type", surfaced in a non-2xx response body. Recognized by substring so minor wording changes
/// in the signer's error message don't silently stop being detected.
const UNSUPPORTED_ASSET_MARKER: &str = "asset is not supported";

/// HTTP client for the custodial key-management service's raw-hash signing API.
///
/// Every request carries `X-API-Key` and a freshly signed `Authorization: Bearer <JWT>` (see
/// [`RequestSigner`]). The signer never sees transaction semantics, only 32-byte digests to sign.
pub struct KmsClient {
    http: reqwest::Client,
    base_url: String,
    signer: RequestSigner,
}

impl std::fmt::Debug for KmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KmsClient").field("base_url", &self.base_url).finish()
    }
}

impl KmsClient {
    /// Build a client for `base_url`, signing requests with `rsa_pem` under `api_key`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, rsa_pem: &[u8], api_key: impl Into<String>) -> Result<Self> {
        Ok(Self { http, base_url: base_url.into(), signer: RequestSigner::new(rsa_pem, api_key)? })
    }

    /// `GetPublicKey(vault_id, asset_id, change, address_index)`.
    pub async fn get_public_key(
        &self,
        vault_id: &str,
        asset_id: &str,
        change: u32,
        address_index: u32,
    ) -> Result<PublicKeyResponse> {
        let path =
            format!("/v1/vault/accounts/{vault_id}/{asset_id}/{change}/{address_index}/public_key_info?compressed=true");
        self.get(&path).await
    }

    /// `SubmitRawTransaction(vault_id, asset_id, note, content_hex)`.
    pub async fn submit_raw_transaction(
        &self,
        vault_id: &str,
        asset_id: &str,
        note: &str,
        content_hex: &str,
    ) -> Result<SubmitRawResponse> {
        let path = "/v1/transactions";
        let body = RawSignRequest {
            operation: "RAW",
            asset_id,
            note,
            extra_parameters: RawSignExtraParameters {
                raw_message_data: RawMessageData { messages: vec![RawMessageContent { content: content_hex }] },
            },
            source: RawSignSource { kind: "VAULT_ACCOUNT", id: vault_id },
        };
        self.post(path, &body).await
    }

    /// `GetTransaction(tx_id)`.
    pub async fn get_transaction(&self, tx_id: &str) -> Result<TransactionStatus> {
        let path = format!("/v1/transactions/{tx_id}");
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let jwt = self.signer.sign(path, "")?;
        let response = self
            .http
            .request(Method::GET, format!("{}{}", self.base_url, path))
            .header("X-API-Key", self.signer.api_key())
            .header("Authorization", format!("Bearer {jwt}"))
            .send()
            .await?;
        parse_response(response).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body_json = serde_json::to_string(body).map_err(KmsError::BadResponse)?;
        let jwt = self.signer.sign(path, &body_json)?;
        let response = self
            .http
            .request(Method::POST, format!("{}{}", self.base_url, path))
            .header("X-API-Key", self.signer.api_key())
            .header("Authorization", format!("Bearer {jwt}"))
            .header("Content-Type", "application/json")
            .body(body_json)
            .send()
            .await?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(KmsError::BadResponse);
    }

    if status == StatusCode::BAD_REQUEST && body.to_ascii_lowercase().contains(UNSUPPORTED_ASSET_MARKER) {
        warn!(%status, "kms rejected request: unsupported asset");
        return Err(KmsError::UnsupportedAsset);
    }

    error!(%status, %body, "kms request rejected");
    Err(KmsError::Rejected { status: status.as_u16(), body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_unsupported_asset_marker_case_insensitively() {
        let body = "Error: Asset Is Not Supported for this vault account";
        assert!(body.to_ascii_lowercase().contains(UNSUPPORTED_ASSET_MARKER));
    }
}
