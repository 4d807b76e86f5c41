use serde::{Deserialize, Serialize};

/// Response to [`crate::KmsClient::get_public_key`].
#[derive(Debug, Clone, Deserialize)]
pub struct PublicKeyResponse {
    /// Hex-encoded compressed public key, empty if the signer has none cached yet.
    #[serde(rename = "publicKey", default)]
    pub public_key: String,
}

/// Request body for [`crate::KmsClient::submit_raw_transaction`].
#[derive(Debug, Clone, Serialize)]
pub struct RawSignRequest<'a> {
    pub(crate) operation: &'static str,
    #[serde(rename = "assetId")]
    pub(crate) asset_id: &'a str,
    pub(crate) note: &'a str,
    #[serde(rename = "extraParameters")]
    pub(crate) extra_parameters: RawSignExtraParameters<'a>,
    pub(crate) source: RawSignSource<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RawSignSource<'a> {
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
    pub(crate) id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RawSignExtraParameters<'a> {
    #[serde(rename = "rawMessageData")]
    pub(crate) raw_message_data: RawMessageData<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RawMessageData<'a> {
    pub(crate) messages: Vec<RawMessageContent<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RawMessageContent<'a> {
    pub(crate) content: &'a str,
}

/// Response to [`crate::KmsClient::submit_raw_transaction`]: the signer's acknowledgement that it
/// has accepted the raw-sign request, not that signing has completed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitRawResponse {
    /// The signer's transaction id; used to poll for completion.
    pub id: String,
    /// The signer's initial status for this request.
    pub status: String,
}

/// Response to [`crate::KmsClient::get_transaction`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionStatus {
    /// The signer's transaction id.
    pub id: String,
    /// Current lifecycle status; `COMPLETED` and `FAILED` are terminal.
    pub status: String,
    /// Present once the signer has produced signatures.
    #[serde(rename = "signedMessages", default)]
    pub signed_messages: Vec<SignedMessage>,
}

impl TransactionStatus {
    /// `true` once the signer has finished signing successfully.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("COMPLETED")
    }

    /// `true` once the signer has given up on this request.
    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case("FAILED")
    }

    /// The first signed message's `(r, s)` scalars, as returned by the signer. `None` until
    /// [`Self::is_completed`].
    pub fn first_signature(&self) -> Option<(&str, &str)> {
        self.signed_messages.first().map(|m| (m.signature.r.as_str(), m.signature.s.as_str()))
    }
}

/// One entry of [`TransactionStatus::signed_messages`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignedMessage {
    /// The public key that produced this signature, hex-encoded.
    #[serde(rename = "publicKey", default)]
    pub public_key: String,
    /// The ECDSA signature scalars.
    pub signature: SignatureScalars,
}

/// The `(r, s)` scalars of an ECDSA signature, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignatureScalars {
    /// The `r` scalar, hex-encoded.
    pub r: String,
    /// The `s` scalar, hex-encoded.
    pub s: String,
}
