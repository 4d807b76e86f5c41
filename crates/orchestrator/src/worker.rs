use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use xrpl_codec::Payment;
use xrpl_crypto::{encode_der, halved_sha512, HashSize};

use kms_client::KmsClient;
use store::Store;
use xrpl_client::XrplNodeClient;

use crate::admission::AdmissionGuard;
use crate::config::Config;
use crate::error::OrchestratorError;
use crate::log;

type Result<T> = std::result::Result<T, OrchestratorError>;

/// The asynchronous continuation of an operation: poll the KMS to completion, assemble the
/// signed blob, and submit it to the ledger.
///
/// Owns nothing shared with request handlers except through [`Store`] (the document store) and
/// the [`AdmissionGuard`] it is handed — dropping the guard on every exit path is what releases
/// the single-flight admission gate.
pub struct Worker {
    store: Arc<Store>,
    kms: Arc<KmsClient>,
    node: Arc<XrplNodeClient>,
    config: Arc<Config>,
}

impl Worker {
    /// Build a worker over already-connected collaborators.
    pub fn new(store: Arc<Store>, kms: Arc<KmsClient>, node: Arc<XrplNodeClient>, config: Arc<Config>) -> Self {
        Self { store, kms, node, config }
    }

    /// Run the completion phase for `operation_id` to a terminal outcome: `Finalized-OK`,
    /// `Finalized-Fail`, or `Aborted`. Never propagates an error to a caller — every failure is
    /// recorded in the operation's log instead. `_guard` is held for the lifetime of this call
    /// and releases the admission gate when it drops, regardless of how this function returns.
    pub async fn run(self, operation_id: String, mut payment: Payment, kms_tx_id: String, _guard: AdmissionGuard) {
        if let Err(err) = self.run_inner(&operation_id, &mut payment, &kms_tx_id).await {
            warn!(%operation_id, error = %err, "completion worker ended with an unrecoverable error");
            let _ = log::record(
                &self.store,
                &operation_id,
                "Worker Aborted",
                "completion worker aborted",
                &kms_tx_id,
                serde_json::Value::Null,
                serde_json::Value::Null,
                json!({ "error": err.to_string() }),
            )
            .await;
        }
    }

    async fn run_inner(&self, operation_id: &str, payment: &mut Payment, kms_tx_id: &str) -> Result<()> {
        let status = match self.poll_until_terminal(operation_id, kms_tx_id).await? {
            Some(status) => status,
            None => return Ok(()), // KMS reported FAILED; terminal, no ledger_status written.
        };

        let (r, s) = status.first_signature().ok_or(OrchestratorError::MissingSignature)?;
        let signature_hex = encode_der(r, s)?;
        payment.txn_signature = Some(hex::decode(&signature_hex)?);

        let signed_hex = payment.encode_hex().map_err(OrchestratorError::Codec)?;
        let tx_hash = halved_sha512(&self.config.xrpl_prefix_signed, &signed_hex, HashSize(self.config.xrpl_hash_size))
            .map_err(OrchestratorError::Hash)?;

        log::record(
            &self.store,
            operation_id,
            "Signed Blob Assembled",
            "assembled signed transaction blob from kms signature",
            kms_tx_id,
            json!({ "r": r, "s": s }),
            json!({ "tx_hash": tx_hash }),
            serde_json::Value::Null,
        )
        .await?;

        self.submit_to_ledger(operation_id, kms_tx_id, &signed_hex, &tx_hash).await
    }

    /// Poll `GetTransaction` every `kms_poll_interval_secs` until COMPLETED or FAILED, bounded by
    /// `kms_poll_timeout_secs`. Returns `Ok(Some(status))` on COMPLETED, `Ok(None)` on FAILED
    /// (terminal, nothing left to do), `Err(Timeout)` once the bound is exceeded.
    async fn poll_until_terminal(
        &self,
        operation_id: &str,
        kms_tx_id: &str,
    ) -> Result<Option<kms_client::TransactionStatus>> {
        let deadline = Instant::now() + Duration::from_secs(self.config.kms_poll_timeout_secs);
        loop {
            if Instant::now() >= deadline {
                log::record(
                    &self.store,
                    operation_id,
                    "KMS Poll Timed Out",
                    "exceeded configured kms poll timeout",
                    kms_tx_id,
                    serde_json::Value::Null,
                    serde_json::Value::Null,
                    serde_json::Value::Null,
                )
                .await?;
                return Err(OrchestratorError::Timeout);
            }

            match self.kms.get_transaction(kms_tx_id).await {
                Ok(status) => {
                    log::record(
                        &self.store,
                        operation_id,
                        "KMS Poll",
                        format!("kms status: {}", status.status),
                        kms_tx_id,
                        serde_json::Value::Null,
                        json!({ "status": status.status }),
                        serde_json::Value::Null,
                    )
                    .await?;
                    self.store.update_operation_kms_status(operation_id, &status.status).await?;

                    if status.is_completed() {
                        return Ok(Some(status));
                    }
                    if status.is_failed() {
                        return Ok(None);
                    }
                }
                Err(err) => {
                    log::record(
                        &self.store,
                        operation_id,
                        "KMS Poll Failed",
                        "transient error polling kms transaction status",
                        kms_tx_id,
                        serde_json::Value::Null,
                        serde_json::Value::Null,
                        json!({ "error": err.to_string() }),
                    )
                    .await?;
                }
            }

            tokio::time::sleep(Duration::from_secs(self.config.kms_poll_interval_secs)).await;
        }
    }

    async fn submit_to_ledger(&self, operation_id: &str, kms_tx_id: &str, signed_hex: &str, tx_hash: &str) -> Result<()> {
        match self.node.submit(signed_hex).await {
            Ok(result) => {
                log::record(
                    &self.store,
                    operation_id,
                    "Submitted To Ledger",
                    format!("engine_result: {}", result.engine_result),
                    kms_tx_id,
                    json!({ "tx_blob": signed_hex }),
                    json!({ "engine_result": result.engine_result }),
                    serde_json::Value::Null,
                )
                .await?;

                if result.is_success() {
                    let tx_link = format!("{}{}", self.config.xrpl_explorer_base_url, tx_hash);
                    self.store.update_operation_ledger_status(operation_id, "COMPLETED", tx_hash, &tx_link).await?;
                } else {
                    self.store.update_operation_ledger_status(operation_id, "FAILED", tx_hash, "").await?;
                }
            }
            Err(err) => {
                log::record(
                    &self.store,
                    operation_id,
                    "Ledger Submission Failed",
                    "submit call to xrpl node failed",
                    kms_tx_id,
                    json!({ "tx_blob": signed_hex }),
                    serde_json::Value::Null,
                    json!({ "error": err.to_string() }),
                )
                .await?;
                self.store.update_operation_ledger_status(operation_id, "FAILED", tx_hash, "").await?;
            }
        }
        Ok(())
    }
}
