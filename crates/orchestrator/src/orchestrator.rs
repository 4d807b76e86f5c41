use std::sync::Arc;

use serde_json::json;
use xrpl_codec::Payment;
use xrpl_crypto::{halved_sha512, HashSize};
use xrpl_types::{AccountId, Amount, Currency};

use kms_client::KmsClient;
use store::{KmsAccount, Operation, OperationKind, Store, StoreError, Wallet, WalletKind};
use xrpl_client::XrplNodeClient;

use crate::admission::Admission;
use crate::config::Config;
use crate::error::OrchestratorError;
use crate::log;
use crate::worker::Worker;
use crate::DEFAULT_DESTINATION_TAG;

type Result<T> = std::result::Result<T, OrchestratorError>;

/// Drives a single MINT/BURN through its synchronous preparation phase, then hands off to
/// [`Worker`] for the asynchronous completion phase.
#[derive(Clone)]
pub struct Orchestrator {
    store: Arc<Store>,
    kms: Arc<KmsClient>,
    node: Arc<XrplNodeClient>,
    config: Arc<Config>,
    admission: Admission,
}

impl Orchestrator {
    /// Build an orchestrator over already-connected collaborators.
    pub fn new(
        store: Arc<Store>,
        kms: Arc<KmsClient>,
        node: Arc<XrplNodeClient>,
        config: Arc<Config>,
        admission: Admission,
    ) -> Self {
        Self { store, kms, node, config, admission }
    }

    /// `execute(type, domain, token_id, blockchain_id, amount, operator) -> operation_id | Error`.
    ///
    /// Admits the request through the single-flight gate, then runs the synchronous preparation
    /// phase: validate references, resolve wallets and the KMS account, persist the `Operation`,
    /// refresh the signing public key, fetch XRPL account state, build and hash the unsigned
    /// transaction, submit the raw-sign request, and hand off to the completion worker.
    pub async fn execute(
        &self,
        kind: OperationKind,
        domain: &str,
        token_id: &str,
        blockchain_id: &str,
        amount: &str,
        operator: &str,
    ) -> Result<String> {
        let guard = self.admission.try_admit().ok_or(OrchestratorError::AnotherInFlight)?;

        if !self.store.operation_type_exists(&kind.to_string()).await.map_err(OrchestratorError::Persistence)? {
            return Err(OrchestratorError::BadRequest { field: "type", reason: format!("unknown operation type: {kind}") });
        }
        if !self.store.operation_domain_exists(domain).await.map_err(OrchestratorError::Persistence)? {
            return Err(OrchestratorError::BadRequest { field: "domain", reason: format!("unknown domain: {domain}") });
        }
        let token = self
            .store
            .find_token(token_id)
            .await
            .map_err(|e| not_found_as_bad_request("token_id", e))?;
        if token.kind != store::TokenKind::IssuedCurrency {
            return Err(OrchestratorError::BadRequest {
                field: "token_id",
                reason: "token is not an issued currency".to_string(),
            });
        }
        if !self.store.blockchain_exists(blockchain_id).await.map_err(OrchestratorError::Persistence)? {
            return Err(OrchestratorError::BadRequest { field: "blockchain_id", reason: format!("unknown blockchain: {blockchain_id}") });
        }

        let (source, destination, issuer_address) = match kind {
            OperationKind::Mint => {
                let source = self
                    .store
                    .find_wallet(blockchain_id, WalletKind::Issuer, &token.abbr)
                    .await
                    .map_err(|e| not_found_as_bad_request("source wallet", e))?;
                let destination = self
                    .store
                    .find_wallet(blockchain_id, WalletKind::Supply, domain)
                    .await
                    .map_err(|e| not_found_as_bad_request("destination wallet", e))?;
                let issuer_address = source.address.clone();
                (source, destination, issuer_address)
            }
            OperationKind::Burn => {
                let source = self
                    .store
                    .find_wallet(blockchain_id, WalletKind::Supply, domain)
                    .await
                    .map_err(|e| not_found_as_bad_request("source wallet", e))?;
                let destination = self
                    .store
                    .find_wallet(blockchain_id, WalletKind::Issuer, &token.abbr)
                    .await
                    .map_err(|e| not_found_as_bad_request("destination wallet", e))?;
                let issuer_address = destination.address.clone();
                (source, destination, issuer_address)
            }
        };

        let mut kms_account = self
            .store
            .find_kms_account_by_wallet(&source.id)
            .await
            .map_err(|e| not_found_as_bad_request("kms account", e))?;

        let operation_id = self.persist_operation(kind, domain, &token.abbr, blockchain_id, amount, operator).await?;

        self.refresh_public_key(&operation_id, &mut kms_account).await?;

        let account_info = self.fetch_account_state(&operation_id, &source).await?;

        let payment = self.build_unsigned_payment(&source, &destination, &issuer_address, &token.abbr, amount, &kms_account, &account_info)?;

        let (unsigned_hex, pre_image_hash) = self.hash_for_signing(&operation_id, &payment)?;

        let kms_tx_id = self
            .submit_raw_sign(&operation_id, &kms_account, &unsigned_hex, &pre_image_hash)
            .await?;

        let worker = Worker::new(self.store.clone(), self.kms.clone(), self.node.clone(), self.config.clone());
        let handoff_operation_id = operation_id.clone();
        tokio::spawn(async move {
            worker.run(handoff_operation_id, payment, kms_tx_id, guard).await;
        });

        Ok(operation_id)
    }

    async fn persist_operation(
        &self,
        kind: OperationKind,
        domain: &str,
        token_abbr: &str,
        blockchain_id: &str,
        amount: &str,
        operator: &str,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let operation = Operation {
            id: String::new(),
            kind,
            domain: domain.to_string(),
            token_abbr: token_abbr.to_string(),
            blockchain_id: blockchain_id.to_string(),
            amount: amount.to_string(),
            operator: operator.to_string(),
            kms_status: String::new(),
            ledger_status: String::new(),
            kms_tx_id: String::new(),
            tx_hash: String::new(),
            tx_link: String::new(),
            created_at: now,
            updated_at: now,
        };
        let operation_id = self.store.save_operation(operation).await.map_err(OrchestratorError::Persistence)?;
        log::record(
            &self.store,
            &operation_id,
            "Operation Started",
            format!("{kind} requested by {operator} for {amount} {token_abbr} on {blockchain_id}"),
            "",
            json!({ "type": kind.to_string(), "domain": domain, "amount": amount, "operator": operator }),
            serde_json::Value::Null,
            serde_json::Value::Null,
        )
        .await
        .map_err(OrchestratorError::Persistence)?;
        Ok(operation_id)
    }

    async fn refresh_public_key(&self, operation_id: &str, kms_account: &mut KmsAccount) -> Result<()> {
        let refreshed = self.kms.get_public_key(&kms_account.vault_id, &kms_account.asset_id, 0, 0).await;
        match refreshed {
            Ok(response) => {
                log::record(
                    &self.store,
                    operation_id,
                    "KMS Public Key Refreshed",
                    "refreshed signing public key from kms",
                    "",
                    json!({ "vault_id": kms_account.vault_id, "asset_id": kms_account.asset_id }),
                    json!({ "publicKey": response.public_key }),
                    serde_json::Value::Null,
                )
                .await
                .map_err(OrchestratorError::Persistence)?;
                if !response.public_key.is_empty() {
                    kms_account.public_key = response.public_key;
                }
            }
            Err(err) => {
                // Readiness of cached public key: a refresh failure falls back to the cached
                // key on the KMS account record rather than aborting preparation.
                log::record(
                    &self.store,
                    operation_id,
                    "KMS Public Key Refresh Failed",
                    "falling back to cached public key",
                    "",
                    json!({ "vault_id": kms_account.vault_id, "asset_id": kms_account.asset_id }),
                    serde_json::Value::Null,
                    json!({ "error": err.to_string() }),
                )
                .await
                .map_err(OrchestratorError::Persistence)?;
            }
        }
        Ok(())
    }

    async fn fetch_account_state(&self, operation_id: &str, source: &Wallet) -> Result<xrpl_client::AccountInfo> {
        let result = self.node.account_info(&source.address).await;
        match &result {
            Ok(info) => {
                log::record(
                    &self.store,
                    operation_id,
                    "XRPL Account State Fetched",
                    "fetched sequence and ledger_current_index",
                    "",
                    json!({ "account": source.address }),
                    json!({ "sequence": info.account_data.sequence, "ledger_current_index": info.ledger_current_index }),
                    serde_json::Value::Null,
                )
                .await
                .map_err(OrchestratorError::Persistence)?;
            }
            Err(err) => {
                log::record(
                    &self.store,
                    operation_id,
                    "XRPL Account State Fetch Failed",
                    "could not fetch account state",
                    "",
                    json!({ "account": source.address }),
                    serde_json::Value::Null,
                    json!({ "error": err.to_string() }),
                )
                .await
                .map_err(OrchestratorError::Persistence)?;
            }
        }
        result.map_err(OrchestratorError::Ledger)
    }

    fn build_unsigned_payment(
        &self,
        source: &Wallet,
        destination: &Wallet,
        issuer_address: &str,
        token_abbr: &str,
        amount: &str,
        kms_account: &KmsAccount,
        account_info: &xrpl_client::AccountInfo,
    ) -> Result<Payment> {
        let account = AccountId::from_classic_address(&source.address)?;
        let destination_account = AccountId::from_classic_address(&destination.address)?;
        let issuer = AccountId::from_classic_address(issuer_address)?;
        let currency = Currency::canonicalize(token_abbr)?;
        let amount_value = Amount::issued_from_str(amount, currency, issuer)?;
        let signing_pub_key = hex::decode(&kms_account.public_key)?;

        Ok(Payment {
            account,
            destination: destination_account,
            destination_tag: DEFAULT_DESTINATION_TAG,
            amount: amount_value,
            flags: kms_account.flags,
            sequence: account_info.account_data.sequence,
            fee: Amount::Drops(self.config.xrpl_base_fee_drops),
            last_ledger_sequence: account_info.ledger_current_index + self.config.xrpl_ledger_increment,
            signing_pub_key,
            txn_signature: None,
        })
    }

    fn hash_for_signing(&self, _operation_id: &str, payment: &Payment) -> Result<(String, String)> {
        let unsigned_hex = payment.encode_for_signing_hex().map_err(OrchestratorError::Codec)?;
        let pre_image_hash = halved_sha512(
            &self.config.xrpl_prefix_unsigned,
            &unsigned_hex,
            HashSize(self.config.xrpl_hash_size),
        )
        .map_err(OrchestratorError::Hash)?;
        Ok((unsigned_hex, pre_image_hash))
    }

    async fn submit_raw_sign(
        &self,
        operation_id: &str,
        kms_account: &KmsAccount,
        unsigned_hex: &str,
        pre_image_hash: &str,
    ) -> Result<String> {
        let note = format!("xrpl-mint-burn operation {operation_id}");
        let result = self
            .kms
            .submit_raw_transaction(&kms_account.vault_id, &kms_account.asset_id, &note, pre_image_hash)
            .await;
        match result {
            Ok(response) => {
                log::record(
                    &self.store,
                    operation_id,
                    "KMS Raw Sign Submitted",
                    "submitted raw-hash signing request",
                    &response.id,
                    json!({ "vault_id": kms_account.vault_id, "asset_id": kms_account.asset_id, "content": pre_image_hash, "unsigned_blob": unsigned_hex }),
                    json!({ "id": response.id, "status": response.status }),
                    serde_json::Value::Null,
                )
                .await
                .map_err(OrchestratorError::Persistence)?;
                self.store
                    .update_operation_kms_id_and_status(operation_id, &response.id, &response.status)
                    .await
                    .map_err(OrchestratorError::Persistence)?;
                Ok(response.id)
            }
            Err(err) => {
                log::record(
                    &self.store,
                    operation_id,
                    "KMS Raw Sign Failed",
                    "raw-hash signing request rejected",
                    "",
                    json!({ "vault_id": kms_account.vault_id, "asset_id": kms_account.asset_id }),
                    serde_json::Value::Null,
                    json!({ "error": err.to_string() }),
                )
                .await
                .map_err(OrchestratorError::Persistence)?;
                Err(OrchestratorError::Kms(err))
            }
        }
    }
}

fn not_found_as_bad_request(field: &'static str, err: StoreError) -> OrchestratorError {
    match err {
        StoreError::NotFound { id, .. } => OrchestratorError::BadRequest { field, reason: format!("not found: {id}") },
        other => OrchestratorError::Persistence(other),
    }
}
