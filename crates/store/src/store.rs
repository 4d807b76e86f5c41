use bson::oid::ObjectId;
use bson::doc;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;

use crate::error::{Result, StoreError};
use crate::models::{
    Blockchain, KmsAccount, Operation, OperationLog, OperationQuery, PaginatedOperations, Token,
    Wallet, WalletKind,
};

const COLL_OPERATIONS: &str = "operations";
const COLL_OPERATION_LOGS: &str = "operation_logs";
const COLL_WALLETS: &str = "wallets";
const COLL_TOKENS: &str = "tokens";
const COLL_KMS_ACCOUNTS: &str = "kms_accounts";
const COLL_BLOCKCHAINS: &str = "blockchains";
const COLL_OPERATION_TYPES: &str = "operation_types";
const COLL_OPERATION_DOMAINS: &str = "operation_domains";

/// Typed facade over the document store: operations, operation logs, and read-only reference
/// lookups (wallets, tokens, KMS accounts, blockchains, operation types/domains).
///
/// Every method here is a single document read or write — there is no cross-document
/// transaction. Correctness of the orchestrator built on top depends on idempotent updates keyed
/// by operation id and the append-only nature of logs, not on any atomicity this facade provides.
#[derive(Debug, Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Wrap an already-connected database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new [`Operation`] and return its assigned id.
    pub async fn save_operation(&self, mut operation: Operation) -> Result<String> {
        let id = ObjectId::new();
        operation.id = id.to_hex();
        self.db.collection::<Operation>(COLL_OPERATIONS).insert_one(&operation).await?;
        Ok(operation.id)
    }

    /// Append an [`OperationLog`] row. Never mutated or deleted afterward.
    pub async fn save_operation_log(&self, mut log: OperationLog) -> Result<String> {
        let id = ObjectId::new();
        log.id = id.to_hex();
        self.db.collection::<OperationLog>(COLL_OPERATION_LOGS).insert_one(&log).await?;
        Ok(log.id)
    }

    /// Update only `kms_status` and `updated_at`.
    pub async fn update_operation_kms_status(&self, operation_id: &str, kms_status: &str) -> Result<()> {
        let oid = parse_id(operation_id)?;
        self.db
            .collection::<Operation>(COLL_OPERATIONS)
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "kms_status": kms_status, "updated_at": bson::DateTime::from(Utc::now()) } },
            )
            .await?;
        Ok(())
    }

    /// Update `kms_tx_id` and `kms_status` together, once the KMS acknowledges the raw-sign
    /// request. `kms_tx_id` is immutable after this call per the operation's invariants.
    pub async fn update_operation_kms_id_and_status(
        &self,
        operation_id: &str,
        kms_tx_id: &str,
        kms_status: &str,
    ) -> Result<()> {
        let oid = parse_id(operation_id)?;
        self.db
            .collection::<Operation>(COLL_OPERATIONS)
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "kms_tx_id": kms_tx_id,
                    "kms_status": kms_status,
                    "updated_at": bson::DateTime::from(Utc::now()),
                } },
            )
            .await?;
        Ok(())
    }

    /// Set the terminal `ledger_status`, `tx_hash`, and `tx_link`. Callers must only call this
    /// once per operation; the store does not enforce the ∅→terminal transition itself.
    pub async fn update_operation_ledger_status(
        &self,
        operation_id: &str,
        ledger_status: &str,
        tx_hash: &str,
        tx_link: &str,
    ) -> Result<()> {
        let oid = parse_id(operation_id)?;
        self.db
            .collection::<Operation>(COLL_OPERATIONS)
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "ledger_status": ledger_status,
                    "tx_hash": tx_hash,
                    "tx_link": tx_link,
                    "updated_at": bson::DateTime::from(Utc::now()),
                } },
            )
            .await?;
        Ok(())
    }

    /// Look up an operation by id.
    pub async fn find_operation_by_id(&self, operation_id: &str) -> Result<Operation> {
        let oid = parse_id(operation_id)?;
        self.db
            .collection::<Operation>(COLL_OPERATIONS)
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| StoreError::NotFound { kind: "operation", id: operation_id.to_string() })
    }

    /// All log rows for `operation_id`, in reverse-chronological order (most recent first),
    /// sorted by `created_at` with `_id` as a tiebreak so insertion order is total.
    pub async fn find_operation_logs_by_operation_id(&self, operation_id: &str) -> Result<Vec<OperationLog>> {
        let options = FindOptions::builder().sort(doc! { "created_at": -1, "_id": -1 }).build();
        let cursor = self
            .db
            .collection::<OperationLog>(COLL_OPERATION_LOGS)
            .find(doc! { "operation_id": operation_id })
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Paginated, filtered, sorted operation listing.
    pub async fn find_operations_paginated(&self, query: OperationQuery) -> Result<PaginatedOperations> {
        let mut filter = doc! {};
        if let (Some(param), Some(value)) = (&query.filter_param, &query.filter_value) {
            if !param.is_empty() {
                filter.insert(param.clone(), value.clone());
            }
        }

        let collection = self.db.collection::<Operation>(COLL_OPERATIONS);
        let total_count = collection.count_documents(filter.clone()).await?;

        let sort_direction = if query.sort_order.eq_ignore_ascii_case("asc") { 1 } else { -1 };
        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let skip = (page - 1) * limit;

        let options = FindOptions::builder()
            .sort(doc! { query.sort_field.clone(): sort_direction })
            .skip(skip)
            .limit(limit as i64)
            .build();

        let cursor = collection.find(filter).with_options(options).await?;
        let data: Vec<Operation> = cursor.try_collect().await?;

        let total_pages = total_count.div_ceil(limit).max(1);
        let next_page = if page < total_pages { page + 1 } else { 0 };
        let previous_page = if page > 1 { page - 1 } else { 0 };

        Ok(PaginatedOperations { total_count, total_pages, current_page: page, next_page, previous_page, data })
    }

    /// The single active wallet selected by `(blockchain_id, kind, domain)`.
    pub async fn find_wallet(&self, blockchain_id: &str, kind: WalletKind, domain: &str) -> Result<Wallet> {
        self.db
            .collection::<Wallet>(COLL_WALLETS)
            .find_one(doc! {
                "blockchain_id": blockchain_id,
                "type": bson::to_bson(&kind)?,
                "domain": domain,
                "is_active": true,
            })
            .await?
            .ok_or_else(|| StoreError::NotFound {
                kind: "wallet",
                id: format!("{blockchain_id}/{domain}"),
            })
    }

    /// Look up a token by id.
    pub async fn find_token(&self, token_id: &str) -> Result<Token> {
        let oid = parse_id(token_id)?;
        self.db
            .collection::<Token>(COLL_TOKENS)
            .find_one(doc! { "_id": oid, "is_active": true })
            .await?
            .ok_or_else(|| StoreError::NotFound { kind: "token", id: token_id.to_string() })
    }

    /// `true` iff a token with this id exists and is active.
    pub async fn token_exists(&self, token_id: &str) -> Result<bool> {
        Ok(self.find_token(token_id).await.is_ok())
    }

    /// The active custodial-signer binding for `wallet_id`.
    pub async fn find_kms_account_by_wallet(&self, wallet_id: &str) -> Result<KmsAccount> {
        self.db
            .collection::<KmsAccount>(COLL_KMS_ACCOUNTS)
            .find_one(doc! { "wallet_id": wallet_id, "is_active": true })
            .await?
            .ok_or_else(|| StoreError::NotFound { kind: "kms_account", id: wallet_id.to_string() })
    }

    /// Look up a blockchain by id.
    pub async fn find_blockchain(&self, blockchain_id: &str) -> Result<Blockchain> {
        let oid = parse_id(blockchain_id)?;
        self.db
            .collection::<Blockchain>(COLL_BLOCKCHAINS)
            .find_one(doc! { "_id": oid, "is_active": true })
            .await?
            .ok_or_else(|| StoreError::NotFound { kind: "blockchain", id: blockchain_id.to_string() })
    }

    /// `true` iff an active blockchain with this id exists.
    pub async fn blockchain_exists(&self, blockchain_id: &str) -> Result<bool> {
        Ok(self.find_blockchain(blockchain_id).await.is_ok())
    }

    /// `true` iff `name` is a known, active operation type (`"MINT"` / `"BURN"`).
    pub async fn operation_type_exists(&self, name: &str) -> Result<bool> {
        let count = self
            .db
            .collection::<bson::Document>(COLL_OPERATION_TYPES)
            .count_documents(doc! { "name": name, "is_active": true })
            .await?;
        Ok(count > 0)
    }

    /// `true` iff `name` is a known, active operation domain.
    pub async fn operation_domain_exists(&self, name: &str) -> Result<bool> {
        let count = self
            .db
            .collection::<bson::Document>(COLL_OPERATION_DOMAINS)
            .count_documents(doc! { "name": name, "is_active": true })
            .await?;
        Ok(count > 0)
    }
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
