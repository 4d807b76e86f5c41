use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MINT credits tokens into circulation; BURN retires them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    /// Issuer wallet -> supply wallet.
    Mint,
    /// Supply wallet -> issuer wallet.
    Burn,
}

impl OperationKind {
    /// Parse from the case-insensitive string the HTTP request carries.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("MINT") {
            Some(Self::Mint)
        } else if raw.eq_ignore_ascii_case("BURN") {
            Some(Self::Burn)
        } else {
            None
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mint => write!(f, "MINT"),
            Self::Burn => write!(f, "BURN"),
        }
    }
}

/// The durable record of a MINT or BURN, from admission through final ledger status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation id, hex-encoded.
    #[serde(
        rename = "_id",
        with = "bson::serde_helpers::hex_string_as_object_id",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub id: String,
    /// MINT or BURN.
    #[serde(rename = "type")]
    pub kind: OperationKind,
    /// The logical tenant tag this operation was requested under.
    pub domain: String,
    /// The token abbreviation being minted/burned.
    pub token_abbr: String,
    /// The blockchain this operation targets.
    pub blockchain_id: String,
    /// Decimal amount, as a string (never parsed back to float).
    pub amount: String,
    /// Opaque client identifier that requested this operation.
    pub operator: String,
    /// Last observed KMS signing status. Empty until the KMS acknowledges the raw-sign request.
    #[serde(default)]
    pub kms_status: String,
    /// Terminal ledger outcome: empty, `"COMPLETED"`, or `"FAILED"`.
    #[serde(default)]
    pub ledger_status: String,
    /// The KMS's transaction id for this operation's raw-sign request. Immutable once set.
    #[serde(default)]
    pub kms_tx_id: String,
    /// The XRPL transaction hash, set iff `ledger_status` is non-empty.
    #[serde(default)]
    pub tx_hash: String,
    /// An explorer link for `tx_hash`, set iff `ledger_status == "COMPLETED"`.
    #[serde(default)]
    pub tx_link: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutated timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Operation {
    /// `true` once `ledger_status` has reached a terminal value.
    pub fn is_finalized(&self) -> bool {
        !self.ledger_status.is_empty()
    }
}

/// Append-only, per-step audit trail row for an [`Operation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLog {
    /// Unique log row id, hex-encoded.
    #[serde(
        rename = "_id",
        with = "bson::serde_helpers::hex_string_as_object_id",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub id: String,
    /// The operation this row belongs to.
    pub operation_id: String,
    /// Short tag identifying what happened (e.g. `"Operation Started"`).
    pub event: String,
    /// Human-readable description of the step.
    pub description: String,
    /// The KMS transaction id, if known at the time this row was written.
    #[serde(default)]
    pub kms_tx_id: String,
    /// The request payload sent to the external collaborator, as opaque JSON.
    #[serde(default)]
    pub payload: serde_json::Value,
    /// The response received, as opaque JSON.
    #[serde(default)]
    pub response: serde_json::Value,
    /// The error encountered, if any, as opaque JSON.
    #[serde(default)]
    pub error: serde_json::Value,
    /// When this row was written.
    pub created_at: DateTime<Utc>,
}

/// A named role a wallet plays for a given blockchain and domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletKind {
    /// Holds the issuing account for a token.
    Issuer,
    /// Holds tenant-scoped circulating supply.
    Supply,
    /// A general-purpose payment wallet, out of core scope.
    Payment,
}

/// An XRPL wallet known to the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique wallet id, hex-encoded.
    #[serde(
        rename = "_id",
        with = "bson::serde_helpers::hex_string_as_object_id",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub id: String,
    /// The blockchain this wallet belongs to.
    pub blockchain_id: String,
    /// Operator-facing name.
    pub name: String,
    /// Classic XRPL address (`r...`).
    pub address: String,
    /// ISSUER, SUPPLY, PAYMENT, ...
    #[serde(rename = "type")]
    pub kind: WalletKind,
    /// The domain key that, combined with `blockchain_id` and `kind`, selects this wallet.
    pub domain: String,
    /// Whether this wallet is eligible for orchestration.
    pub is_active: bool,
}

/// An issuable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Native XRP; never orchestrated by this system.
    Native,
    /// A non-native issued currency.
    IssuedCurrency,
}

/// A token this system can mint or burn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Unique token id, hex-encoded.
    #[serde(
        rename = "_id",
        with = "bson::serde_helpers::hex_string_as_object_id",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub id: String,
    /// The blockchain this token is issued on.
    pub blockchain_id: String,
    /// Operator-facing name.
    pub name: String,
    /// Symbolic code (3 chars or more).
    pub abbr: String,
    /// Issuer address for issued currencies.
    pub contract: String,
    /// Decimal precision.
    pub precision: u32,
    /// NATIVE or ISSUED_CURRENCY.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Whether this token is eligible for orchestration.
    pub is_active: bool,
}

/// Binds a wallet to a custodial signer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmsAccount {
    /// Unique account-binding id, hex-encoded.
    #[serde(
        rename = "_id",
        with = "bson::serde_helpers::hex_string_as_object_id",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub id: String,
    /// The wallet this binding belongs to.
    pub wallet_id: String,
    /// The signer's vault account id.
    pub vault_id: String,
    /// The signer's asset id for this vault account.
    pub asset_id: String,
    /// The cached compressed public key, hex-encoded. Used if a live refresh fails.
    #[serde(default)]
    pub public_key: String,
    /// XRPL account `Flags` to set on transactions signed through this account.
    pub flags: u32,
    /// The tenant domain this binding serves.
    pub domain: String,
    /// Whether this binding is eligible for orchestration.
    pub is_active: bool,
}

/// A supported ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockchain {
    /// Unique blockchain id, hex-encoded.
    #[serde(
        rename = "_id",
        with = "bson::serde_helpers::hex_string_as_object_id",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub id: String,
    /// Operator-facing name.
    pub name: String,
    /// Short code.
    pub abbr: String,
    /// Whether this blockchain is eligible for orchestration.
    pub is_active: bool,
}

/// Query parameters for [`crate::Store::find_operations_paginated`], with defaults
/// `sort_field=updated_at`, `sort_order=desc`, `page=1`, `limit=10`.
#[derive(Debug, Clone)]
pub struct OperationQuery {
    /// Field name to filter on, if any.
    pub filter_param: Option<String>,
    /// Value to filter `filter_param` against.
    pub filter_value: Option<String>,
    /// Field name to sort on.
    pub sort_field: String,
    /// `"asc"` or `"desc"`.
    pub sort_order: String,
    /// 1-indexed page number.
    pub page: u64,
    /// Page size, capped at 100 by the caller before this struct is built.
    pub limit: u64,
}

impl Default for OperationQuery {
    fn default() -> Self {
        Self {
            filter_param: None,
            filter_value: None,
            sort_field: "updated_at".to_string(),
            sort_order: "desc".to_string(),
            page: 1,
            limit: 10,
        }
    }
}

/// A page of [`Operation`]s plus the pagination metadata needed to fetch the next/previous page.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedOperations {
    /// Total number of operations matching the filter, across all pages.
    pub total_count: u64,
    /// Total number of pages at the current `limit`.
    pub total_pages: u64,
    /// The page number this response contains.
    pub current_page: u64,
    /// `0` if there is no next page.
    pub next_page: u64,
    /// `0` if there is no previous page.
    pub previous_page: u64,
    /// The operations on this page.
    pub data: Vec<Operation>,
}
