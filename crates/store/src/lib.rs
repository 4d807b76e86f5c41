//! Typed persistence facade over the MongoDB-backed operation and reference-data store.
//!
//! Callers never see the driver directly: [`Store`] exposes one method per read or write the
//! orchestrator needs, each a single document operation. There is no multi-document transaction
//! here — correctness further up the stack rests on idempotent updates keyed by operation id and
//! the append-only nature of [`OperationLog`] rows.

mod error;
mod models;
mod store;

pub use error::{Result, StoreError};
pub use models::{
    Blockchain, KmsAccount, Operation, OperationKind, OperationLog, OperationQuery, PaginatedOperations,
    Token, TokenKind, Wallet, WalletKind,
};
pub use store::Store;
