//! Canonical binary serialization of XRPL transactions.
//!
//! Encodes the subset of transaction shapes the orchestrator builds (currently just
//! `Payment`) into the byte-exact wire format the ledger expects, driven by a data table of
//! field definitions rather than per-transaction-type logic. See [`definitions`] for the
//! ordering rules and [`transaction::Payment`] for the transaction shape itself.

mod cursor;
mod decode;
pub mod definitions;
mod error;
mod transaction;
mod value;

pub use error::{CodecError, Result};
pub use transaction::Payment;
pub use value::FieldValue;
