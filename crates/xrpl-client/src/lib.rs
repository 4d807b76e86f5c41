//! JSON-RPC 1.0 client for an XRPL node's `account_info`, `submit`, and `account_lines` methods.
//!
//! This crate only speaks the wire protocol; it has no opinion about what the orchestrator does
//! with a `Sequence` number or an `engine_result`.

mod client;
mod error;
mod types;

pub use client::XrplNodeClient;
pub use error::{NodeError, Result};
pub use types::{AccountData, AccountInfo, AccountLines, SubmitResult, SubmitTxJson, TrustLine};
