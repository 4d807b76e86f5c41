//! HTTP client for the custodial key-management service's raw-hash signing API.
//!
//! The signer holds private keys and signs whatever 32-byte digest it is handed; this crate
//! knows nothing about XRPL. It authenticates every request with a short-lived RS256 JWT (see
//! [`jwt::RequestSigner`]) and exposes the three RPCs the orchestrator needs:
//! [`KmsClient::get_public_key`], [`KmsClient::submit_raw_transaction`], and
//! [`KmsClient::get_transaction`].

#[macro_use]
extern crate tracing;

mod client;
mod error;
mod jwt;
mod types;

pub use client::KmsClient;
pub use error::{KmsError, Result};
pub use jwt::RequestSigner;
pub use types::{
    PublicKeyResponse, SignatureScalars, SignedMessage, SubmitRawResponse, TransactionStatus,
};
