//! Single-flight MINT/BURN orchestration: an admission gate, a synchronous preparation phase,
//! and an asynchronous completion worker, fronted by an HTTP surface.
//!
//! This crate is the only one in the workspace that knows the *shape* of a MINT/BURN operation —
//! every other crate is a narrow, reusable layer ([`xrpl_codec`] for the wire format,
//! [`xrpl_crypto`] for hashing and DER assembly, [`kms_client`] and [`xrpl_client`] for the two
//! external services, [`store`] for persistence) that this crate composes.

#[macro_use]
extern crate tracing;

mod admission;
pub mod config;
mod error;
mod log;
pub mod http;
mod orchestrator;
mod worker;

pub use admission::{Admission, AdmissionGuard};
pub use config::{Config, ConfigError};
pub use error::OrchestratorError;
pub use orchestrator::Orchestrator;
pub use worker::Worker;

/// `DestinationTag` applied to every Payment this system builds. Internal MINT/BURN flows always
/// use the same tag, so it is a named constant rather than a caller-supplied field.
pub const DEFAULT_DESTINATION_TAG: u32 = 1;
