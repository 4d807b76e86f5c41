//! Pre-image hashing and DER signature assembly for XRPL transaction signing.
//!
//! This crate has no notion of a transaction, a wallet, or a custodial signer; it implements
//! exactly the two primitives the signing pipeline needs: the domain-prefixed half-SHA-512
//! digest the custodial signer signs over ([`halved_sha512`]), and the DER encoding of the
//! `(r, s)` scalars it returns ([`encode_der`]).

mod der;
mod hash;

pub use der::{encode_der, DerError};
pub use hash::{halved_sha512, HashError, HashSize};
