//! Core XRPL value types shared by the codec, signing, and client crates.
//!
//! This crate has no knowledge of transactions or wire framing; it only knows how to parse and
//! serialize the primitive values (account ids, currency codes, amounts) that appear inside them.

mod account_id;
mod amount;
mod currency;
mod error;

pub use account_id::AccountId;
pub use amount::Amount;
pub use currency::Currency;
pub use error::{Result, TypesError};
