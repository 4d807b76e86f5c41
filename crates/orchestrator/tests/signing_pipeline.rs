//! Exercises the codec-plus-hashing composition the way [`orchestrator::Orchestrator`] and
//! [`orchestrator::Worker`] wire it, without a live KMS, XRPL node, or document store: build an
//! unsigned `Payment` the same way the preparation phase does, hash it for signing, then assemble
//! a signed blob from a fixed `(r, s)` pair the way the completion worker does and confirm the
//! two blobs differ only by the signature field.

use orchestrator::DEFAULT_DESTINATION_TAG;
use xrpl_codec::Payment;
use xrpl_crypto::{encode_der, halved_sha512, HashSize};
use xrpl_types::{AccountId, Amount, Currency};

const ISSUER_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const SUPPLY_ADDRESS: &str = "rhWURH8FCLhQvSPMTsdFRZ4SgJ2qNfXX2k";

fn unsigned_mint_payment() -> Payment {
    let account = AccountId::from_classic_address(ISSUER_ADDRESS).unwrap();
    let destination = AccountId::from_classic_address(SUPPLY_ADDRESS).unwrap();
    let currency = Currency::canonicalize("BBRL").unwrap();
    let amount = Amount::issued_from_str("2.75", currency, account).unwrap();

    Payment {
        account,
        destination,
        destination_tag: DEFAULT_DESTINATION_TAG,
        amount,
        flags: 2,
        sequence: 42,
        fee: Amount::Drops(12),
        last_ledger_sequence: 100 + 20,
        signing_pub_key: hex::decode(
            "032EB95200000000000000000000000000000000000000000000000000000000",
        )
        .unwrap(),
        txn_signature: None,
    }
}

#[test]
fn pre_image_hash_is_deterministic_for_a_fixed_payment() {
    let payment = unsigned_mint_payment();
    let unsigned_hex = payment.encode_for_signing_hex().unwrap();
    let first = halved_sha512("534E4400", &unsigned_hex, HashSize::STANDARD).unwrap();
    let second = halved_sha512("534E4400", &unsigned_hex, HashSize::STANDARD).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
}

#[test]
fn assembling_the_signed_blob_only_adds_the_signature_field() {
    let mut payment = unsigned_mint_payment();
    let unsigned_hex = payment.encode_hex().unwrap();

    let r = "A1B2C3D4E5B2C3D4E5B2C3D4E5B2C3D4E5B2C3D4E5B2C3D4E5B2C3D4E5B2C3D4";
    let r = &r[..64];
    let s = "7FEDCBA97FEDCBA97FEDCBA97FEDCBA97FEDCBA97FEDCBA97FEDCBA97FEDCBA9";
    let der = encode_der(r, s).unwrap();
    payment.txn_signature = Some(hex::decode(&der).unwrap());

    let signed_hex = payment.encode_hex().unwrap();
    assert!(signed_hex.len() > unsigned_hex.len());

    let tx_hash = halved_sha512("53545800", &signed_hex, HashSize::STANDARD).unwrap();
    assert_eq!(tx_hash.len(), 64);

    let decoded = Payment::decode(&hex::decode(&signed_hex).unwrap()).unwrap();
    assert_eq!(decoded.txn_signature, Some(hex::decode(&der).unwrap()));
}

#[test]
fn signing_encode_never_includes_the_signature_even_after_it_is_set() {
    let mut payment = unsigned_mint_payment();
    let before = payment.encode_for_signing_hex().unwrap();
    payment.txn_signature = Some(vec![0xAA, 0xBB]);
    let after = payment.encode_for_signing_hex().unwrap();
    assert_eq!(before, after);
}
