use crate::decode::decode_object;
use crate::error::Result;
use crate::value::{serialize_object, FieldValue};
use xrpl_types::{AccountId, Amount};

/// The XRPL `TransactionType` code for `Payment`.
const PAYMENT_TYPE_CODE: u16 = 0;

/// An XRPL `Payment` transaction, in the shape the orchestrator needs: an issuer/supply transfer
/// of an issued-currency amount, signed by a custodial signer.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub account: AccountId,
    pub destination: AccountId,
    pub destination_tag: u32,
    pub amount: Amount,
    pub flags: u32,
    pub sequence: u32,
    pub fee: Amount,
    pub last_ledger_sequence: u32,
    pub signing_pub_key: Vec<u8>,
    /// Present only once the KMS signature has been assembled; `encode_for_signing` never
    /// includes it regardless of whether it is set.
    pub txn_signature: Option<Vec<u8>>,
}

impl Payment {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut fields = vec![
            ("TransactionType", FieldValue::UInt16(PAYMENT_TYPE_CODE)),
            ("Account", FieldValue::AccountId(self.account)),
            ("Destination", FieldValue::AccountId(self.destination)),
            ("DestinationTag", FieldValue::UInt32(self.destination_tag)),
            ("Amount", FieldValue::Amount(self.amount.clone())),
            ("Flags", FieldValue::UInt32(self.flags)),
            ("Sequence", FieldValue::UInt32(self.sequence)),
            ("Fee", FieldValue::Amount(self.fee.clone())),
            ("LastLedgerSequence", FieldValue::UInt32(self.last_ledger_sequence)),
            ("SigningPubKey", FieldValue::Blob(self.signing_pub_key.clone())),
        ];
        if let Some(sig) = &self.txn_signature {
            fields.push(("TxnSignature", FieldValue::Blob(sig.clone())));
        }
        fields
    }

    /// Encode this transaction for the KMS signing pre-image: `TxnSignature` is always omitted,
    /// whether or not it has been set.
    pub fn encode_for_signing(&self) -> Result<Vec<u8>> {
        serialize_object(&self.fields(), true)
    }

    /// Encode this transaction for submission. Includes `TxnSignature` iff it has been set.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serialize_object(&self.fields(), false)
    }

    /// Uppercase hex of [`Self::encode_for_signing`].
    pub fn encode_for_signing_hex(&self) -> Result<String> {
        Ok(hex::encode_upper(self.encode_for_signing()?))
    }

    /// Uppercase hex of [`Self::encode`].
    pub fn encode_hex(&self) -> Result<String> {
        Ok(hex::encode_upper(self.encode()?))
    }

    /// Decode a previously-encoded (fully signed, `for_signing = false`) `Payment` blob back into
    /// its structured form. Used by the codec determinism / round-trip tests.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let fields = decode_object(bytes)?;
        let mut account = None;
        let mut destination = None;
        let mut destination_tag = 0u32;
        let mut amount = None;
        let mut flags = 0u32;
        let mut sequence = 0u32;
        let mut fee = None;
        let mut last_ledger_sequence = 0u32;
        let mut signing_pub_key = Vec::new();
        let mut txn_signature = None;

        for (name, value) in fields {
            match (name, value) {
                ("Account", FieldValue::AccountId(a)) => account = Some(a),
                ("Destination", FieldValue::AccountId(a)) => destination = Some(a),
                ("DestinationTag", FieldValue::UInt32(v)) => destination_tag = v,
                ("Amount", FieldValue::Amount(a)) => amount = Some(a),
                ("Flags", FieldValue::UInt32(v)) => flags = v,
                ("Sequence", FieldValue::UInt32(v)) => sequence = v,
                ("Fee", FieldValue::Amount(a)) => fee = Some(a),
                ("LastLedgerSequence", FieldValue::UInt32(v)) => last_ledger_sequence = v,
                ("SigningPubKey", FieldValue::Blob(b)) => signing_pub_key = b,
                ("TxnSignature", FieldValue::Blob(b)) => txn_signature = Some(b),
                _ => {}
            }
        }

        Ok(Self {
            account: account.expect("Account field present"),
            destination: destination.expect("Destination field present"),
            destination_tag,
            amount: amount.expect("Amount field present"),
            flags,
            sequence,
            fee: fee.expect("Fee field present"),
            last_ledger_sequence,
            signing_pub_key,
            txn_signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrpl_types::Currency;

    fn sample_payment(signed: bool) -> Payment {
        let account = AccountId::from_classic_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap();
        let destination = AccountId::from_classic_address("rhWURH8FCLhQvSPMTsdFRZ4SgJ2qNfXX2k").unwrap();
        let currency = Currency::canonicalize("BBRL").unwrap();
        let amount = Amount::issued_from_str("2.75", currency, account).unwrap();
        Payment {
            account,
            destination,
            destination_tag: 1,
            amount,
            flags: 2,
            sequence: 42,
            fee: Amount::Drops(12),
            last_ledger_sequence: 120,
            signing_pub_key: hex::decode("032EB95200000000000000000000000000000000000000000000000000000000").unwrap(),
            txn_signature: if signed { Some(vec![0xAA, 0xBB, 0xCC]) } else { None },
        }
    }

    #[test]
    fn encode_is_deterministic() {
        let tx = sample_payment(false);
        assert_eq!(tx.encode().unwrap(), tx.encode().unwrap());
    }

    #[test]
    fn field_order_is_strictly_increasing_type_then_field_code() {
        // TransactionType(1,2) < Flags(2,2) < Sequence(2,4) < DestinationTag(2,14) <
        // LastLedgerSequence(2,27) < Amount(6,1) < Fee(6,8) < SigningPubKey(7,3) <
        // Account(8,1) < Destination(8,3)
        let tx = sample_payment(false);
        let encoded = tx.encode().unwrap();
        // TransactionType header is always the first byte emitted (lowest sort key).
        assert_eq!(encoded[0], 0x12);
    }

    #[test]
    fn signing_encode_omits_txn_signature() {
        let unsigned = sample_payment(false);
        let signed = sample_payment(true);
        let unsigned_bytes = unsigned.encode_for_signing().unwrap();
        let signed_bytes = signed.encode_for_signing().unwrap();
        assert_eq!(unsigned_bytes, signed_bytes, "signing encode must ignore TxnSignature entirely");

        let full_signed_bytes = signed.encode().unwrap();
        assert!(full_signed_bytes.len() > signed_bytes.len());
    }

    #[test]
    fn round_trips_through_decode() {
        let tx = sample_payment(true);
        let encoded = tx.encode().unwrap();
        let decoded = Payment::decode(&encoded).unwrap();
        assert_eq!(tx, decoded);
    }
}
