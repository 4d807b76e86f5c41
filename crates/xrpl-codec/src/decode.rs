use crate::cursor::Cursor;
use crate::definitions::{FIELDS, TYPE_ACCOUNT_ID, TYPE_AMOUNT, TYPE_BLOB, TYPE_HASH256, TYPE_UINT16, TYPE_UINT32, TYPE_UINT8};
use crate::error::{CodecError, Result};
use crate::value::FieldValue;
use rust_decimal::Decimal;
use std::str::FromStr;
use xrpl_types::{AccountId, Amount, Currency};

/// Decode a flat `STObject` blob (no nested arrays/objects) back into its named field values.
///
/// This is the inverse of [`crate::value::serialize_object`] for the field set this codec knows
/// about, used to check the round-trip property: `decode(encode(tx)) == tx`.
pub fn decode_object(bytes: &[u8]) -> Result<Vec<(&'static str, FieldValue)>> {
    let mut cursor = Cursor::new(bytes);
    let mut out = Vec::new();

    while !cursor.is_empty() {
        let (type_code, field_code) = read_header(&mut cursor);
        let def = FIELDS
            .iter()
            .find(|f| f.type_code == type_code && f.field_code == field_code)
            .ok_or_else(|| CodecError::UnknownField(format!("type={type_code} field={field_code}")))?;

        let value = match type_code {
            t if t == TYPE_UINT8 => FieldValue::UInt8(cursor.read_u8()),
            t if t == TYPE_UINT16 => {
                let bytes = cursor.read_bytes(2);
                FieldValue::UInt16(u16::from_be_bytes([bytes[0], bytes[1]]))
            }
            t if t == TYPE_UINT32 => {
                let bytes = cursor.read_bytes(4);
                FieldValue::UInt32(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            t if t == TYPE_HASH256 => {
                let bytes = cursor.read_bytes(32);
                let mut arr = [0u8; 32];
                arr.copy_from_slice(bytes);
                FieldValue::Hash256(arr)
            }
            t if t == TYPE_AMOUNT => FieldValue::Amount(decode_amount(&mut cursor)),
            t if t == TYPE_BLOB => {
                let len = cursor.read_vl_length();
                FieldValue::Blob(cursor.read_bytes(len).to_vec())
            }
            t if t == TYPE_ACCOUNT_ID => {
                let len = cursor.read_vl_length();
                let bytes = cursor.read_bytes(len);
                let mut arr = [0u8; 20];
                arr.copy_from_slice(bytes);
                FieldValue::AccountId(AccountId::from_bytes(arr))
            }
            other => return Err(CodecError::UnknownField(format!("unsupported type code {other}"))),
        };

        out.push((def.name, value));
    }

    Ok(out)
}

fn read_header(cursor: &mut Cursor<'_>) -> (u16, u16) {
    let b0 = cursor.read_u8();
    let hi = b0 >> 4;
    let lo = b0 & 0xF;
    if hi != 0 {
        let type_code = hi as u16;
        let field_code = if lo != 0 { lo as u16 } else { cursor.read_u8() as u16 };
        (type_code, field_code)
    } else if lo != 0 {
        let field_code = lo as u16;
        let type_code = cursor.read_u8() as u16;
        (type_code, field_code)
    } else {
        let type_code = cursor.read_u8() as u16;
        let field_code = cursor.read_u8() as u16;
        (type_code, field_code)
    }
}

const ISSUED_MASK: u64 = 0x8000_0000_0000_0000;
const POSITIVE_MASK: u64 = 0x4000_0000_0000_0000;
const EXPONENT_BIAS: i64 = 97;

fn decode_amount(cursor: &mut Cursor<'_>) -> Amount {
    let is_issued = cursor.peek_u8() & 0x80 != 0;
    if !is_issued {
        let bytes = cursor.read_bytes(8);
        let raw = u64::from_be_bytes(bytes.try_into().unwrap());
        return Amount::Drops(raw & !POSITIVE_MASK);
    }

    let value_bytes = cursor.read_bytes(8);
    let raw = u64::from_be_bytes(value_bytes.try_into().unwrap());
    let currency_bytes = cursor.read_bytes(20);
    let issuer_bytes = cursor.read_bytes(20);

    let mut currency_arr = [0u8; 20];
    currency_arr.copy_from_slice(currency_bytes);
    let currency = Currency::canonicalize(&hex::encode_upper(currency_arr)).unwrap();

    let mut issuer_arr = [0u8; 20];
    issuer_arr.copy_from_slice(issuer_bytes);
    let issuer = AccountId::from_bytes(issuer_arr);

    if raw == ISSUED_MASK {
        return Amount::Issued { value: Decimal::ZERO, currency, issuer };
    }

    let is_positive = raw & POSITIVE_MASK != 0;
    let exponent = (((raw >> 54) & 0xFF) as i64) - EXPONENT_BIAS;
    let mantissa = raw & 0x003F_FFFF_FFFF_FFFF;

    let multiplier = Decimal::from_str(&format!("1e{exponent}")).unwrap_or(Decimal::ONE);
    let mut decimal = Decimal::from(mantissa).checked_mul(multiplier).unwrap_or(Decimal::ZERO);
    if !is_positive {
        decimal = -decimal;
    }

    Amount::Issued { value: decimal, currency, issuer }
}
