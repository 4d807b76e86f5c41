use crate::account_id::AccountId;
use crate::currency::Currency;
use crate::error::{Result, TypesError};
use rust_decimal::Decimal;
use std::str::FromStr;

const MANTISSA_MIN: i128 = 1_000_000_000_000_000; // 10^15
const MANTISSA_MAX: i128 = 9_999_999_999_999_999; // 10^16 - 1
const EXPONENT_MIN: i32 = -96;
const EXPONENT_MAX: i32 = 80;
const EXPONENT_BIAS: i64 = 97;

const ISSUED_MASK: u64 = 0x8000_0000_0000_0000;
const POSITIVE_MASK: u64 = 0x4000_0000_0000_0000;
const XRP_POSITIVE_MASK: u64 = 0x4000_0000_0000_0000;

/// An XRPL `Amount` field value: either native XRP drops or an issued-currency amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Amount {
    /// Native XRP, denominated in drops (1 XRP = 10^6 drops).
    Drops(u64),
    /// An issued-currency amount: decimal value, currency code, issuer.
    Issued { value: Decimal, currency: Currency, issuer: AccountId },
}

impl Amount {
    /// Construct a drops amount from a decimal XRP string (e.g. `"2.75"` is rejected; drops must
    /// already be an integer string of drops). Used for fee fields.
    pub fn drops_from_str(value: &str) -> Result<Self> {
        let drops: u64 =
            value.parse().map_err(|_| TypesError::InvalidDecimal(value.to_string()))?;
        Ok(Self::Drops(drops))
    }

    /// Construct an issued-currency amount from a decimal string value.
    pub fn issued_from_str(value: &str, currency: Currency, issuer: AccountId) -> Result<Self> {
        let decimal =
            Decimal::from_str(value).map_err(|_| TypesError::InvalidDecimal(value.to_string()))?;
        Ok(Self::Issued { value: decimal, currency, issuer })
    }

    /// Serialize the 8-byte value field common to both amount forms.
    fn serialize_value(&self) -> Result<[u8; 8]> {
        match self {
            Self::Drops(drops) => {
                let value = (*drops) | XRP_POSITIVE_MASK;
                Ok(value.to_be_bytes())
            }
            Self::Issued { value, .. } => serialize_issued_value(*value),
        }
    }

    /// Serialize this amount to its canonical XRPL wire bytes: 8 bytes for drops, or
    /// 8 + 20 + 20 = 48 bytes for an issued-currency amount.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = self.serialize_value()?.to_vec();
        if let Self::Issued { currency, issuer, .. } = self {
            out.extend_from_slice(currency.as_bytes());
            out.extend_from_slice(issuer.as_bytes());
        }
        Ok(out)
    }

    /// `true` if this is a native XRP amount.
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Drops(_))
    }
}

fn serialize_issued_value(decimal: Decimal) -> Result<[u8; 8]> {
    if decimal.is_zero() {
        return Ok(ISSUED_MASK.to_be_bytes());
    }

    let mut mantissa = decimal.mantissa();
    let mut exponent = -(decimal.scale() as i32);

    while mantissa.unsigned_abs() < MANTISSA_MIN as u128 && exponent > EXPONENT_MIN {
        mantissa *= 10;
        exponent -= 1;
    }
    while mantissa.unsigned_abs() > MANTISSA_MAX as u128 {
        if exponent >= EXPONENT_MAX {
            return Err(TypesError::AmountOutOfRange(decimal.to_string()));
        }
        mantissa /= 10;
        exponent += 1;
    }

    if exponent < EXPONENT_MIN || mantissa.unsigned_abs() < MANTISSA_MIN as u128 {
        return Ok(ISSUED_MASK.to_be_bytes());
    }
    if exponent > EXPONENT_MAX || mantissa.unsigned_abs() > MANTISSA_MAX as u128 {
        return Err(TypesError::AmountOutOfRange(decimal.to_string()));
    }

    let mut serial: u64 = ISSUED_MASK;
    if mantissa >= 0 {
        serial |= POSITIVE_MASK;
    }
    serial |= ((exponent as i64 + EXPONENT_BIAS) as u64) << 54;
    serial |= mantissa.unsigned_abs() as u64;

    Ok(serial.to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_drops() {
        let amount = Amount::drops_from_str("10").unwrap();
        assert_eq!(hex::encode(amount.serialize().unwrap()), "400000000000000a");
    }

    #[test]
    fn serializes_zero_issued_amount() {
        let currency = Currency::canonicalize("USD").unwrap();
        let issuer = AccountId::from_classic_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap();
        let amount = Amount::issued_from_str("0", currency, issuer).unwrap();
        let bytes = amount.serialize().unwrap();
        assert_eq!(&bytes[..8], &ISSUED_MASK.to_be_bytes());
    }

    #[test]
    fn serializes_a_positive_issued_amount() {
        let currency = Currency::canonicalize("USD").unwrap();
        let issuer = AccountId::from_classic_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap();
        let amount = Amount::issued_from_str("2.75", currency, issuer).unwrap();
        let bytes = amount.serialize().unwrap();
        assert_eq!(bytes.len(), 48);
        // not-xrp + positive bits set
        assert_ne!(bytes[0] & 0x80, 0);
        assert_ne!(bytes[0] & 0x40, 0);
    }
}
