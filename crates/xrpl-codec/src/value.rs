use crate::definitions::{field, push_header, push_length_prefix, ARRAY_END_MARKER, OBJECT_END_MARKER};
use crate::error::Result;
use xrpl_types::{AccountId, Amount};

/// A single field value of one of the minimum set of XRPL wire types this codec handles.
#[derive(Debug, Clone)]
pub enum FieldValue {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    Hash256([u8; 32]),
    AccountId(AccountId),
    Blob(Vec<u8>),
    Amount(Amount),
    /// A nested `STObject`: the field name under which it is wrapped, plus its own fields.
    Object(Vec<(&'static str, FieldValue)>),
    /// An `STArray`: each entry is a single-field object wrapping a nested `STObject`.
    Array(Vec<(&'static str, Vec<(&'static str, FieldValue)>)>),
}

/// Serialize an unordered set of named field values into a canonical `STObject` blob: fields are
/// sorted by `(type_code, field_code)` before anything is written, so the caller's order never
/// matters.
pub fn serialize_object(fields: &[(&'static str, FieldValue)], for_signing: bool) -> Result<Vec<u8>> {
    let mut ordered: Vec<_> = fields
        .iter()
        .map(|(name, value)| (field(name), value))
        .collect();
    ordered.sort_by_key(|(def, _)| (def.type_code, def.field_code));

    let mut buf = Vec::new();
    for (def, value) in ordered {
        if for_signing && !def.is_signing_field {
            continue;
        }
        push_header(&mut buf, def);
        write_value(&mut buf, value, for_signing)?;
    }
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &FieldValue, for_signing: bool) -> Result<()> {
    match value {
        FieldValue::UInt8(v) => buf.push(*v),
        FieldValue::UInt16(v) => buf.extend_from_slice(&v.to_be_bytes()),
        FieldValue::UInt32(v) => buf.extend_from_slice(&v.to_be_bytes()),
        FieldValue::Hash256(v) => buf.extend_from_slice(v),
        FieldValue::AccountId(account) => {
            buf.push(0x14); // AccountID length prefix is always exactly 20 bytes.
            buf.extend_from_slice(account.as_bytes());
        }
        FieldValue::Blob(bytes) => {
            push_length_prefix(buf, bytes.len());
            buf.extend_from_slice(bytes);
        }
        FieldValue::Amount(amount) => {
            buf.extend_from_slice(&amount.serialize()?);
        }
        FieldValue::Object(inner) => {
            buf.extend_from_slice(&serialize_object(inner, for_signing)?);
            buf.push(OBJECT_END_MARKER);
        }
        FieldValue::Array(entries) => {
            for (wrapper_name, inner) in entries {
                let wrapper = field(wrapper_name);
                push_header(buf, wrapper);
                buf.extend_from_slice(&serialize_object(inner, for_signing)?);
                buf.push(OBJECT_END_MARKER);
            }
            buf.push(ARRAY_END_MARKER);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_a_nested_stobject() {
        let fields: Vec<(&'static str, FieldValue)> =
            vec![("SignerEntry", FieldValue::Object(vec![("SignerWeight", FieldValue::UInt16(2))]))];
        let encoded = serialize_object(&fields, false).unwrap();
        assert_eq!(encoded.last(), Some(&OBJECT_END_MARKER));
        assert!(encoded.len() > 2);
    }

    #[test]
    fn serializes_an_starray_of_wrapped_objects() {
        let fields: Vec<(&'static str, FieldValue)> = vec![(
            "SignerEntries",
            FieldValue::Array(vec![
                ("SignerEntry", vec![("SignerWeight", FieldValue::UInt16(1))]),
                ("SignerEntry", vec![("SignerWeight", FieldValue::UInt16(2))]),
            ]),
        )];
        let encoded = serialize_object(&fields, false).unwrap();
        assert_eq!(encoded.last(), Some(&ARRAY_END_MARKER));
        assert_eq!(encoded.iter().filter(|&&b| b == OBJECT_END_MARKER).count(), 2);
    }

    #[test]
    fn signing_mode_drops_non_signing_fields_inside_nested_objects() {
        let fields: Vec<(&'static str, FieldValue)> = vec![(
            "SignerEntry",
            FieldValue::Object(vec![
                ("SignerWeight", FieldValue::UInt16(4)),
                ("TxnSignature", FieldValue::Blob(vec![0xAA])),
            ]),
        )];
        let signing = serialize_object(&fields, true).unwrap();
        let full = serialize_object(&fields, false).unwrap();
        assert!(full.len() > signing.len());
    }
}
