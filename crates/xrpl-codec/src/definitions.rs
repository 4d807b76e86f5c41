//! The XRPL field-ordering table, shipped as data rather than hard-coded per transaction type.
//!
//! Every `STObject` serializes its present fields in ascending `(type_code, field_code)` order;
//! this table is the single source of truth for that order across every transaction type the
//! codec knows how to build. Adding a field a new transaction type needs means adding one row
//! here, not teaching the serializer a new case.

/// XRPL wire type codes (a subset of the full definitions.json `TYPES` map).
pub const TYPE_UINT8: u16 = 16;
pub const TYPE_UINT16: u16 = 1;
pub const TYPE_UINT32: u16 = 2;
pub const TYPE_HASH256: u16 = 5;
pub const TYPE_AMOUNT: u16 = 6;
pub const TYPE_BLOB: u16 = 7;
pub const TYPE_ACCOUNT_ID: u16 = 8;
pub const TYPE_STOBJECT: u16 = 14;
pub const TYPE_STARRAY: u16 = 15;

/// Marks the end of a nested `STObject` when it appears inside an array, or of the top-level
/// object's array sub-fields.
pub const OBJECT_END_MARKER: u8 = 0xE1;
/// Marks the end of an `STArray`.
pub const ARRAY_END_MARKER: u8 = 0xF1;

/// One row of the definitions table: a field's name, wire type, field code within that type, and
/// whether it is included when encoding a transaction for signing.
#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub type_code: u16,
    pub field_code: u16,
    /// `false` for fields (like `TxnSignature`) omitted from the signing pre-image.
    pub is_signing_field: bool,
}

impl FieldDefinition {
    /// The inner type's wire bytes are preceded by a length prefix.
    pub const fn is_variable_length(&self) -> bool {
        matches!(self.type_code, t if t == TYPE_BLOB || t == TYPE_ACCOUNT_ID)
    }
}

/// The definitions table covering every field this codec knows how to build (currently, the
/// fields needed to construct and sign a `Payment` transaction, plus a couple of generic fields
/// exercised by the array/object round-trip tests).
pub const FIELDS: &[FieldDefinition] = &[
    FieldDefinition { name: "TransactionType", type_code: TYPE_UINT16, field_code: 2, is_signing_field: true },
    FieldDefinition { name: "SignerWeight", type_code: TYPE_UINT16, field_code: 3, is_signing_field: true },
    FieldDefinition { name: "Flags", type_code: TYPE_UINT32, field_code: 2, is_signing_field: true },
    FieldDefinition { name: "Sequence", type_code: TYPE_UINT32, field_code: 4, is_signing_field: true },
    FieldDefinition { name: "DestinationTag", type_code: TYPE_UINT32, field_code: 14, is_signing_field: true },
    FieldDefinition { name: "LastLedgerSequence", type_code: TYPE_UINT32, field_code: 27, is_signing_field: true },
    FieldDefinition { name: "Amount", type_code: TYPE_AMOUNT, field_code: 1, is_signing_field: true },
    FieldDefinition { name: "Fee", type_code: TYPE_AMOUNT, field_code: 8, is_signing_field: true },
    FieldDefinition { name: "SigningPubKey", type_code: TYPE_BLOB, field_code: 3, is_signing_field: true },
    FieldDefinition { name: "TxnSignature", type_code: TYPE_BLOB, field_code: 4, is_signing_field: false },
    FieldDefinition { name: "Account", type_code: TYPE_ACCOUNT_ID, field_code: 1, is_signing_field: true },
    FieldDefinition { name: "Destination", type_code: TYPE_ACCOUNT_ID, field_code: 3, is_signing_field: true },
    FieldDefinition { name: "SignerEntry", type_code: TYPE_STOBJECT, field_code: 11, is_signing_field: true },
    FieldDefinition { name: "SignerEntries", type_code: TYPE_STARRAY, field_code: 4, is_signing_field: true },
];

/// Look up a field's definition by name. Panics on an unknown name: every field a transaction
/// builder emits must be a row in [`FIELDS`], so a miss means the table is out of date, not that
/// the caller supplied bad user input.
pub fn field(name: &str) -> &'static FieldDefinition {
    FIELDS.iter().find(|f| f.name == name).unwrap_or_else(|| panic!("unknown field: {name}"))
}

/// Emit the one-, two-, or three-byte field header for `field`, per XRPL's variable-width field
/// id scheme.
pub fn push_header(buf: &mut Vec<u8>, field: &FieldDefinition) {
    let type_code = field.type_code;
    let field_code = field.field_code;
    if type_code < 16 {
        if field_code < 16 {
            buf.push(((type_code << 4) | field_code) as u8);
        } else {
            buf.push((type_code << 4) as u8);
            buf.push(field_code as u8);
        }
    } else if field_code < 16 {
        buf.push(field_code as u8);
        buf.push(type_code as u8);
    } else {
        buf.push(0u8);
        buf.push(type_code as u8);
        buf.push(field_code as u8);
    }
}

/// Emit the variable-length prefix for a payload of `len` bytes, per XRPL's 1/2/3-byte scheme.
pub fn push_length_prefix(buf: &mut Vec<u8>, len: usize) {
    match len {
        0..=192 => buf.push(len as u8),
        193..=12_480 => {
            let n = (len - 193) as u16;
            let [a, b] = n.to_be_bytes();
            buf.push(a + 193);
            buf.push(b);
        }
        12_481..=918_744 => {
            let n = (len - 12_481) as u32;
            let bytes = n.to_be_bytes();
            buf.push(241 + bytes[1]);
            buf.push(bytes[2]);
            buf.push(bytes[3]);
        }
        _ => panic!("field payload too long for length prefix: {len}"),
    }
}
