//! PSBT key/value pairs and maps.
//!
//! A map is a run of `<keylen><keytype><keydata><valuelen><value>` entries
//! terminated by a single `0x00` byte.

use btc_primitives::util::{VarInt, WireReader, WireWriter};
use btc_primitives::CodecError;

use crate::constants::{field_type_name, FieldCategory};
use crate::PsbtError;

/// A single PSBT field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PsbtField {
    /// Field type byte
    pub field_type: u8,
    /// Key bytes after the type byte
    pub key_data: Vec<u8>,
    /// Field value data
    pub value_data: Vec<u8>,
}

impl PsbtField {
    /// Create a new PSBT field
    pub fn new(field_type: u8, key_data: Vec<u8>, value_data: Vec<u8>) -> Self {
        Self {
            field_type,
            key_data,
            value_data,
        }
    }

    /// Create a field with no key data
    pub fn with_value(field_type: u8, value_data: Vec<u8>) -> Self {
        Self::new(field_type, vec![], value_data)
    }

    /// Get the full key (field_type + key_data)
    pub fn full_key(&self) -> Vec<u8> {
        let mut key = vec![self.field_type];
        key.extend_from_slice(&self.key_data);
        key
    }

    /// Fail unless the key is the type byte alone.
    pub fn expect_bare_key(&self, category: FieldCategory) -> Result<(), CodecError> {
        if self.key_data.is_empty() {
            return Ok(());
        }
        Err(CodecError::DataCorrupted(format!(
            "{} key carries {} bytes of key data",
            field_type_name(category, self.field_type),
            self.key_data.len()
        )))
    }

    /// Decode a 4-byte little-endian value.
    pub fn u32_value(&self, category: FieldCategory) -> Result<u32, CodecError> {
        let bytes: [u8; 4] = self.value_data.as_slice().try_into().map_err(|_| {
            CodecError::TypeMismatch {
                expected: "4-byte little-endian u32",
                found: format!(
                    "{} bytes in {}",
                    self.value_data.len(),
                    field_type_name(category, self.field_type)
                ),
            }
        })?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Serialize this field.
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(1 + self.key_data.len()));
        writer.write_u8(self.field_type);
        writer.write_bytes(&self.key_data);
        writer.write_var_bytes(&self.value_data);
    }

    /// Read one field, or `None` at the map separator.
    pub fn read_from(reader: &mut WireReader<'_>) -> Result<Option<Self>, CodecError> {
        let key = reader.read_var_bytes().map_err(|e| e.context("psbt key"))?;
        let Some((&field_type, key_data)) = key.split_first() else {
            return Ok(None);
        };
        let value = reader.read_var_bytes().map_err(|e| e.context("psbt value"))?;
        Ok(Some(Self {
            field_type,
            key_data: key_data.to_vec(),
            value_data: value.to_vec(),
        }))
    }
}

/// Read one map up to and including its separator.
///
/// # Returns
/// The fields in encounter order, or `DuplicateKey` if a key repeats.
pub fn read_map(
    reader: &mut WireReader<'_>,
    category: FieldCategory,
) -> Result<Vec<PsbtField>, PsbtError> {
    let mut fields: Vec<PsbtField> = Vec::new();
    while let Some(field) = PsbtField::read_from(reader)? {
        if fields
            .iter()
            .any(|f| f.field_type == field.field_type && f.key_data == field.key_data)
        {
            return Err(PsbtError::DuplicateKey(format!(
                "{} ({})",
                field_type_name(category, field.field_type),
                hex::encode(field.full_key())
            )));
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Write a map sorted by key, followed by the separator.
pub fn write_map(writer: &mut WireWriter, mut fields: Vec<PsbtField>) {
    fields.sort();
    for field in &fields {
        field.write_to(writer);
    }
    writer.write_u8(0x00);
}
