//! Per-output PSBT map.

use btc_script::Script;

use crate::constants::*;
use crate::field::PsbtField;
use crate::PsbtError;

/// Decoded output map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PsbtOutput {
    pub redeem_script: Option<Script>,
    pub witness_script: Option<Script>,
    /// Fields this crate does not interpret, kept verbatim.
    pub unknown: Vec<PsbtField>,
}

impl PsbtOutput {
    /// Decode an output map from its fields.
    pub fn from_fields(fields: Vec<PsbtField>) -> Result<Self, PsbtError> {
        let mut output = PsbtOutput::default();
        for field in fields {
            match field.field_type {
                PSBT_OUT_REDEEM_SCRIPT => {
                    field.expect_bare_key(FieldCategory::Output)?;
                    output.redeem_script = Some(Script::from_bytes(&field.value_data));
                }
                PSBT_OUT_WITNESS_SCRIPT => {
                    field.expect_bare_key(FieldCategory::Output)?;
                    output.witness_script = Some(Script::from_bytes(&field.value_data));
                }
                _ => output.unknown.push(field),
            }
        }
        Ok(output)
    }

    /// Encode back to fields, unknown ones included.
    pub fn to_fields(&self) -> Vec<PsbtField> {
        let mut fields = self.unknown.clone();
        if let Some(script) = &self.redeem_script {
            fields.push(PsbtField::with_value(
                PSBT_OUT_REDEEM_SCRIPT,
                script.to_bytes().to_vec(),
            ));
        }
        if let Some(script) = &self.witness_script {
            fields.push(PsbtField::with_value(
                PSBT_OUT_WITNESS_SCRIPT,
                script.to_bytes().to_vec(),
            ));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_scripts() {
        let fields = vec![
            PsbtField::with_value(PSBT_OUT_WITNESS_SCRIPT, vec![0x51]),
            PsbtField::new(PSBT_OUT_BIP32_DERIVATION, vec![0x02; 33], vec![0u8; 8]),
        ];
        let output = PsbtOutput::from_fields(fields).expect("output");
        assert_eq!(output.witness_script, Some(Script::from_bytes(&[0x51])));
        assert!(output.redeem_script.is_none());
        assert_eq!(output.unknown.len(), 1);
        assert_eq!(output.to_fields().len(), 2);
    }
}
