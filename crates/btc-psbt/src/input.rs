//! Per-input PSBT map.

use btc_primitives::WireCodec;
use btc_script::Script;
use btc_transaction::{SigHashType, Transaction, TransactionOutput};

use crate::constants::*;
use crate::field::PsbtField;
use crate::PsbtError;

/// What an input map says about the output it spends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsbtUtxo {
    /// The full previous transaction.
    ///
    /// Decoding and signing only look up the spent output by vout; see
    /// [`crate::Psbt::check_utxo_txids`] for the txid check.
    NonWitness(Transaction),
    /// Just the spent output.
    Witness(TransactionOutput),
    /// The input is already finalized.
    FinalScriptSig(Script),
}

/// Decoded input map.
///
/// When several UTXO forms are present, `utxo` holds the first of
/// non-witness UTXO, witness UTXO, final scriptSig; the others stay in
/// `unknown` so re-encoding keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PsbtInput {
    pub utxo: Option<PsbtUtxo>,
    pub redeem_script: Option<Script>,
    pub witness_script: Option<Script>,
    /// Sighash override; signing uses `ALL` when absent.
    pub sighash: Option<SigHashType>,
    /// Fields this crate does not interpret, kept verbatim.
    pub unknown: Vec<PsbtField>,
}

impl PsbtInput {
    /// Decode an input map from its fields.
    pub fn from_fields(fields: Vec<PsbtField>) -> Result<Self, PsbtError> {
        let mut input = PsbtInput::default();
        let mut candidates: [Option<(PsbtUtxo, PsbtField)>; 3] = [None, None, None];

        for field in fields {
            match field.field_type {
                PSBT_IN_NON_WITNESS_UTXO => {
                    field.expect_bare_key(FieldCategory::Input)?;
                    let tx = Transaction::from_bytes(&field.value_data)?;
                    candidates[0] = Some((PsbtUtxo::NonWitness(tx), field));
                }
                PSBT_IN_WITNESS_UTXO => {
                    field.expect_bare_key(FieldCategory::Input)?;
                    let output = TransactionOutput::decode(&field.value_data)
                        .map_err(|e| e.context("witness utxo"))?;
                    candidates[1] = Some((PsbtUtxo::Witness(output), field));
                }
                PSBT_IN_FINAL_SCRIPTSIG => {
                    field.expect_bare_key(FieldCategory::Input)?;
                    let script = Script::from_bytes(&field.value_data);
                    candidates[2] = Some((PsbtUtxo::FinalScriptSig(script), field));
                }
                PSBT_IN_SIGHASH_TYPE => {
                    field.expect_bare_key(FieldCategory::Input)?;
                    input.sighash = Some(SigHashType(field.u32_value(FieldCategory::Input)?));
                }
                PSBT_IN_REDEEM_SCRIPT => {
                    field.expect_bare_key(FieldCategory::Input)?;
                    input.redeem_script = Some(Script::from_bytes(&field.value_data));
                }
                PSBT_IN_WITNESS_SCRIPT => {
                    field.expect_bare_key(FieldCategory::Input)?;
                    input.witness_script = Some(Script::from_bytes(&field.value_data));
                }
                _ => input.unknown.push(field),
            }
        }

        for (utxo, field) in candidates.into_iter().flatten() {
            if input.utxo.is_none() {
                input.utxo = Some(utxo);
            } else {
                input.unknown.push(field);
            }
        }
        Ok(input)
    }

    /// Encode back to fields, unknown ones included.
    pub fn to_fields(&self) -> Vec<PsbtField> {
        let mut fields = self.unknown.clone();
        match &self.utxo {
            Some(PsbtUtxo::NonWitness(tx)) => fields.push(PsbtField::with_value(
                PSBT_IN_NON_WITNESS_UTXO,
                tx.to_bytes(),
            )),
            Some(PsbtUtxo::Witness(output)) => {
                fields.push(PsbtField::with_value(PSBT_IN_WITNESS_UTXO, output.encode()))
            }
            Some(PsbtUtxo::FinalScriptSig(script)) => fields.push(PsbtField::with_value(
                PSBT_IN_FINAL_SCRIPTSIG,
                script.to_bytes().to_vec(),
            )),
            None => {}
        }
        if let Some(sighash) = self.sighash {
            fields.push(PsbtField::with_value(
                PSBT_IN_SIGHASH_TYPE,
                sighash.to_u32().encode(),
            ));
        }
        if let Some(script) = &self.redeem_script {
            fields.push(PsbtField::with_value(
                PSBT_IN_REDEEM_SCRIPT,
                script.to_bytes().to_vec(),
            ));
        }
        if let Some(script) = &self.witness_script {
            fields.push(PsbtField::with_value(
                PSBT_IN_WITNESS_SCRIPT,
                script.to_bytes().to_vec(),
            ));
        }
        fields
    }

    /// Whether the input already carries a final scriptSig.
    pub fn is_finalized(&self) -> bool {
        matches!(self.utxo, Some(PsbtUtxo::FinalScriptSig(_)))
    }
}
