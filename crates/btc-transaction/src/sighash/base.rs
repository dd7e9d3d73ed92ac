//! Legacy (pre-segwit) signature hash.

use btc_primitives::hash::sha256d;
use btc_primitives::util::{VarInt, WireWriter};
use btc_primitives::WireCodec;
use btc_script::Script;

use super::key::{HasherKey, HasherKeyId};
use super::{SigHashType, SIGHASH_SINGLE_OUT_OF_RANGE};
use crate::transaction::Transaction;
use crate::HasherError;

/// Accumulates the legacy digest inputs.
///
/// Requires a transaction, input index and scriptCode; the sighash type
/// defaults to `ALL`.
#[derive(Debug, Clone, Default)]
pub struct BaseHasher<'a> {
    tx: Option<&'a Transaction>,
    input_index: Option<usize>,
    script_code: Option<&'a Script>,
    sighash: SigHashType,
}

impl<'a> BaseHasher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `key`, replacing any earlier value for the same slot. Keys the
    /// legacy digest does not commit to are ignored.
    pub fn combine(&mut self, key: HasherKey<'a>) {
        match key {
            HasherKey::Transaction(tx) => self.tx = Some(tx),
            HasherKey::InputIndex(index) => self.input_index = Some(index),
            HasherKey::ScriptCode(script) => self.script_code = Some(script),
            HasherKey::SigHash(sighash) => self.sighash = sighash,
            _ => {}
        }
    }

    /// Compute the digest.
    ///
    /// # Returns
    /// The 32-byte digest, `MissingKeys` listing every absent slot, or
    /// `EncodingFailed` if the input index is out of range.
    pub fn finalize(&self) -> Result<[u8; 32], HasherError> {
        let (tx, input_index, script_code) = match (self.tx, self.input_index, self.script_code) {
            (Some(tx), Some(index), Some(script)) => (tx, index, script),
            (tx, index, script) => {
                let mut missing = Vec::new();
                if tx.is_none() {
                    missing.push(HasherKeyId::Transaction);
                }
                if index.is_none() {
                    missing.push(HasherKeyId::InputIndex);
                }
                if script.is_none() {
                    missing.push(HasherKeyId::ScriptCode);
                }
                return Err(HasherError::MissingKeys(missing));
            }
        };
        legacy_digest(tx, input_index, script_code, self.sighash)
    }
}

/// Legacy digest over a copy of the transaction with scriptSigs,
/// sequences and outputs rewritten per the sighash type.
fn legacy_digest(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    sighash: SigHashType,
) -> Result<[u8; 32], HasherError> {
    let signed = tx.inputs.get(input_index).ok_or_else(|| {
        HasherError::EncodingFailed(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;

    if sighash.is_single() && input_index >= tx.outputs.len() {
        return Ok(SIGHASH_SINGLE_OUT_OF_RANGE);
    }

    let empty = Script::new();
    let mut writer = WireWriter::with_capacity(256);
    writer.write_u32_le(tx.version);

    if sighash.anyone_can_pay() {
        writer.write_varint(VarInt(1));
        signed.outpoint.write_to(&mut writer);
        script_code.write_to(&mut writer);
        writer.write_u32_le(signed.sequence);
    } else {
        let zero_other_sequences = sighash.is_none() || sighash.is_single();
        writer.write_varint(VarInt::from(tx.inputs.len()));
        for (i, input) in tx.inputs.iter().enumerate() {
            input.outpoint.write_to(&mut writer);
            if i == input_index {
                script_code.write_to(&mut writer);
                writer.write_u32_le(input.sequence);
            } else {
                empty.write_to(&mut writer);
                writer.write_u32_le(if zero_other_sequences { 0 } else { input.sequence });
            }
        }
    }

    if sighash.is_none() {
        writer.write_varint(VarInt(0));
    } else if sighash.is_single() {
        writer.write_varint(VarInt::from(input_index + 1));
        for _ in 0..input_index {
            writer.write_u64_le(u64::MAX);
            empty.write_to(&mut writer);
        }
        tx.outputs[input_index].write_to(&mut writer);
    } else {
        writer.write_varint(VarInt::from(tx.outputs.len()));
        for output in &tx.outputs {
            output.write_to(&mut writer);
        }
    }

    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash.to_u32());
    Ok(sha256d(writer.as_bytes()))
}
