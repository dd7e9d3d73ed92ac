//! BIP-143 signature hash for version 0 witness programs.
//!
//! See <https://github.com/bitcoin/bips/blob/master/bip-0143.mediawiki>

use btc_primitives::hash::sha256d;
use btc_primitives::util::{LengthPrefix, WireWriter};
use btc_primitives::WireCodec;
use btc_script::Script;

use super::key::{HasherKey, HasherKeyId};
use super::SigHashType;
use crate::outpoint::OUTPOINT_SIZE;
use crate::transaction::Transaction;
use crate::HasherError;

/// Accumulates the BIP-143 digest inputs.
///
/// Requires a transaction, input index, scriptCode and the amount of the
/// spent output; the sighash type defaults to `ALL`.
#[derive(Debug, Clone, Default)]
pub struct WitnessV0Hasher<'a> {
    tx: Option<&'a Transaction>,
    input_index: Option<usize>,
    script_code: Option<&'a Script>,
    amount: Option<u64>,
    sighash: SigHashType,
}

impl<'a> WitnessV0Hasher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `key`, replacing any earlier value for the same slot.
    pub fn combine(&mut self, key: HasherKey<'a>) {
        match key {
            HasherKey::Transaction(tx) => self.tx = Some(tx),
            HasherKey::InputIndex(index) => self.input_index = Some(index),
            HasherKey::ScriptCode(script) => self.script_code = Some(script),
            HasherKey::Amount(amount) => self.amount = Some(amount),
            HasherKey::SigHash(sighash) => self.sighash = sighash,
            _ => {}
        }
    }

    /// Compute the digest.
    pub fn finalize(&self) -> Result<[u8; 32], HasherError> {
        let mut missing = Vec::new();
        if self.tx.is_none() {
            missing.push(HasherKeyId::Transaction);
        }
        if self.input_index.is_none() {
            missing.push(HasherKeyId::InputIndex);
        }
        if self.script_code.is_none() {
            missing.push(HasherKeyId::ScriptCode);
        }
        if self.amount.is_none() {
            missing.push(HasherKeyId::Amount);
        }
        match (self.tx, self.input_index, self.script_code, self.amount) {
            (Some(tx), Some(index), Some(script), Some(amount)) => {
                Ok(sha256d(&preimage(tx, index, script, amount, self.sighash)?))
            }
            _ => Err(HasherError::MissingKeys(missing)),
        }
    }
}

/// Build the BIP-143 preimage.
///
/// Every field is fixed width except the scriptCode, which is encoded on
/// its own with a VarInt length and then written raw into a writer whose
/// length prefixes are disabled.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - The script the signature commits to.
/// * `amount` - Value of the output being spent.
/// * `sighash` - The sighash type.
///
/// # Returns
/// The raw preimage bytes (not yet hashed).
pub fn preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    amount: u64,
    sighash: SigHashType,
) -> Result<Vec<u8>, HasherError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        HasherError::EncodingFailed(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;

    let hash_prevouts = if sighash.anyone_can_pay() {
        [0u8; 32]
    } else {
        prevouts_hash(tx)
    };

    let hash_sequence = if sighash.anyone_can_pay() || sighash.is_single() || sighash.is_none() {
        [0u8; 32]
    } else {
        sequence_hash(tx)
    };

    let hash_outputs = if !sighash.is_single() && !sighash.is_none() {
        outputs_hash(tx, None)
    } else if sighash.is_single() && input_index < tx.outputs.len() {
        outputs_hash(tx, Some(input_index))
    } else {
        [0u8; 32]
    };

    let mut writer = WireWriter::with_capacity(156 + script_code.len())
        .with_length_prefix(LengthPrefix::Disabled);
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    input.outpoint.write_to(&mut writer);
    writer.write_var_bytes(&script_code.encode());
    writer.write_u64_le(amount);
    writer.write_u32_le(input.sequence);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash.to_u32());

    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helper functions
// -----------------------------------------------------------------------

/// Double-SHA256 of every input outpoint, concatenated.
fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * OUTPOINT_SIZE);
    for input in &tx.inputs {
        input.outpoint.write_to(&mut writer);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA256 of every input sequence number, concatenated.
fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA256 of all outputs, or of the single output at `index`.
fn outputs_hash(tx: &Transaction, index: Option<usize>) -> [u8; 32] {
    let mut writer = WireWriter::new();
    match index {
        Some(i) => {
            if let Some(output) = tx.outputs.get(i) {
                output.write_to(&mut writer);
            }
        }
        None => {
            for output in &tx.outputs {
                output.write_to(&mut writer);
            }
        }
    }
    sha256d(writer.as_bytes())
}
