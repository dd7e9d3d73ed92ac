//! Transaction input spending a previous output.
//!
//! Holds the outpoint being spent, the scriptSig, the sequence number and
//! an optional segregated witness stack. The wire encoding of an input
//! covers only the first three; the witness travels out-of-band after
//! the outputs and is handled by the transaction codec.

use btc_primitives::util::{VarInt, WireReader, WireWriter};
use btc_primitives::{CodecError, WireCodec};
use btc_script::Script;

use crate::outpoint::{Outpoint, OUTPOINT_SIZE};

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// Smallest possible encoded input: outpoint, empty script length, sequence.
pub const MIN_INPUT_SIZE: usize = OUTPOINT_SIZE + 1 + 4;

/// A single input in a Bitcoin transaction.
///
/// # Wire format
///
/// | Field        | Size           |
/// |--------------|----------------|
/// | txid         | 32 bytes (LE)  |
/// | vout         | 4 bytes (LE)   |
/// | script len   | VarInt         |
/// | script_sig   | variable       |
/// | sequence     | 4 bytes (LE)   |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The output being spent.
    pub outpoint: Outpoint,

    /// The unlocking script. Empty for unsigned and native segwit inputs.
    pub script_sig: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Witness stack items. `None` when the input carries no witness; an
    /// empty stack is never stored.
    pub witness: Option<Vec<Vec<u8>>>,
}

impl TransactionInput {
    /// Create an unsigned input spending `outpoint` with the default sequence.
    pub fn new(outpoint: Outpoint) -> Self {
        TransactionInput {
            outpoint,
            script_sig: Script::new(),
            sequence: DEFAULT_SEQUENCE_NUMBER,
            witness: None,
        }
    }

    /// Whether this input has at least one witness item.
    pub fn has_witness(&self) -> bool {
        self.witness.as_ref().map_or(false, |w| !w.is_empty())
    }

    /// Copy of this input with the given scriptSig and witness.
    pub fn with_unlocking(&self, script_sig: Script, witness: Option<Vec<Vec<u8>>>) -> Self {
        TransactionInput {
            outpoint: self.outpoint,
            script_sig,
            sequence: self.sequence,
            witness: witness.filter(|w| !w.is_empty()),
        }
    }

    /// Append this input's witness stack: an item count followed by each
    /// item with its own length prefix. Inputs without a witness write a
    /// zero count.
    pub fn write_witness_to(&self, writer: &mut WireWriter) {
        match &self.witness {
            Some(items) => {
                writer.write_varint(VarInt::from(items.len()));
                for item in items {
                    writer.write_var_bytes(item);
                }
            }
            None => writer.write_varint(VarInt(0)),
        }
    }
}

/// Read one witness stack from the reader. A zero item count yields `None`.
pub fn read_witness(reader: &mut WireReader<'_>) -> Result<Option<Vec<Vec<u8>>>, CodecError> {
    let count = reader.read_count(1).map_err(|e| e.context("witness count"))?;
    if count == 0 {
        return Ok(None);
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let item = reader.read_var_bytes().map_err(|e| e.context("witness item"))?;
        items.push(item.to_vec());
    }
    Ok(Some(items))
}

impl WireCodec for TransactionInput {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        let outpoint = Outpoint::read_from(reader)?;
        let script_sig = Script::read_from(reader).map_err(|e| e.context("script_sig"))?;
        let sequence = reader.read_u32_le().map_err(|e| e.context("sequence"))?;
        Ok(TransactionInput {
            outpoint,
            script_sig,
            sequence,
            witness: None,
        })
    }

    fn write_to(&self, writer: &mut WireWriter) {
        self.outpoint.write_to(writer);
        self.script_sig.write_to(writer);
        writer.write_u32_le(self.sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT_HEX: &str = "449d45bbbfe7fc93bbe649bb7b6106b248a15da5dbd6fdc9bdfc7efede83235e0100000000ffffffff";

    #[test]
    fn test_input_roundtrip() {
        let bytes = hex::decode(INPUT_HEX).expect("hex");
        let input = TransactionInput::decode(&bytes).expect("input");
        assert_eq!(input.outpoint.vout, 1);
        assert!(input.script_sig.is_empty());
        assert_eq!(input.sequence, DEFAULT_SEQUENCE_NUMBER);
        assert!(input.witness.is_none());
        assert_eq!(input.encode(), bytes);
        assert_eq!(bytes.len(), MIN_INPUT_SIZE);
    }

    #[test]
    fn test_input_script_length_overruns() {
        let mut bytes = hex::decode(INPUT_HEX).expect("hex");
        bytes[36] = 0x10;
        assert!(TransactionInput::decode(&bytes).is_err());
    }

    #[test]
    fn test_witness_stack_codec() {
        let mut input = TransactionInput::new(Outpoint::default());
        let mut writer = WireWriter::new();
        input.write_witness_to(&mut writer);
        assert_eq!(writer.as_bytes(), &[0x00]);

        input.witness = Some(vec![vec![0xaa, 0xbb], vec![]]);
        let mut writer = WireWriter::new();
        input.write_witness_to(&mut writer);
        assert_eq!(writer.as_bytes(), &[0x02, 0x02, 0xaa, 0xbb, 0x00]);

        let mut reader = WireReader::new(writer.as_bytes());
        assert_eq!(read_witness(&mut reader).expect("witness"), input.witness);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_with_unlocking_drops_empty_witness() {
        let input = TransactionInput::new(Outpoint::default());
        let replaced = input.with_unlocking(Script::from_bytes(&[0x51]), Some(vec![]));
        assert!(replaced.witness.is_none());
        assert!(!replaced.has_witness());
        assert_eq!(replaced.script_sig.to_bytes(), &[0x51]);
    }
}
