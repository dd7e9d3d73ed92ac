//! Core transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! locktime. Decoding runs the structural slicer first and then decodes
//! each field from its own span; encoding writes the segwit layout only
//! when some input carries a witness.

use std::fmt;

use btc_primitives::util::{VarInt, WireReader, WireWriter};
use btc_primitives::{CodecError, Txid, WireCodec};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::slice::{TxLayout, SEGWIT_MARKER};
use crate::TransactionError;

/// A Bitcoin transaction.
///
/// Values are treated as immutable once built: signing returns a new
/// transaction with one input replaced rather than editing in place.
///
/// # Wire format
///
/// | Field          | Size                         |
/// |----------------|------------------------------|
/// | version        | 4 bytes (LE)                 |
/// | marker, flag   | `00 01`, segwit only         |
/// | input count    | VarInt                       |
/// | inputs         | variable (per input)         |
/// | output count   | VarInt                       |
/// | outputs        | variable (per output)        |
/// | witnesses      | per input, segwit only       |
/// | lock_time      | 4 bytes (LE)                 |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version. Currently 1 or 2.
    pub version: u32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of the raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the hex is
    /// invalid or the bytes do not form exactly one transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(btc_primitives::PrimitivesError::from)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction that must occupy all of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        Ok(Self::decode(bytes)?)
    }

    /// Build a transaction from a previously scanned layout.
    ///
    /// # Arguments
    /// * `bytes` - The buffer the layout was scanned from.
    /// * `layout` - Field offsets produced by [`TxLayout::scan`].
    pub fn from_layout(bytes: &[u8], layout: &TxLayout) -> Result<Self, CodecError> {
        let version = u32::decode_span(bytes, layout.version)?;

        let mut inputs = Vec::with_capacity(layout.inputs.len());
        for (i, input_layout) in layout.inputs.iter().enumerate() {
            let mut input = TransactionInput::decode_span(bytes, input_layout.whole)?;
            let items = layout.witness(i);
            if !items.is_empty() {
                let mut stack = Vec::with_capacity(items.len());
                for span in items {
                    stack.push(span.slice(bytes)?.to_vec());
                }
                input.witness = Some(stack);
            }
            inputs.push(input);
        }

        let mut outputs = Vec::with_capacity(layout.outputs.len());
        for (i, output_layout) in layout.outputs.iter().enumerate() {
            let mut output = TransactionOutput::decode_span(bytes, output_layout.whole)?;
            output.n = u32::try_from(i).ok();
            outputs.push(output);
        }

        let lock_time = u32::decode_span(bytes, layout.lock_time)?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw bytes, including witnesses.
    ///
    /// A transaction with no inputs and at least one output encodes with
    /// `00 01` after the version, which the decoder reads as the segwit
    /// marker. Such bytes do not decode back; give the transaction an
    /// input before serializing it for round-tripping.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode()
    }

    /// Serialize this transaction to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Serialize without the segwit marker and witness data.
    ///
    /// This is the encoding the txid commits to.
    pub fn to_legacy_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(self.size_hint());
        self.write_legacy_to(&mut writer);
        writer.into_bytes()
    }

    /// Append the legacy (witness-free) encoding to `writer`.
    pub fn write_legacy_to(&self, writer: &mut WireWriter) {
        writer.write_u32_le(self.version);
        self.write_body_to(writer);
        writer.write_u32_le(self.lock_time);
    }

    fn write_body_to(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }
        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }
    }

    fn size_hint(&self) -> usize {
        10 + self.inputs.len() * 148 + self.outputs.len() * 34
    }

    // -----------------------------------------------------------------
    // Identity and inspection
    // -----------------------------------------------------------------

    /// Compute the transaction ID: double SHA-256 of the legacy encoding,
    /// in display order.
    pub fn txid(&self) -> Txid {
        Txid::hash(&self.to_legacy_bytes())
    }

    /// Whether any input carries a non-empty witness.
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(TransactionInput::has_witness)
    }

    /// Return the number of inputs in the transaction.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of outputs in the transaction.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output values, or `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.value))
    }

    /// Size of the full serialization in bytes.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    /// Return a copy with the input at `index` replaced.
    ///
    /// # Returns
    /// The new transaction, or `InvalidTransaction` if `index` is out of range.
    pub fn with_input(
        &self,
        index: usize,
        input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        if index >= self.inputs.len() {
            return Err(TransactionError::InvalidTransaction(format!(
                "input index {} out of range (tx has {} inputs)",
                index,
                self.inputs.len()
            )));
        }
        let mut tx = self.clone();
        tx.inputs[index] = input;
        Ok(tx)
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl WireCodec for Transaction {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        let bytes = reader.remaining_bytes();
        let layout = TxLayout::scan(bytes)?;
        let tx = Transaction::from_layout(bytes, &layout)?;
        reader.read_bytes(layout.len)?;
        Ok(tx)
    }

    fn write_to(&self, writer: &mut WireWriter) {
        if !self.has_witness() {
            self.write_legacy_to(writer);
            return;
        }
        writer.write_u32_le(self.version);
        writer.write_bytes(&SEGWIT_MARKER);
        self.write_body_to(writer);
        for input in &self.inputs {
            input.write_witness_to(writer);
        }
        writer.write_u32_le(self.lock_time);
    }
}

impl fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outpoint;
    use btc_script::Script;

    #[test]
    fn test_empty_transaction_bytes() {
        let tx = Transaction::new();
        assert_eq!(tx.to_hex(), "01000000000000000000");
        assert!(!tx.has_witness());
    }

    #[test]
    fn test_output_positions_recorded() {
        let mut tx = Transaction::new();
        tx.inputs.push(TransactionInput::new(Outpoint::default()));
        tx.outputs.push(TransactionOutput::new(1, Script::new()));
        tx.outputs.push(TransactionOutput::new(2, Script::new()));

        let decoded = Transaction::from_bytes(&tx.to_bytes()).expect("decode");
        assert_eq!(decoded.outputs[0].n, Some(0));
        assert_eq!(decoded.outputs[1].n, Some(1));
        assert_eq!(decoded.total_output_value(), Some(3));
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_inputless_transaction_reads_as_segwit() {
        let mut tx = Transaction::new();
        tx.outputs.push(TransactionOutput::new(1000, Script::new()));

        let bytes = tx.to_bytes();
        assert_eq!(&bytes[4..6], &SEGWIT_MARKER);
        assert!(matches!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::Codec(_))
        ));
    }

    #[test]
    fn test_witness_switches_layout() {
        let mut tx = Transaction::new();
        tx.inputs.push(TransactionInput::new(Outpoint::default()));
        let legacy = tx.to_bytes();

        tx.inputs[0].witness = Some(vec![vec![0x01]]);
        let segwit = tx.to_bytes();
        assert_eq!(&segwit[4..6], &SEGWIT_MARKER);
        assert_eq!(tx.to_legacy_bytes(), legacy);
        assert_eq!(Transaction::from_bytes(&segwit).expect("decode"), tx);

        // An empty stack is the same as no witness.
        tx.inputs[0].witness = Some(vec![]);
        assert_eq!(tx.to_bytes(), legacy);
    }

    #[test]
    fn test_read_from_advances_reader() {
        let tx = Transaction::new();
        let mut bytes = tx.to_bytes();
        bytes.extend_from_slice(&[0xab]);
        let mut reader = WireReader::new(&bytes);
        let decoded = Transaction::read_from(&mut reader).expect("decode");
        assert_eq!(decoded, tx);
        assert_eq!(reader.read_u8().expect("tail"), 0xab);
        assert!(Transaction::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_with_input_bounds() {
        let mut tx = Transaction::new();
        tx.inputs.push(TransactionInput::new(Outpoint::default()));
        let replacement = TransactionInput {
            sequence: 7,
            ..TransactionInput::new(Outpoint::default())
        };
        let updated = tx.with_input(0, replacement).expect("in range");
        assert_eq!(updated.inputs[0].sequence, 7);
        assert_eq!(tx.inputs[0].sequence, 0xFFFF_FFFF);
        assert!(tx.with_input(1, TransactionInput::new(Outpoint::default())).is_err());
    }
}
