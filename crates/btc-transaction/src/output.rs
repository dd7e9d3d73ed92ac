//! Transaction output with a value and locking script.
//!
//! Defines the spending conditions for the output's value. Provides
//! binary serialization/deserialization following the Bitcoin wire format.

use btc_primitives::util::{WireReader, WireWriter};
use btc_primitives::{CodecError, WireCodec};
use btc_script::Script;

/// Smallest possible encoded output: value plus an empty script length.
pub const MIN_OUTPUT_SIZE: usize = 8 + 1;

/// A single output in a Bitcoin transaction.
///
/// The `n` field is a display-only annotation recording the output's
/// position inside the transaction it was decoded from. It is not
/// serialized and does not take part in equality.
///
/// # Wire format
///
/// | Field         | Size           |
/// |---------------|----------------|
/// | value         | 8 bytes (LE)   |
/// | script length | VarInt         |
/// | script        | variable       |
#[derive(Clone, Debug, Default)]
pub struct TransactionOutput {
    /// Amount in satoshis.
    pub value: u64,

    /// The locking script (scriptPubKey).
    pub script: Script,

    /// Position within the owning transaction, when known.
    pub n: Option<u32>,
}

impl TransactionOutput {
    /// Create an output paying `value` to `script`.
    pub fn new(value: u64, script: Script) -> Self {
        TransactionOutput {
            value,
            script,
            n: None,
        }
    }

    /// Serialize this output to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode()
    }

    /// Return the locking script as a hex-encoded string.
    pub fn script_hex(&self) -> String {
        self.script.to_hex()
    }
}

impl PartialEq for TransactionOutput {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.script == other.script
    }
}

impl Eq for TransactionOutput {}

impl WireCodec for TransactionOutput {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        let value = reader.read_u64_le().map_err(|e| e.context("output value"))?;
        let script = Script::read_from(reader).map_err(|e| e.context("output script"))?;
        Ok(TransactionOutput {
            value,
            script,
            n: None,
        })
    }

    fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.value);
        self.script.write_to(writer);
    }
}
