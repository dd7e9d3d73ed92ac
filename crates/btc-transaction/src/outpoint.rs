//! Reference to a previous transaction output.

use std::fmt;

use btc_primitives::util::{WireReader, WireWriter};
use btc_primitives::{CodecError, Txid, WireCodec};

/// Size of an encoded outpoint: 32-byte txid plus a 4-byte index.
pub const OUTPOINT_SIZE: usize = 36;

/// The `(txid, vout)` pair identifying the output an input spends.
///
/// The txid is held in display order; the wire form is byte-reversed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outpoint {
    /// Transaction that created the output.
    pub txid: Txid,
    /// Index of the output within that transaction.
    pub vout: u32,
}

impl Outpoint {
    /// Create an outpoint from a txid and output index.
    pub fn new(txid: Txid, vout: u32) -> Self {
        Outpoint { txid, vout }
    }

    /// Whether this is the null outpoint used by coinbase inputs.
    pub fn is_null(&self) -> bool {
        self.vout == u32::MAX && self.txid == Txid::default()
    }
}

impl WireCodec for Outpoint {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        let txid = Txid::read_from(reader).map_err(|e| e.context("outpoint txid"))?;
        let vout = reader.read_u32_le().map_err(|e| e.context("outpoint vout"))?;
        Ok(Outpoint { txid, vout })
    }

    fn write_to(&self, writer: &mut WireWriter) {
        self.txid.write_to(writer);
        writer.write_u32_le(self.vout);
    }
}

impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}
