//! Structural pre-pass over serialized transactions.
//!
//! [`TxLayout::scan`] walks the wire bytes once and records the offsets of
//! every field as [`Span`]s into the caller's buffer. Nothing is copied.
//! Typed decoders then run over individual spans, so the same buffer can be
//! viewed as a whole transaction, a single input or output, or a bare
//! script without scanning it again.

use btc_primitives::util::WireReader;
use btc_primitives::{CodecError, Span};

use crate::input::MIN_INPUT_SIZE;
use crate::outpoint::OUTPOINT_SIZE;
use crate::output::MIN_OUTPUT_SIZE;

/// Segwit marker and flag bytes following the version.
pub const SEGWIT_MARKER: [u8; 2] = [0x00, 0x01];

/// Offsets of one input's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLayout {
    /// Outpoint through sequence; decodes as a `TransactionInput`.
    pub whole: Span,
    pub outpoint: Span,
    /// scriptSig including its length prefix; decodes as a `Script`.
    pub script_sig: Span,
    pub sequence: Span,
}

/// Offsets of one output's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLayout {
    /// Value through script; decodes as a `TransactionOutput`.
    pub whole: Span,
    pub value: Span,
    /// Locking script including its length prefix.
    pub script: Span,
}

/// Field offsets of one serialized transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxLayout {
    pub version: Span,
    /// Whether the `00 01` marker follows the version.
    pub segwit: bool,
    pub inputs: Vec<InputLayout>,
    pub outputs: Vec<OutputLayout>,
    /// Per-input witness items, covering item data only. Empty for legacy
    /// transactions.
    pub witnesses: Vec<Vec<Span>>,
    pub lock_time: Span,
    /// Total number of bytes the transaction occupies.
    pub len: usize,
}

impl TxLayout {
    /// Scan one transaction from the start of `bytes`.
    ///
    /// Bytes beyond the end of the transaction are ignored; `len` tells the
    /// caller where it stopped.
    ///
    /// # Returns
    /// The layout, or a `CodecError` naming the field that was truncated
    /// or malformed.
    pub fn scan(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = WireReader::new(bytes);

        let version = take(&mut reader, "version", |r| r.read_u32_le().map(drop))?;
        let segwit = bytes.get(4..6) == Some(&SEGWIT_MARKER[..]);
        if segwit {
            reader.read_bytes(SEGWIT_MARKER.len())?;
        }

        let input_count = reader
            .read_count(MIN_INPUT_SIZE)
            .map_err(|e| e.context("input count"))?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            let outpoint = take(&mut reader, "outpoint", |r| {
                r.read_bytes(OUTPOINT_SIZE).map(drop)
            })?;
            let script_sig = take(&mut reader, "script_sig", |r| r.read_var_bytes().map(drop))?;
            let sequence = take(&mut reader, "sequence", |r| r.read_u32_le().map(drop))?;
            inputs.push(InputLayout {
                whole: Span::new(outpoint.start, sequence.end),
                outpoint,
                script_sig,
                sequence,
            });
        }

        let output_count = reader
            .read_count(MIN_OUTPUT_SIZE)
            .map_err(|e| e.context("output count"))?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            let value = take(&mut reader, "output value", |r| r.read_u64_le().map(drop))?;
            let script = take(&mut reader, "output script", |r| {
                r.read_var_bytes().map(drop)
            })?;
            outputs.push(OutputLayout {
                whole: Span::new(value.start, script.end),
                value,
                script,
            });
        }

        let mut witnesses = Vec::new();
        if segwit {
            witnesses.reserve(input_count);
            for _ in 0..input_count {
                let count = reader
                    .read_count(1)
                    .map_err(|e| e.context("witness count"))?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    let data = reader
                        .read_var_bytes()
                        .map_err(|e| e.context("witness item"))?;
                    let end = reader.position();
                    items.push(Span::new(end - data.len(), end));
                }
                witnesses.push(items);
            }
            if witnesses.iter().all(Vec::is_empty) {
                return Err(CodecError::DataCorrupted(
                    "segwit marker present but every witness is empty".to_string(),
                ));
            }
        }

        let lock_time = take(&mut reader, "lock time", |r| r.read_u32_le().map(drop))?;

        Ok(TxLayout {
            version,
            segwit,
            inputs,
            outputs,
            witnesses,
            lock_time,
            len: reader.position(),
        })
    }

    /// The full byte range of the transaction.
    pub fn span(&self) -> Span {
        Span::new(0, self.len)
    }

    /// Witness item spans for input `index`, empty if it has none.
    pub fn witness(&self, index: usize) -> &[Span] {
        self.witnesses.get(index).map_or(&[], Vec::as_slice)
    }
}

fn take<'a>(
    reader: &mut WireReader<'a>,
    field: &str,
    read: impl FnOnce(&mut WireReader<'a>) -> Result<(), CodecError>,
) -> Result<Span, CodecError> {
    let start = reader.position();
    read(reader).map_err(|e| e.context(field))?;
    Ok(Span::new(start, reader.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TransactionInput, TransactionOutput};
    use btc_primitives::WireCodec;
    use btc_script::Script;

    const LEGACY_TX: &str = "0100000001449d45bbbfe7fc93bbe649bb7b6106b248a15da5dbd6fdc9bdfc7efede83235e0100000000ffffffff020020a107000000001976a914eaddee0d07bfc3e11c94f41eff618c1df3c2069b88aca0bb0d00000000001976a914a235bdde3bb2c326f291d9c281fdc3fe1e956fe088ac00000000";

    #[test]
    fn test_scan_legacy_offsets() {
        let bytes = hex::decode(LEGACY_TX).expect("hex");
        let layout = TxLayout::scan(&bytes).expect("layout");

        assert!(!layout.segwit);
        assert_eq!(layout.version, Span::new(0, 4));
        assert_eq!(layout.inputs.len(), 1);
        assert_eq!(layout.inputs[0].outpoint, Span::new(5, 41));
        assert_eq!(layout.inputs[0].script_sig, Span::new(41, 42));
        assert_eq!(layout.inputs[0].sequence, Span::new(42, 46));
        assert_eq!(layout.outputs.len(), 2);
        assert_eq!(layout.outputs[0].value, Span::new(47, 55));
        assert!(layout.witnesses.is_empty());
        assert_eq!(layout.lock_time.end, bytes.len());
        assert_eq!(layout.len, bytes.len());
    }

    /// The same buffer decodes as an input, an output and a bare script.
    #[test]
    fn test_spans_decode_as_entities() {
        let bytes = hex::decode(LEGACY_TX).expect("hex");
        let layout = TxLayout::scan(&bytes).expect("layout");

        let input = TransactionInput::decode_span(&bytes, layout.inputs[0].whole).expect("input");
        assert_eq!(input.outpoint.vout, 1);

        let output =
            TransactionOutput::decode_span(&bytes, layout.outputs[1].whole).expect("output");
        assert_eq!(output.value, 900_000);

        let script = Script::decode_span(&bytes, layout.outputs[1].script).expect("script");
        assert_eq!(script, output.script);
    }

    #[test]
    fn test_scan_witness_spans() {
        // version, marker, one input, one empty output, witness [aa, bbcc], locktime
        let hex_tx = concat!(
            "02000000",
            "0001",
            "01",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "00000000",
            "00",
            "ffffffff",
            "01",
            "0000000000000000",
            "00",
            "02",
            "01aa",
            "02bbcc",
            "00000000"
        );
        let bytes = hex::decode(hex_tx).expect("hex");
        let layout = TxLayout::scan(&bytes).expect("layout");
        assert!(layout.segwit);
        let items = layout.witness(0);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].slice(&bytes).expect("item"), &[0xaa]);
        assert_eq!(items[1].slice(&bytes).expect("item"), &[0xbb, 0xcc]);
        assert!(layout.witness(1).is_empty());
    }

    #[test]
    fn test_scan_rejects_superfluous_marker() {
        let hex_tx = concat!(
            "02000000",
            "0001",
            "01",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "00000000",
            "00",
            "ffffffff",
            "00",
            "00",
            "00000000"
        );
        let bytes = hex::decode(hex_tx).expect("hex");
        assert!(matches!(
            TxLayout::scan(&bytes),
            Err(CodecError::DataCorrupted(_))
        ));
    }

    #[test]
    fn test_scan_truncated_names_field() {
        let bytes = hex::decode(&LEGACY_TX[..LEGACY_TX.len() - 4]).expect("hex");
        match TxLayout::scan(&bytes) {
            Err(CodecError::DataCorrupted(msg)) => assert!(msg.contains("lock time"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_scan_ignores_trailing_bytes() {
        let mut bytes = hex::decode(LEGACY_TX).expect("hex");
        let expected = bytes.len();
        bytes.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(TxLayout::scan(&bytes).expect("layout").len, expected);
    }
}
