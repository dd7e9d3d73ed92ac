//! BIP-174 partially signed transaction.
//!
//! Layout on the wire:
//!
//! | Part        | Content                                   |
//! |-------------|-------------------------------------------|
//! | magic       | `70 73 62 74 ff`                          |
//! | global map  | unsigned transaction, optional version    |
//! | input maps  | one per unsigned transaction input        |
//! | output maps | one per unsigned transaction output       |

use btc_primitives::ec::PrivateKey;
use btc_primitives::util::{WireReader, WireWriter};
use btc_primitives::{CodecError, WireCodec};
use btc_transaction::{SignError, Transaction};
use tracing::debug;

use crate::constants::*;
use crate::field::{read_map, write_map, PsbtField};
use crate::input::{PsbtInput, PsbtUtxo};
use crate::output::PsbtOutput;
use crate::{FeeError, PsbtError};

/// A decoded PSBT.
///
/// `inputs` and `outputs` run parallel to the unsigned transaction's inputs
/// and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psbt {
    pub unsigned_tx: Transaction,
    /// `PSBT_GLOBAL_VERSION`, when present.
    pub version: Option<u32>,
    /// Global fields this crate does not interpret.
    pub unknown: Vec<PsbtField>,
    pub inputs: Vec<PsbtInput>,
    pub outputs: Vec<PsbtOutput>,
}

impl Psbt {
    /// Wrap an unsigned transaction with empty input and output maps.
    pub fn new(unsigned_tx: Transaction) -> Result<Self, PsbtError> {
        check_unsigned(&unsigned_tx)?;
        Ok(Psbt {
            inputs: vec![PsbtInput::default(); unsigned_tx.inputs.len()],
            outputs: vec![PsbtOutput::default(); unsigned_tx.outputs.len()],
            unsigned_tx,
            version: None,
            unknown: Vec::new(),
        })
    }

    /// Decode a PSBT from its hex encoding.
    pub fn from_hex(hex_str: &str) -> Result<Self, PsbtError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a PSBT from raw bytes.
    ///
    /// # Returns
    /// The PSBT, or an error for a bad magic, a missing or signed unsigned
    /// transaction, duplicate keys, missing maps or trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PsbtError> {
        if bytes.len() < PSBT_MAGIC.len() || bytes[..PSBT_MAGIC.len()] != PSBT_MAGIC {
            return Err(PsbtError::InvalidMagic);
        }
        let mut reader = WireReader::new(&bytes[PSBT_MAGIC.len()..]);

        let mut unsigned_tx = None;
        let mut version = None;
        let mut unknown = Vec::new();
        for field in read_map(&mut reader, FieldCategory::Global)? {
            match field.field_type {
                PSBT_GLOBAL_UNSIGNED_TX => {
                    field.expect_bare_key(FieldCategory::Global)?;
                    unsigned_tx = Some(Transaction::from_bytes(&field.value_data)?);
                }
                PSBT_GLOBAL_VERSION => {
                    field.expect_bare_key(FieldCategory::Global)?;
                    version = Some(field.u32_value(FieldCategory::Global)?);
                }
                _ => unknown.push(field),
            }
        }
        let unsigned_tx = unsigned_tx.ok_or(PsbtError::MissingUnsignedTx)?;
        check_unsigned(&unsigned_tx)?;

        let input_count = unsigned_tx.inputs.len();
        let mut inputs = Vec::with_capacity(input_count);
        for found in 0..input_count {
            if reader.is_empty() {
                return Err(PsbtError::MapCountMismatch {
                    section: "input",
                    expected: input_count,
                    found,
                });
            }
            inputs.push(PsbtInput::from_fields(read_map(
                &mut reader,
                FieldCategory::Input,
            )?)?);
        }

        let output_count = unsigned_tx.outputs.len();
        let mut outputs = Vec::with_capacity(output_count);
        for found in 0..output_count {
            if reader.is_empty() {
                return Err(PsbtError::MapCountMismatch {
                    section: "output",
                    expected: output_count,
                    found,
                });
            }
            outputs.push(PsbtOutput::from_fields(read_map(
                &mut reader,
                FieldCategory::Output,
            )?)?);
        }

        if !reader.is_empty() {
            return Err(CodecError::DataCorrupted(format!(
                "{} trailing bytes after PSBT",
                reader.remaining()
            ))
            .into());
        }

        debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            unknown_globals = unknown.len(),
            "decoded psbt"
        );

        Ok(Psbt {
            unsigned_tx,
            version,
            unknown,
            inputs,
            outputs,
        })
    }

    /// Serialize with every map sorted by key.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(self.unsigned_tx.size() * 2);
        writer.write_bytes(&PSBT_MAGIC);

        let mut globals = self.unknown.clone();
        globals.push(PsbtField::with_value(
            PSBT_GLOBAL_UNSIGNED_TX,
            self.unsigned_tx.to_legacy_bytes(),
        ));
        if let Some(version) = self.version {
            globals.push(PsbtField::with_value(PSBT_GLOBAL_VERSION, version.encode()));
        }
        write_map(&mut writer, globals);

        for input in &self.inputs {
            write_map(&mut writer, input.to_fields());
        }
        for output in &self.outputs {
            write_map(&mut writer, output.to_fields());
        }
        writer.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Check that every non-witness UTXO hashes to the txid its input
    /// spends.
    ///
    /// # Returns
    /// `UtxoTxidMismatch` with the first offending input index.
    pub fn check_utxo_txids(&self) -> Result<(), PsbtError> {
        let spends = self.inputs.iter().zip(&self.unsigned_tx.inputs);
        for (index, (input, tx_input)) in spends.enumerate() {
            if let Some(PsbtUtxo::NonWitness(prev)) = &input.utxo {
                if prev.txid() != tx_input.outpoint.txid {
                    return Err(PsbtError::UtxoTxidMismatch(index));
                }
            }
        }
        Ok(())
    }

    /// See [`crate::fee::fee`].
    pub fn fee(&self) -> Result<u64, FeeError> {
        crate::fee::fee(self)
    }

    /// See [`crate::signer::sign`].
    pub fn sign(&self, key: &PrivateKey) -> Result<Vec<u8>, SignError> {
        crate::signer::sign(self, key)
    }
}

fn check_unsigned(tx: &Transaction) -> Result<(), PsbtError> {
    for (index, input) in tx.inputs.iter().enumerate() {
        if !input.script_sig.is_empty() {
            return Err(PsbtError::UnsignedTxHasScriptSig(index));
        }
        if input.has_witness() {
            return Err(PsbtError::UnsignedTxHasWitness(index));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_transaction::{Outpoint, TransactionInput};

    fn one_in_one_out() -> Transaction {
        let mut tx = Transaction::new();
        tx.inputs.push(TransactionInput::new(Outpoint::default()));
        tx.outputs.push(Default::default());
        tx
    }

    #[test]
    fn test_new_has_parallel_maps() {
        let psbt = Psbt::new(one_in_one_out()).expect("psbt");
        assert_eq!(psbt.inputs.len(), 1);
        assert_eq!(psbt.outputs.len(), 1);
        let bytes = psbt.to_bytes();
        let decoded = Psbt::from_bytes(&bytes).expect("roundtrip");
        assert_eq!(decoded, psbt);
        assert_eq!(decoded.to_bytes(), bytes);
    }

    #[test]
    fn test_new_rejects_script_sig() {
        let mut tx = one_in_one_out();
        tx.inputs[0].script_sig = btc_script::Script::from_bytes(&[0x51]);
        assert!(matches!(
            Psbt::new(tx),
            Err(PsbtError::UnsignedTxHasScriptSig(0))
        ));
    }

    #[test]
    fn test_new_rejects_witness() {
        let mut tx = one_in_one_out();
        tx.inputs[0].witness = Some(vec![vec![0x01]]);
        assert!(matches!(Psbt::new(tx), Err(PsbtError::UnsignedTxHasWitness(0))));
    }

    #[test]
    fn test_short_and_bad_magic() {
        for bytes in [&b""[..], &b"psbt"[..], &b"psbu\xff\x00"[..]] {
            assert!(matches!(Psbt::from_bytes(bytes), Err(PsbtError::InvalidMagic)));
        }
    }

    #[test]
    fn test_missing_unsigned_tx() {
        let bytes = [0x70, 0x73, 0x62, 0x74, 0xff, 0x00];
        assert!(matches!(
            Psbt::from_bytes(&bytes),
            Err(PsbtError::MissingUnsignedTx)
        ));
    }

    #[test]
    fn test_missing_maps() {
        let psbt = Psbt::new(one_in_one_out()).expect("psbt");
        let bytes = psbt.to_bytes();
        // Drop the output map separator.
        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(
            Psbt::from_bytes(truncated),
            Err(PsbtError::MapCountMismatch {
                section: "output",
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = Psbt::new(one_in_one_out()).expect("psbt").to_bytes();
        bytes.push(0x00);
        assert!(matches!(Psbt::from_bytes(&bytes), Err(PsbtError::Codec(_))));
    }

    #[test]
    fn test_utxo_txid_check() {
        let prev = one_in_one_out();
        let mut tx = one_in_one_out();
        tx.inputs[0].outpoint = Outpoint::new(prev.txid(), 0);

        let mut psbt = Psbt::new(tx).expect("psbt");
        psbt.check_utxo_txids().expect("no utxo yet");
        psbt.inputs[0].utxo = Some(PsbtUtxo::NonWitness(prev.clone()));
        psbt.check_utxo_txids().expect("matching txid");

        psbt.unsigned_tx.inputs[0].outpoint = Outpoint::default();
        assert!(matches!(
            psbt.check_utxo_txids(),
            Err(PsbtError::UtxoTxidMismatch(0))
        ));
        // Witness UTXOs carry no txid to compare.
        psbt.inputs[0].utxo = Some(PsbtUtxo::Witness(prev.outputs[0].clone()));
        psbt.check_utxo_txids().expect("witness utxo");
    }

    #[test]
    fn test_version_recorded() {
        let mut psbt = Psbt::new(one_in_one_out()).expect("psbt");
        psbt.version = Some(0);
        let decoded = Psbt::from_bytes(&psbt.to_bytes()).expect("decode");
        assert_eq!(decoded.version, Some(0));
    }
}
