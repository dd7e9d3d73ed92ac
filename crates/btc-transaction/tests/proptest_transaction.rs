use proptest::prelude::*;

use btc_primitives::ec::{PrivateKey, Signature};
use btc_primitives::{Txid, WireCodec};
use btc_script::Script;
use btc_transaction::sighash::SIGHASH_SINGLE_OUT_OF_RANGE;
use btc_transaction::{
    compute_sighash, sign, Configuration, HasherKey, Outpoint, SigHashType, SigVersion,
    Transaction, TransactionInput, TransactionOutput, TxLayout,
};

fn arb_input() -> impl Strategy<Value = TransactionInput> {
    (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..64),
        any::<u32>(),
        prop::option::of(prop::collection::vec(
            prop::collection::vec(any::<u8>(), 0..40),
            1..4,
        )),
    )
        .prop_map(|(hash, vout, script_bytes, sequence, witness)| TransactionInput {
            outpoint: Outpoint::new(Txid::new(hash), vout),
            script_sig: Script::from_bytes(&script_bytes),
            sequence,
            witness,
        })
}

fn arb_output() -> impl Strategy<Value = TransactionOutput> {
    (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64))
        .prop_map(|(value, script_bytes)| TransactionOutput::new(value, Script::from_bytes(&script_bytes)))
}

/// Strategy to generate a random transaction with outputs built by
/// `TransactionOutput::new`. At least one input, since inputless
/// transactions with outputs collide with the segwit marker.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        any::<u32>(),
        prop::collection::vec(arb_input(), 1..4),
        prop::collection::vec(arb_output(), 1..4),
        any::<u32>(),
    )
        .prop_map(|(version, inputs, outputs, lock_time)| Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_decode_encode_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let decoded = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(decoded.to_bytes(), bytes);
    }

    #[test]
    fn input_and_output_roundtrip(input in arb_input(), output in arb_output()) {
        let legacy_input = TransactionInput { witness: None, ..input };
        prop_assert_eq!(TransactionInput::decode(&legacy_input.encode()).unwrap(), legacy_input);
        prop_assert_eq!(TransactionOutput::decode(&output.encode()).unwrap(), output);
    }

    #[test]
    fn output_roundtrip_ignores_position(output in arb_output(), n in prop::option::of(any::<u32>())) {
        let output = TransactionOutput { n, ..output };
        let bytes = output.encode();
        let decoded = TransactionOutput::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.n, None);
        prop_assert_eq!(&decoded, &output);
        prop_assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn layout_spans_match_entities(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let layout = TxLayout::scan(&bytes).unwrap();
        prop_assert_eq!(layout.len, bytes.len());
        prop_assert_eq!(layout.segwit, tx.has_witness());
        for (span, input) in layout.inputs.iter().zip(&tx.inputs) {
            let script = Script::decode_span(&bytes, span.script_sig).unwrap();
            prop_assert_eq!(&script, &input.script_sig);
        }
        for (span, output) in layout.outputs.iter().zip(&tx.outputs) {
            prop_assert_eq!(span.whole.slice(&bytes).unwrap(), &output.encode()[..]);
        }
    }

    #[test]
    fn txid_ignores_witness_data(tx in arb_transaction()) {
        let stripped = Transaction {
            inputs: tx
                .inputs
                .iter()
                .map(|i| TransactionInput { witness: None, ..i.clone() })
                .collect(),
            ..tx.clone()
        };
        prop_assert_eq!(tx.txid(), stripped.txid());
    }

    #[test]
    fn decoding_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let _ = Transaction::from_bytes(&bytes);
        let _ = TxLayout::scan(&bytes);
    }

    #[test]
    fn single_without_output_is_constant(tx in arb_transaction(), extra in 0usize..3) {
        let index = tx.outputs.len() + extra;
        let mut tx = tx;
        while tx.inputs.len() <= index {
            tx.inputs.push(TransactionInput::new(Outpoint::default()));
        }
        let code = Script::new();
        let digest = compute_sighash(
            &Configuration::new(SigVersion::Base, false),
            [
                HasherKey::Transaction(&tx),
                HasherKey::InputIndex(index),
                HasherKey::ScriptCode(&code),
                HasherKey::SigHash(SigHashType::SINGLE),
            ],
        )
        .unwrap();
        prop_assert_eq!(digest, SIGHASH_SINGLE_OUT_OF_RANGE);
    }

    #[test]
    fn signing_replaces_only_one_input(tx in arb_transaction(), seed in 1u8..=200) {
        let key = PrivateKey::from_bytes(&[seed; 32]).unwrap();
        let utxo = TransactionOutput::new(50_000, Script::p2wpkh(&key.pub_key().hash160()));
        let index = tx.inputs.len() - 1;

        let signed = sign(&tx, index, &utxo, &key, None, None, SigHashType::ALL).unwrap();
        prop_assert_eq!(signed.inputs.len(), tx.inputs.len());
        for (i, (before, after)) in tx.inputs.iter().zip(&signed.inputs).enumerate() {
            if i != index {
                prop_assert_eq!(before, after);
            }
        }
        let witness = signed.inputs[index].witness.clone().unwrap();
        prop_assert_eq!(witness.len(), 2);
        let der = &witness[0][..witness[0].len() - 1];
        prop_assert!(Signature::from_der(der).unwrap().is_low_s());
        prop_assert_eq!(witness[1].as_slice(), &key.pub_key().to_compressed()[..]);
        prop_assert_eq!(&signed.outputs, &tx.outputs);
    }
}
