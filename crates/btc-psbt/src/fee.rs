//! Fee of a PSBT: spent UTXO values minus unsigned transaction outputs.

use btc_transaction::TransactionOutput;

use crate::input::PsbtUtxo;
use crate::{FeeError, Psbt};

/// Compute the fee paid by `psbt`.
///
/// Finalized inputs count as missing, since their spent value is not
/// recorded.
pub fn fee(psbt: &Psbt) -> Result<u64, FeeError> {
    let mut inputs: u64 = 0;
    for (index, tx_input) in psbt.unsigned_tx.inputs.iter().enumerate() {
        let utxo = spent_output(psbt, index, tx_input.outpoint.vout)?;
        inputs = inputs
            .checked_add(utxo.value)
            .ok_or(FeeError::AmountOverflow)?;
    }
    let outputs = psbt
        .unsigned_tx
        .total_output_value()
        .ok_or(FeeError::AmountOverflow)?;

    inputs
        .checked_sub(outputs)
        .ok_or(FeeError::NegativeFee { inputs, outputs })
}

fn spent_output(psbt: &Psbt, index: usize, vout: u32) -> Result<&TransactionOutput, FeeError> {
    match psbt.inputs.get(index).and_then(|input| input.utxo.as_ref()) {
        Some(PsbtUtxo::NonWitness(prev)) => prev
            .outputs
            .get(vout as usize)
            .ok_or(FeeError::InvalidVout { index, vout }),
        Some(PsbtUtxo::Witness(output)) => Ok(output),
        Some(PsbtUtxo::FinalScriptSig(_)) | None => Err(FeeError::MissingUtxo(index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_script::Script;
    use btc_transaction::{Outpoint, Transaction, TransactionInput};

    fn psbt_spending(values: &[u64], pay: u64) -> Psbt {
        let mut tx = Transaction::new();
        for _ in values {
            tx.inputs.push(TransactionInput::new(Outpoint::default()));
        }
        tx.outputs.push(TransactionOutput::new(pay, Script::new()));
        let mut psbt = Psbt::new(tx).expect("psbt");
        for (input, value) in psbt.inputs.iter_mut().zip(values) {
            input.utxo = Some(PsbtUtxo::Witness(TransactionOutput::new(*value, Script::new())));
        }
        psbt
    }

    #[test]
    fn test_fee_sums_inputs() {
        assert_eq!(fee(&psbt_spending(&[1_000, 2_500], 3_000)), Ok(500));
        assert_eq!(fee(&psbt_spending(&[1_000], 1_000)), Ok(0));
    }

    #[test]
    fn test_negative_fee() {
        assert_eq!(
            fee(&psbt_spending(&[1_000], 1_001)),
            Err(FeeError::NegativeFee {
                inputs: 1_000,
                outputs: 1_001
            })
        );
    }

    #[test]
    fn test_missing_and_finalized() {
        let mut psbt = psbt_spending(&[1_000, 1_000], 10);
        psbt.inputs[1].utxo = None;
        assert_eq!(fee(&psbt), Err(FeeError::MissingUtxo(1)));

        psbt.inputs[1].utxo = Some(PsbtUtxo::FinalScriptSig(Script::new()));
        assert_eq!(fee(&psbt), Err(FeeError::MissingUtxo(1)));
    }

    #[test]
    fn test_invalid_vout() {
        let mut psbt = psbt_spending(&[1_000], 10);
        psbt.unsigned_tx.inputs[0].outpoint.vout = 3;
        let mut prev = Transaction::new();
        prev.outputs.push(TransactionOutput::new(5_000, Script::new()));
        psbt.inputs[0].utxo = Some(PsbtUtxo::NonWitness(prev));
        assert_eq!(fee(&psbt), Err(FeeError::InvalidVout { index: 0, vout: 3 }));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            fee(&psbt_spending(&[u64::MAX, 1], 0)),
            Err(FeeError::AmountOverflow)
        );
    }
}
