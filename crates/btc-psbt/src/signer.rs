//! Sign every spendable input of a PSBT with one key.

use btc_primitives::ec::PrivateKey;
use btc_transaction::{SignError, Transaction, TransactionOutput};
use tracing::debug;

use crate::input::PsbtUtxo;
use crate::Psbt;

/// Sign `psbt` and return the serialized transaction.
pub fn sign(psbt: &Psbt, key: &PrivateKey) -> Result<Vec<u8>, SignError> {
    Ok(sign_transaction(psbt, key)?.to_bytes())
}

/// Sign each input in order.
///
/// Finalized inputs are skipped and keep the unsigned transaction's empty
/// scriptSig. The sighash defaults to `ALL` when the input map has none.
///
/// # Returns
/// The signed transaction, or the first signing error.
pub fn sign_transaction(psbt: &Psbt, key: &PrivateKey) -> Result<Transaction, SignError> {
    if psbt.inputs.len() != psbt.unsigned_tx.inputs.len() {
        return Err(SignError::OutputsNotMatch);
    }

    let mut tx = psbt.unsigned_tx.clone();
    for (index, (input, tx_input)) in psbt
        .inputs
        .iter()
        .zip(&psbt.unsigned_tx.inputs)
        .enumerate()
    {
        let utxo: &TransactionOutput = match &input.utxo {
            Some(PsbtUtxo::NonWitness(prev)) => prev
                .outputs
                .get(tx_input.outpoint.vout as usize)
                .ok_or(SignError::OutputsNotMatch)?,
            Some(PsbtUtxo::Witness(output)) => output,
            Some(PsbtUtxo::FinalScriptSig(_)) => {
                debug!(input_index = index, "skipping finalized input");
                continue;
            }
            None => {
                return Err(SignError::NotSupported(format!(
                    "input {} has no UTXO",
                    index
                )))
            }
        };

        tx = btc_transaction::sign(
            &tx,
            index,
            utxo,
            key,
            input.redeem_script.as_ref(),
            input.witness_script.as_ref(),
            input.sighash.unwrap_or_default(),
        )?;
    }
    Ok(tx)
}
