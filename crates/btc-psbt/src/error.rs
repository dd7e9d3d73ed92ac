//! Error types for PSBT decoding and fee calculation.

use btc_primitives::CodecError;
use btc_transaction::TransactionError;

/// Errors raised while decoding or building a PSBT.
#[derive(Debug, thiserror::Error)]
pub enum PsbtError {
    #[error("invalid PSBT magic bytes")]
    InvalidMagic,

    #[error("duplicate key {0}")]
    DuplicateKey(String),

    #[error("missing PSBT_GLOBAL_UNSIGNED_TX")]
    MissingUnsignedTx,

    #[error("unsigned transaction input {0} has a non-empty scriptSig")]
    UnsignedTxHasScriptSig(usize),

    #[error("unsigned transaction input {0} has a witness")]
    UnsignedTxHasWitness(usize),

    #[error("expected {expected} {section} maps, found {found}")]
    MapCountMismatch {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("non-witness UTXO of input {0} does not hash to the outpoint txid")]
    UtxoTxidMismatch(usize),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Errors raised by [`Psbt::fee`](crate::Psbt::fee).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeError {
    /// The input has neither a witness nor a non-witness UTXO.
    #[error("input {0} has no UTXO")]
    MissingUtxo(usize),

    /// The non-witness UTXO has no output at the spent index.
    #[error("input {index} spends vout {vout} beyond its UTXO transaction")]
    InvalidVout { index: usize, vout: u32 },

    /// Outputs spend more than the inputs provide.
    #[error("outputs ({outputs}) exceed inputs ({inputs})")]
    NegativeFee { inputs: u64, outputs: u64 },

    /// A value sum does not fit in 64 bits.
    #[error("amount overflow")]
    AmountOverflow,
}
