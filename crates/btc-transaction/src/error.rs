use btc_primitives::{CodecError, PrimitivesError};
use btc_script::ScriptError;

use crate::sighash::HasherKeyId;

/// Error types for transaction construction and decoding.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. an index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// The wire bytes could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// An underlying script error (forwarded from `btc-script`).
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
    /// An underlying primitives error (forwarded from `btc-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

/// Errors raised while computing a signature hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HasherError {
    /// The script type or signature version cannot be hashed.
    #[error("not supported: {0}")]
    NotSupported(String),
    /// `finalize` was called before every required key was supplied.
    #[error("missing hasher keys: {0:?}")]
    MissingKeys(Vec<HasherKeyId>),
    /// The supplied keys are inconsistent (e.g. input index out of range).
    #[error("encoding failed: {0}")]
    EncodingFailed(String),
}

/// Errors raised while signing a transaction input.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The input index does not exist in the transaction.
    #[error("input index does not match the transaction")]
    OutputsNotMatch,
    /// The spent output's script is not valid for the signer.
    #[error("invalid output script")]
    InvalidOutputScript,
    /// The ECDSA primitive failed.
    #[error("signing error: {0}")]
    SigningError(String),
    /// The message to sign was not 32 bytes.
    #[error("invalid hash length: expected 32 bytes, got {0}")]
    InvalidHashLength(usize),
    /// The signing context could not be acquired.
    #[error("signing context failed: {0}")]
    ContextFailed(String),
    /// A freshly produced signature did not verify against the signer's key.
    #[error("signature failed self-verification")]
    VerificationFailed,
    /// No acceptable DER signature could be produced, or the key does not
    /// match the spent output.
    #[error("bad DER signature")]
    BadDerSignature,
    /// The spend path is recognised but cannot be signed (multisig, taproot).
    #[error("not supported: {0}")]
    NotSupported(String),
    /// Sighash computation failed.
    #[error("sighash error: {0}")]
    Hasher(#[from] HasherError),
}
