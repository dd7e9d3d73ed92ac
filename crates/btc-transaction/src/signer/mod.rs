//! Transaction input signer.
//!
//! Resolves the sighash configuration for the spent output, checks that
//! the key owns it, computes the digest, signs with low-R grinding and
//! returns a new transaction with the unlocking data placed in the input.

pub mod der;

use btc_primitives::ec::{PrivateKey, PublicKey, Signature};
use btc_script::Script;
use tracing::{debug, trace};

use crate::output::TransactionOutput;
use crate::sighash::{Configuration, Hasher, HasherKey, SigHashType, SigVersion};
use crate::template::{p2pkh, p2wpkh};
use crate::transaction::Transaction;
use crate::SignError;

pub use der::{sign_der, MAX_GRIND_ATTEMPTS};

// -----------------------------------------------------------------------
// Signing context
// -----------------------------------------------------------------------

/// Key material held for the duration of one `sign_der` call.
///
/// The derived public key is checked on acquisition and the context is
/// released when dropped, on success and error paths alike.
pub struct SigningContext<'a> {
    key: &'a PrivateKey,
    pub_key: PublicKey,
}

impl<'a> SigningContext<'a> {
    /// Derive and validate the verification key for `key`.
    pub fn acquire(key: &'a PrivateKey) -> Result<Self, SignError> {
        let derived = key.pub_key();
        let pub_key = PublicKey::from_bytes(&derived.to_compressed())
            .map_err(|e| SignError::ContextFailed(e.to_string()))?;
        trace!("signing context acquired");
        Ok(SigningContext { key, pub_key })
    }

    /// The public key signatures are verified against.
    pub fn pub_key(&self) -> &PublicKey {
        &self.pub_key
    }

    /// Produce a low-S signature and verify it before returning it.
    pub fn sign_verified(
        &self,
        hash: &[u8; 32],
        extra: Option<&[u8; 32]>,
    ) -> Result<Signature, SignError> {
        let signature = Signature::sign_with_entropy(hash, self.key, extra)
            .map_err(|e| SignError::SigningError(e.to_string()))?
            .normalize_s();
        if !signature.verify(hash, &self.pub_key) {
            return Err(SignError::VerificationFailed);
        }
        Ok(signature)
    }
}

impl Drop for SigningContext<'_> {
    fn drop(&mut self) {
        trace!("signing context released");
    }
}

// -----------------------------------------------------------------------
// Input signing
// -----------------------------------------------------------------------

/// Sign one input of `tx`.
///
/// # Arguments
/// * `tx` - The transaction being signed; left untouched.
/// * `input_index` - Index of the input to sign.
/// * `utxo` - The output the input spends.
/// * `key` - The private key owning `utxo`.
/// * `redeem_script` - P2SH redeem script, if any.
/// * `witness_script` - P2WSH witness script, if any.
/// * `sighash` - Sighash type for the signature.
///
/// # Returns
/// A new transaction where only `input_index` differs, carrying either a
/// `<sig> <pubkey>` scriptSig (legacy) or a `[sig, pubkey]` witness (v0).
///
/// The public key is always serialized compressed, and the UTXO must pay
/// to its hash. Outputs locked to the hash of an uncompressed key fail
/// with `BadDerSignature`, even when the key came from an uncompressed WIF.
pub fn sign(
    tx: &Transaction,
    input_index: usize,
    utxo: &TransactionOutput,
    key: &PrivateKey,
    redeem_script: Option<&Script>,
    witness_script: Option<&Script>,
    sighash: SigHashType,
) -> Result<Transaction, SignError> {
    let input = tx.inputs.get(input_index).ok_or(SignError::OutputsNotMatch)?;

    let pub_key = key.pub_key();
    let pubkey_hash = pub_key.hash160();
    let script_code = p2wpkh::script_code(&pubkey_hash);

    let config = Configuration::resolve(&utxo.script, witness_script, redeem_script)?;
    if config.multisig {
        return Err(SignError::NotSupported("multisig signing".to_string()));
    }
    debug!(input_index, sig_version = ?config.sig_version, sighash = %sighash, "signing input");

    let mut hasher = Hasher::for_config(&config)?;
    hasher
        .combine(HasherKey::Transaction(tx))
        .combine(HasherKey::InputIndex(input_index))
        .combine(HasherKey::SigHash(sighash));

    match config.sig_version {
        SigVersion::Base => {
            if utxo.script != p2pkh::lock(&pubkey_hash) {
                return Err(SignError::BadDerSignature);
            }
            hasher.combine(HasherKey::ScriptCode(&script_code));
        }
        SigVersion::WitnessV0 => {
            if utxo.script != p2wpkh::lock(&pubkey_hash) {
                return Err(SignError::BadDerSignature);
            }
            hasher
                .combine(HasherKey::ScriptCode(&script_code))
                .combine(HasherKey::Amount(utxo.value));
        }
        other => {
            return Err(SignError::NotSupported(format!("{:?} signing", other)));
        }
    }

    let digest = hasher.finalize()?;
    let signature = sign_der(&digest, key, sighash)?;
    let pubkey_bytes = pub_key.to_compressed();

    let signed_input = match config.sig_version {
        SigVersion::Base => p2pkh::unlock(input, &signature, &pubkey_bytes)
            .map_err(|e| SignError::SigningError(e.to_string()))?,
        SigVersion::WitnessV0 => p2wpkh::unlock(input, &signature, &pubkey_bytes),
        other => return Err(SignError::NotSupported(format!("{:?} signing", other))),
    };

    tx.with_input(input_index, signed_input)
        .map_err(|_| SignError::OutputsNotMatch)
}
