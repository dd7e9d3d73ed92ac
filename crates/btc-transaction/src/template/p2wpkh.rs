//! Pay-to-Witness-Public-Key-Hash (P2WPKH) script template.
//!
//! The locking script is the version 0 witness program `OP_0 <hash>`. The
//! spend leaves the scriptSig empty and carries `[sig, pubkey]` in the
//! witness; the sighash commits to the equivalent P2PKH script as its
//! scriptCode.

use btc_script::Script;

use crate::input::TransactionInput;

/// Create a P2WPKH locking script for a 20-byte public key hash.
pub fn lock(pubkey_hash: &[u8; 20]) -> Script {
    Script::p2wpkh(pubkey_hash)
}

/// The scriptCode a P2WPKH signature commits to.
pub fn script_code(pubkey_hash: &[u8; 20]) -> Script {
    Script::p2pkh(pubkey_hash)
}

/// Copy of `input` with an empty scriptSig and the witness `[sig, pubkey]`.
pub fn unlock(input: &TransactionInput, signature: &[u8], pubkey: &[u8]) -> TransactionInput {
    input.with_unlocking(Script::new(), Some(vec![signature.to_vec(), pubkey.to_vec()]))
}
