//! Pay-to-Public-Key-Hash (P2PKH) script template.
//!
//! Creates standard P2PKH locking scripts (`OP_DUP OP_HASH160 <hash>
//! OP_EQUALVERIFY OP_CHECKSIG`) and unlocking scripts (`<sig> <pubkey>`).

use btc_script::{Script, ScriptError};

use crate::input::TransactionInput;

/// A typical P2PKH scriptSig: push(72-byte sig) + push(33-byte key).
pub const UNLOCKING_SCRIPT_ESTIMATE: usize = 107;

/// Create a P2PKH locking script for a 20-byte public key hash.
pub fn lock(pubkey_hash: &[u8; 20]) -> Script {
    Script::p2pkh(pubkey_hash)
}

/// Build the unlocking script `<sig> <pubkey>`.
///
/// # Arguments
/// * `signature` - DER signature with the sighash byte appended.
/// * `pubkey` - Serialized public key.
///
/// # Returns
/// `Ok(Script)` containing the two pushes.
pub fn unlocking_script(signature: &[u8], pubkey: &[u8]) -> Result<Script, ScriptError> {
    let mut script = Script::new();
    script.append_push_data(signature)?;
    script.append_push_data(pubkey)?;
    Ok(script)
}

/// Copy of `input` carrying the P2PKH unlocking script and no witness.
pub fn unlock(
    input: &TransactionInput,
    signature: &[u8],
    pubkey: &[u8],
) -> Result<TransactionInput, ScriptError> {
    Ok(input.with_unlocking(unlocking_script(signature, pubkey)?, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_script::ScriptType;

    #[test]
    fn test_lock_is_pubkeyhash() {
        let script = lock(&[0x11; 20]);
        assert_eq!(script.script_type(), ScriptType::PubKeyHash);
        assert_eq!(script.len(), 25);
    }

    #[test]
    fn test_unlocking_script_pushes() {
        let sig = [0x30u8; 71];
        let pubkey = [0x02u8; 33];
        let script = unlocking_script(&sig, &pubkey).expect("pushes");
        let bytes = script.to_bytes();
        assert_eq!(bytes[0], 71);
        assert_eq!(bytes[72], 33);
        assert_eq!(bytes.len(), 1 + 71 + 1 + 33);
    }
}
