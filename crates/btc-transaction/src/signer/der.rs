//! Deterministic DER signatures with low-R grinding.

use btc_primitives::ec::{PrivateKey, Signature};
use tracing::trace;

use super::SigningContext;
use crate::sighash::SigHashType;
use crate::SignError;

/// Upper bound on nonce attempts while searching for a low-R signature.
pub const MAX_GRIND_ATTEMPTS: u32 = 100;

/// Sign a 32-byte digest and append the sighash byte.
///
/// Nonces come from RFC6979. The first attempt uses no extra data; each
/// later attempt `n` mixes in 32 bytes whose first four are `n` little-endian.
/// Every candidate is low-S and must verify against the signer's own key.
///
/// # Arguments
/// * `hash` - The sighash digest; must be exactly 32 bytes.
/// * `key` - The signing key.
/// * `sighash` - Sighash type whose low byte is appended.
///
/// # Returns
/// `DER || sighash byte`, or `InvalidHashLength`, `VerificationFailed`,
/// `ContextFailed` or `BadDerSignature`.
pub fn sign_der(hash: &[u8], key: &PrivateKey, sighash: SigHashType) -> Result<Vec<u8>, SignError> {
    let hash: &[u8; 32] = hash
        .try_into()
        .map_err(|_| SignError::InvalidHashLength(hash.len()))?;

    let ctx = SigningContext::acquire(key)?;
    let (signature, _) = grind_low_r(&ctx, hash)?;

    let mut out = signature.to_der();
    out.push(sighash.as_byte());
    Ok(out)
}

/// Search for a signature whose R has its top bit clear.
///
/// A low-R candidate ends the search at once. The first high-R candidate
/// is held as a fallback and gets exactly one more attempt to be replaced.
/// Returns the chosen signature with the number of attempts made.
fn grind_low_r(
    ctx: &SigningContext<'_>,
    hash: &[u8; 32],
) -> Result<(Signature, u32), SignError> {
    let mut fallback: Option<Signature> = None;

    for attempt in 1..=MAX_GRIND_ATTEMPTS {
        let extra = grind_entropy(attempt);
        let candidate = ctx.sign_verified(hash, extra.as_ref())?;
        let low_r = candidate.is_low_r();
        trace!(attempt, low_r, "grind candidate");

        if low_r {
            return Ok((candidate, attempt));
        }
        if let Some(previous) = fallback {
            return Ok((previous, attempt));
        }
        fallback = Some(candidate);
    }

    fallback
        .map(|sig| (sig, MAX_GRIND_ATTEMPTS))
        .ok_or(SignError::BadDerSignature)
}

fn grind_entropy(attempt: u32) -> Option<[u8; 32]> {
    if attempt < 2 {
        return None;
    }
    let mut data = [0u8; 32];
    data[..4].copy_from_slice(&attempt.to_le_bytes());
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "58090c1431947cf63e5cd36943dcdc7f6bfc2ee92a8a6994f3c29712f48d9e24";

    #[test]
    fn test_rejects_short_hash() {
        let key = PrivateKey::from_hex(KEY_HEX).expect("key");
        match sign_der(&[0u8; 31], &key, SigHashType::ALL) {
            Err(SignError::InvalidHashLength(31)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_entropy_counter_layout() {
        assert_eq!(grind_entropy(1), None);
        let data = grind_entropy(2).expect("second attempt");
        assert_eq!(&data[..4], &[2, 0, 0, 0]);
        assert!(data[4..].iter().all(|b| *b == 0));
    }

    fn grind(digest: [u8; 32]) -> (Signature, u32) {
        let key = PrivateKey::from_hex(KEY_HEX).expect("key");
        let ctx = SigningContext::acquire(&key).expect("context");
        grind_low_r(&ctx, &digest).expect("grind")
    }

    #[test]
    fn test_low_r_on_first_attempt() {
        let (sig, attempts) = grind([0x94; 32]);
        assert_eq!(attempts, 1);
        assert!(sig.is_low_r());
        assert_eq!(
            hex::encode(sig.to_der()),
            "304402205a54c10190995c4ed8180aa49d94d54c2a1a45091f45a823682d48657c16fd4802202d3d19a88df8c47589ec0ac3406e79850557f49a9430eec23abb05f4239d32ef"
        );
    }

    #[test]
    fn test_low_r_on_second_attempt() {
        let (sig, attempts) = grind([0x25; 32]);
        assert_eq!(attempts, 2);
        assert!(sig.is_low_r());
        assert_eq!(
            hex::encode(sig.to_der()),
            "304402202d2debb234d8e019b097fe9f6b5288623dba14eb9b767c76c13b9fa8ad4ef86402206c3483ce8cc2f1a2cbbd0145288b91ea39c8576bea3e74f57c4da5c44bf684de"
        );
    }

    /// The BIP-143 P2WPKH digest grinds to a high-R fallback.
    #[test]
    fn test_fallback_signature_is_stable() {
        let key = PrivateKey::from_hex(KEY_HEX).expect("key");
        let digest =
            hex::decode("cab3ce8dc8f0189b1872bea7f6e0c9d7b62c5a652371b40aba736d02fedb98f5")
                .expect("hex");
        let sig = sign_der(&digest, &key, SigHashType::ALL).expect("sign");
        let (grind_sig, attempts) = grind(digest.as_slice().try_into().expect("32 bytes"));
        assert_eq!(attempts, 2);
        assert!(!grind_sig.is_low_r());
        assert_eq!(
            hex::encode(&sig),
            "3045022100feb9492ef8516e01dd1a1493db7c36171952e4526cbb11b6a7b579807dbae6cd02203e02dc138a9f40dfcc254547fdb214594c1d7a21f67b377e1aad155b97b8043901"
        );
    }

    #[test]
    fn test_signatures_verify_and_are_canonical() {
        let key = PrivateKey::from_hex(KEY_HEX).expect("key");
        let pub_key = key.pub_key();
        for i in 0u8..8 {
            let digest = [i.wrapping_mul(37); 32];
            let out = sign_der(&digest, &key, SigHashType::SINGLE).expect("sign");
            assert_eq!(*out.last().expect("sighash byte"), 0x03);
            let sig = Signature::from_der(&out[..out.len() - 1]).expect("der");
            assert!(sig.is_low_s());
            assert!(sig.verify(&digest, &pub_key));
        }
    }
}
