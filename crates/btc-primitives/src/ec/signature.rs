//! ECDSA signature with DER serialization and RFC6979 deterministic nonces.
//!
//! Supports strict DER encoding/decoding, low-S normalization, low-R
//! detection, and signing with optional extra nonce entropy.

use k256::ecdsa::hazmat::SignPrimitive;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::util::WireReader;
use crate::PrimitivesError;

const DER_SEQUENCE: u8 = 0x30;
const DER_INTEGER: u8 = 0x02;

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), used for low-S normalization.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// Length of a message hash accepted for signing.
pub const HASH_LEN: usize = 32;

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: 0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>.
    /// The outer length must cover the input exactly.
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes, without a sighash suffix.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the DER encoding is malformed.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let mut reader = WireReader::new(bytes);
        let header = reader.read_u8().map_err(|_| der_error("empty input"))?;
        if header != DER_SEQUENCE {
            return Err(der_error("no sequence header"));
        }
        let body_len = reader.read_u8().map_err(|_| der_error("missing length"))?;
        if usize::from(body_len) != reader.remaining() {
            return Err(der_error("length does not cover the body"));
        }

        let r = read_der_int(&mut reader, "R")?;
        let s = read_der_int(&mut reader, "S")?;
        if !reader.is_empty() {
            return Err(der_error("trailing bytes"));
        }

        for (name, value) in [("R", &r), ("S", &s)] {
            if value.iter().all(|&b| b == 0) {
                return Err(der_error(&format!("{} is zero", name)));
            }
            if *value >= CURVE_ORDER {
                return Err(der_error(&format!("{} is not below the curve order", name)));
            }
        }
        Ok(Signature { r, s })
    }

    /// Serialize the signature in DER format.
    ///
    /// The S value is written as stored; call [`Signature::normalize_s`] first
    /// for a standard low-S encoding.
    pub fn to_der(&self) -> Vec<u8> {
        let r = der_int(&self.r);
        let s = der_int(&self.s);
        let mut out = Vec::with_capacity(6 + r.len() + s.len());
        out.push(DER_SEQUENCE);
        out.push((4 + r.len() + s.len()) as u8);
        for int in [r, s] {
            out.push(DER_INTEGER);
            out.push(int.len() as u8);
            out.extend_from_slice(&int);
        }
        out
    }

    /// Whether the R component is below 2^255, giving a 32-byte DER integer.
    pub fn is_low_r(&self) -> bool {
        self.r[0] < 0x80
    }

    /// Whether S is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.s <= HALF_ORDER
    }

    /// Replace S with N - S when S is above half the curve order.
    pub fn normalize_s(self) -> Self {
        if self.is_low_s() {
            self
        } else {
            Signature {
                r: self.r,
                s: order_minus(&self.s),
            }
        }
    }

    /// Sign a 32-byte message hash using RFC6979 deterministic nonces.
    ///
    /// Produces a low-S normalized signature.
    pub fn sign(hash: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let hash: &[u8; HASH_LEN] = hash.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "expected {} byte hash, got {}",
                HASH_LEN,
                hash.len()
            ))
        })?;
        Self::sign_with_entropy(hash, priv_key, None)
    }

    /// Sign a message hash with RFC6979, mixing optional extra entropy into
    /// the nonce derivation.
    ///
    /// With `extra` set to `None` this is plain RFC6979. Passing 32 bytes
    /// of additional data yields a different, still deterministic, nonce.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte message hash.
    /// * `priv_key` - The private key to sign with.
    /// * `extra` - Optional additional data appended to the RFC6979 seed.
    ///
    /// # Returns
    /// A low-S normalized signature, or an error if no valid signature could
    /// be produced for this nonce.
    pub fn sign_with_entropy(
        hash: &[u8; HASH_LEN],
        priv_key: &PrivateKey,
        extra: Option<&[u8; 32]>,
    ) -> Result<Self, PrimitivesError> {
        let scalar = priv_key.to_scalar();
        let ad: &[u8] = match extra {
            Some(data) => data.as_slice(),
            None => &[],
        };

        let (k256_sig, _recovery_id) = scalar
            .try_sign_prehashed_rfc6979::<sha2::Sha256>(&k256::FieldBytes::from(*hash), ad)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        Ok(Signature { r, s }.normalize_s())
    }

    /// Verify this signature against a 32-byte message hash and public key.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise (including for
    /// hashes of the wrong length).
    pub fn verify(&self, hash: &[u8], pub_key: &PublicKey) -> bool {
        if hash.len() != HASH_LEN {
            return false;
        }
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        pub_key
            .verifying_key()
            .verify_prehash(hash, &k256_sig)
            .is_ok()
    }
}

fn der_error(reason: &str) -> PrimitivesError {
    PrimitivesError::InvalidSignature(format!("malformed DER signature: {}", reason))
}

/// Read one minimally encoded, non-negative DER INTEGER into 32 bytes.
fn read_der_int(reader: &mut WireReader<'_>, name: &str) -> Result<[u8; 32], PrimitivesError> {
    let marker = reader
        .read_u8()
        .map_err(|_| der_error(&format!("missing {}", name)))?;
    if marker != DER_INTEGER {
        return Err(der_error(&format!("no {} integer marker", name)));
    }
    let len = reader
        .read_u8()
        .map_err(|_| der_error(&format!("missing {} length", name)))?;
    let value = reader
        .read_bytes(usize::from(len))
        .map_err(|_| der_error(&format!("bogus {} length", name)))?;

    match value {
        [] => return Err(der_error(&format!("{} is empty", name))),
        [first, ..] if first & 0x80 != 0 => {
            return Err(der_error(&format!("{} is negative", name)))
        }
        [0x00, next, ..] if next & 0x80 == 0 => {
            return Err(der_error(&format!("{} has excess padding", name)))
        }
        _ => {}
    }

    let digits = value.strip_prefix(&[0x00]).unwrap_or(value);
    if digits.len() > 32 {
        return Err(der_error(&format!("{} is wider than 32 bytes", name)));
    }
    let mut out = [0u8; 32];
    out[32 - digits.len()..].copy_from_slice(digits);
    Ok(out)
}

/// Minimal big-endian DER integer body, zero-padded when the high bit is set.
fn der_int(value: &[u8; 32]) -> Vec<u8> {
    let start = value.iter().position(|&b| b != 0).unwrap_or(31);
    let digits = &value[start..];
    let mut out = Vec::with_capacity(digits.len() + 1);
    if digits[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(digits);
    out
}

/// N - value, for value <= N.
fn order_minus(value: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = false;
    for i in (0..32).rev() {
        let (diff, under) = CURVE_ORDER[i].overflowing_sub(value[i]);
        let (diff, under_borrow) = diff.overflowing_sub(u8::from(borrow));
        out[i] = diff;
        borrow = under || under_borrow;
    }
    out
}
