//! secp256k1 private key with Bitcoin-specific functionality.
//!
//! Wraps a k256 signing key and adds WIF encoding for mainnet and testnet,
//! hex/bytes constructors and deterministic signing.

use k256::ecdsa::SigningKey;
use k256::Scalar;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// The network a WIF string is encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// The WIF version byte for this network.
    pub fn wif_prefix(&self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    /// Map a WIF version byte back to its network.
    pub fn from_wif_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            0x80 => Some(Network::Mainnet),
            0xef => Some(Network::Testnet),
            _ => None,
        }
    }
}

/// A decoded WIF string.
#[derive(Debug, Clone)]
pub struct WifKey {
    pub key: PrivateKey,
    pub network: Network,
    /// Whether the WIF marks the key as paired with a compressed public key.
    pub compressed: bool,
}

/// A secp256k1 private key for signing.
///
/// The underlying k256 `SigningKey` zeroizes its scalar on drop.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid non-zero scalar below
    /// the curve order, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// Accepts mainnet (`0x80`) and testnet (`0xef`) prefixes, compressed
    /// or uncompressed.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        Ok(Self::decode_wif(wif)?.key)
    }

    /// Decode a WIF string, reporting its network and compression flag.
    ///
    /// Layout after Base58 decoding:
    /// `prefix(1) || key(32) || [0x01] || checksum(4)`, where the checksum is
    /// the first four bytes of SHA-256d over everything before it.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string.
    ///
    /// # Returns
    /// The decoded key with its metadata, or an error if the string is not
    /// valid Base58, has a bad length, prefix or compression flag, or fails
    /// the checksum.
    pub fn decode_wif(wif: &str) -> Result<WifKey, PrimitivesError> {
        let decoded = Zeroizing::new(
            bs58::decode(wif)
                .into_vec()
                .map_err(|e| PrimitivesError::InvalidWif(e.to_string()))?,
        );
        let decoded_len = decoded.len();

        let compressed = match decoded_len {
            38 => {
                if decoded[33] != COMPRESS_MAGIC {
                    return Err(PrimitivesError::InvalidWif(
                        "malformed private key: invalid compression flag".to_string(),
                    ));
                }
                true
            }
            37 => false,
            _ => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "malformed private key: invalid length {}",
                    decoded_len
                )));
            }
        };

        let (payload, checksum) = decoded.split_at(decoded_len - 4);
        if sha256d(payload)[..4] != *checksum {
            return Err(PrimitivesError::ChecksumMismatch);
        }

        let network = Network::from_wif_prefix(payload[0]).ok_or_else(|| {
            PrimitivesError::InvalidWif(format!("unknown network prefix 0x{:02x}", payload[0]))
        })?;
        let key = Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])?;
        Ok(WifKey { key, network, compressed })
    }

    /// Encode the private key as a compressed WIF string for `network`.
    pub fn to_wif(&self, network: Network) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1 + 4));
        payload.push(network.wif_prefix());
        payload.extend_from_slice(self.to_bytes().as_ref());
        payload.push(COMPRESS_MAGIC);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);
        bs58::encode(payload.as_slice()).into_string()
    }

    /// Serialize the private key as a 32-byte big-endian scalar.
    ///
    /// The returned buffer is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes().as_ref())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a message hash using deterministic RFC6979 nonces.
    ///
    /// Produces a low-S normalized signature.
    pub fn sign(&self, hash: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(hash, self)
    }

    /// Convert the private key to a k256 `Scalar`.
    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.as_nonzero_scalar().as_ref()
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for PrivateKey {}
