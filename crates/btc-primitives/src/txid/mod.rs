//! Transaction identifier type.
//!
//! A `Txid` holds the 32 bytes in display order (the order block explorers
//! print). On the wire the same hash appears byte-reversed, so the
//! `WireCodec` implementation reverses on every read and write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::util::{WireReader, WireWriter};
use crate::wire::WireCodec;
use crate::{CodecError, PrimitivesError};

/// Size of a txid in bytes.
pub const TXID_SIZE: usize = 32;

/// A 32-byte transaction identifier, stored in display byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Txid([u8; TXID_SIZE]);

impl Txid {
    /// Create a txid from bytes already in display order.
    pub fn new(bytes: [u8; TXID_SIZE]) -> Self {
        Txid(bytes)
    }

    /// Create a txid from bytes in wire (little-endian) order.
    ///
    /// # Arguments
    /// * `bytes` - The 32 bytes exactly as they appear in a serialized outpoint.
    ///
    /// # Returns
    /// A `Txid` with the bytes reversed into display order.
    pub fn from_wire_bytes(mut bytes: [u8; TXID_SIZE]) -> Self {
        bytes.reverse();
        Txid(bytes)
    }

    /// Compute the txid of a serialized (non-witness) transaction.
    ///
    /// # Arguments
    /// * `serialized` - Legacy-format transaction bytes.
    ///
    /// # Returns
    /// The double-SHA-256 of the bytes, in display order.
    pub fn hash(serialized: &[u8]) -> Self {
        Txid::from_wire_bytes(sha256d(serialized))
    }

    /// Parse a txid from its 64-character display hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let decoded = hex::decode(hex_str)?;
        let bytes: [u8; TXID_SIZE] = decoded.as_slice().try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid txid length of {}, want {}",
                decoded.len(),
                TXID_SIZE
            ))
        })?;
        Ok(Txid(bytes))
    }

    /// Return the bytes in display order.
    pub fn as_bytes(&self) -> &[u8; TXID_SIZE] {
        &self.0
    }

    /// Return the bytes in wire order.
    pub fn to_wire_bytes(&self) -> [u8; TXID_SIZE] {
        let mut out = self.0;
        out.reverse();
        out
    }
}

impl WireCodec for Txid {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        Ok(Txid::from_wire_bytes(reader.read_array()?))
    }

    fn write_to(&self, writer: &mut WireWriter) {
        writer.write_bytes(&self.to_wire_bytes());
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Txid {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Txid::from_hex(s)
    }
}

/// Serialize as a display-order hex string in JSON.
impl Serialize for Txid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Txid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Txid::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE_HEX: &str = "449d45bbbfe7fc93bbe649bb7b6106b248a15da5dbd6fdc9bdfc7efede83235e";
    const DISPLAY_HEX: &str = "5e2383defe7efcbdc9fdd6dba55da148b206617bbb49e6bb93fce7bfbb459d44";

    #[test]
    fn test_wire_bytes_are_reversed() {
        let wire = hex::decode(WIRE_HEX).expect("valid hex");
        let txid = Txid::decode(&wire).expect("32 bytes");
        assert_eq!(txid.to_string(), DISPLAY_HEX);
        assert_eq!(txid.encode(), wire);
    }

    #[test]
    fn test_from_hex_length_checked() {
        assert!(Txid::from_hex(DISPLAY_HEX).is_ok());
        assert!(Txid::from_hex("abcd").is_err());
        assert!(Txid::from_hex("zz").is_err());
    }

    /// The genesis coinbase transaction hashes to its well-known id.
    #[test]
    fn test_hash_genesis_coinbase() {
        let raw = hex::decode(concat!(
            "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff",
            "4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72",
            "206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff",
            "0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f",
            "61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000"
        ))
        .expect("valid hex");
        assert_eq!(
            Txid::hash(&raw).to_string(),
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
        );
    }

    #[test]
    fn test_json_marshalling() {
        #[derive(Serialize, Deserialize)]
        struct TestData {
            txid: Txid,
        }

        let data = TestData { txid: Txid::from_hex(DISPLAY_HEX).expect("valid") };
        let json = serde_json::to_string(&data).expect("serialize");
        assert_eq!(json, format!(r#"{{"txid":"{}"}}"#, DISPLAY_HEX));
        let back: TestData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.txid, data.txid);
    }
}
