//! Bitcoin Script type - a sequence of opcodes and data pushes.
//!
//! Scripts are used in transaction inputs (unlocking) and outputs (locking)
//! to define spending conditions. The Script wraps a `Vec<u8>` and provides
//! methods for construction, classification, serialization, and ASM output.

use std::fmt;

use btc_primitives::util::{WireReader, WireWriter};
use btc_primitives::{CodecError, WireCodec};

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::script_type::{classify, ScriptType};
use crate::ScriptError;

/// A Bitcoin script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Create a script from a Bitcoin ASM string.
    ///
    /// Parses space-separated tokens where known opcodes (e.g. "OP_DUP") are
    /// emitted directly and hex strings are treated as push data.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        for section in asm.split_whitespace() {
            if let Some(opcode) = string_to_opcode(section) {
                script.append_opcodes(&[opcode])?;
            } else {
                script.append_push_data_hex(section)?;
            }
        }
        Ok(script)
    }

    /// Build the pay-to-public-key-hash locking script for a Hash160.
    ///
    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`. Also serves as
    /// the BIP-143 scriptCode for P2WPKH spends.
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(25);
        bytes.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
        bytes.extend_from_slice(pubkey_hash);
        bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Script(bytes)
    }

    /// Build the native segwit v0 key-hash program `OP_0 <hash>`.
    pub fn p2wpkh(pubkey_hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(22);
        bytes.extend_from_slice(&[OP_0, OP_DATA_20]);
        bytes.extend_from_slice(pubkey_hash);
        Script(bytes)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Convert the script to its ASM (human-readable assembly) representation.
    ///
    /// Data pushes appear as their hex encoding; opcodes appear by name.
    /// Returns an empty string for scripts that fail to decode.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(ScriptChunk::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the script into a vector of decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    /// Classify the script against the standard templates.
    ///
    /// A script whose pushes are truncated cannot match any template and is
    /// reported as `NonStandard`.
    pub fn script_type(&self) -> ScriptType {
        match self.chunks() {
            Ok(chunks) => classify(&chunks),
            Err(_) => ScriptType::NonStandard,
        }
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Append data bytes to the script with the minimal PUSHDATA prefix.
    ///
    /// # Arguments
    /// * `data` - The data bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error if the data is too large.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append hex-encoded data to the script with proper PUSHDATA prefix.
    pub fn append_push_data_hex(&mut self, hex_str: &str) -> Result<(), ScriptError> {
        let data = hex::decode(hex_str)
            .map_err(|_| ScriptError::InvalidAsmToken(hex_str.to_string()))?;
        self.append_push_data(&data)
    }

    /// Append raw opcodes to the script.
    ///
    /// Rejects push data opcodes (OP_DATA_1..OP_PUSHDATA4); use
    /// `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes
            .iter()
            .find(|&&op| (OP_DATA_1..=OP_PUSHDATA4).contains(&op))
        {
            return Err(ScriptError::PushOpcode(opcode_to_string(op)));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

/// Scripts are framed with a VarInt byte length unless the writer has
/// length prefixes disabled.
impl WireCodec for Script {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        let bytes = reader.read_var_bytes().map_err(|e| e.context("script"))?;
        Ok(Script(bytes.to_vec()))
    }

    fn write_to(&self, writer: &mut WireWriter) {
        writer.write_var_bytes(&self.0);
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_primitives::util::LengthPrefix;

    const P2PKH_HEX: &str = "76a914e2a623699e81b291c0327f408fea765d534baa2a88ac";

    // -----------------------------------------------------------------------
    // Construction & roundtrip tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_hex_roundtrip() {
        let script = Script::from_hex(P2PKH_HEX).expect("valid hex should parse");
        assert_eq!(script.to_hex(), P2PKH_HEX);
        assert!(Script::from_hex("").expect("empty").is_empty());
        assert!(matches!(Script::from_hex("ZZZZ"), Err(ScriptError::InvalidHex(_))));
        assert!(matches!(
            Script::from_asm("OP_DUP OP_NOT_A_THING"),
            Err(ScriptError::InvalidAsmToken(_))
        ));
    }

    /// P2PKH renders with opcode names around the hash.
    #[test]
    fn test_to_asm_p2pkh() {
        let script = Script::from_hex(P2PKH_HEX).expect("valid hex should parse");
        assert_eq!(
            script.to_asm(),
            "OP_DUP OP_HASH160 e2a623699e81b291c0327f408fea765d534baa2a OP_EQUALVERIFY OP_CHECKSIG"
        );
        let back = Script::from_asm(&script.to_asm()).expect("roundtrip ASM should parse");
        assert_eq!(back, script);
    }

    #[test]
    fn test_to_asm_truncated_is_empty() {
        let script = Script::from_hex("0501").expect("hex");
        assert_eq!(script.to_asm(), "");
        assert_eq!(script.script_type(), ScriptType::NonStandard);
    }

    #[test]
    fn test_from_asm_witness_program() {
        let script = Script::from_asm("OP_0 3af7f12b5acc592a2faa52e37f8dcef809dda0ca")
            .expect("valid ASM");
        assert_eq!(script.to_hex(), "00143af7f12b5acc592a2faa52e37f8dcef809dda0ca");
        assert_eq!(script.script_type(), ScriptType::WitnessV0KeyHash);
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    #[test]
    fn test_p2pkh_and_p2wpkh_templates() {
        let hash: [u8; 20] = hex::decode("a235bdde3bb2c326f291d9c281fdc3fe1e956fe0")
            .expect("hex")
            .try_into()
            .expect("20 bytes");

        let p2pkh = Script::p2pkh(&hash);
        assert_eq!(p2pkh.to_hex(), "76a914a235bdde3bb2c326f291d9c281fdc3fe1e956fe088ac");
        assert_eq!(p2pkh.script_type(), ScriptType::PubKeyHash);

        let p2wpkh = Script::p2wpkh(&hash);
        assert_eq!(p2wpkh.to_hex(), "0014a235bdde3bb2c326f291d9c281fdc3fe1e956fe0");
        assert_eq!(p2wpkh.script_type(), ScriptType::WitnessV0KeyHash);
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    #[test]
    fn test_append_push_data_sizes() {
        let mut script = Script::new();
        script.append_push_data(&[1, 2, 3, 4, 5]).expect("push should succeed");
        assert_eq!(script.to_hex(), "050102030405");

        let mut script = Script::new();
        script.append_push_data(&[0xaa; 80]).expect("push should succeed");
        assert_eq!(&script.to_hex()[..4], "4c50");
        assert_eq!(script.len(), 2 + 80);

        let mut script = Script::new();
        script.append_push_data(&[0xbb; 256]).expect("push should succeed");
        assert_eq!(&script.to_hex()[..6], "4d0001");
    }

    #[test]
    fn test_append_opcodes() {
        let mut script = Script::from_asm("OP_2 OP_2 OP_ADD").expect("valid ASM");
        script
            .append_opcodes(&[OP_EQUAL, OP_VERIFY])
            .expect("should succeed");
        assert_eq!(script.to_asm(), "OP_2 OP_2 OP_ADD OP_EQUAL OP_VERIFY");

        assert!(matches!(
            script.append_opcodes(&[OP_EQUAL, OP_PUSHDATA1]),
            Err(ScriptError::PushOpcode(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Wire codec
    // -----------------------------------------------------------------------

    /// Scripts carry a VarInt length on the wire.
    #[test]
    fn test_wire_codec_length_prefixed() {
        let script = Script::from_hex(P2PKH_HEX).expect("hex");
        let encoded = script.encode();
        assert_eq!(encoded[0], 25);
        assert_eq!(&encoded[1..], script.to_bytes());
        assert_eq!(Script::decode(&encoded).expect("decode"), script);
    }

    /// With prefixes disabled the raw bytes are written.
    #[test]
    fn test_wire_codec_prefix_disabled() {
        let script = Script::from_hex(P2PKH_HEX).expect("hex");
        let mut writer = WireWriter::new().with_length_prefix(LengthPrefix::Disabled);
        script.write_to(&mut writer);
        assert_eq!(writer.into_bytes(), script.to_bytes());
    }

    #[test]
    fn test_wire_codec_truncated() {
        let err = Script::decode(&[0x05, 0x01, 0x02]).expect_err("truncated");
        assert!(matches!(err, CodecError::DataCorrupted(_)));
    }

    // -----------------------------------------------------------------------
    // Serialization (JSON) / Display
    // -----------------------------------------------------------------------

    #[test]
    fn test_serde_roundtrip() {
        let script = Script::from_asm("OP_2 OP_2 OP_ADD OP_4 OP_EQUALVERIFY")
            .expect("valid ASM");
        let json_str = serde_json::to_string(&script).expect("should serialize");
        assert_eq!(json_str, r#""5252935488""#);
        let back: Script = serde_json::from_str(&json_str).expect("should deserialize");
        assert_eq!(back, script);
    }

    #[test]
    fn test_display_and_debug() {
        let script = Script::from_hex(P2PKH_HEX).expect("valid hex");
        assert_eq!(format!("{}", script), P2PKH_HEX);
        assert_eq!(format!("{:?}", script), format!("Script({})", P2PKH_HEX));
    }
}
