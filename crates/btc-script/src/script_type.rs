//! Standard script template classification.
//!
//! `classify` is a pure function of the decoded chunk sequence. It never
//! looks at anything outside the script, so the same bytes always map to the
//! same `ScriptType`.

use std::fmt;

use crate::chunk::ScriptChunk;
use crate::opcodes::*;

/// Largest push accepted after OP_RETURN in a null-data output.
pub const MAX_NULL_DATA_PUSH: usize = 80;

/// Largest key count accepted in a bare multisig template.
pub const MAX_MULTISIG_KEYS: u8 = 3;

/// Pay-to-anchor witness program.
pub const ANCHOR_PROGRAM: [u8; 2] = [0x4e, 0x73];

/// The standard template a script matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptType {
    /// `<pubkey> OP_CHECKSIG`
    PubKey,
    /// `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG`
    PubKeyHash,
    /// `OP_HASH160 <20> OP_EQUAL`
    ScriptHash,
    /// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`
    Multisig,
    /// `OP_RETURN [<data>]`
    NullData,
    /// `OP_0 <20>`
    WitnessV0KeyHash,
    /// `OP_0 <32>`
    WitnessV0ScriptHash,
    /// `OP_1 <32>`
    WitnessV1Taproot,
    /// `OP_1 <4e73>`
    Anchor,
    /// `OP_n <program>` for any other version/program combination.
    WitnessUnknown,
    NonStandard,
}

impl ScriptType {
    /// The conventional lowercase name of the template.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::PubKey => "pubkey",
            ScriptType::PubKeyHash => "pubkeyhash",
            ScriptType::ScriptHash => "scripthash",
            ScriptType::Multisig => "multisig",
            ScriptType::NullData => "nulldata",
            ScriptType::WitnessV0KeyHash => "witness_v0_keyhash",
            ScriptType::WitnessV0ScriptHash => "witness_v0_scripthash",
            ScriptType::WitnessV1Taproot => "witness_v1_taproot",
            ScriptType::Anchor => "anchor",
            ScriptType::WitnessUnknown => "witness_unknown",
            ScriptType::NonStandard => "nonstandard",
        }
    }

    /// Whether this is one of the segregated witness program templates.
    pub fn is_witness_program(&self) -> bool {
        matches!(
            self,
            ScriptType::WitnessV0KeyHash
                | ScriptType::WitnessV0ScriptHash
                | ScriptType::WitnessV1Taproot
                | ScriptType::Anchor
                | ScriptType::WitnessUnknown
        )
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a decoded script.
///
/// # Arguments
/// * `chunks` - The script's opcodes and pushes, as produced by
///   [`crate::chunk::decode_script`].
///
/// # Returns
/// The matching `ScriptType`, or `NonStandard` if no template matches.
pub fn classify(chunks: &[ScriptChunk]) -> ScriptType {
    match chunks {
        [dup, hash, push, eqv, checksig]
            if dup.op == OP_DUP
                && hash.op == OP_HASH160
                && push_len(push) == Some(20)
                && eqv.op == OP_EQUALVERIFY
                && checksig.op == OP_CHECKSIG =>
        {
            ScriptType::PubKeyHash
        }
        [hash, push, eq]
            if hash.op == OP_HASH160 && push_len(push) == Some(20) && eq.op == OP_EQUAL =>
        {
            ScriptType::ScriptHash
        }
        [version, program] if version.op == OP_0 => match push_len(program) {
            Some(20) => ScriptType::WitnessV0KeyHash,
            Some(32) => ScriptType::WitnessV0ScriptHash,
            _ => ScriptType::NonStandard,
        },
        [version, program] if small_int_value(version.op).is_some() && program.is_push() => {
            match (version.op, program.push_data()) {
                (OP_1, Some(data)) if data.len() == 32 => ScriptType::WitnessV1Taproot,
                (OP_1, Some(data)) if data == &ANCHOR_PROGRAM[..] => ScriptType::Anchor,
                _ => ScriptType::WitnessUnknown,
            }
        }
        [key, checksig] if checksig.op == OP_CHECKSIG && is_pubkey_push(key) => {
            ScriptType::PubKey
        }
        [ret] if ret.op == OP_RETURN => ScriptType::NullData,
        [ret, data] if ret.op == OP_RETURN => match push_len(data) {
            Some(len) if len <= MAX_NULL_DATA_PUSH => ScriptType::NullData,
            _ => ScriptType::NonStandard,
        },
        _ if is_multisig(chunks) => ScriptType::Multisig,
        _ => ScriptType::NonStandard,
    }
}

fn push_len(chunk: &ScriptChunk) -> Option<usize> {
    if chunk.is_push() {
        chunk.push_data().map(<[u8]>::len)
    } else {
        None
    }
}

fn is_pubkey_push(chunk: &ScriptChunk) -> bool {
    matches!(push_len(chunk), Some(33) | Some(65))
}

// OP_m <key>{n} OP_n OP_CHECKMULTISIG with 1 <= m <= n <= 3 and uniform key sizes.
fn is_multisig(chunks: &[ScriptChunk]) -> bool {
    let (first, rest) = match chunks.split_first() {
        Some(split) => split,
        None => return false,
    };
    let (last, rest) = match rest.split_last() {
        Some(split) => split,
        None => return false,
    };
    let (count, keys) = match rest.split_last() {
        Some(split) => split,
        None => return false,
    };
    if last.op != OP_CHECKMULTISIG {
        return false;
    }

    let (m, n) = match (small_int_value(first.op), small_int_value(count.op)) {
        (Some(m), Some(n)) => (m, n),
        _ => return false,
    };
    if m > n || n > MAX_MULTISIG_KEYS || keys.len() != n as usize {
        return false;
    }

    let key_len = match keys.first().and_then(push_len) {
        Some(len @ (33 | 65)) => len,
        _ => return false,
    };
    keys.iter().all(|key| push_len(key) == Some(key_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::decode_script;

    fn classify_hex(script_hex: &str) -> ScriptType {
        let bytes = hex::decode(script_hex).expect("valid hex");
        classify(&decode_script(&bytes).expect("decodes"))
    }

    fn key33(prefix: u8) -> String {
        format!("21{:02x}{}", prefix, "11".repeat(32))
    }

    #[test]
    fn test_classify_standard_templates() {
        let cases = [
            (
                "76a91403ececf2d12a7f614aef4c82ecf13c303bd9975d88ac",
                ScriptType::PubKeyHash,
            ),
            ("a9149de5aeaff9c48431ba4dd6e8af73d51f38e451cb87", ScriptType::ScriptHash),
            (
                "2102f0d97c290e79bf2a8660c406aa56b6f189ff79f2245cc5aff82808b58131b4d5ac",
                ScriptType::PubKey,
            ),
            ("00143af7f12b5acc592a2faa52e37f8dcef809dda0ca", ScriptType::WitnessV0KeyHash),
            (
                "0020701a8d401c84fb13e6baf169d59684e17abd9fa216c8cc5b9fc63d622ff8c58d",
                ScriptType::WitnessV0ScriptHash,
            ),
            (
                "5120a60869f0dbcf1dc659c9cecbaf8050135ea9e8cdc487053f1dc6880949dc684c",
                ScriptType::WitnessV1Taproot,
            ),
            ("51024e73", ScriptType::Anchor),
            ("52020001", ScriptType::WitnessUnknown),
            ("6a", ScriptType::NullData),
            ("6a0401020304", ScriptType::NullData),
            ("", ScriptType::NonStandard),
            ("76", ScriptType::NonStandard),
        ];
        for (script_hex, expected) in cases {
            assert_eq!(classify_hex(script_hex), expected, "{}", script_hex);
        }
    }

    /// Witness v0 programs must be exactly 20 or 32 bytes.
    #[test]
    fn test_classify_witness_v0_bad_length() {
        assert_eq!(classify_hex(&format!("0015{}", "cd".repeat(21))), ScriptType::NonStandard);
    }

    #[test]
    fn test_classify_null_data_limits() {
        let at_limit = format!("6a4c50{}", "ab".repeat(80));
        assert_eq!(classify_hex(&at_limit), ScriptType::NullData);

        let over_limit = format!("6a4c51{}", "ab".repeat(81));
        assert_eq!(classify_hex(&over_limit), ScriptType::NonStandard);

        // Two pushes after OP_RETURN.
        assert_eq!(classify_hex("6a01010102"), ScriptType::NonStandard);
    }

    #[test]
    fn test_classify_multisig() {
        let one_of_one = format!("51{}51ae", key33(0x02));
        assert_eq!(classify_hex(&one_of_one), ScriptType::Multisig);

        let two_of_three = format!("52{}{}{}53ae", key33(0x02), key33(0x03), key33(0x02));
        assert_eq!(classify_hex(&two_of_three), ScriptType::Multisig);

        // m > n
        let bad_threshold = format!("52{}51ae", key33(0x02));
        assert_eq!(classify_hex(&bad_threshold), ScriptType::NonStandard);

        // key count disagrees with n
        let bad_count = format!("51{}{}51ae", key33(0x02), key33(0x03));
        assert_eq!(classify_hex(&bad_count), ScriptType::NonStandard);

        // mixed key sizes
        let key65 = format!("41{}", "04".to_string() + &"22".repeat(64));
        let mixed = format!("51{}{}52ae", key33(0x02), key65);
        assert_eq!(classify_hex(&mixed), ScriptType::NonStandard);

        // more than three keys
        let four = format!("51{}{}{}{}54ae", key33(2), key33(2), key33(2), key33(2));
        assert_eq!(classify_hex(&four), ScriptType::NonStandard);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let bytes = hex::decode("00143af7f12b5acc592a2faa52e37f8dcef809dda0ca").expect("hex");
        let chunks = decode_script(&bytes).expect("decodes");
        assert_eq!(classify(&chunks), classify(&chunks.clone()));
    }

    #[test]
    fn test_script_type_names() {
        assert_eq!(ScriptType::WitnessV0KeyHash.to_string(), "witness_v0_keyhash");
        assert_eq!(ScriptType::NonStandard.as_str(), "nonstandard");
        assert!(ScriptType::Anchor.is_witness_program());
        assert!(!ScriptType::PubKeyHash.is_witness_program());
    }
}
