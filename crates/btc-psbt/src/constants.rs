//! BIP-174 key types and envelope constants.
//!
//! Values are fixed by BIP-174 and must not change.

/// `psbt` followed by the 0xff separator.
pub const PSBT_MAGIC: [u8; 5] = *b"psbt\xff";

// Global map
pub const PSBT_GLOBAL_UNSIGNED_TX: u8 = 0x00;
pub const PSBT_GLOBAL_XPUB: u8 = 0x01;
pub const PSBT_GLOBAL_TX_VERSION: u8 = 0x02;
pub const PSBT_GLOBAL_FALLBACK_LOCKTIME: u8 = 0x03;
pub const PSBT_GLOBAL_INPUT_COUNT: u8 = 0x04;
pub const PSBT_GLOBAL_OUTPUT_COUNT: u8 = 0x05;
pub const PSBT_GLOBAL_TX_MODIFIABLE: u8 = 0x06;
pub const PSBT_GLOBAL_VERSION: u8 = 0xFB;
pub const PSBT_GLOBAL_PROPRIETARY: u8 = 0xFC;

// Input maps
pub const PSBT_IN_NON_WITNESS_UTXO: u8 = 0x00;
pub const PSBT_IN_WITNESS_UTXO: u8 = 0x01;
pub const PSBT_IN_PARTIAL_SIG: u8 = 0x02;
pub const PSBT_IN_SIGHASH_TYPE: u8 = 0x03;
pub const PSBT_IN_REDEEM_SCRIPT: u8 = 0x04;
pub const PSBT_IN_WITNESS_SCRIPT: u8 = 0x05;
pub const PSBT_IN_BIP32_DERIVATION: u8 = 0x06;
pub const PSBT_IN_FINAL_SCRIPTSIG: u8 = 0x07;
pub const PSBT_IN_FINAL_SCRIPTWITNESS: u8 = 0x08;
pub const PSBT_IN_POR_COMMITMENT: u8 = 0x09;
pub const PSBT_IN_RIPEMD160: u8 = 0x0A;
pub const PSBT_IN_SHA256: u8 = 0x0B;
pub const PSBT_IN_HASH160: u8 = 0x0C;
pub const PSBT_IN_HASH256: u8 = 0x0D;
pub const PSBT_IN_PREVIOUS_TXID: u8 = 0x0E;
pub const PSBT_IN_OUTPUT_INDEX: u8 = 0x0F;
pub const PSBT_IN_SEQUENCE: u8 = 0x10;
pub const PSBT_IN_REQUIRED_TIME_LOCKTIME: u8 = 0x11;
pub const PSBT_IN_REQUIRED_HEIGHT_LOCKTIME: u8 = 0x12;
pub const PSBT_IN_TAP_KEY_SIG: u8 = 0x13;
pub const PSBT_IN_TAP_SCRIPT_SIG: u8 = 0x14;
pub const PSBT_IN_TAP_LEAF_SCRIPT: u8 = 0x15;
pub const PSBT_IN_TAP_BIP32_DERIVATION: u8 = 0x16;
pub const PSBT_IN_TAP_INTERNAL_KEY: u8 = 0x17;
pub const PSBT_IN_TAP_MERKLE_ROOT: u8 = 0x18;
pub const PSBT_IN_PROPRIETARY: u8 = 0xFC;

// Output maps
pub const PSBT_OUT_REDEEM_SCRIPT: u8 = 0x00;
pub const PSBT_OUT_WITNESS_SCRIPT: u8 = 0x01;
pub const PSBT_OUT_BIP32_DERIVATION: u8 = 0x02;
pub const PSBT_OUT_AMOUNT: u8 = 0x03;
pub const PSBT_OUT_SCRIPT: u8 = 0x04;
pub const PSBT_OUT_TAP_INTERNAL_KEY: u8 = 0x05;
pub const PSBT_OUT_TAP_TREE: u8 = 0x06;
pub const PSBT_OUT_TAP_BIP32_DERIVATION: u8 = 0x07;
pub const PSBT_OUT_PROPRIETARY: u8 = 0xFC;

/// Which map a key type belongs to; the same byte means different things
/// in each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Global,
    Input,
    Output,
}

/// Human-readable name for a key type, for error messages and logs.
pub fn field_type_name(category: FieldCategory, field_type: u8) -> &'static str {
    match category {
        FieldCategory::Global => match field_type {
            PSBT_GLOBAL_UNSIGNED_TX => "PSBT_GLOBAL_UNSIGNED_TX",
            PSBT_GLOBAL_XPUB => "PSBT_GLOBAL_XPUB",
            PSBT_GLOBAL_TX_VERSION => "PSBT_GLOBAL_TX_VERSION",
            PSBT_GLOBAL_FALLBACK_LOCKTIME => "PSBT_GLOBAL_FALLBACK_LOCKTIME",
            PSBT_GLOBAL_INPUT_COUNT => "PSBT_GLOBAL_INPUT_COUNT",
            PSBT_GLOBAL_OUTPUT_COUNT => "PSBT_GLOBAL_OUTPUT_COUNT",
            PSBT_GLOBAL_TX_MODIFIABLE => "PSBT_GLOBAL_TX_MODIFIABLE",
            PSBT_GLOBAL_VERSION => "PSBT_GLOBAL_VERSION",
            PSBT_GLOBAL_PROPRIETARY => "PSBT_GLOBAL_PROPRIETARY",
            _ => "PSBT_GLOBAL_UNKNOWN",
        },
        FieldCategory::Input => match field_type {
            PSBT_IN_NON_WITNESS_UTXO => "PSBT_IN_NON_WITNESS_UTXO",
            PSBT_IN_WITNESS_UTXO => "PSBT_IN_WITNESS_UTXO",
            PSBT_IN_PARTIAL_SIG => "PSBT_IN_PARTIAL_SIG",
            PSBT_IN_SIGHASH_TYPE => "PSBT_IN_SIGHASH_TYPE",
            PSBT_IN_REDEEM_SCRIPT => "PSBT_IN_REDEEM_SCRIPT",
            PSBT_IN_WITNESS_SCRIPT => "PSBT_IN_WITNESS_SCRIPT",
            PSBT_IN_BIP32_DERIVATION => "PSBT_IN_BIP32_DERIVATION",
            PSBT_IN_FINAL_SCRIPTSIG => "PSBT_IN_FINAL_SCRIPTSIG",
            PSBT_IN_FINAL_SCRIPTWITNESS => "PSBT_IN_FINAL_SCRIPTWITNESS",
            PSBT_IN_POR_COMMITMENT => "PSBT_IN_POR_COMMITMENT",
            PSBT_IN_RIPEMD160 => "PSBT_IN_RIPEMD160",
            PSBT_IN_SHA256 => "PSBT_IN_SHA256",
            PSBT_IN_HASH160 => "PSBT_IN_HASH160",
            PSBT_IN_HASH256 => "PSBT_IN_HASH256",
            PSBT_IN_PREVIOUS_TXID => "PSBT_IN_PREVIOUS_TXID",
            PSBT_IN_OUTPUT_INDEX => "PSBT_IN_OUTPUT_INDEX",
            PSBT_IN_SEQUENCE => "PSBT_IN_SEQUENCE",
            PSBT_IN_REQUIRED_TIME_LOCKTIME => "PSBT_IN_REQUIRED_TIME_LOCKTIME",
            PSBT_IN_REQUIRED_HEIGHT_LOCKTIME => "PSBT_IN_REQUIRED_HEIGHT_LOCKTIME",
            PSBT_IN_TAP_KEY_SIG => "PSBT_IN_TAP_KEY_SIG",
            PSBT_IN_TAP_SCRIPT_SIG => "PSBT_IN_TAP_SCRIPT_SIG",
            PSBT_IN_TAP_LEAF_SCRIPT => "PSBT_IN_TAP_LEAF_SCRIPT",
            PSBT_IN_TAP_BIP32_DERIVATION => "PSBT_IN_TAP_BIP32_DERIVATION",
            PSBT_IN_TAP_INTERNAL_KEY => "PSBT_IN_TAP_INTERNAL_KEY",
            PSBT_IN_TAP_MERKLE_ROOT => "PSBT_IN_TAP_MERKLE_ROOT",
            PSBT_IN_PROPRIETARY => "PSBT_IN_PROPRIETARY",
            _ => "PSBT_IN_UNKNOWN",
        },
        FieldCategory::Output => match field_type {
            PSBT_OUT_REDEEM_SCRIPT => "PSBT_OUT_REDEEM_SCRIPT",
            PSBT_OUT_WITNESS_SCRIPT => "PSBT_OUT_WITNESS_SCRIPT",
            PSBT_OUT_BIP32_DERIVATION => "PSBT_OUT_BIP32_DERIVATION",
            PSBT_OUT_AMOUNT => "PSBT_OUT_AMOUNT",
            PSBT_OUT_SCRIPT => "PSBT_OUT_SCRIPT",
            PSBT_OUT_TAP_INTERNAL_KEY => "PSBT_OUT_TAP_INTERNAL_KEY",
            PSBT_OUT_TAP_TREE => "PSBT_OUT_TAP_TREE",
            PSBT_OUT_TAP_BIP32_DERIVATION => "PSBT_OUT_TAP_BIP32_DERIVATION",
            PSBT_OUT_PROPRIETARY => "PSBT_OUT_PROPRIETARY",
            _ => "PSBT_OUT_UNKNOWN",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_bytes() {
        assert_eq!(PSBT_MAGIC, [0x70, 0x73, 0x62, 0x74, 0xff]);
    }

    #[test]
    fn test_names_depend_on_category() {
        assert_eq!(field_type_name(FieldCategory::Global, 0x01), "PSBT_GLOBAL_XPUB");
        assert_eq!(field_type_name(FieldCategory::Input, 0x01), "PSBT_IN_WITNESS_UTXO");
        assert_eq!(field_type_name(FieldCategory::Output, 0x01), "PSBT_OUT_WITNESS_SCRIPT");
        assert_eq!(field_type_name(FieldCategory::Input, 0x42), "PSBT_IN_UNKNOWN");
    }
}
