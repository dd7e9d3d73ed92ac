//! Bitcoin script opcode constants and name lookup.

// ---------------------------------------------------------------------------
// Push value
// ---------------------------------------------------------------------------

pub const OP_FALSE: u8 = 0x00;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_65: u8 = 0x41;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_TRUE: u8 = 0x51;

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_RESERVED: u8 = 0x50;
pub const OP_1: u8 = 0x51;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_4: u8 = 0x54;
pub const OP_5: u8 = 0x55;
pub const OP_6: u8 = 0x56;
pub const OP_7: u8 = 0x57;
pub const OP_8: u8 = 0x58;
pub const OP_9: u8 = 0x59;
pub const OP_10: u8 = 0x5a;
pub const OP_11: u8 = 0x5b;
pub const OP_12: u8 = 0x5c;
pub const OP_13: u8 = 0x5d;
pub const OP_14: u8 = 0x5e;
pub const OP_15: u8 = 0x5f;
pub const OP_16: u8 = 0x60;

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

pub const OP_NOP: u8 = 0x61;
pub const OP_VER: u8 = 0x62;
pub const OP_IF: u8 = 0x63;
pub const OP_NOTIF: u8 = 0x64;
pub const OP_VERIF: u8 = 0x65;
pub const OP_VERNOTIF: u8 = 0x66;
pub const OP_ELSE: u8 = 0x67;
pub const OP_ENDIF: u8 = 0x68;
pub const OP_VERIFY: u8 = 0x69;
pub const OP_RETURN: u8 = 0x6a;

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_2DROP: u8 = 0x6d;
pub const OP_2DUP: u8 = 0x6e;
pub const OP_3DUP: u8 = 0x6f;
pub const OP_2OVER: u8 = 0x70;
pub const OP_2ROT: u8 = 0x71;
pub const OP_2SWAP: u8 = 0x72;
pub const OP_IFDUP: u8 = 0x73;
pub const OP_DEPTH: u8 = 0x74;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_NIP: u8 = 0x77;
pub const OP_OVER: u8 = 0x78;
pub const OP_PICK: u8 = 0x79;
pub const OP_ROLL: u8 = 0x7a;
pub const OP_ROT: u8 = 0x7b;
pub const OP_SWAP: u8 = 0x7c;
pub const OP_TUCK: u8 = 0x7d;

// ---------------------------------------------------------------------------
// Splice
// ---------------------------------------------------------------------------

pub const OP_CAT: u8 = 0x7e;
pub const OP_SUBSTR: u8 = 0x7f;
pub const OP_LEFT: u8 = 0x80;
pub const OP_RIGHT: u8 = 0x81;
pub const OP_SIZE: u8 = 0x82;

// ---------------------------------------------------------------------------
// Bitwise logic
// ---------------------------------------------------------------------------

pub const OP_INVERT: u8 = 0x83;
pub const OP_AND: u8 = 0x84;
pub const OP_OR: u8 = 0x85;
pub const OP_XOR: u8 = 0x86;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_RESERVED1: u8 = 0x89;
pub const OP_RESERVED2: u8 = 0x8a;

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

pub const OP_1ADD: u8 = 0x8b;
pub const OP_1SUB: u8 = 0x8c;
pub const OP_2MUL: u8 = 0x8d;
pub const OP_2DIV: u8 = 0x8e;
pub const OP_NEGATE: u8 = 0x8f;
pub const OP_ABS: u8 = 0x90;
pub const OP_NOT: u8 = 0x91;
pub const OP_0NOTEQUAL: u8 = 0x92;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
pub const OP_MUL: u8 = 0x95;
pub const OP_DIV: u8 = 0x96;
pub const OP_MOD: u8 = 0x97;
pub const OP_LSHIFT: u8 = 0x98;
pub const OP_RSHIFT: u8 = 0x99;
pub const OP_BOOLAND: u8 = 0x9a;
pub const OP_BOOLOR: u8 = 0x9b;
pub const OP_NUMEQUAL: u8 = 0x9c;
pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
pub const OP_LESSTHAN: u8 = 0x9f;
pub const OP_GREATERTHAN: u8 = 0xa0;
pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
pub const OP_MIN: u8 = 0xa3;
pub const OP_MAX: u8 = 0xa4;
pub const OP_WITHIN: u8 = 0xa5;

// ---------------------------------------------------------------------------
// Crypto
// ---------------------------------------------------------------------------

pub const OP_RIPEMD160: u8 = 0xa6;
pub const OP_SHA1: u8 = 0xa7;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CODESEPARATOR: u8 = 0xab;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

pub const OP_NOP1: u8 = 0xb0;
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;
pub const OP_NOP4: u8 = 0xb3;
pub const OP_NOP5: u8 = 0xb4;
pub const OP_NOP6: u8 = 0xb5;
pub const OP_NOP7: u8 = 0xb6;
pub const OP_NOP8: u8 = 0xb7;
pub const OP_NOP9: u8 = 0xb8;
pub const OP_NOP10: u8 = 0xb9;
pub const OP_CHECKSIGADD: u8 = 0xba;
pub const OP_INVALIDOPCODE: u8 = 0xff;

/// Return the canonical name of an opcode.
///
/// Direct pushes (0x01..=0x4b) are reported as `OP_DATA_<n>`; undefined
/// opcodes as `OP_UNKNOWN<n>`.
pub fn opcode_to_string(op: u8) -> String {
    match op {
        OP_DATA_1..=OP_DATA_75 => format!("OP_DATA_{}", op),
        OP_0 => "OP_0".to_string(),
        OP_PUSHDATA1 => "OP_PUSHDATA1".to_string(),
        OP_PUSHDATA2 => "OP_PUSHDATA2".to_string(),
        OP_PUSHDATA4 => "OP_PUSHDATA4".to_string(),
        OP_1NEGATE => "OP_1NEGATE".to_string(),
        OP_RESERVED => "OP_RESERVED".to_string(),
        OP_1 => "OP_1".to_string(),
        OP_2 => "OP_2".to_string(),
        OP_3 => "OP_3".to_string(),
        OP_4 => "OP_4".to_string(),
        OP_5 => "OP_5".to_string(),
        OP_6 => "OP_6".to_string(),
        OP_7 => "OP_7".to_string(),
        OP_8 => "OP_8".to_string(),
        OP_9 => "OP_9".to_string(),
        OP_10 => "OP_10".to_string(),
        OP_11 => "OP_11".to_string(),
        OP_12 => "OP_12".to_string(),
        OP_13 => "OP_13".to_string(),
        OP_14 => "OP_14".to_string(),
        OP_15 => "OP_15".to_string(),
        OP_16 => "OP_16".to_string(),
        OP_NOP => "OP_NOP".to_string(),
        OP_VER => "OP_VER".to_string(),
        OP_IF => "OP_IF".to_string(),
        OP_NOTIF => "OP_NOTIF".to_string(),
        OP_VERIF => "OP_VERIF".to_string(),
        OP_VERNOTIF => "OP_VERNOTIF".to_string(),
        OP_ELSE => "OP_ELSE".to_string(),
        OP_ENDIF => "OP_ENDIF".to_string(),
        OP_VERIFY => "OP_VERIFY".to_string(),
        OP_RETURN => "OP_RETURN".to_string(),
        OP_TOALTSTACK => "OP_TOALTSTACK".to_string(),
        OP_FROMALTSTACK => "OP_FROMALTSTACK".to_string(),
        OP_2DROP => "OP_2DROP".to_string(),
        OP_2DUP => "OP_2DUP".to_string(),
        OP_3DUP => "OP_3DUP".to_string(),
        OP_2OVER => "OP_2OVER".to_string(),
        OP_2ROT => "OP_2ROT".to_string(),
        OP_2SWAP => "OP_2SWAP".to_string(),
        OP_IFDUP => "OP_IFDUP".to_string(),
        OP_DEPTH => "OP_DEPTH".to_string(),
        OP_DROP => "OP_DROP".to_string(),
        OP_DUP => "OP_DUP".to_string(),
        OP_NIP => "OP_NIP".to_string(),
        OP_OVER => "OP_OVER".to_string(),
        OP_PICK => "OP_PICK".to_string(),
        OP_ROLL => "OP_ROLL".to_string(),
        OP_ROT => "OP_ROT".to_string(),
        OP_SWAP => "OP_SWAP".to_string(),
        OP_TUCK => "OP_TUCK".to_string(),
        OP_CAT => "OP_CAT".to_string(),
        OP_SUBSTR => "OP_SUBSTR".to_string(),
        OP_LEFT => "OP_LEFT".to_string(),
        OP_RIGHT => "OP_RIGHT".to_string(),
        OP_SIZE => "OP_SIZE".to_string(),
        OP_INVERT => "OP_INVERT".to_string(),
        OP_AND => "OP_AND".to_string(),
        OP_OR => "OP_OR".to_string(),
        OP_XOR => "OP_XOR".to_string(),
        OP_EQUAL => "OP_EQUAL".to_string(),
        OP_EQUALVERIFY => "OP_EQUALVERIFY".to_string(),
        OP_RESERVED1 => "OP_RESERVED1".to_string(),
        OP_RESERVED2 => "OP_RESERVED2".to_string(),
        OP_1ADD => "OP_1ADD".to_string(),
        OP_1SUB => "OP_1SUB".to_string(),
        OP_2MUL => "OP_2MUL".to_string(),
        OP_2DIV => "OP_2DIV".to_string(),
        OP_NEGATE => "OP_NEGATE".to_string(),
        OP_ABS => "OP_ABS".to_string(),
        OP_NOT => "OP_NOT".to_string(),
        OP_0NOTEQUAL => "OP_0NOTEQUAL".to_string(),
        OP_ADD => "OP_ADD".to_string(),
        OP_SUB => "OP_SUB".to_string(),
        OP_MUL => "OP_MUL".to_string(),
        OP_DIV => "OP_DIV".to_string(),
        OP_MOD => "OP_MOD".to_string(),
        OP_LSHIFT => "OP_LSHIFT".to_string(),
        OP_RSHIFT => "OP_RSHIFT".to_string(),
        OP_BOOLAND => "OP_BOOLAND".to_string(),
        OP_BOOLOR => "OP_BOOLOR".to_string(),
        OP_NUMEQUAL => "OP_NUMEQUAL".to_string(),
        OP_NUMEQUALVERIFY => "OP_NUMEQUALVERIFY".to_string(),
        OP_NUMNOTEQUAL => "OP_NUMNOTEQUAL".to_string(),
        OP_LESSTHAN => "OP_LESSTHAN".to_string(),
        OP_GREATERTHAN => "OP_GREATERTHAN".to_string(),
        OP_LESSTHANOREQUAL => "OP_LESSTHANOREQUAL".to_string(),
        OP_GREATERTHANOREQUAL => "OP_GREATERTHANOREQUAL".to_string(),
        OP_MIN => "OP_MIN".to_string(),
        OP_MAX => "OP_MAX".to_string(),
        OP_WITHIN => "OP_WITHIN".to_string(),
        OP_RIPEMD160 => "OP_RIPEMD160".to_string(),
        OP_SHA1 => "OP_SHA1".to_string(),
        OP_SHA256 => "OP_SHA256".to_string(),
        OP_HASH160 => "OP_HASH160".to_string(),
        OP_HASH256 => "OP_HASH256".to_string(),
        OP_CODESEPARATOR => "OP_CODESEPARATOR".to_string(),
        OP_CHECKSIG => "OP_CHECKSIG".to_string(),
        OP_CHECKSIGVERIFY => "OP_CHECKSIGVERIFY".to_string(),
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG".to_string(),
        OP_CHECKMULTISIGVERIFY => "OP_CHECKMULTISIGVERIFY".to_string(),
        OP_NOP1 => "OP_NOP1".to_string(),
        OP_CHECKLOCKTIMEVERIFY => "OP_CHECKLOCKTIMEVERIFY".to_string(),
        OP_CHECKSEQUENCEVERIFY => "OP_CHECKSEQUENCEVERIFY".to_string(),
        OP_NOP4 => "OP_NOP4".to_string(),
        OP_NOP5 => "OP_NOP5".to_string(),
        OP_NOP6 => "OP_NOP6".to_string(),
        OP_NOP7 => "OP_NOP7".to_string(),
        OP_NOP8 => "OP_NOP8".to_string(),
        OP_NOP9 => "OP_NOP9".to_string(),
        OP_NOP10 => "OP_NOP10".to_string(),
        OP_CHECKSIGADD => "OP_CHECKSIGADD".to_string(),
        OP_INVALIDOPCODE => "OP_INVALIDOPCODE".to_string(),
        _ => format!("OP_UNKNOWN{}", op),
    }
}

/// Look up an opcode by name.
///
/// Accepts the canonical names plus the `OP_FALSE`/`OP_TRUE` aliases.
/// Direct push names are not accepted; data is written as hex in ASM.
pub fn string_to_opcode(name: &str) -> Option<u8> {
    match name {
        "OP_FALSE" => Some(OP_FALSE),
        "OP_TRUE" => Some(OP_TRUE),
        "OP_0" => Some(OP_0),
        "OP_PUSHDATA1" => Some(OP_PUSHDATA1),
        "OP_PUSHDATA2" => Some(OP_PUSHDATA2),
        "OP_PUSHDATA4" => Some(OP_PUSHDATA4),
        "OP_1NEGATE" => Some(OP_1NEGATE),
        "OP_RESERVED" => Some(OP_RESERVED),
        "OP_1" => Some(OP_1),
        "OP_2" => Some(OP_2),
        "OP_3" => Some(OP_3),
        "OP_4" => Some(OP_4),
        "OP_5" => Some(OP_5),
        "OP_6" => Some(OP_6),
        "OP_7" => Some(OP_7),
        "OP_8" => Some(OP_8),
        "OP_9" => Some(OP_9),
        "OP_10" => Some(OP_10),
        "OP_11" => Some(OP_11),
        "OP_12" => Some(OP_12),
        "OP_13" => Some(OP_13),
        "OP_14" => Some(OP_14),
        "OP_15" => Some(OP_15),
        "OP_16" => Some(OP_16),
        "OP_NOP" => Some(OP_NOP),
        "OP_VER" => Some(OP_VER),
        "OP_IF" => Some(OP_IF),
        "OP_NOTIF" => Some(OP_NOTIF),
        "OP_VERIF" => Some(OP_VERIF),
        "OP_VERNOTIF" => Some(OP_VERNOTIF),
        "OP_ELSE" => Some(OP_ELSE),
        "OP_ENDIF" => Some(OP_ENDIF),
        "OP_VERIFY" => Some(OP_VERIFY),
        "OP_RETURN" => Some(OP_RETURN),
        "OP_TOALTSTACK" => Some(OP_TOALTSTACK),
        "OP_FROMALTSTACK" => Some(OP_FROMALTSTACK),
        "OP_2DROP" => Some(OP_2DROP),
        "OP_2DUP" => Some(OP_2DUP),
        "OP_3DUP" => Some(OP_3DUP),
        "OP_2OVER" => Some(OP_2OVER),
        "OP_2ROT" => Some(OP_2ROT),
        "OP_2SWAP" => Some(OP_2SWAP),
        "OP_IFDUP" => Some(OP_IFDUP),
        "OP_DEPTH" => Some(OP_DEPTH),
        "OP_DROP" => Some(OP_DROP),
        "OP_DUP" => Some(OP_DUP),
        "OP_NIP" => Some(OP_NIP),
        "OP_OVER" => Some(OP_OVER),
        "OP_PICK" => Some(OP_PICK),
        "OP_ROLL" => Some(OP_ROLL),
        "OP_ROT" => Some(OP_ROT),
        "OP_SWAP" => Some(OP_SWAP),
        "OP_TUCK" => Some(OP_TUCK),
        "OP_CAT" => Some(OP_CAT),
        "OP_SUBSTR" => Some(OP_SUBSTR),
        "OP_LEFT" => Some(OP_LEFT),
        "OP_RIGHT" => Some(OP_RIGHT),
        "OP_SIZE" => Some(OP_SIZE),
        "OP_INVERT" => Some(OP_INVERT),
        "OP_AND" => Some(OP_AND),
        "OP_OR" => Some(OP_OR),
        "OP_XOR" => Some(OP_XOR),
        "OP_EQUAL" => Some(OP_EQUAL),
        "OP_EQUALVERIFY" => Some(OP_EQUALVERIFY),
        "OP_RESERVED1" => Some(OP_RESERVED1),
        "OP_RESERVED2" => Some(OP_RESERVED2),
        "OP_1ADD" => Some(OP_1ADD),
        "OP_1SUB" => Some(OP_1SUB),
        "OP_2MUL" => Some(OP_2MUL),
        "OP_2DIV" => Some(OP_2DIV),
        "OP_NEGATE" => Some(OP_NEGATE),
        "OP_ABS" => Some(OP_ABS),
        "OP_NOT" => Some(OP_NOT),
        "OP_0NOTEQUAL" => Some(OP_0NOTEQUAL),
        "OP_ADD" => Some(OP_ADD),
        "OP_SUB" => Some(OP_SUB),
        "OP_MUL" => Some(OP_MUL),
        "OP_DIV" => Some(OP_DIV),
        "OP_MOD" => Some(OP_MOD),
        "OP_LSHIFT" => Some(OP_LSHIFT),
        "OP_RSHIFT" => Some(OP_RSHIFT),
        "OP_BOOLAND" => Some(OP_BOOLAND),
        "OP_BOOLOR" => Some(OP_BOOLOR),
        "OP_NUMEQUAL" => Some(OP_NUMEQUAL),
        "OP_NUMEQUALVERIFY" => Some(OP_NUMEQUALVERIFY),
        "OP_NUMNOTEQUAL" => Some(OP_NUMNOTEQUAL),
        "OP_LESSTHAN" => Some(OP_LESSTHAN),
        "OP_GREATERTHAN" => Some(OP_GREATERTHAN),
        "OP_LESSTHANOREQUAL" => Some(OP_LESSTHANOREQUAL),
        "OP_GREATERTHANOREQUAL" => Some(OP_GREATERTHANOREQUAL),
        "OP_MIN" => Some(OP_MIN),
        "OP_MAX" => Some(OP_MAX),
        "OP_WITHIN" => Some(OP_WITHIN),
        "OP_RIPEMD160" => Some(OP_RIPEMD160),
        "OP_SHA1" => Some(OP_SHA1),
        "OP_SHA256" => Some(OP_SHA256),
        "OP_HASH160" => Some(OP_HASH160),
        "OP_HASH256" => Some(OP_HASH256),
        "OP_CODESEPARATOR" => Some(OP_CODESEPARATOR),
        "OP_CHECKSIG" => Some(OP_CHECKSIG),
        "OP_CHECKSIGVERIFY" => Some(OP_CHECKSIGVERIFY),
        "OP_CHECKMULTISIG" => Some(OP_CHECKMULTISIG),
        "OP_CHECKMULTISIGVERIFY" => Some(OP_CHECKMULTISIGVERIFY),
        "OP_NOP1" => Some(OP_NOP1),
        "OP_CHECKLOCKTIMEVERIFY" => Some(OP_CHECKLOCKTIMEVERIFY),
        "OP_CHECKSEQUENCEVERIFY" => Some(OP_CHECKSEQUENCEVERIFY),
        "OP_NOP4" => Some(OP_NOP4),
        "OP_NOP5" => Some(OP_NOP5),
        "OP_NOP6" => Some(OP_NOP6),
        "OP_NOP7" => Some(OP_NOP7),
        "OP_NOP8" => Some(OP_NOP8),
        "OP_NOP9" => Some(OP_NOP9),
        "OP_NOP10" => Some(OP_NOP10),
        "OP_CHECKSIGADD" => Some(OP_CHECKSIGADD),
        "OP_INVALIDOPCODE" => Some(OP_INVALIDOPCODE),
        _ => None,
    }
}

/// Decode OP_1..OP_16 to its small integer value.
pub fn small_int_value(op: u8) -> Option<u8> {
    match op {
        OP_1..=OP_16 => Some(op - (OP_1 - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_names_roundtrip() {
        for op in 0u8..=255 {
            if let Some(back) = string_to_opcode(&opcode_to_string(op)) {
                assert_eq!(back, op, "{}", opcode_to_string(op));
            }
        }
        assert_eq!(opcode_to_string(OP_CHECKSIG), "OP_CHECKSIG");
        assert_eq!(opcode_to_string(0x14), "OP_DATA_20");
        assert_eq!(opcode_to_string(0xc0), "OP_UNKNOWN192");
        assert_eq!(string_to_opcode("OP_TRUE"), Some(OP_1));
    }

    #[test]
    fn test_small_int_value() {
        assert_eq!(small_int_value(OP_1), Some(1));
        assert_eq!(small_int_value(OP_16), Some(16));
        assert_eq!(small_int_value(OP_0), None);
        assert_eq!(small_int_value(OP_1NEGATE), None);
    }
}
