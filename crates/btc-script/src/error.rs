/// Errors raised while parsing or building scripts.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("invalid script hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// An ASM token that is neither an opcode name nor hex data.
    #[error("unrecognised ASM token '{0}'")]
    InvalidAsmToken(String),

    /// `append_opcodes` was handed a push opcode.
    #[error("{0} carries data; use append_push_data")]
    PushOpcode(String),

    /// A push runs past the end of the script.
    #[error("truncated push at offset {offset}")]
    TruncatedPush { offset: usize },

    #[error("push of {0} bytes does not fit OP_PUSHDATA4")]
    PushTooLarge(usize),
}
