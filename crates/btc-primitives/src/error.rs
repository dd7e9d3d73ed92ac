/// Errors raised by key handling, signature parsing and hashing helpers.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

/// Errors raised while decoding wire-format bytes.
///
/// Every decoder in the workspace reports malformed input through this
/// type; nothing on the decode path panics on attacker-controlled bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The bytes are structurally invalid (bad prefix, trailing data, ...).
    #[error("data corrupted: {0}")]
    DataCorrupted(String),

    /// A field decoded to a value of the wrong shape.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    /// A required keyed field is absent.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The buffer ended before the field was complete.
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
}

impl CodecError {
    /// Prefix a `DataCorrupted` or `UnexpectedEof` error with the name of
    /// the field being decoded.
    pub fn context(self, field: &str) -> Self {
        match self {
            CodecError::DataCorrupted(msg) => {
                CodecError::DataCorrupted(format!("{}: {}", field, msg))
            }
            CodecError::UnexpectedEof { needed, remaining } => CodecError::DataCorrupted(
                format!("{}: needed {} bytes, {} remaining", field, needed, remaining),
            ),
            other => other,
        }
    }
}
