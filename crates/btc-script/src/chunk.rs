//! Splitting raw script bytes into opcodes and data pushes.

use btc_primitives::util::WireReader;
use btc_primitives::CodecError;

use crate::opcodes::*;
use crate::ScriptError;

/// One opcode of a script, with its payload when it pushes data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte; for `OP_DATA_n` this is also the payload length.
    pub op: u8,
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Hex for pushes, the opcode name otherwise.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) if self.op != OP_0 => hex::encode(data),
            _ => opcode_to_string(self.op),
        }
    }

    /// Whether this chunk pushes data onto the stack (OP_0 included).
    pub fn is_push(&self) -> bool {
        self.op <= OP_PUSHDATA4
    }

    /// The pushed bytes; OP_0 pushes an empty slice.
    pub fn push_data(&self) -> Option<&[u8]> {
        match (&self.data, self.op) {
            (Some(data), _) => Some(data.as_slice()),
            (None, OP_0) => Some(&[]),
            _ => None,
        }
    }
}

/// Split `bytes` into chunks.
///
/// Only `OP_DATA_1..=OP_DATA_75` and `OP_PUSHDATA1/2/4` carry payloads.
/// `OP_RETURN` is an ordinary opcode here, so a push after it shows up as
/// its own chunk.
///
/// # Returns
/// The chunks in order, or `TruncatedPush` naming the offset of the first
/// push whose length or payload is cut short.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut reader = WireReader::new(bytes);
    let mut chunks = Vec::new();
    while !reader.is_empty() {
        let offset = reader.position();
        let chunk = read_chunk(&mut reader).map_err(|_| ScriptError::TruncatedPush { offset })?;
        chunks.push(chunk);
    }
    Ok(chunks)
}

fn read_chunk(reader: &mut WireReader<'_>) -> Result<ScriptChunk, CodecError> {
    let op = reader.read_u8()?;
    let len = match op {
        OP_DATA_1..=OP_DATA_75 => usize::from(op),
        OP_PUSHDATA1 => usize::from(reader.read_u8()?),
        OP_PUSHDATA2 => usize::from(reader.read_u16_le()?),
        OP_PUSHDATA4 => reader.read_u32_le()? as usize,
        _ => return Ok(ScriptChunk { op, data: None }),
    };
    let data = reader.read_bytes(len)?.to_vec();
    Ok(ScriptChunk { op, data: Some(data) })
}

/// Smallest push prefix for a payload of `len` bytes.
pub fn push_data_prefix(len: usize) -> Result<Vec<u8>, ScriptError> {
    let prefix = match len {
        0..=75 => vec![len as u8],
        76..=0xff => vec![OP_PUSHDATA1, len as u8],
        0x100..=0xffff => {
            let mut prefix = vec![OP_PUSHDATA2];
            prefix.extend_from_slice(&(len as u16).to_le_bytes());
            prefix
        }
        _ => {
            let len32 = u32::try_from(len).map_err(|_| ScriptError::PushTooLarge(len))?;
            let mut prefix = vec![OP_PUSHDATA4];
            prefix.extend_from_slice(&len32.to_le_bytes());
            prefix
        }
    };
    Ok(prefix)
}
