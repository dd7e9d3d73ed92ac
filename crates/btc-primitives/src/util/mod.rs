//! Utility types for binary serialization.
//!
//! Provides VarInt encoding/decoding and the `WireReader` / `WireWriter`
//! cursor types used to read and write Bitcoin protocol data. Fixed-width
//! integers are little-endian throughout.

use crate::CodecError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A Bitcoin protocol variable-length integer (CompactSize).
///
/// Used as the element count of inputs, outputs and witness stacks, and as
/// the byte length of scripts and other variable-length fields. The encoding
/// uses 1, 3, 5, or 9 bytes depending on the magnitude of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the front of a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or an error if the slice is
    /// truncated or the encoding is not minimal.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut reader = WireReader::new(data);
        let value = reader.read_varint()?;
        Ok((value, reader.position()))
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut buf = Vec::with_capacity(self.length());
        if v < 0xfd {
            buf.push(v as u8);
        } else if v <= 0xffff {
            buf.push(0xfd);
            buf.extend_from_slice(&(v as u16).to_le_bytes());
        } else if v <= 0xffff_ffff {
            buf.push(0xfe);
            buf.extend_from_slice(&(v as u32).to_le_bytes());
        } else {
            buf.push(0xff);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// LengthPrefix
// ---------------------------------------------------------------------------

/// How a `WireWriter` frames variable-length byte fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPrefix {
    /// Prefix each variable-length field with its VarInt byte length.
    #[default]
    VarInt,
    /// Write variable-length fields raw. Used for BIP-143 preimages and
    /// for isolated script-code encodings.
    Disabled,
}

// ---------------------------------------------------------------------------
// WireReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for Bitcoin protocol binary data.
///
/// Wraps a byte slice and maintains a read position. Every read is bounds
/// checked and reports `CodecError::UnexpectedEof` instead of panicking.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// Non-minimal encodings (e.g. `fd 0a 00` for 10) are rejected as
    /// corrupted data.
    ///
    /// # Returns
    /// The decoded `VarInt`, or an error if truncated or non-canonical.
    pub fn read_varint(&mut self) -> Result<VarInt, CodecError> {
        let first = self.read_u8()?;
        let (value, min) = match first {
            0xff => (self.read_u64_le()?, 0x1_0000_0000),
            0xfe => (self.read_u32_le()? as u64, 0x1_0000),
            0xfd => (self.read_u16_le()? as u64, 0xfd),
            b => return Ok(VarInt(b as u64)),
        };
        if value < min {
            return Err(CodecError::DataCorrupted(format!(
                "non-canonical varint 0x{:02x} for value {}",
                first, value
            )));
        }
        Ok(VarInt(value))
    }

    /// Read a VarInt length followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_varint()?.value();
        let len = usize::try_from(len).map_err(|_| CodecError::UnexpectedEof {
            needed: usize::MAX,
            remaining: self.remaining(),
        })?;
        self.read_bytes(len)
    }

    /// Read a VarInt element count and sanity-check it against the bytes
    /// left, assuming each element occupies at least `min_element_size`
    /// bytes. Guards allocations sized from attacker-controlled counts.
    pub fn read_count(&mut self, min_element_size: usize) -> Result<usize, CodecError> {
        let count = self.read_varint()?.value();
        let max = (self.remaining() / min_element_size.max(1)) as u64;
        if count > max {
            return Err(CodecError::DataCorrupted(format!(
                "element count {} exceeds remaining {} bytes",
                count,
                self.remaining()
            )));
        }
        Ok(count as usize)
    }

    /// Return the current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Borrow the unread tail without advancing.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Check whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for Bitcoin protocol binary data.
///
/// Wraps a `Vec<u8>` and appends fixed-size little-endian integers, VarInts
/// and variable-length fields framed according to its `LengthPrefix` mode.
pub struct WireWriter {
    buf: Vec<u8>,
    length_prefix: LengthPrefix,
}

impl WireWriter {
    /// Create a new empty writer that VarInt-prefixes variable-length fields.
    pub fn new() -> Self {
        WireWriter {
            buf: Vec::new(),
            length_prefix: LengthPrefix::VarInt,
        }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        WireWriter {
            buf: Vec::with_capacity(capacity),
            length_prefix: LengthPrefix::VarInt,
        }
    }

    /// Switch how subsequent variable-length fields are framed.
    ///
    /// # Arguments
    /// * `mode` - `LengthPrefix::Disabled` writes fields raw.
    ///
    /// # Returns
    /// The writer, for chaining from a constructor.
    pub fn with_length_prefix(mut self, mode: LengthPrefix) -> Self {
        self.length_prefix = mode;
        self
    }

    /// Return the framing mode for variable-length fields.
    pub fn length_prefix(&self) -> LengthPrefix {
        self.length_prefix
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a variable-length field, VarInt-prefixed unless prefixing is
    /// disabled on this writer.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        if self.length_prefix == LengthPrefix::VarInt {
            self.write_varint(VarInt::from(bytes.len()));
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer. Element counts are always written,
    /// regardless of the `LengthPrefix` mode.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        Self::new()
    }
}
