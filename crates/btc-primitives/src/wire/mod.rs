//! Entity-level wire codec.
//!
//! Decoding is split in two stages. A structural pass records where each
//! field lives as a [`Span`] into the original buffer, without copying;
//! each typed value then decodes itself from its own sub-slice through
//! [`WireCodec`]. The same bytes can therefore be viewed as a whole
//! transaction, a single input or output, or a bare script.

use std::ops::Range;

use crate::util::{WireReader, WireWriter};
use crate::CodecError;

/// A half-open byte range into a buffer owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the covered bytes from `buf`.
    ///
    /// # Returns
    /// The sub-slice, or `DataCorrupted` if the span does not fit `buf`.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8], CodecError> {
        buf.get(self.range()).ok_or_else(|| {
            CodecError::DataCorrupted(format!(
                "span {}..{} outside buffer of {} bytes",
                self.start,
                self.end,
                buf.len()
            ))
        })
    }

    /// The span as a `Range<usize>`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Encode/decode a value in Bitcoin wire format.
///
/// Implementors provide `read_from` and `write_to`; the provided methods
/// handle whole-buffer decoding (rejecting trailing bytes) and encoding.
pub trait WireCodec: Sized {
    /// Decode one value from the reader, advancing it past the value.
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError>;

    /// Append the encoding of this value to the writer.
    fn write_to(&self, writer: &mut WireWriter);

    /// Decode a value that must occupy all of `bytes`.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = WireReader::new(bytes);
        let value = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(CodecError::DataCorrupted(format!(
                "{} trailing bytes after value",
                reader.remaining()
            )));
        }
        Ok(value)
    }

    /// Decode a value from the bytes covered by `span` within `buf`.
    fn decode_span(buf: &[u8], span: Span) -> Result<Self, CodecError> {
        Self::decode(span.slice(buf)?)
    }

    /// Encode this value into a fresh buffer.
    fn encode(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

impl WireCodec for u32 {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        reader.read_u32_le()
    }

    fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u32_le(*self);
    }
}

impl WireCodec for u64 {
    fn read_from(reader: &mut WireReader<'_>) -> Result<Self, CodecError> {
        reader.read_u64_le()
    }

    fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u64_le(*self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slice() {
        let buf = [1u8, 2, 3, 4, 5];
        let span = Span::new(1, 4);
        assert_eq!(span.len(), 3);
        assert_eq!(span.slice(&buf).expect("in range"), &[2, 3, 4]);
        assert!(Span::new(3, 9).slice(&buf).is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        assert_eq!(u32::decode(&[1, 0, 0, 0]).expect("exact"), 1);
        assert!(matches!(
            u32::decode(&[1, 0, 0, 0, 0]),
            Err(CodecError::DataCorrupted(_))
        ));
    }

    #[test]
    fn test_decode_span() {
        let buf = [0xff, 0x40, 0x62, 0xb0, 0x07, 0, 0, 0, 0];
        let value = u64::decode_span(&buf, Span::new(1, 9)).expect("value");
        assert_eq!(value, 129_000_000);
    }
}
