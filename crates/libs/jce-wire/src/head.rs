//! Field heads: the packed `(wire type, tag)` prefix of every field.
//!
//! ```text
//! tag < 15:   [type:4 | tag:4]
//! tag >= 15:  [type:4 | 0xF:4] [tag:8]
//! ```

use std::io::{Read, Write};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::wire_type::WireType;

/// Low-nibble value announcing that the tag follows in its own byte.
pub const TAG_OVERFLOW: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub wire_type: WireType,
    pub tag: u8,
}

impl Head {
    pub fn new(wire_type: WireType, tag: u8) -> Self {
        Self { wire_type, tag }
    }

    pub fn encoded_len(&self) -> usize {
        if self.tag < TAG_OVERFLOW { 1 } else { 2 }
    }

    pub fn to_bytes(self) -> HeadBytes {
        let ty = self.wire_type.as_byte() << 4;
        if self.tag < TAG_OVERFLOW {
            HeadBytes {
                buf: [ty | self.tag, 0],
                len: 1,
            }
        } else {
            HeadBytes {
                buf: [ty | TAG_OVERFLOW, self.tag],
                len: 2,
            }
        }
    }
}

/// The one or two raw bytes of an encoded head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadBytes {
    buf: [u8; 2],
    len: u8,
}

impl HeadBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl<W: Write> Encoder<W> {
    /// Emit a one- or two-byte head.
    pub fn write_head(&mut self, wire_type: WireType, tag: u8) -> Result<()> {
        let head = Head::new(wire_type, tag).to_bytes();
        self.out.write_all(head.as_slice())
    }
}

impl<R: Read> Decoder<R> {
    /// Read one raw head without any tag lookup.
    ///
    /// End of input is [`TruncatedStream`](crate::JceError::TruncatedStream);
    /// an out-of-range type nibble is [`InvalidType`](crate::JceError::InvalidType).
    pub fn read_head(&mut self) -> Result<Head> {
        let first = self.input.read_u8()?;
        let wire_type = WireType::from_byte(first >> 4)?;
        let low = first & 0x0f;
        let head = if low == TAG_OVERFLOW {
            Head::new(wire_type, self.input.read_u8()?)
        } else {
            Head::new(wire_type, low)
        };
        self.last_head = Some(head.to_bytes());
        Ok(head)
    }

    /// Like [`read_head`](Self::read_head) but `None` when the input ends
    /// cleanly on a head boundary.
    pub(crate) fn next_head(&mut self) -> Result<Option<Head>> {
        if self.input.is_exhausted()? {
            self.last_head = None;
            return Ok(None);
        }
        self.read_head().map(Some)
    }

    /// Push the most recently read head back onto the input.
    ///
    /// Only meaningful straight after a head read: the head is forgotten once
    /// pushed back, so a second call without an intervening read does nothing.
    pub fn unread_head(&mut self) {
        if let Some(bytes) = self.last_head.take() {
            log::trace!("jce: push back head {:02x?}", bytes.as_slice());
            self.input.unread(bytes.as_slice());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JceError;

    fn encode(wire_type: WireType, tag: u8) -> Vec<u8> {
        let mut enc = Encoder::new(Vec::new());
        enc.write_head(wire_type, tag).expect("write head");
        enc.into_inner().expect("flush")
    }

    #[test]
    fn short_form_below_fifteen() {
        assert_eq!(encode(WireType::Int1, 14), vec![0x0e]);
        assert_eq!(encode(WireType::String, 3), vec![0x73]);
        assert_eq!(Head::new(WireType::Int1, 14).encoded_len(), 1);
    }

    #[test]
    fn overflow_form_from_fifteen() {
        assert_eq!(encode(WireType::Int1, 15), vec![0x0f, 15]);
        assert_eq!(encode(WireType::StructEnd, 255), vec![0xcf, 0xff]);
        assert_eq!(Head::new(WireType::Int1, 15).encoded_len(), 2);
    }

    #[test]
    fn reads_both_forms() {
        let mut dec = Decoder::new(&[0x73, 0x2f, 200][..]);
        let short = dec.read_head().expect("short");
        let long = dec.read_head().expect("long");
        assert_eq!(short, Head::new(WireType::String, 3));
        assert_eq!(long, Head::new(WireType::Int4, 200));
    }

    #[test]
    fn invalid_type_nibble() {
        let mut dec = Decoder::new(&[0xd0][..]);
        let err = dec.read_head().expect_err("nibble 13");
        assert!(matches!(err, JceError::InvalidType { raw: 13 }));
    }

    #[test]
    fn missing_overflow_byte_is_truncation() {
        let mut dec = Decoder::new(&[0x0f][..]);
        let err = dec.read_head().expect_err("no tag byte");
        assert!(matches!(err, JceError::TruncatedStream { needed: 1 }));
    }

    #[test]
    fn unread_restores_long_head_once() {
        let mut dec = Decoder::new(&[0x1f, 40, 0x00, 0x01][..]);
        let head = dec.read_head().expect("head");
        dec.unread_head();
        dec.unread_head();
        assert_eq!(dec.read_head().expect("again"), head);
        assert_eq!(dec.input.read_u16().expect("payload"), 0x0001);
    }

    #[test]
    fn next_head_sees_clean_end() {
        let mut dec = Decoder::new(&[][..]);
        assert_eq!(dec.next_head().expect("eof"), None);
    }
}
