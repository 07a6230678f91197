//! Variable-width lengths.
//!
//! Values up to 127 take one byte with the high bit clear. Anything larger is
//! four big-endian bytes with the high bit forced on as a discriminator, which
//! caps lengths at 31 bits.

use std::io::{Read, Write};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{JceError, Result};

pub const SHORT_LENGTH_MAX: u32 = 127;
pub const LONG_LENGTH_FLAG: u32 = 0x8000_0000;
pub const LENGTH_MAX: u32 = LONG_LENGTH_FLAG - 1;

/// Convert an in-memory length to the 31-bit wire range.
pub(crate) fn wire_length(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&n| n <= LENGTH_MAX)
        .ok_or(JceError::LengthOverflow { length: len })
}

impl<W: Write> Encoder<W> {
    pub fn write_length(&mut self, length: u32) -> Result<()> {
        if length <= SHORT_LENGTH_MAX {
            return self.out.write_u8(length as u8);
        }
        if length > LENGTH_MAX {
            let length = length as usize;
            return Err(JceError::LengthOverflow { length });
        }
        self.out.write_u32(length | LONG_LENGTH_FLAG)
    }
}

impl<R: Read> Decoder<R> {
    pub fn read_length(&mut self) -> Result<u32> {
        let Some(first) = self.input.peek_u8()? else {
            return Err(JceError::TruncatedStream { needed: 1 });
        };
        if first & 0x80 == 0 {
            return Ok(u32::from(self.input.read_u8()?));
        }
        Ok(self.input.read_u32()? & LENGTH_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(length: u32) -> Vec<u8> {
        let mut enc = Encoder::new(Vec::new());
        enc.write_length(length).expect("write length");
        enc.into_inner().expect("flush")
    }

    #[test]
    fn boundary_between_forms() {
        assert_eq!(encode(127), vec![0x7f]);
        assert_eq!(encode(128), vec![0x80, 0x00, 0x00, 0x80]);

        let mut dec = Decoder::new(&[0x7f, 0x80, 0x00, 0x00, 0x80][..]);
        assert_eq!(dec.read_length().expect("short"), 127);
        assert_eq!(dec.read_length().expect("long"), 128);
    }

    #[test]
    fn largest_length() {
        let bytes = encode(LENGTH_MAX);
        assert_eq!(bytes, vec![0xff, 0xff, 0xff, 0xff]);
        let mut dec = Decoder::new(&bytes[..]);
        assert_eq!(dec.read_length().expect("max"), LENGTH_MAX);
    }

    #[test]
    fn rejects_lengths_using_the_flag_bit() {
        let mut enc = Encoder::new(Vec::new());
        let err = enc.write_length(LONG_LENGTH_FLAG).expect_err("flag bit");
        assert!(matches!(err, JceError::LengthOverflow { .. }));
        assert!(wire_length(LENGTH_MAX as usize).is_ok());
        assert!(wire_length(LENGTH_MAX as usize + 1).is_err());
    }

    #[test]
    fn truncated_long_form() {
        let mut dec = Decoder::new(&[0x80, 0x01][..]);
        let err = dec.read_length().expect_err("short long form");
        assert!(matches!(err, JceError::TruncatedStream { needed: 2 }));

        let mut dec = Decoder::new(&[][..]);
        assert!(dec.read_length().expect_err("empty").is_truncated());
    }
}
