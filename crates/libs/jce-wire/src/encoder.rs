use std::io::Write;

use crate::config::CodecConfig;
use crate::error::Result;
use crate::stream::ByteWriter;

/// Writes tagged fields to a buffered sink.
///
/// Fields of one struct must be written in ascending tag order. Output is
/// buffered: call [`flush`](Self::flush) or [`into_inner`](Self::into_inner)
/// after the last field.
pub struct Encoder<W: Write> {
    pub(crate) out: ByteWriter<W>,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            out: ByteWriter::new(sink),
        }
    }

    pub fn with_config(sink: W, config: &CodecConfig) -> Self {
        let capacity = config.write_buffer_capacity;
        Self {
            out: ByteWriter::with_capacity(capacity, sink),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }

    /// Bytes produced so far, including those still buffered.
    pub fn bytes_written(&self) -> u64 {
        self.out.bytes_written()
    }

    /// The buffered sink, for framing bytes around a message. What is written
    /// here counts towards [`bytes_written`](Self::bytes_written).
    pub fn writer_mut(&mut self) -> &mut ByteWriter<W> {
        &mut self.out
    }

    /// Give up the encoder without flushing.
    pub fn into_writer(self) -> ByteWriter<W> {
        self.out
    }

    /// Flush and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_writer_shares_the_buffer() {
        let mut enc = Encoder::new(Vec::new());
        enc.writer_mut().write_u32(2).expect("frame length");
        enc.write_u8(9, 0).expect("field");
        assert_eq!(enc.bytes_written(), 6);

        let mut out = enc.into_writer();
        out.write_u8(0xff).expect("trailer");
        let bytes = out.into_inner().expect("flush");
        assert_eq!(bytes, vec![0, 0, 0, 2, 0x00, 0x09, 0xff]);
    }
}
