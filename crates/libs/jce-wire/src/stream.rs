//! Big-endian byte primitives over buffered streams.
//!
//! [`ByteReader`] adds a tiny pushback stack in front of a `BufReader` so the
//! decoder can hand back the head it over-read without the source being
//! seekable.

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use crate::error::{JceError, Result};

/// Longest head the decoder ever pushes back.
pub const MAX_PUSHBACK: usize = 2;

/// Buffered reader with pushback.
///
/// It also implements [`Read`], serving pushed-back bytes first, so whatever
/// follows a decoded message can still be read from it.
pub struct ByteReader<R> {
    inner: BufReader<R>,
    // Stored in reverse; the next byte to hand out is at the end.
    pushback: Vec<u8>,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(crate::config::DEFAULT_BUFFER_CAPACITY, inner)
    }

    /// `capacity` is raised to 1; an empty buffer would make every peek look
    /// like end of input.
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity.max(1), inner),
            pushback: Vec::new(),
        }
    }

    /// Look at the next byte without consuming it. `None` at end of input.
    pub fn peek_u8(&mut self) -> Result<Option<u8>> {
        if let Some(&b) = self.pushback.last() {
            return Ok(Some(b));
        }
        let buf = fill_buf(&mut self.inner)?;
        Ok(buf.first().copied())
    }

    /// Returns `true` when no byte is left, pushback included.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        Ok(self.peek_u8()?.is_none())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_exact_into(&mut out)?;
        Ok(out)
    }

    /// Fill `out` completely or fail with [`JceError::TruncatedStream`].
    pub fn read_exact_into(&mut self, out: &mut [u8]) -> Result<()> {
        let mut filled = self.drain_pushback(out);
        while filled < out.len() {
            let n = match self.inner.read(&mut out[filled..]) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if n == 0 {
                let needed = out.len() - filled;
                return Err(JceError::TruncatedStream { needed });
            }
            filled += n;
        }
        Ok(())
    }

    /// Read `len` bytes into a fresh vector.
    ///
    /// The vector grows with the data actually received, so a hostile length
    /// prefix cannot force a large allocation before the bytes exist.
    pub fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        while out.len() < len {
            match self.pushback.pop() {
                Some(b) => out.push(b),
                None => break,
            }
        }
        let remaining = len - out.len();
        if remaining > 0 {
            let mut limited = (&mut self.inner).take(remaining as u64);
            let got = limited.read_to_end(&mut out)?;
            if got < remaining {
                let needed = remaining - got;
                return Err(JceError::TruncatedStream { needed });
            }
        }
        Ok(out)
    }

    /// Consume and drop `len` bytes.
    pub fn discard(&mut self, len: usize) -> Result<()> {
        let mut remaining = len;
        while remaining > 0 && self.pushback.pop().is_some() {
            remaining -= 1;
        }
        while remaining > 0 {
            let available = fill_buf(&mut self.inner)?.len();
            if available == 0 {
                return Err(JceError::TruncatedStream { needed: remaining });
            }
            let step = available.min(remaining);
            self.inner.consume(step);
            remaining -= step;
        }
        Ok(())
    }

    /// Push `bytes` back so they are read again, in order, before anything else.
    pub fn unread(&mut self, bytes: &[u8]) {
        debug_assert!(self.pushback.len() + bytes.len() <= MAX_PUSHBACK);
        self.pushback.extend(bytes.iter().rev());
    }

    /// Give back the wrapped reader. Buffered and pushed-back bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn drain_pushback(&mut self, out: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < out.len() {
            match self.pushback.pop() {
                Some(b) => {
                    out[filled] = b;
                    filled += 1;
                }
                None => break,
            }
        }
        filled
    }
}

impl<R: Read> Read for ByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.drain_pushback(buf);
        if n > 0 || buf.is_empty() {
            return Ok(n);
        }
        self.inner.read(buf)
    }
}

fn fill_buf<R: Read>(inner: &mut BufReader<R>) -> Result<&[u8]> {
    loop {
        match inner.fill_buf() {
            Ok(_) => break,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    // Already filled; this returns the buffered bytes without another read.
    Ok(inner.fill_buf()?)
}

/// Buffered writer that counts what it accepts.
pub struct ByteWriter<W: Write> {
    inner: BufWriter<W>,
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_capacity(crate::config::DEFAULT_BUFFER_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: W) -> Self {
        Self {
            inner: BufWriter::with_capacity(capacity, inner),
            written: 0,
        }
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.write_all(&[v])
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    pub fn write_u64(&mut self, v: u64) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Total bytes accepted so far, flushed or not.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and give back the wrapped writer.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|err| JceError::Io(err.into_error()))
    }
}

impl<W: Write> Write for ByteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
