use std::io::Read;

use crate::config::CodecConfig;
use crate::error::Result;
use crate::head::HeadBytes;
use crate::stream::ByteReader;

/// Reads tagged fields from a buffered source.
///
/// Every typed read takes a `tag` and a `required` flag and goes through
/// [`locate_tag`](Self::locate_tag), which skips lower-numbered fields it was
/// not asked for. An absent optional field leaves the destination untouched.
pub struct Decoder<R> {
    pub(crate) input: ByteReader<R>,
    pub(crate) last_head: Option<HeadBytes>,
    pub(crate) max_depth: usize,
    pub(crate) strict_tag_order: bool,
}

impl<R: Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_config(source, &CodecConfig::default())
    }

    pub fn with_config(source: R, config: &CodecConfig) -> Self {
        Self {
            input: ByteReader::with_capacity(config.read_buffer_capacity, source),
            last_head: None,
            max_depth: config.max_depth,
            strict_tag_order: config.strict_tag_order,
        }
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        self.input.is_exhausted()
    }

    /// The buffered source, for reading whatever follows a message.
    ///
    /// Pushed-back bytes are served first. A head read before this call can no
    /// longer be pushed back with [`unread_head`](Self::unread_head).
    pub fn reader_mut(&mut self) -> &mut ByteReader<R> {
        self.last_head = None;
        &mut self.input
    }

    /// Give up the decoder but keep buffered and pushed-back bytes readable.
    pub fn into_reader(self) -> ByteReader<R> {
        self.input
    }

    /// Return the source. Bytes already buffered are dropped; use
    /// [`into_reader`](Self::into_reader) to keep them.
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }
}
