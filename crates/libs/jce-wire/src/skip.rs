//! Discarding field payloads by wire type.
//!
//! Containers are walked element by element since their byte size is never
//! stored. Recursion depth is bounded by the decoder's `max_depth`.

use std::io::Read;

use crate::decoder::Decoder;
use crate::error::{JceError, Result};
use crate::wire_type::WireType;

impl<R: Read> Decoder<R> {
    /// Consume the payload that follows a head of type `wire_type`.
    pub fn skip_field(&mut self, wire_type: WireType) -> Result<()> {
        self.skip_nested(wire_type, 0)
    }

    /// Discard fields up to and including the `StructEnd` head of the
    /// current struct.
    pub fn skip_to_struct_end(&mut self) -> Result<()> {
        self.skip_struct_body(0)
    }

    fn skip_nested(&mut self, wire_type: WireType, depth: usize) -> Result<()> {
        log::trace!("jce: skip {} at depth {}", wire_type, depth);
        match wire_type {
            WireType::Zero | WireType::StructEnd => Ok(()),
            WireType::Int1 => self.input.discard(1),
            WireType::Int2 => self.input.discard(2),
            WireType::Int4 | WireType::Float4 => self.input.discard(4),
            WireType::Int8 | WireType::Float8 => self.input.discard(8),
            WireType::String => {
                let length = self.read_length()?;
                self.input.discard(length as usize)
            }
            WireType::SimpleList => {
                let count = self.input.read_u32()?;
                self.input.discard(1)?;
                self.input.discard(count as usize)
            }
            WireType::List => {
                let depth = self.descend(depth)?;
                let count = self.read_length()?;
                self.skip_elements(u64::from(count), depth)
            }
            WireType::Map => {
                let depth = self.descend(depth)?;
                let pairs = self.read_length()?;
                self.skip_elements(u64::from(pairs) * 2, depth)
            }
            WireType::StructBegin => {
                let depth = self.descend(depth)?;
                self.skip_struct_body(depth)
            }
        }
    }

    fn skip_elements(&mut self, count: u64, depth: usize) -> Result<()> {
        for _ in 0..count {
            let head = self.read_head()?;
            self.skip_nested(head.wire_type, depth)?;
        }
        Ok(())
    }

    fn skip_struct_body(&mut self, depth: usize) -> Result<()> {
        loop {
            let head = self.read_head()?;
            if head.wire_type == WireType::StructEnd {
                return Ok(());
            }
            self.skip_nested(head.wire_type, depth)?;
        }
    }

    fn descend(&self, depth: usize) -> Result<usize> {
        let next = depth + 1;
        if next > self.max_depth {
            let limit = self.max_depth;
            return Err(JceError::NestingTooDeep { limit });
        }
        Ok(next)
    }
}
