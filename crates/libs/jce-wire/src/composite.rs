//! Strings, byte lists, container headers and struct markers.
//!
//! ```text
//! String:      head || length || bytes
//! SimpleList:  head || count (u32 BE) || item type (Int1) || bytes
//! List:        head || length(count) || count × (head || payload)
//! Map:         head || length(pairs) || 2·pairs × (head || payload)
//! ```
//!
//! List elements and map keys are written at tag 0, map values at tag 1.

use std::io::{Read, Write};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{JceError, Result};
use crate::length::wire_length;
use crate::wire_type::WireType;

impl<W: Write> Encoder<W> {
    pub fn write_string(&mut self, value: &str, tag: u8) -> Result<()> {
        self.write_string_bytes(value.as_bytes(), tag)
    }

    /// Write a `String` field whose payload is not required to be UTF-8.
    pub fn write_string_bytes(&mut self, value: &[u8], tag: u8) -> Result<()> {
        let length = wire_length(value.len())?;
        self.write_head(WireType::String, tag)?;
        self.write_length(length)?;
        self.out.write_all(value)
    }

    /// Write a byte array as a `SimpleList`.
    pub fn write_bytes(&mut self, value: &[u8], tag: u8) -> Result<()> {
        let length = value.len();
        let Ok(count) = u32::try_from(length) else {
            return Err(JceError::LengthOverflow { length });
        };
        self.write_head(WireType::SimpleList, tag)?;
        self.out.write_u32(count)?;
        self.out.write_u8(WireType::Int1.as_byte())?;
        self.out.write_all(value)
    }

    pub fn write_i8_slice(&mut self, value: &[i8], tag: u8) -> Result<()> {
        let bytes: Vec<u8> = value.iter().map(|&b| b as u8).collect();
        self.write_bytes(&bytes, tag)
    }

    /// Open a `List` field; the caller then writes `count` elements at tag 0.
    pub fn write_list_header(&mut self, count: usize, tag: u8) -> Result<()> {
        let count = wire_length(count)?;
        self.write_head(WireType::List, tag)?;
        self.write_length(count)
    }

    /// Open a `Map` field; the caller then writes `pairs` key/value pairs.
    pub fn write_map_header(&mut self, pairs: usize, tag: u8) -> Result<()> {
        let pairs = wire_length(pairs)?;
        self.write_head(WireType::Map, tag)?;
        self.write_length(pairs)
    }

    /// Raw `StructBegin` marker byte, no tag.
    pub fn write_struct_begin(&mut self) -> Result<()> {
        self.out.write_u8(WireType::StructBegin.as_byte())
    }

    /// Raw `StructEnd` marker byte, no tag.
    pub fn write_struct_end(&mut self) -> Result<()> {
        self.out.write_u8(WireType::StructEnd.as_byte())
    }

    /// Open a nested struct stored at `tag` of the enclosing struct.
    pub fn write_struct_field_begin(&mut self, tag: u8) -> Result<()> {
        self.write_head(WireType::StructBegin, tag)
    }

    /// Close the nested struct opened by [`Self::write_struct_field_begin`].
    pub fn write_struct_field_end(&mut self) -> Result<()> {
        self.write_head(WireType::StructEnd, 0)
    }
}

impl<R: Read> Decoder<R> {
    pub fn read_string(
        &mut self,
        value: &mut String,
        tag: u8,
        required: bool,
    ) -> Result<bool> {
        let Some(bytes) = self.take_string_bytes(tag, required)? else {
            return Ok(false);
        };
        *value = String::from_utf8(bytes)
            .map_err(|_| JceError::InvalidUtf8 { tag })?;
        Ok(true)
    }

    /// Read a `String` field without UTF-8 validation.
    pub fn read_string_bytes(
        &mut self,
        value: &mut Vec<u8>,
        tag: u8,
        required: bool,
    ) -> Result<bool> {
        let Some(bytes) = self.take_string_bytes(tag, required)? else {
            return Ok(false);
        };
        *value = bytes;
        Ok(true)
    }

    fn take_string_bytes(&mut self, tag: u8, required: bool) -> Result<Option<Vec<u8>>> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(None);
        };
        if wire_type != WireType::String {
            return Err(JceError::mismatch(tag, "string", wire_type));
        }
        let length = self.read_length()?;
        self.input.read_vec(length as usize).map(Some)
    }

    /// Read a `SimpleList` byte array.
    pub fn read_bytes(
        &mut self,
        value: &mut Vec<u8>,
        tag: u8,
        required: bool,
    ) -> Result<bool> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(false);
        };
        if wire_type != WireType::SimpleList {
            return Err(JceError::mismatch(tag, "simple list", wire_type));
        }
        let count = self.input.read_u32()?;
        self.check_simple_list_item(tag)?;
        *value = self.input.read_vec(count as usize)?;
        Ok(true)
    }

    pub fn read_i8_vec(
        &mut self,
        value: &mut Vec<i8>,
        tag: u8,
        required: bool,
    ) -> Result<bool> {
        let mut bytes = Vec::new();
        if !self.read_bytes(&mut bytes, tag, required)? {
            return Ok(false);
        }
        *value = bytes.into_iter().map(|b| b as i8).collect();
        Ok(true)
    }

    /// Consume the item-type byte of a `SimpleList`; only byte arrays exist.
    pub(crate) fn check_simple_list_item(&mut self, tag: u8) -> Result<()> {
        let item = WireType::from_byte(self.input.read_u8()?)?;
        if item != WireType::Int1 {
            return Err(JceError::mismatch(tag, "simple list of Int1", item));
        }
        Ok(())
    }

    /// Locate a `List` field and return its element count.
    pub fn read_list_len(&mut self, tag: u8, required: bool) -> Result<Option<u32>> {
        self.read_container_len(WireType::List, "list", tag, required)
    }

    /// Locate a `Map` field and return its pair count.
    pub fn read_map_len(&mut self, tag: u8, required: bool) -> Result<Option<u32>> {
        self.read_container_len(WireType::Map, "map", tag, required)
    }

    fn read_container_len(
        &mut self,
        expected: WireType,
        kind: &'static str,
        tag: u8,
        required: bool,
    ) -> Result<Option<u32>> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(None);
        };
        if wire_type != expected {
            return Err(JceError::mismatch(tag, kind, wire_type));
        }
        self.read_length().map(Some)
    }

    pub fn read_struct_begin(&mut self) -> Result<()> {
        self.expect_marker(WireType::StructBegin)
    }

    pub fn read_struct_end(&mut self) -> Result<()> {
        self.expect_marker(WireType::StructEnd)
    }

    fn expect_marker(&mut self, expected: WireType) -> Result<()> {
        let found = self.input.read_u8()?;
        if found != expected.as_byte() {
            return Err(JceError::MarkerMismatch { expected, found });
        }
        Ok(())
    }

    /// Enter the nested struct stored at `tag`.
    ///
    /// On `true` the caller reads the nested fields and then calls
    /// [`skip_to_struct_end`](Self::skip_to_struct_end).
    pub fn read_struct_field(&mut self, tag: u8, required: bool) -> Result<bool> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(false);
        };
        if wire_type != WireType::StructBegin {
            return Err(JceError::mismatch(tag, "struct", wire_type));
        }
        Ok(true)
    }
}
