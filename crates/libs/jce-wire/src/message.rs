//! Whole-message encode/decode for types that know their own fields.

use std::io::{Read, Write};

use crate::config::CodecConfig;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{JceError, Result};

/// A struct that writes and reads its own fields.
///
/// Both directions default to [`JceError::NotSerializable`], so a type can
/// implement only the side it supports.
pub trait Message {
    fn write_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        let _ = enc;
        Err(JceError::NotSerializable {
            type_name: core::any::type_name::<Self>(),
        })
    }

    fn read_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let _ = dec;
        Err(JceError::NotSerializable {
            type_name: core::any::type_name::<Self>(),
        })
    }
}

pub fn marshal<M: Message>(value: &M) -> Result<Vec<u8>> {
    marshal_with(value, &CodecConfig::default())
}

pub fn marshal_with<M: Message>(value: &M, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    marshal_to_with(value, &mut out, config)?;
    Ok(out)
}

/// Encode `value` into `sink` and flush.
pub fn marshal_to<M: Message, W: Write>(value: &M, sink: W) -> Result<()> {
    marshal_to_with(value, sink, &CodecConfig::default())
}

pub fn marshal_to_with<M: Message, W: Write>(
    value: &M,
    sink: W,
    config: &CodecConfig,
) -> Result<()> {
    let mut enc = Encoder::with_config(sink, config);
    value.write_to(&mut enc)?;
    enc.flush()
}

/// Decode `data` into `value`; fields absent from `data` keep their current values.
pub fn unmarshal<M: Message>(data: &[u8], value: &mut M) -> Result<()> {
    unmarshal_with(data, value, &CodecConfig::default())
}

pub fn unmarshal_with<M: Message>(data: &[u8], value: &mut M, config: &CodecConfig) -> Result<()> {
    unmarshal_from_with(data, value, config)
}

/// Decode one message from `source`.
///
/// The source is read through a buffer, so bytes past the end of the message
/// may be consumed and lost. To read several messages from one stream, keep a
/// [`Decoder`] and call [`Message::read_from`] for each one.
pub fn unmarshal_from<M: Message, R: Read>(source: R, value: &mut M) -> Result<()> {
    unmarshal_from_with(source, value, &CodecConfig::default())
}

pub fn unmarshal_from_with<M: Message, R: Read>(
    source: R,
    value: &mut M,
    config: &CodecConfig,
) -> Result<()> {
    let mut dec = Decoder::with_config(source, config);
    value.read_from(&mut dec)
}

/// Decode into a fresh `M::default()`.
pub fn unmarshal_default<M: Message + Default>(data: &[u8]) -> Result<M> {
    let mut value = M::default();
    unmarshal(data, &mut value)?;
    Ok(value)
}
