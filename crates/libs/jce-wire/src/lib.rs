//! # jce-wire
//!
//! Streaming encoder and decoder for the JCE (Tars) tagged binary format.
//!
//! Every field is a head followed by a payload. The head carries a 4-bit
//! wire type and a numeric tag; readers look fields up by tag, skip the ones
//! they do not know, and treat the ones they never see as absent. All
//! multi-byte values are big-endian.
//!
//! ## Wire Format
//!
//! ```text
//! head, tag < 15:   [type:4 | tag:4]
//! head, tag >= 15:  [type:4 | 0xF][tag:8]
//!
//! length <= 127:    [len:8]
//! length > 127:     [0x80000000 | len:32]
//!
//! String:      head  length  utf-8 bytes
//! SimpleList:  head  count:u32  0x00 (Int1)  bytes
//! List:        head  length  elements (each with its own head)
//! Map:         head  length  key, value, key, value ...
//! Struct:      head(StructBegin)  fields  head(StructEnd)
//! ```
//!
//! Integers use the narrowest of `Int1`/`Int2`/`Int4`/`Int8` that holds the
//! value, and zero collapses to the payload-less `Zero` type.
//!
//! ## Example
//!
//! ```rust
//! use jce_wire::{Decoder, Encoder};
//!
//! let mut enc = Encoder::new(Vec::new());
//! enc.write_u32(0, 1).unwrap();
//! enc.write_string("hi", 2).unwrap();
//! enc.write_bytes(&[1, 2, 3], 5).unwrap();
//! let bytes = enc.into_inner().unwrap();
//! assert_eq!(bytes[..3], [0x61, 0x72, 0x02]);
//!
//! let mut dec = Decoder::new(&bytes[..]);
//! let mut id = 7u32;
//! let mut name = String::new();
//! let mut blob = Vec::new();
//! dec.read_u32(&mut id, 1, true).unwrap();
//! dec.read_string(&mut name, 2, true).unwrap();
//! assert!(!dec.read_string(&mut String::new(), 3, false).unwrap());
//! dec.read_bytes(&mut blob, 5, true).unwrap();
//! assert_eq!((id, name.as_str(), blob), (0, "hi", vec![1, 2, 3]));
//! ```

mod composite;
pub mod config;
mod decoder;
mod encoder;
pub mod error;
pub mod head;
pub mod length;
mod message;
mod scalar;
mod scan;
mod skip;
pub mod stream;
pub mod wire_type;

pub use config::CodecConfig;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{JceError, Result};
pub use head::Head;
pub use message::{
    marshal, marshal_to, marshal_to_with, marshal_with, unmarshal, unmarshal_default,
    unmarshal_from, unmarshal_from_with, unmarshal_with, Message,
};
pub use scalar::WireInt;
pub use wire_type::WireType;
