//! Integers, floats and booleans.
//!
//! Integers always travel in the narrowest of `Zero`/`Int1`/`Int2`/`Int4`/`Int8`
//! that holds the value under the declared signedness, whatever width the
//! caller declared. Readers accept any integer wire type no wider than their
//! own width and extend it back. Floats are never narrowed.

use std::io::{Read, Write};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{JceError, Result};
use crate::wire_type::WireType;

mod sealed {
    pub trait Sealed {}
}

/// An integer type with a JCE wire representation.
///
/// Values go through `i128`, which holds every supported integer exactly, so
/// signed and unsigned types share one narrowing and widening path.
pub trait WireInt: Copy + sealed::Sealed {
    /// Widest wire type a reader of this type accepts.
    const WIDTH: WireType;
    const SIGNED: bool;
    /// Name used in type mismatch errors.
    const KIND: &'static str;

    fn to_i128(self) -> i128;

    /// Truncating conversion back from a widened wire value.
    fn from_i128(value: i128) -> Self;
}

macro_rules! wire_int {
    ($($t:ty => $width:ident, $signed:literal;)*) => {
        $(
            impl sealed::Sealed for $t {}

            impl WireInt for $t {
                const WIDTH: WireType = WireType::$width;
                const SIGNED: bool = $signed;
                const KIND: &'static str = stringify!($t);

                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

wire_int! {
    u8 => Int1, false;
    i8 => Int1, true;
    u16 => Int2, false;
    i16 => Int2, true;
    u32 => Int4, false;
    i32 => Int4, true;
    u64 => Int8, false;
    i64 => Int8, true;
}

/// Pick the narrowest wire type for `value` and return it with the payload
/// bits, truncated to that width.
pub(crate) fn narrow(value: i128, signed: bool) -> (WireType, u64) {
    if value == 0 {
        return (WireType::Zero, 0);
    }
    let steps = [
        (WireType::Int1, 8u32),
        (WireType::Int2, 16),
        (WireType::Int4, 32),
    ];
    for (wire_type, bits) in steps {
        let fits = if signed {
            let limit = 1i128 << (bits - 1);
            (-limit..limit).contains(&value)
        } else {
            value < (1i128 << bits)
        };
        if fits {
            return (wire_type, (value as u64) & ((1u64 << bits) - 1));
        }
    }
    (WireType::Int8, value as u64)
}

/// Extend a `width`-byte payload to a full value.
pub(crate) fn widen(raw: u64, width: usize, signed: bool) -> i128 {
    if signed {
        let shift = 64 - 8 * width as u32;
        i128::from(((raw << shift) as i64) >> shift)
    } else {
        i128::from(raw)
    }
}

macro_rules! typed_int_writes {
    ($($name:ident => $t:ty;)*) => {
        $(
            pub fn $name(&mut self, value: $t, tag: u8) -> Result<()> {
                self.write_int(value, tag)
            }
        )*
    };
}

macro_rules! typed_int_reads {
    ($($name:ident => $t:ty;)*) => {
        $(
            /// Returns whether the tag was present; `value` is untouched when it was not.
            pub fn $name(
                &mut self,
                value: &mut $t,
                tag: u8,
                required: bool,
            ) -> Result<bool> {
                Ok(assign(value, self.read_int(tag, required)?))
            }
        )*
    };
}

fn assign<T>(dst: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *dst = v;
            true
        }
        None => false,
    }
}

impl<W: Write> Encoder<W> {
    pub fn write_int<T: WireInt>(&mut self, value: T, tag: u8) -> Result<()> {
        let (wire_type, bits) = narrow(value.to_i128(), T::SIGNED);
        self.write_head(wire_type, tag)?;
        match wire_type {
            WireType::Int1 => self.out.write_u8(bits as u8),
            WireType::Int2 => self.out.write_u16(bits as u16),
            WireType::Int4 => self.out.write_u32(bits as u32),
            WireType::Int8 => self.out.write_u64(bits),
            _ => Ok(()),
        }
    }

    typed_int_writes! {
        write_u8 => u8;
        write_i8 => i8;
        write_u16 => u16;
        write_i16 => i16;
        write_u32 => u32;
        write_i32 => i32;
        write_u64 => u64;
        write_i64 => i64;
    }

    pub fn write_f32(&mut self, value: f32, tag: u8) -> Result<()> {
        if value == 0.0 {
            return self.write_head(WireType::Zero, tag);
        }
        self.write_head(WireType::Float4, tag)?;
        self.out.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64, tag: u8) -> Result<()> {
        if value == 0.0 {
            return self.write_head(WireType::Zero, tag);
        }
        self.write_head(WireType::Float8, tag)?;
        self.out.write_u64(value.to_bits())
    }

    /// `false` is elided to `Zero`, `true` is `Int1` carrying `1`.
    pub fn write_bool(&mut self, value: bool, tag: u8) -> Result<()> {
        self.write_int(u8::from(value), tag)
    }
}

impl<R: Read> Decoder<R> {
    /// Read an integer field, `None` when an optional tag is absent.
    pub fn read_int<T: WireInt>(&mut self, tag: u8, required: bool) -> Result<Option<T>> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(None);
        };
        self.int_payload::<T>(tag, wire_type).map(Some)
    }

    fn int_payload<T: WireInt>(&mut self, tag: u8, wire_type: WireType) -> Result<T> {
        if wire_type == WireType::Zero {
            return Ok(T::from_i128(0));
        }
        let width = match wire_type.int_width() {
            Some(width) if wire_type <= T::WIDTH => width,
            _ => return Err(JceError::mismatch(tag, T::KIND, wire_type)),
        };
        let raw = match width {
            1 => u64::from(self.input.read_u8()?),
            2 => u64::from(self.input.read_u16()?),
            4 => u64::from(self.input.read_u32()?),
            _ => self.input.read_u64()?,
        };
        Ok(T::from_i128(widen(raw, width, T::SIGNED)))
    }

    typed_int_reads! {
        read_u8 => u8;
        read_i8 => i8;
        read_u16 => u16;
        read_i16 => i16;
        read_u32 => u32;
        read_i32 => i32;
        read_u64 => u64;
        read_i64 => i64;
    }

    pub fn read_f32(&mut self, value: &mut f32, tag: u8, required: bool) -> Result<bool> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(false);
        };
        *value = match wire_type {
            WireType::Zero => 0.0,
            WireType::Float4 => f32::from_bits(self.input.read_u32()?),
            other => return Err(JceError::mismatch(tag, "f32", other)),
        };
        Ok(true)
    }

    /// Only `Float8` (or `Zero`) is accepted; a `Float4` is a mismatch.
    pub fn read_f64(&mut self, value: &mut f64, tag: u8, required: bool) -> Result<bool> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(false);
        };
        *value = match wire_type {
            WireType::Zero => 0.0,
            WireType::Float8 => f64::from_bits(self.input.read_u64()?),
            other => return Err(JceError::mismatch(tag, "f64", other)),
        };
        Ok(true)
    }

    pub fn read_bool(
        &mut self,
        value: &mut bool,
        tag: u8,
        required: bool,
    ) -> Result<bool> {
        let Some(wire_type) = self.locate_tag(tag, required)? else {
            return Ok(false);
        };
        *value = match wire_type {
            WireType::Zero => false,
            WireType::Int1 => self.input.read_u8()? != 0,
            other => return Err(JceError::mismatch(tag, "bool", other)),
        };
        Ok(true)
    }
}
