//! On-wire type codes.
//!
//! Every field head carries one of these in its top nibble. The byte value of
//! each variant is its ordinal, so `StructBegin`/`StructEnd` double as the raw
//! struct marker bytes.

use core::fmt;

use crate::error::JceError;

/// The closed set of JCE wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireType {
    Int1 = 0,
    Int2 = 1,
    Int4 = 2,
    Int8 = 3,
    Float4 = 4,
    Float8 = 5,
    Zero = 6,
    String = 7,
    Map = 8,
    SimpleList = 9,
    List = 10,
    StructBegin = 11,
    StructEnd = 12,
}

impl WireType {
    /// Largest valid ordinal.
    pub const MAX: u8 = WireType::StructEnd as u8;

    /// Convert from a raw type value (a head nibble or a marker byte).
    pub fn from_byte(b: u8) -> Result<Self, JceError> {
        match b {
            0 => Ok(Self::Int1),
            1 => Ok(Self::Int2),
            2 => Ok(Self::Int4),
            3 => Ok(Self::Int8),
            4 => Ok(Self::Float4),
            5 => Ok(Self::Float8),
            6 => Ok(Self::Zero),
            7 => Ok(Self::String),
            8 => Ok(Self::Map),
            9 => Ok(Self::SimpleList),
            10 => Ok(Self::List),
            11 => Ok(Self::StructBegin),
            12 => Ok(Self::StructEnd),
            _ => Err(JceError::InvalidType { raw: b }),
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Payload width of the fixed-size integer types.
    pub fn int_width(self) -> Option<usize> {
        match self {
            Self::Int1 => Some(1),
            Self::Int2 => Some(2),
            Self::Int4 => Some(4),
            Self::Int8 => Some(8),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int1 => "Int1",
            Self::Int2 => "Int2",
            Self::Int4 => "Int4",
            Self::Int8 => "Int8",
            Self::Float4 => "Float4",
            Self::Float8 => "Float8",
            Self::Zero => "Zero",
            Self::String => "String",
            Self::Map => "Map",
            Self::SimpleList => "SimpleList",
            Self::List => "List",
            Self::StructBegin => "StructBegin",
            Self::StructEnd => "StructEnd",
        }
    }
}

impl TryFrom<u8> for WireType {
    type Error = JceError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Self::from_byte(b)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats a raw type byte by name when it is valid.
pub(crate) fn describe_raw(b: u8) -> String {
    match WireType::from_byte(b) {
        Ok(ty) => ty.name().to_string(),
        Err(_) => format!("invalid(0x{b:02x})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [WireType; 13] = [
        WireType::Int1,
        WireType::Int2,
        WireType::Int4,
        WireType::Int8,
        WireType::Float4,
        WireType::Float8,
        WireType::Zero,
        WireType::String,
        WireType::Map,
        WireType::SimpleList,
        WireType::List,
        WireType::StructBegin,
        WireType::StructEnd,
    ];

    #[test]
    fn ordinals_are_contiguous() {
        for (i, ty) in ALL.iter().enumerate() {
            assert_eq!(ty.as_byte() as usize, i);
            assert_eq!(WireType::from_byte(i as u8).expect("valid ordinal"), *ty);
        }
        assert_eq!(WireType::MAX, 12);
    }

    #[test]
    fn rejects_out_of_range() {
        for raw in 13u8..=15 {
            let err = WireType::from_byte(raw).expect_err("out of range");
            assert!(matches!(err, JceError::InvalidType { raw: r } if r == raw));
        }
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(WireType::SimpleList.to_string(), "SimpleList");
        assert_eq!(describe_raw(11), "StructBegin");
        assert_eq!(describe_raw(0xee), "invalid(0xee)");
    }

    #[test]
    fn integer_widths() {
        assert_eq!(WireType::Int1.int_width(), Some(1));
        assert_eq!(WireType::Int8.int_width(), Some(8));
        assert_eq!(WireType::Float4.int_width(), None);
        assert_eq!(WireType::Zero.int_width(), None);
    }
}
