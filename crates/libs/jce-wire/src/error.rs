use crate::wire_type::{describe_raw, WireType};

/// Errors returned by encode and decode operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JceError {
    #[error("invalid wire type: 0x{raw:02x}")]
    InvalidType { raw: u8 },

    #[error("type mismatch at tag {tag}: expected {expected}, found {found}")]
    TypeMismatch {
        tag: u8,
        expected: &'static str,
        found: WireType,
    },

    #[error("missing required tag {tag} ({})", describe_found(.found_tag, .found_type))]
    MissingRequiredField {
        tag: u8,
        found_tag: Option<u8>,
        found_type: Option<WireType>,
    },

    #[error("stream truncated: {needed} more byte(s) expected")]
    TruncatedStream { needed: usize },

    #[error("type {type_name} is not serializable in this direction")]
    NotSerializable { type_name: &'static str },

    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("tag {found} follows tag {previous}; tags must ascend")]
    NonAscendingTag { previous: u8, found: u8 },

    #[error("struct marker mismatch: expected {expected}, found {}", describe_marker(.found))]
    MarkerMismatch { expected: WireType, found: u8 },

    #[error("length {length} does not fit the wire length field")]
    LengthOverflow { length: usize },

    #[error("string at tag {tag} is not valid UTF-8")]
    InvalidUtf8 { tag: u8 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl JceError {
    /// Returns `true` when the input ended before a complete field was read.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedStream { .. })
    }

    pub(crate) fn mismatch(tag: u8, expected: &'static str, found: WireType) -> Self {
        Self::TypeMismatch {
            tag,
            expected,
            found,
        }
    }
}

fn describe_found(tag: &Option<u8>, ty: &Option<WireType>) -> String {
    match (tag, ty) {
        (Some(tag), Some(ty)) => format!("found tag {tag} of type {ty}"),
        _ => "reached end of input".to_string(),
    }
}

fn describe_marker(found: &u8) -> String {
    describe_raw(*found)
}

pub type Result<T> = core::result::Result<T, JceError>;
