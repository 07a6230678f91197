use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables shared by [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Capacity of the decoder's read buffer.
    pub read_buffer_capacity: usize,
    /// Capacity of the encoder's write buffer.
    pub write_buffer_capacity: usize,
    /// How deep skip may descend through nested structs, lists and maps.
    pub max_depth: usize,
    /// Reject fields whose tag does not ascend within a single lookup.
    pub strict_tag_order: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            read_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            write_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_tag_order: true,
        }
    }
}

impl CodecConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    /// Accept out-of-order tags the way older producers emit them.
    pub fn permissive(mut self) -> Self {
        self.strict_tag_order = false;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
