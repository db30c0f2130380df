//!
//! Binary encoding primitives: fixed-width integers in either byte order,
//! compactSize varints and raw byte runs with optional reversal.
//!

pub mod deserializer;
pub mod error;
pub mod serializer;

pub use deserializer::{decode_hex, Deserializer};
pub use error::{Result, SerializationError};
pub use serializer::Serializer;

/// Byte order of a fixed-width integer field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    /// Bitcoin protocol fields are little-endian unless stated otherwise.
    #[default]
    Little,
}

pub(crate) const COMPACT_SIZE_U16_MARKER: u8 = 0xfd;
pub(crate) const COMPACT_SIZE_U32_MARKER: u8 = 0xfe;
pub(crate) const COMPACT_SIZE_U64_MARKER: u8 = 0xff;
