use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("compactSize value {0} is not minimally encoded")]
    NonCanonicalCompactSize(u64),

    #[error("invalid hex data: {0}")]
    InvalidHex(String),
}

impl From<faster_hex::Error> for SerializationError {
    fn from(err: faster_hex::Error) -> Self {
        SerializationError::InvalidHex(err.to_string())
    }
}

pub type Result<T, E = SerializationError> = std::result::Result<T, E>;
