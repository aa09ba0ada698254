use thiserror::Error;

/// Unified error type for the tagpack codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The tag byte does not name any known value type.
    #[error("Unknown Tag: 0x{0:02x}")]
    UnknownTag(u8),

    /// A read needed more bytes than the input had left.
    #[error("Truncated Input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// A 32-bit count prefix is outside `0..=i32::MAX`.
    #[error("Count Overflow: {0} is not a valid element count")]
    CountOverflow(i64),

    /// Container nesting went past the configured depth limit.
    #[error("Nesting Too Deep: exceeded maximum depth of {0}")]
    NestingTooDeep(usize),

    /// The value cannot be represented on the wire (encode side only).
    #[error("Unsupported Value: {0}")]
    UnsupportedValue(String),

    /// A string payload is not valid UTF-8.
    #[error("Invalid UTF-8 in string payload: {0}")]
    InvalidUtf8(String),
}

/// A specialized `Result` type for tagpack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8(err.to_string())
    }
}
