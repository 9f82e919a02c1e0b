use thiserror::Error;

/// Errors from encoding or decoding canonical object bytes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes do not form a valid object: truncated input, a bad
    /// presence flag, an out-of-range varint, or invalid UTF-8.
    #[error("malformed object: {0}")]
    Malformed(String),

    /// The type tag did not match the expected object kind.
    #[error("unexpected object type tag {actual:#04x}, expected {expected}")]
    UnexpectedType { expected: &'static str, actual: u8 },

    /// A geometry type tag outside the known set.
    #[error("unsupported geometry type tag {0}")]
    UnsupportedGeometry(u64),

    /// An I/O failure from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
