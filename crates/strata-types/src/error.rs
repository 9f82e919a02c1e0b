use thiserror::Error;

/// Errors from constructing or parsing foundation types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A byte string had the wrong length for the target type.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A tree was constructed with both leaf nodes and buckets.
    #[error("tree cannot carry both leaf nodes and buckets")]
    MixedTreeForm,

    /// A bucket index fell outside the 0..1024 range.
    #[error("bucket index {0} out of range")]
    BucketIndexOutOfRange(u32),
}
