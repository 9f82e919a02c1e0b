use strata_types::ObjectId;

/// Errors from object database operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The stored bytes could not be decoded back into an object.
    #[error("corrupt object {id}: {source}")]
    Corrupt {
        id: ObjectId,
        #[source]
        source: strata_codec::CodecError,
    },

    /// Attempted to store or look up the null object ID.
    #[error("the null object id is not a valid key")]
    NullObjectId,

    /// The backend rejects the operation (e.g. delete on the object
    /// database proper).
    #[error("operation not supported by this database: {0}")]
    Unsupported(&'static str),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
