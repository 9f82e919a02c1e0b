use strata_types::ObjectId;

/// Errors from writing or ingesting pack streams.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// A requested root is not present in the local database.
    #[error("wanted object {0} is not known")]
    WantNotFound(ObjectId),

    /// The stream ended or went bad mid-record.
    #[error("malformed pack stream: {0}")]
    MalformedStream(String),

    /// The underlying object database failed.
    #[error(transparent)]
    Store(#[from] strata_store::StoreError),

    /// Graph traversal failed while enumerating objects to send.
    #[error(transparent)]
    Graph(#[from] strata_graph::GraphError),

    /// I/O failure on the stream itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for pack operations.
pub type PackResult<T> = Result<T, PackError>;
