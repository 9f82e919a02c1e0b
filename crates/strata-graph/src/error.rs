use strata_types::ObjectId;

/// Errors from graph traversal and history queries.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The underlying object database failed.
    #[error(transparent)]
    Store(#[from] strata_store::StoreError),

    /// An object references a digest that is not present in the database.
    #[error("object {referer} references missing object {missing}")]
    IntegrityGap {
        referer: ObjectId,
        missing: ObjectId,
    },
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
