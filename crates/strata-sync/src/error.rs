use strata_types::ObjectId;
use thiserror::Error;

/// Errors from synchronization between repositories.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote ref already equals (or is ahead of) the local tip.
    /// Informational: no pack was sent.
    #[error("nothing to push: the remote is up to date")]
    NothingToPush,

    /// The remote ref moved in a way that is not a fast-forward from the
    /// local tip. The user must fetch and reconcile first.
    #[error("the remote has changes that are not in the local history")]
    RemoteHasChanges,

    /// The server does not have a commit we expected it to know.
    #[error("remote does not know commit {0}")]
    RemoteUnknownCommit(ObjectId),

    /// A named ref does not exist where it was expected.
    #[error("no such ref: {0}")]
    MissingRef(String),

    /// A negotiation round neither shrank `want` nor grew `have`.
    #[error("sync made no progress; aborting negotiation")]
    NoProgress,

    /// The operation was cancelled before completing.
    #[error("sync cancelled")]
    Cancelled,

    /// HTTP, DNS, or socket failure. Retryable with bounded backoff.
    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Protocol(#[from] strata_protocol::ProtocolError),

    #[error(transparent)]
    Pack(#[from] strata_pack::PackError),

    #[error(transparent)]
    Store(#[from] strata_store::StoreError),

    #[error(transparent)]
    Graph(#[from] strata_graph::GraphError),

    #[error(transparent)]
    Refs(#[from] strata_refs::RefError),
}

impl SyncError {
    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
