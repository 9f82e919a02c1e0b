use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strata_pack::PackError;
use strata_sync::SyncError;

/// Errors from the serving peer.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The requested ref or object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request body or query was malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The CAS expected-old value did not match the current ref.
    #[error("ref moved; expected value did not match")]
    Conflict,

    /// I/O failure binding or serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SyncError> for ServerError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::RemoteHasChanges => Self::Conflict,
            SyncError::MissingRef(name) => Self::NotFound(name),
            SyncError::RemoteUnknownCommit(id) => Self::BadRequest(format!("unknown commit {id}")),
            SyncError::Pack(PackError::WantNotFound(id)) => {
                Self::BadRequest(format!("wanted object {id} is not known"))
            }
            SyncError::Pack(PackError::MalformedStream(reason)) => Self::BadRequest(reason),
            SyncError::Protocol(e) => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<strata_protocol::ProtocolError> for ServerError {
    fn from(e: strata_protocol::ProtocolError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
