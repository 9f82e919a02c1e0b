use thiserror::Error;

/// Errors from parsing or producing protocol documents.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A manifest line, XML document, or hex id could not be parsed.
    #[error("malformed protocol document: {0}")]
    Parse(String),

    /// A JSON body could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
