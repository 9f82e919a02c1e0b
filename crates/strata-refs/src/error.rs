use strata_types::ObjectId;
use thiserror::Error;

/// Errors from reference store operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The ref name violates the naming rules.
    #[error("invalid ref name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A symbolic ref chain exceeded the resolution depth cap.
    #[error("symbolic ref loop resolving {name:?}")]
    SymrefLoop { name: String },

    /// A compare-and-swap update found a different current value.
    #[error("ref {name:?} moved: expected {expected:?}, found {actual:?}")]
    CasMismatch {
        name: String,
        expected: Option<ObjectId>,
        actual: Option<ObjectId>,
    },

    /// Internal storage failure.
    #[error("ref store failure: {0}")]
    Internal(String),
}

/// Result alias for reference operations.
pub type RefResult<T> = Result<T, RefError>;
