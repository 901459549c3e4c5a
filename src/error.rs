//! Error types for the heron library.

use thiserror::Error;

use crate::data::DocumentId;

/// The error type for all fallible heron operations.
#[derive(Debug, Error)]
pub enum HeronError {
    /// A caller-supplied value was rejected before any mutation took place:
    /// a negative or duplicate document id, a document or query containing
    /// a term with control characters, or a malformed exclusion term.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation referenced a document id that is not currently live.
    #[error("document {0} not found")]
    NotFound(DocumentId),
}

impl HeronError {
    /// Create an `InvalidArgument` error from any message-like value.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        HeronError::InvalidArgument(message.into())
    }
}

/// A specialized `Result` type for heron operations.
pub type Result<T> = std::result::Result<T, HeronError>;
