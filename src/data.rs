//! Core data types shared across the library.

use serde::{Deserialize, Serialize};

/// Identifier of an indexed document.
///
/// Signed so that callers handing over a negative id get a proper
/// `InvalidArgument` error instead of a silent wrap-around. Ids are never
/// recycled by the engine itself: removing a document does not free its id
/// for implicit reuse, the caller may simply add a new document under it.
pub type DocumentId = i64;

/// Classification tag attached to every document at add time.
///
/// The engine never interprets the status; it only stores it, hands it to
/// search predicates and returns it from matching. Ranked search defaults
/// to `Actual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live, regular content.
    #[default]
    Actual,
    /// Kept in the index but no longer of interest.
    Irrelevant,
    /// Excluded from default search by policy.
    Banned,
    /// Marked for removal.
    Removed,
}

/// A ranked search hit: the document id together with its accumulated
/// TF-IDF relevance and its average rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Id of the matched document.
    pub id: DocumentId,
    /// Accumulated TF-IDF relevance for the query that produced this hit.
    pub relevance: f64,
    /// Truncated-toward-zero average of the ratings given at add time.
    pub rating: i32,
}
