//! Detection of documents with identical term sets.

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::data::DocumentId;
use crate::index::InvertedIndex;

/// Find every document whose distinct term set already occurred under a
/// lower id.
///
/// Ids are scanned in ascending order, so the retained representative of
/// each equivalence class is always its minimum id. Term frequencies play
/// no role; only term membership does. The returned ids are ascending.
pub(crate) fn find_duplicates(index: &InvertedIndex) -> Vec<DocumentId> {
    let mut seen: AHashSet<BTreeSet<&str>> = AHashSet::new();
    let mut duplicates = Vec::new();
    for id in index.iter_ids() {
        if !seen.insert(index.term_set(id)) {
            duplicates.push(id);
        }
    }
    duplicates
}
