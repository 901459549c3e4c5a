//! TF-IDF relevance accumulation over the inverted index.

use ahash::AHashMap;
use rayon::prelude::*;

use crate::data::{DocumentId, DocumentStatus};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::search::ExecutionStrategy;
use crate::search::concurrent::{SHARD_COUNT, ShardedScoreMap};

/// Accumulate per-document relevance for a parsed query.
///
/// For every plus term present in the index, each posting contributes
/// `tf * idf` to its document's running total, subject to the caller's
/// `keep` predicate. Afterwards every document holding a posting for any
/// minus term is deleted from the result outright; exclusion is total,
/// not a penalty. The minus phase is sequential in both strategies, it
/// only ever runs over the already merged map.
///
/// Absent plus terms are skipped before their IDF is ever computed.
pub(crate) fn accumulate<P>(
    index: &InvertedIndex,
    query: &Query,
    keep: P,
    strategy: ExecutionStrategy,
) -> AHashMap<DocumentId, f64>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let mut scores = match strategy {
        ExecutionStrategy::Sequential => accumulate_sequential(index, query, &keep),
        ExecutionStrategy::Parallel => accumulate_parallel(index, query, &keep),
    };

    for term in &query.minus_terms {
        if let Some(postings) = index.postings(term) {
            for id in postings.keys() {
                scores.remove(id);
            }
        }
    }

    scores
}

fn accumulate_sequential<P>(
    index: &InvertedIndex,
    query: &Query,
    keep: &P,
) -> AHashMap<DocumentId, f64>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let mut scores: AHashMap<DocumentId, f64> = AHashMap::new();
    for term in &query.plus_terms {
        let Some(postings) = index.postings(term) else {
            continue;
        };
        let idf = index.idf(term);
        for (&id, &term_frequency) in postings {
            let Some((status, rating)) = index.document_meta(id) else {
                continue;
            };
            if keep(id, status, rating) {
                *scores.entry(id).or_insert(0.0) += term_frequency * idf;
            }
        }
    }
    scores
}

fn accumulate_parallel<P>(
    index: &InvertedIndex,
    query: &Query,
    keep: &P,
) -> AHashMap<DocumentId, f64>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let scores = ShardedScoreMap::new(SHARD_COUNT);
    query.plus_terms.par_iter().for_each(|term| {
        let Some(postings) = index.postings(term) else {
            return;
        };
        let idf = index.idf(term);
        for (&id, &term_frequency) in postings {
            let Some((status, rating)) = index.document_meta(id) else {
                continue;
            };
            if keep(id, status, rating) {
                scores.add(id, term_frequency * idf);
            }
        }
    });
    scores.into_map()
}
