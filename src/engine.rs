//! High-level search engine combining analysis, indexing, scoring and
//! maintenance.
//!
//! This module provides the [`SearchEngine`] facade, the one type most
//! embedders need. It owns the stop-word set and the two-way index, and
//! routes every operation through the pipeline described on the crate
//! root: tokenize, filter, index, score, select.

use std::collections::HashMap;

use log::info;
use rayon::prelude::*;

use crate::analysis::StopWordSet;
use crate::analysis::tokenizer::{is_valid_term, tokenize};
use crate::data::{Document, DocumentId, DocumentStatus};
use crate::error::{HeronError, Result};
use crate::index::InvertedIndex;
use crate::maintenance::dedup;
use crate::query::QueryParser;
use crate::search::ExecutionStrategy;
use crate::search::accumulator::accumulate;
use crate::search::topk::select_top;

/// An in-memory full-text search engine with TF-IDF ranking.
///
/// Documents are added with an id, a status tag and a list of ratings;
/// ranked queries return the best five hits for the query's inclusion
/// terms, after dropping every document that contains an exclusion term.
///
/// The engine is single-writer: mutation (`add_document`, the removal
/// methods) must be externally serialized, while any number of readers
/// may search concurrently between mutations.
///
/// # Example
///
/// ```
/// use heron::{DocumentStatus, SearchEngine, StopWordSet};
///
/// let stop_words = StopWordSet::from_text("and the").unwrap();
/// let mut engine = SearchEngine::new(stop_words);
/// engine
///     .add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
///     .unwrap();
///
/// let hits = engine.find_top_documents("fluffy").unwrap();
/// assert_eq!(hits[0].id, 1);
/// assert_eq!(hits[0].rating, 5);
/// ```
#[derive(Debug, Default)]
pub struct SearchEngine {
    index: InvertedIndex,
    stop_words: StopWordSet,
}

impl SearchEngine {
    /// Create an engine filtering the given stop words.
    pub fn new(stop_words: StopWordSet) -> Self {
        SearchEngine {
            index: InvertedIndex::new(),
            stop_words,
        }
    }

    /// Create an engine from whitespace-separated stop-word text.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(SearchEngine::new(StopWordSet::from_text(text)?))
    }

    /// Add a document to the index.
    ///
    /// The text is tokenized, stop words are dropped, and the surviving
    /// terms are written into both index halves. `rating` becomes the
    /// truncated-toward-zero average of `ratings` (0 when empty). A text
    /// that yields no indexable tokens is legal; the document is live but
    /// matches nothing.
    ///
    /// Fails with `InvalidArgument` when `id` is negative, already live,
    /// or the text contains a term with control characters. Validation is
    /// eager: on failure the index is untouched.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let terms = self.split_into_terms_no_stop(text)?;
        self.index
            .insert(id, &terms, average_rating(ratings), status)
    }

    /// The five best `Actual` documents for `raw_query`, sequentially.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// The five best documents with the given status, sequentially.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(
            ExecutionStrategy::Sequential,
            raw_query,
            move |_, document_status, _| document_status == status,
        )
    }

    /// The five best documents accepted by `predicate`, under the chosen
    /// execution strategy.
    ///
    /// Hits are sorted by descending relevance; relevances closer than
    /// 1e-6 fall back to descending rating. Sequential and parallel
    /// execution return the same hits up to floating rounding order.
    pub fn find_top_documents_by<P>(
        &self,
        strategy: ExecutionStrategy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        let scores = accumulate(&self.index, &query, predicate, strategy);
        let hits = scores
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index.document_meta(id).map(|(_, rating)| Document {
                    id,
                    relevance,
                    rating,
                })
            })
            .collect();
        Ok(select_top(hits))
    }

    /// Which of the query's inclusion terms the document contains,
    /// together with the document's status.
    ///
    /// When any exclusion term has a posting for `id`, the term list is
    /// empty: exclusion is signalled through the result, not through an
    /// error. Matched terms come back in query order.
    ///
    /// Fails with `NotFound` when `id` is not live.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionStrategy::Sequential, raw_query, id)
    }

    /// [`match_document`](Self::match_document) under an explicit
    /// execution strategy.
    ///
    /// The parallel strategy evaluates term membership out of order and
    /// therefore returns the matched terms sorted and deduplicated rather
    /// than in query order; the set of terms is the same either way.
    pub fn match_document_with(
        &self,
        strategy: ExecutionStrategy,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let Some((status, _)) = self.index.document_meta(id) else {
            return Err(HeronError::NotFound(id));
        };
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;

        match strategy {
            ExecutionStrategy::Sequential => {
                for term in &query.minus_terms {
                    if self.index.has_posting(term, id) {
                        return Ok((Vec::new(), status));
                    }
                }
                let matched = query
                    .plus_terms
                    .iter()
                    .filter(|term| self.index.has_posting(term, id))
                    .cloned()
                    .collect();
                Ok((matched, status))
            }
            ExecutionStrategy::Parallel => {
                let excluded = query
                    .minus_terms
                    .par_iter()
                    .any(|term| self.index.has_posting(term, id));
                if excluded {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<String> = query
                    .plus_terms
                    .par_iter()
                    .filter(|term| self.index.has_posting(term, id))
                    .cloned()
                    .collect();
                matched.sort_unstable();
                matched.dedup();
                Ok((matched, status))
            }
        }
    }

    /// Remove a document and all of its postings.
    ///
    /// Fails with `NotFound` when `id` is not live; the index is left
    /// untouched in that case.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<()> {
        self.remove_document_with(ExecutionStrategy::Sequential, id)
    }

    /// [`remove_document`](Self::remove_document) under an explicit
    /// execution strategy.
    pub fn remove_document_with(
        &mut self,
        strategy: ExecutionStrategy,
        id: DocumentId,
    ) -> Result<()> {
        match strategy {
            ExecutionStrategy::Sequential => self.index.remove(id),
            ExecutionStrategy::Parallel => self.index.remove_parallel(id),
        }
    }

    /// Remove every document whose distinct term set duplicates that of a
    /// lower-numbered document, returning the removed ids in ascending
    /// order.
    ///
    /// Term frequencies and ratings play no role; two documents with the
    /// same terms at different frequencies are duplicates, and the lowest
    /// id of each group survives.
    pub fn remove_duplicates(&mut self) -> Vec<DocumentId> {
        let duplicates = dedup::find_duplicates(&self.index);
        for &id in &duplicates {
            if self.index.remove(id).is_ok() {
                info!("removed duplicate document {id}");
            }
        }
        duplicates
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// The term frequencies of a document, or an empty map when `id` is
    /// unknown or already removed. Never an error.
    pub fn word_frequencies(&self, id: DocumentId) -> HashMap<String, f64> {
        self.index.word_frequencies(id)
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.iter_ids()
    }

    /// Tokenize document text, rejecting invalid terms and dropping stop
    /// words.
    fn split_into_terms_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut terms = Vec::new();
        for token in tokenize(text) {
            if !is_valid_term(token) {
                return Err(HeronError::invalid_argument(format!(
                    "document term {token:?} contains a control character"
                )));
            }
            if !self.stop_words.contains(token) {
                terms.push(token);
            }
        }
        Ok(terms)
    }
}

/// Truncated-toward-zero average, 0 for an empty slice.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| rating as i64).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0);
        assert_eq!(average_rating(&[7, 2, 7]), 5);
        // -4 / 4 truncates toward zero.
        assert_eq!(average_rating(&[5, -12, 2, 1]), -1);
        assert_eq!(average_rating(&[-1, -2]), -1);
    }

    #[test]
    fn test_add_rejects_negative_and_duplicate_ids() {
        let mut engine = SearchEngine::default();
        assert!(matches!(
            engine.add_document(-1, "cat", DocumentStatus::Actual, &[]),
            Err(HeronError::InvalidArgument(_))
        ));
        engine
            .add_document(3, "cat", DocumentStatus::Actual, &[])
            .unwrap();
        assert!(matches!(
            engine.add_document(3, "dog", DocumentStatus::Actual, &[]),
            Err(HeronError::InvalidArgument(_))
        ));
        assert_eq!(engine.document_count(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_text_without_mutation() {
        let mut engine = SearchEngine::default();
        let result = engine.add_document(1, "bad\u{1}term", DocumentStatus::Actual, &[]);
        assert!(matches!(result, Err(HeronError::InvalidArgument(_))));
        assert_eq!(engine.document_count(), 0);
        assert!(engine.word_frequencies(1).is_empty());
    }

    #[test]
    fn test_stop_words_never_indexed() {
        let stop_words = StopWordSet::from_text("in the").unwrap();
        let mut engine = SearchEngine::new(stop_words);
        engine
            .add_document(42, "cat in the city", DocumentStatus::Actual, &[])
            .unwrap();
        let frequencies = engine.word_frequencies(42);
        assert_eq!(frequencies.len(), 2);
        assert!((frequencies["cat"] - 0.5).abs() < 1e-9);
        assert!((frequencies["city"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_document_ids_ascending() {
        let mut engine = SearchEngine::default();
        for id in [8, 1, 5] {
            engine
                .add_document(id, "cat", DocumentStatus::Actual, &[])
                .unwrap();
        }
        let ids: Vec<DocumentId> = engine.document_ids().collect();
        assert_eq!(ids, vec![1, 5, 8]);
    }
}
