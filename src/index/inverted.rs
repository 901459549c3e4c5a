//! Document store with a two-way index.
//!
//! The inverted half maps terms to postings for scoring; the forward half
//! maps documents back to their terms for removal and duplicate detection.
//! All mutation goes through [`InvertedIndex::insert`] and the removal
//! methods so the two halves cannot drift apart.

use std::collections::{BTreeSet, HashMap};

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;

use crate::data::{DocumentId, DocumentStatus};
use crate::error::{HeronError, Result};

/// Per-document metadata recorded at insert time.
#[derive(Debug, Clone, Copy)]
struct DocumentMeta {
    rating: i32,
    status: DocumentStatus,
}

/// In-memory document store keeping the inverted and forward index halves
/// exactly in sync.
///
/// The store is single-writer: `insert` and the removal methods must be
/// externally serialized, and concurrent reads are only safe while no
/// mutation is in flight. The parallel scoring and matching paths rely on
/// that read-only guarantee.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// term -> (document id -> term frequency).
    term_postings: AHashMap<String, AHashMap<DocumentId, f64>>,
    /// document id -> (term -> term frequency); mirror of `term_postings`.
    doc_terms: AHashMap<DocumentId, AHashMap<String, f64>>,
    /// document id -> rating and status.
    documents: AHashMap<DocumentId, DocumentMeta>,
    /// Live ids in ascending order.
    live_ids: BTreeSet<DocumentId>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Insert a document given its surviving (validated, stop-word free)
    /// terms.
    ///
    /// Term frequency is `occurrences / terms.len()`, so the frequencies
    /// of one document always sum to 1.0 within floating tolerance. A
    /// document with no terms is legal: it becomes live with an empty
    /// forward row and no postings.
    ///
    /// Fails with `InvalidArgument` when `id` is negative or already live;
    /// the index is untouched in that case.
    pub fn insert(
        &mut self,
        id: DocumentId,
        terms: &[&str],
        rating: i32,
        status: DocumentStatus,
    ) -> Result<()> {
        if id < 0 {
            return Err(HeronError::invalid_argument(format!(
                "document id {id} is negative"
            )));
        }
        if self.live_ids.contains(&id) {
            return Err(HeronError::invalid_argument(format!(
                "document id {id} is already in the index"
            )));
        }

        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for &term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }

        let total = terms.len() as f64;
        let mut row: AHashMap<String, f64> = AHashMap::with_capacity(counts.len());
        for (term, count) in counts {
            let frequency = count as f64 / total;
            self.term_postings
                .entry(term.to_string())
                .or_default()
                .insert(id, frequency);
            row.insert(term.to_string(), frequency);
        }

        debug!("indexed document {id}: {} distinct terms", row.len());
        self.doc_terms.insert(id, row);
        self.documents.insert(id, DocumentMeta { rating, status });
        self.live_ids.insert(id);
        Ok(())
    }

    /// Remove a live document and every posting that mentions it.
    ///
    /// Term entries whose posting set becomes empty are dropped entirely.
    /// Fails with `NotFound` when `id` is not live, leaving the index
    /// untouched.
    pub fn remove(&mut self, id: DocumentId) -> Result<()> {
        if !self.live_ids.remove(&id) {
            return Err(HeronError::NotFound(id));
        }
        let row = self.doc_terms.remove(&id).unwrap_or_default();
        for term in row.keys() {
            let emptied = match self.term_postings.get_mut(term) {
                Some(postings) => {
                    postings.remove(&id);
                    postings.is_empty()
                }
                None => false,
            };
            if emptied {
                self.term_postings.remove(term);
            }
        }
        self.documents.remove(&id);
        debug!("removed document {id}");
        Ok(())
    }

    /// Parallel variant of [`remove`](Self::remove).
    ///
    /// Postings are deleted by walking the inverted half with a worker
    /// pool; every worker owns a disjoint set of term entries, so no
    /// synchronization is needed. The caller still has to serialize this
    /// against all other mutation, exactly as for the sequential variant.
    pub fn remove_parallel(&mut self, id: DocumentId) -> Result<()> {
        if !self.live_ids.remove(&id) {
            return Err(HeronError::NotFound(id));
        }
        let row = self.doc_terms.remove(&id).unwrap_or_default();
        self.term_postings
            .par_iter_mut()
            .for_each(|(term, postings)| {
                if row.contains_key(term) {
                    postings.remove(&id);
                }
            });
        for term in row.keys() {
            if self.term_postings.get(term).is_some_and(|p| p.is_empty()) {
                self.term_postings.remove(term);
            }
        }
        self.documents.remove(&id);
        debug!("removed document {id}");
        Ok(())
    }

    /// The forward-index row of `id` as a freshly built map.
    ///
    /// Unknown or removed ids yield an empty map rather than an error, so
    /// read-only callers racing against removal never have to handle a
    /// failure. Every call builds a new value; nothing is shared.
    pub fn word_frequencies(&self, id: DocumentId) -> HashMap<String, f64> {
        match self.doc_terms.get(&id) {
            Some(row) => row
                .iter()
                .map(|(term, frequency)| (term.clone(), *frequency))
                .collect(),
            None => HashMap::new(),
        }
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.live_ids.len()
    }

    /// Whether `id` is currently live.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.live_ids.contains(&id)
    }

    /// Status and rating of a live document.
    pub fn document_meta(&self, id: DocumentId) -> Option<(DocumentStatus, i32)> {
        self.documents
            .get(&id)
            .map(|meta| (meta.status, meta.rating))
    }

    /// The postings of `term`, if any document contains it.
    pub fn postings(&self, term: &str) -> Option<&AHashMap<DocumentId, f64>> {
        self.term_postings.get(term)
    }

    /// Number of live documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.term_postings.get(term).map_or(0, |postings| postings.len())
    }

    /// Whether `term` has a posting for `id`.
    pub fn has_posting(&self, term: &str, id: DocumentId) -> bool {
        self.term_postings
            .get(term)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// Inverse document frequency of `term`:
    /// `ln(document_count / document_frequency)`.
    ///
    /// Callers must only ask for terms that have at least one posting;
    /// scoring skips absent terms before ever computing their IDF.
    pub fn idf(&self, term: &str) -> f64 {
        let document_frequency = self.document_frequency(term);
        debug_assert!(document_frequency > 0, "idf of unindexed term {term:?}");
        (self.document_count() as f64 / document_frequency as f64).ln()
    }

    /// Live document ids in ascending order.
    pub fn iter_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.live_ids.iter().copied()
    }

    /// The distinct terms of a document, frequencies ignored.
    ///
    /// Unknown ids yield an empty set.
    pub fn term_set(&self, id: DocumentId) -> BTreeSet<&str> {
        match self.doc_terms.get(&id) {
            Some(row) => row.keys().map(String::as_str).collect(),
            None => BTreeSet::new(),
        }
    }
}
