//! Immutable stop-word set, configured once at engine construction.

use ahash::AHashSet;

use crate::analysis::tokenizer::{is_valid_term, tokenize};
use crate::error::{HeronError, Result};

/// A set of terms excluded from indexing and querying.
///
/// The set is built once and never mutated afterwards; membership testing
/// is the only operation the rest of the library uses. Construction
/// validates every term, so a stop word carrying control characters fails
/// the whole construction instead of poisoning the index later.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: AHashSet<String>,
}

impl StopWordSet {
    /// Build a stop-word set from whitespace-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_terms(tokenize(text))
    }

    /// Build a stop-word set from a collection of terms.
    ///
    /// Empty terms are skipped, duplicates collapse into one entry, and
    /// any term failing validation aborts construction with
    /// `InvalidArgument`.
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = AHashSet::new();
        for term in terms {
            let term = term.as_ref();
            if term.is_empty() {
                continue;
            }
            if !is_valid_term(term) {
                return Err(HeronError::invalid_argument(format!(
                    "stop word {term:?} contains a control character"
                )));
            }
            words.insert(term.to_string());
        }
        Ok(StopWordSet { words })
    }

    /// Whether `term` is a stop word.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set holds no stop words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
