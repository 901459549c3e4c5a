//! Parser turning raw query text into a [`Query`].

use ahash::AHashSet;

use crate::analysis::stop_words::StopWordSet;
use crate::analysis::tokenizer::{is_valid_term, tokenize};
use crate::error::{HeronError, Result};
use crate::query::Query;

/// Parses raw query text into inclusion and exclusion terms.
///
/// A token prefixed with `-` is an exclusion term; the prefix is stripped
/// and the remainder must be a valid term on its own. Stop words are
/// discarded from both sides. When the same term shows up as both an
/// inclusion and an exclusion, the exclusion wins and the term is dropped
/// from the plus side.
///
/// # Example
///
/// ```
/// use heron::{QueryParser, StopWordSet};
///
/// let stop_words = StopWordSet::from_text("the").unwrap();
/// let query = QueryParser::new(&stop_words)
///     .parse("fluffy cat -collar the")
///     .unwrap();
/// assert_eq!(query.plus_terms, vec!["fluffy", "cat"]);
/// assert!(query.minus_terms.contains("collar"));
/// ```
#[derive(Debug)]
pub struct QueryParser<'a> {
    stop_words: &'a StopWordSet,
}

impl<'a> QueryParser<'a> {
    /// Create a parser filtering against the given stop-word set.
    pub fn new(stop_words: &'a StopWordSet) -> Self {
        QueryParser { stop_words }
    }

    /// Parse `raw_query` into a [`Query`].
    ///
    /// Fails with `InvalidArgument` when a token is a bare `-`, keeps a
    /// second leading `-` after stripping (`--term`), or contains control
    /// characters.
    pub fn parse(&self, raw_query: &str) -> Result<Query> {
        let mut plus_terms: Vec<String> = Vec::new();
        let mut plus_seen: AHashSet<&str> = AHashSet::new();
        let mut minus_terms: AHashSet<String> = AHashSet::new();

        for token in tokenize(raw_query) {
            let (term, is_minus) = match token.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (token, false),
            };
            if term.is_empty() || term.starts_with('-') || !is_valid_term(term) {
                return Err(HeronError::invalid_argument(format!(
                    "malformed query term {token:?}"
                )));
            }
            if self.stop_words.contains(term) {
                continue;
            }
            if is_minus {
                minus_terms.insert(term.to_string());
            } else if plus_seen.insert(term) {
                plus_terms.push(term.to_string());
            }
        }

        // A term excluded anywhere in the query never counts as an inclusion.
        plus_terms.retain(|term| !minus_terms.contains(term));

        Ok(Query {
            plus_terms,
            minus_terms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw_query: &str) -> Result<Query> {
        let stop_words = StopWordSet::default();
        QueryParser::new(&stop_words).parse(raw_query)
    }

    #[test]
    fn test_plus_and_minus_terms() {
        let query = parse("fluffy cat -collar").unwrap();
        assert_eq!(query.plus_terms, vec!["fluffy", "cat"]);
        assert_eq!(query.minus_terms.len(), 1);
        assert!(query.minus_terms.contains("collar"));
    }

    #[test]
    fn test_plus_terms_deduplicate_preserving_order() {
        let query = parse("cat dog cat bird dog").unwrap();
        assert_eq!(query.plus_terms, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_stop_words_discarded_from_both_sides() {
        let stop_words = StopWordSet::from_text("the in").unwrap();
        let query = QueryParser::new(&stop_words)
            .parse("the cat -in -collar")
            .unwrap();
        assert_eq!(query.plus_terms, vec!["cat"]);
        assert_eq!(query.minus_terms.len(), 1);
        assert!(query.minus_terms.contains("collar"));
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let query = parse("cat -cat dog").unwrap();
        assert_eq!(query.plus_terms, vec!["dog"]);
        assert!(query.minus_terms.contains("cat"));
    }

    #[test]
    fn test_bare_minus_is_malformed() {
        assert!(matches!(parse("cat -"), Err(HeronError::InvalidArgument(_))));
    }

    #[test]
    fn test_double_minus_is_malformed() {
        assert!(matches!(
            parse("--collar"),
            Err(HeronError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_control_character_is_malformed() {
        assert!(matches!(
            parse("ca\u{3}t"),
            Err(HeronError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_query() {
        let query = parse("").unwrap();
        assert!(query.is_empty());
    }
}
