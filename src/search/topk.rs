//! Selection of the best-scoring search results.

use std::cmp::Ordering;

use crate::data::Document;

/// Maximum number of hits a ranked search returns.
pub const MAX_RESULT_COUNT: usize = 5;

/// Two relevances closer than this are considered equal and fall back to
/// the rating tie-break.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Sort hits by descending relevance, breaking near-ties by descending
/// rating, and truncate to [`MAX_RESULT_COUNT`].
///
/// The sort is stable with respect to this comparator only; the relative
/// order of hits equal in both relevance and rating is unspecified.
pub(crate) fn select_top(mut hits: Vec<Document>) -> Vec<Document> {
    hits.sort_by(compare_hits);
    hits.truncate(MAX_RESULT_COUNT);
    hits
}

fn compare_hits(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance
            .partial_cmp(&lhs.relevance)
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: i64, relevance: f64, rating: i32) -> Document {
        Document {
            id,
            relevance,
            rating,
        }
    }

    #[test]
    fn test_sorts_by_relevance_descending() {
        let top = select_top(vec![hit(1, 0.1, 0), hit(2, 0.9, 0), hit(3, 0.5, 0)]);
        let ids: Vec<i64> = top.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_near_ties_break_by_rating() {
        let top = select_top(vec![
            hit(1, 0.5, 2),
            hit(2, 0.5 + 1e-7, 9),
            hit(3, 0.5 - 1e-7, 4),
        ]);
        let ids: Vec<i64> = top.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_distinct_relevances_ignore_rating() {
        let top = select_top(vec![hit(1, 0.2, 100), hit(2, 0.8, -100)]);
        let ids: Vec<i64> = top.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let hits = (0..20).map(|i| hit(i, i as f64, 0)).collect();
        let top = select_top(hits);
        assert_eq!(top.len(), MAX_RESULT_COUNT);
        assert_eq!(top[0].id, 19);
    }
}
