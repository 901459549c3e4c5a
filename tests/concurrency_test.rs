use heron::{DocumentId, DocumentStatus, ExecutionStrategy, SearchEngine, ShardedScoreMap};

fn sample_engine() -> SearchEngine {
    let mut engine = SearchEngine::default();
    let docs: [(DocumentId, &str, i32); 6] = [
        (0, "cat dog bird", 3),
        (1, "cat cat fish", 1),
        (2, "dog fish fox", 4),
        (3, "owl cat", 1),
        (4, "fox owl owl", 5),
        (5, "bird bird cat dog", 2),
    ];
    for (id, text, rating) in docs {
        engine
            .add_document(id, text, DocumentStatus::Actual, &[rating])
            .unwrap();
    }
    engine
}

#[test]
fn test_parallel_search_matches_sequential() {
    let engine = sample_engine();
    for raw_query in ["cat fish -owl", "dog", "bird fox", "cat -dog -fox"] {
        let sequential = engine
            .find_top_documents_by(ExecutionStrategy::Sequential, raw_query, |_, _, _| true)
            .unwrap();
        let parallel = engine
            .find_top_documents_by(ExecutionStrategy::Parallel, raw_query, |_, _, _| true)
            .unwrap();

        let mut lhs: Vec<(DocumentId, f64)> =
            sequential.iter().map(|hit| (hit.id, hit.relevance)).collect();
        let mut rhs: Vec<(DocumentId, f64)> =
            parallel.iter().map(|hit| (hit.id, hit.relevance)).collect();
        lhs.sort_by_key(|(id, _)| *id);
        rhs.sort_by_key(|(id, _)| *id);

        assert_eq!(lhs.len(), rhs.len(), "query {raw_query:?} diverged");
        for ((lhs_id, lhs_relevance), (rhs_id, rhs_relevance)) in lhs.iter().zip(&rhs) {
            assert_eq!(lhs_id, rhs_id, "query {raw_query:?} diverged");
            assert!((lhs_relevance - rhs_relevance).abs() < 1e-9);
        }
    }
}

#[test]
fn test_parallel_search_respects_predicate() {
    let engine = sample_engine();
    let hits = engine
        .find_top_documents_by(ExecutionStrategy::Parallel, "cat dog", |id, _, _| id >= 2)
        .unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|hit| hit.id >= 2));
}

#[test]
fn test_parallel_match_returns_same_terms_sorted() {
    let engine = sample_engine();
    let (sequential, _) = engine.match_document("bird dog cat fox", 5).unwrap();
    let (parallel, status) = engine
        .match_document_with(ExecutionStrategy::Parallel, "bird dog cat fox", 5)
        .unwrap();

    // Sequential keeps query order; parallel sorts.
    assert_eq!(sequential, vec!["bird", "dog", "cat"]);
    assert_eq!(parallel, vec!["bird", "cat", "dog"]);
    assert_eq!(status, DocumentStatus::Actual);

    let mut sorted = sequential.clone();
    sorted.sort();
    assert_eq!(sorted, parallel);
}

#[test]
fn test_parallel_match_exclusion_short_circuits() {
    let engine = sample_engine();
    let (matched, status) = engine
        .match_document_with(ExecutionStrategy::Parallel, "cat -owl", 3)
        .unwrap();
    assert!(matched.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
}

#[test]
fn test_sharded_map_concurrent_increments() {
    let scores = ShardedScoreMap::new(50);
    let writers: usize = 4;
    let documents: usize = 25;
    std::thread::scope(|scope| {
        for writer in 0..writers {
            let scores = &scores;
            scope.spawn(move || {
                for id in 0..documents {
                    scores.add(id as DocumentId, (writer + 1) as f64);
                }
            });
        }
    });
    let merged = scores.into_map();
    assert_eq!(merged.len(), documents);
    let expected_per_id = (1..=writers).sum::<usize>() as f64;
    for id in 0..documents {
        assert!((merged[&(id as DocumentId)] - expected_per_id).abs() < 1e-9);
    }
}
