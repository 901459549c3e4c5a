//! Lock-partitioned score accumulator for parallel relevance scoring.

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::data::DocumentId;

/// Number of shards used by the parallel scoring path.
pub(crate) const SHARD_COUNT: usize = 50;

/// A concurrent map from document id to accumulated relevance.
///
/// The key space is partitioned over a fixed number of independently
/// guarded shards keyed by `id mod shard_count`: increments landing in
/// different shards never contend, and increments landing in the same
/// shard are serialized by that shard's mutex, so no update is lost under
/// any interleaving. Merging back into an ordinary map is a
/// single-threaded reduction over the shards; since addition commutes,
/// the merged totals match fully sequential accumulation up to floating
/// rounding order.
#[derive(Debug)]
pub struct ShardedScoreMap {
    shards: Vec<Mutex<AHashMap<DocumentId, f64>>>,
}

impl ShardedScoreMap {
    /// Create a map partitioned into `shard_count` shards.
    ///
    /// `shard_count` must be at least 1.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ShardedScoreMap {
            shards: (0..shard_count).map(|_| Mutex::new(AHashMap::new())).collect(),
        }
    }

    /// Add `delta` to the accumulated score of `id`.
    ///
    /// Safe to call from any number of threads concurrently.
    pub fn add(&self, id: DocumentId, delta: f64) {
        let shard = &self.shards[id.rem_euclid(self.shards.len() as i64) as usize];
        *shard.lock().entry(id).or_insert(0.0) += delta;
    }

    /// Merge every shard into one ordinary map.
    pub fn into_map(self) -> AHashMap<DocumentId, f64> {
        let mut merged = AHashMap::new();
        for shard in self.shards {
            for (id, score) in shard.into_inner() {
                *merged.entry(id).or_insert(0.0) += score;
            }
        }
        merged
    }
}
