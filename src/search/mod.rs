//! Relevance scoring and result selection.

pub(crate) mod accumulator;
pub mod concurrent;
pub mod topk;

pub use concurrent::ShardedScoreMap;
pub use topk::{MAX_RESULT_COUNT, RELEVANCE_EPSILON};

/// How a single search, match or removal call executes.
///
/// The engine spawns no threads of its own; `Parallel` runs the
/// independent units of a call (one plus-term, one exclusion check, one
/// forward-row term) on the rayon worker pool, while `Sequential` stays on
/// the calling thread. Both produce the same results up to floating
/// rounding order and the documented match-ordering caveat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run on the calling thread.
    #[default]
    Sequential,
    /// Fan independent work units out over the rayon pool.
    Parallel,
}
