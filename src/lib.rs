//! # Heron
//!
//! An in-memory full-text search library with TF-IDF ranking.
//!
//! Heron ingests short text documents, keeps a two-way index (inverted
//! for scoring, forward for removal and duplicate detection) and answers
//! ranked queries with inclusion and exclusion terms. Scoring can run
//! sequentially or fan out over a worker pool; both strategies agree up
//! to floating rounding order.
//!
//! ## Features
//!
//! - Whitespace tokenization with control-character validation
//! - Configurable stop-word filtering
//! - TF-IDF relevance with a lock-partitioned parallel accumulator
//! - Top-5 selection with rating tie-breaks
//! - Document removal and exact-term-set duplicate cleanup
//!
//! ## Example
//!
//! ```
//! use heron::{DocumentStatus, SearchEngine, StopWordSet};
//!
//! let stop_words = StopWordSet::from_text("and with").unwrap();
//! let mut engine = SearchEngine::new(stop_words);
//!
//! engine.add_document(0, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! engine.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//!
//! let hits = engine.find_top_documents("fluffy cat -collar").unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 1);
//! ```

pub mod analysis;
mod data;
mod engine;
mod error;
pub mod index;
mod maintenance;
pub mod query;
pub mod search;

// Re-exports for the public API
pub use analysis::stop_words::StopWordSet;
pub use data::{Document, DocumentId, DocumentStatus};
pub use engine::SearchEngine;
pub use error::{HeronError, Result};
pub use query::{Query, QueryParser};
pub use search::{ExecutionStrategy, MAX_RESULT_COUNT, RELEVANCE_EPSILON, ShardedScoreMap};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
