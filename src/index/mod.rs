//! The inverted index and its forward-index mirror.

pub mod inverted;

pub use inverted::InvertedIndex;
