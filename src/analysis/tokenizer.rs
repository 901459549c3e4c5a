//! Whitespace tokenization and term validation.
//!
//! Both functions are pure and are shared by the document indexing path
//! and the query parsing path.

/// Split `text` on ASCII spaces, dropping empty runs and preserving order.
///
/// Only the space character separates tokens. Other whitespace stays
/// inside a token and is then rejected by [`is_valid_term`], so a document
/// containing a tab or newline fails validation instead of silently
/// producing extra terms.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|token| !token.is_empty())
}

/// A term is valid when none of its characters are control characters
/// (code points below 0x20).
pub fn is_valid_term(term: &str) -> bool {
    !term.chars().any(|c| (c as u32) < 0x20)
}
