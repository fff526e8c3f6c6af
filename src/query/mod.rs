//! Query parsing and term expansion.

mod parser;
mod translation;

pub use parser::parse_query;
pub use translation::TranslationTable;

/// A single search term produced from the raw query string.
///
/// Exact terms come from double-quoted phrases and are matched with
/// stricter, position-aware strategies than bare terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub text: String,
    pub is_exact: bool,
}

impl SearchTerm {
    pub fn new(text: impl Into<String>, is_exact: bool) -> Self {
        Self {
            text: text.into(),
            is_exact,
        }
    }

    /// Deduplication key: terms that differ only in letter case are
    /// the same term.
    pub fn dedup_key(&self) -> (String, bool) {
        (self.text.to_lowercase(), self.is_exact)
    }
}
