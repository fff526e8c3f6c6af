//! Shared context quality filtering and highlighting.
//!
//! Every strategy's candidates pass through the same filter, so no
//! strategy can emit snippets another would reject.

use regex::Regex;

use super::MatcherConfig;

/// Accept or reject a candidate context.
///
/// Rejects contexts that are too short, have too few words, or are
/// visual noise (nothing but short fragments, typical of table
/// remnants and OCR debris).
pub(crate) fn accept_context(context: &str, config: &MatcherConfig) -> bool {
    let trimmed = context.trim();
    if trimmed.chars().count() < config.min_context_chars {
        return false;
    }
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() < config.min_context_words {
        return false;
    }
    if words.iter().all(|w| w.chars().count() <= 2) {
        return false;
    }
    true
}

/// Cap a context to `max_chars` characters on a char boundary.
pub(crate) fn cap_context(context: &str, max_chars: usize) -> String {
    if context.chars().count() <= max_chars {
        return context.to_string();
    }
    context.chars().take(max_chars).collect()
}

/// Case-insensitive pattern for a literal term, used for highlighting
/// bare-term substring hits.
pub(crate) fn plain_pattern(term: &str) -> Regex {
    // Escaped literals always compile.
    Regex::new(&format!("(?i){}", regex::escape(term))).unwrap()
}

/// Case-insensitive whole-word pattern.
pub(crate) fn word_pattern(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).unwrap()
}

/// Case-insensitive whole-word alternation over several words, so one
/// highlighting pass covers them all.
pub(crate) fn any_word_pattern(words: &[&str]) -> Regex {
    let body = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{body})\b")).unwrap()
}

/// Wrap every pattern occurrence in `<mark>` markers, preserving the
/// original letter casing of the matched text.
pub(crate) fn highlight(context: &str, pattern: &Regex) -> String {
    pattern.replace_all(context, "<mark>$0</mark>").into_owned()
}
