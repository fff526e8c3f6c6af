//! Normalization pipeline for extracted text.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Invisible formatting characters that PDF extraction leaks into text.
const INVISIBLES: &[char] = &[
    '\u{00AD}', // soft hyphen
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{FEFF}', // byte-order mark
];

static HYPHEN_LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)-[ \t]*\n[ \t]*(\w)").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,;:!?)])").unwrap());
static MISSING_SENTENCE_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?])([A-Z])").unwrap());

/// Canonicalize raw extracted text into a comparable form.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`. Applied to
/// both document content and query terms before matching.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Unicode canonical decomposition, then drop invisible artifacts.
    let decomposed: String = text
        .nfd()
        .filter(|c| !INVISIBLES.contains(c))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect();

    // Unify line-break variants so the join rules below see plain '\n'.
    let unified = decomposed.replace("\r\n", "\n").replace('\r', "\n");

    // A word wrapped with a trailing hyphen is one word; a word wrapped
    // across a bare break is two.
    let joined = HYPHEN_LINE_BREAK.replace_all(&unified, "$1$2");
    let flat = joined.replace(['\n', '\t'], " ");

    let collapsed = WHITESPACE_RUN.replace_all(&flat, " ");
    let tightened = SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1");
    let spaced = MISSING_SENTENCE_GAP.replace_all(&tightened, "$1 $2");

    spaced.trim().to_string()
}
