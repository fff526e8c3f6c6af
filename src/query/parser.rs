//! Raw query string parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::SearchTerm;

static QUOTED_PHRASE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());

/// Split a raw query into quoted exact phrases and bare terms.
///
/// Exact phrases come first in quote order, then bare terms in the
/// order they appear outside quotes. No deduplication happens here;
/// that is done after translation expansion.
pub fn parse_query(query: &str) -> Vec<SearchTerm> {
    let mut terms = Vec::new();

    for capture in QUOTED_PHRASE.captures_iter(query) {
        let phrase = capture[1].trim();
        if !phrase.is_empty() {
            terms.push(SearchTerm::new(phrase, true));
        }
    }

    let remainder = QUOTED_PHRASE.replace_all(query, " ");
    for word in remainder.split_whitespace() {
        terms.push(SearchTerm::new(word, false));
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_phrases_and_bare_terms() {
        let terms = parse_query(r#""accidental activation" safety"#);
        assert_eq!(
            terms,
            vec![
                SearchTerm::new("accidental activation", true),
                SearchTerm::new("safety", false),
            ]
        );
    }

    #[test]
    fn exact_phrases_come_first_regardless_of_position() {
        let terms = parse_query(r#"noise "head clearance" lighting"#);
        assert_eq!(
            terms,
            vec![
                SearchTerm::new("head clearance", true),
                SearchTerm::new("noise", false),
                SearchTerm::new("lighting", false),
            ]
        );
    }

    #[test]
    fn discards_empty_and_whitespace_only_phrases() {
        let terms = parse_query(r#""" "   " control"#);
        assert_eq!(terms, vec![SearchTerm::new("control", false)]);
    }

    #[test]
    fn trims_whitespace_inside_quotes() {
        let terms = parse_query(r#"" body clearance ""#);
        assert_eq!(terms, vec![SearchTerm::new("body clearance", true)]);
    }

    #[test]
    fn no_dedup_at_parse_time() {
        let terms = parse_query("safety safety");
        assert_eq!(terms.len(), 2);
    }
}
