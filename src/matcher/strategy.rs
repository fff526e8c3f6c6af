//! Exact-phrase matching strategies.
//!
//! Strategies are tried in a defined order: flexible pattern per
//! paragraph, then two-word proximity per sentence, then (enhanced
//! mode) substring variants over an alphanumeric strip of the text.

use std::collections::HashSet;

use regex::Regex;

use crate::query::SearchTerm;
use crate::text::normalize;

use super::quality::{accept_context, any_word_pattern, cap_context, highlight, word_pattern};
use super::{sentence_context, Match, MatcherConfig, StrategyKind, TextUnits};

/// One algorithm in the exact-phrase cascade.
pub(crate) trait MatchStrategy {
    /// Run over the preprocessed text and return accepted matches.
    /// A strategy that finds nothing returns an empty vec; it never
    /// fails the request.
    fn run(&self, units: &TextUnits, term: &SearchTerm, config: &MatcherConfig) -> Vec<Match>;
}

/// Strategy 1: phrase words joined by a separator matching any run of
/// whitespace, hyphens, or the invisible characters the normalizer
/// strips, bounded by word edges. Tested per paragraph; at most one
/// accepted match per (term, paragraph).
pub(crate) struct FlexiblePattern;

/// Build the whitespace/hyphen-tolerant pattern for a phrase. The
/// phrase is normalized first so accented words are in the same
/// decomposed form as the text the pattern runs against.
pub(crate) fn flexible_phrase_pattern(phrase: &str) -> Option<Regex> {
    let normalized = normalize(phrase);
    let words: Vec<String> = normalized
        .split_whitespace()
        .map(|w| regex::escape(w))
        .collect();
    if words.is_empty() {
        return None;
    }
    let separator = r"[\s\-\x{00AD}\x{200B}\x{200C}\x{200D}\x{FEFF}]+";
    let body = words.join(separator);
    Regex::new(&format!(r"(?i)\b{body}\b")).ok()
}

impl MatchStrategy for FlexiblePattern {
    fn run(&self, units: &TextUnits, term: &SearchTerm, config: &MatcherConfig) -> Vec<Match> {
        let Some(pattern) = flexible_phrase_pattern(&term.text) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for (index, paragraph) in units.paragraphs.iter().enumerate() {
            if !pattern.is_match(&paragraph.normalized) {
                continue;
            }
            // Locate the specific sentence carrying the hit; a hit
            // that spans a sentence split falls back to the start.
            let sentence_index = paragraph
                .sentences
                .iter()
                .position(|s| pattern.is_match(&s.normalized))
                .unwrap_or(0);
            let context = cap_context(
                &sentence_context(&paragraph.sentences, sentence_index),
                config.max_context_chars,
            );
            if !accept_context(&context, config) {
                continue;
            }
            let highlighted_context = highlight(&context, &pattern);
            matches.push(Match {
                matched_term: term.text.clone(),
                context,
                highlighted_context,
                location: index,
                is_exact: true,
                strategy: StrategyKind::FlexiblePattern,
            });
        }
        matches
    }
}

/// Strategy 2: for two-word phrases only, accept a sentence containing
/// both words as whole words within a bounded character gap. At most
/// one accepted match per term.
pub(crate) struct Proximity {
    pub window: usize,
}

impl MatchStrategy for Proximity {
    fn run(&self, units: &TextUnits, term: &SearchTerm, config: &MatcherConfig) -> Vec<Match> {
        let normalized_term = normalize(&term.text).to_lowercase();
        let words: Vec<&str> = normalized_term.split_whitespace().collect();
        if words.len() != 2 {
            return Vec::new();
        }
        let first = word_pattern(words[0]);
        let second = word_pattern(words[1]);
        let either = any_word_pattern(&[words[0], words[1]]);

        for (index, sentence) in units.sentences.iter().enumerate() {
            let first_hits: Vec<_> = first.find_iter(&sentence.normalized).collect();
            if first_hits.is_empty() {
                continue;
            }
            let second_hits: Vec<_> = second.find_iter(&sentence.normalized).collect();
            // Any distinct, non-overlapping occurrence pair within the
            // window qualifies, not just the first occurrences.
            let paired = first_hits.iter().any(|a| {
                second_hits.iter().any(|b| {
                    let gap = if a.end() <= b.start() {
                        b.start() - a.end()
                    } else if b.end() <= a.start() {
                        a.start() - b.end()
                    } else {
                        return false;
                    };
                    gap <= self.window
                })
            });
            if !paired {
                continue;
            }
            let context = cap_context(
                &sentence_context(&units.sentences, index),
                config.max_context_chars,
            );
            if !accept_context(&context, config) {
                continue;
            }
            // Single pass over both words; a second pass could match
            // inside markup inserted by the first.
            let highlighted_context = highlight(&context, &either);
            return vec![Match {
                matched_term: term.text.clone(),
                context,
                highlighted_context,
                location: index,
                is_exact: true,
                strategy: StrategyKind::Proximity,
            }];
        }
        Vec::new()
    }
}

/// Strategy 3 (enhanced mode only): test the phrase with spaces
/// removed, hyphenated, underscored, and whitespace-collapsed against
/// an alphanumeric-only strip of the whole text, then map the hit
/// offset back into normalized text for a context window.
pub(crate) struct SubstringVariant;

/// Strip to lowercase ASCII alphanumerics, keeping a map from each
/// stripped character back to its byte offset in the source.
fn strip_alphanumeric(text: &str) -> (String, Vec<usize>) {
    let mut stripped = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len());
    for (byte_index, c) in text.char_indices() {
        if c.is_ascii_alphanumeric() {
            stripped.push(c.to_ascii_lowercase());
            offsets.push(byte_index);
        }
    }
    (stripped, offsets)
}

/// Extract `radius` characters either side of a byte anchor.
fn context_window(text: &str, anchor: usize, radius: usize) -> String {
    let chars_before = text[..anchor].chars().count();
    let start = chars_before.saturating_sub(radius);
    text.chars().skip(start).take(radius * 2).collect()
}

impl MatchStrategy for SubstringVariant {
    fn run(&self, units: &TextUnits, term: &SearchTerm, config: &MatcherConfig) -> Vec<Match> {
        let raw = normalize(&term.text);
        let variants = [
            raw.replace(' ', ""),
            raw.replace(' ', "-"),
            raw.replace(' ', "_"),
            raw.split_whitespace().collect::<Vec<_>>().join(" "),
        ];

        let (stripped, offsets) = strip_alphanumeric(&units.normalized_full);
        // Zero-or-more separators: highlights fused, hyphenated and
        // underscored renditions of the phrase alike.
        let highlight_pattern = Regex::new(&format!(
            "(?i){}",
            raw.split_whitespace()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join(r"[\s\-_]*")
        ))
        .ok();

        let mut tried = HashSet::new();
        for variant in variants {
            let needle: String = variant
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            if needle.is_empty() || !tried.insert(needle.clone()) {
                continue;
            }
            let Some(position) = stripped.find(&needle) else {
                continue;
            };
            let anchor = offsets[position];
            let window =
                context_window(&units.normalized_full, anchor, config.variant_context_radius);
            let context = cap_context(window.trim(), config.max_context_chars);
            if !accept_context(&context, config) {
                continue;
            }
            let highlighted_context = match &highlight_pattern {
                Some(pattern) => highlight(&context, pattern),
                None => context.clone(),
            };
            return vec![Match {
                matched_term: term.text.clone(),
                context,
                highlighted_context,
                location: anchor,
                is_exact: true,
                strategy: StrategyKind::SubstringVariant,
            }];
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::preprocess;

    fn term(text: &str) -> SearchTerm {
        SearchTerm::new(text, true)
    }

    #[test]
    fn flexible_pattern_bounds_words() {
        let pattern = flexible_phrase_pattern("head clearance").unwrap();
        assert!(pattern.is_match("the head clearance zone"));
        assert!(pattern.is_match("the head-clearance zone"));
        assert!(pattern.is_match("the head  -  clearance zone"));
        assert!(!pattern.is_match("bulkhead clearance zone"));
        assert!(!pattern.is_match("headclearance zone"));
    }

    #[test]
    fn proximity_ignores_phrases_that_are_not_two_words() {
        let units = preprocess("The head restraint and clearance envelope are related items.");
        let strategy = Proximity { window: 50 };
        let config = MatcherConfig::default();
        assert!(strategy
            .run(&units, &term("head clearance envelope"), &config)
            .is_empty());
        assert!(strategy.run(&units, &term("head"), &config).is_empty());
    }

    #[test]
    fn proximity_considers_later_occurrence_pairs() {
        // The first "head" is far from "clearance"; only a later
        // occurrence pairs up within the window.
        let units = preprocess(
            "The head restraint assembly described in the preceding annex \
             shall not reduce the available head clearance at any station.",
        );
        let strategy = Proximity { window: 20 };
        let config = MatcherConfig::default();
        let matches = strategy.run(&units, &term("head clearance"), &config);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn proximity_rejects_single_occurrence_of_repeated_word() {
        let units =
            preprocess("The safety margin applies to every control surface on the panel.");
        let strategy = Proximity { window: 20 };
        let config = MatcherConfig::default();
        assert!(strategy
            .run(&units, &term("safety safety"), &config)
            .is_empty());
    }

    #[test]
    fn proximity_highlight_ignores_inserted_markup() {
        // "mark" as a query word must not match inside the <mark>
        // tags added for the other word.
        let units = preprocess(
            "The datum mark alignment shall be verified against the \
             reference plate before installation.",
        );
        let strategy = Proximity { window: 20 };
        let config = MatcherConfig::default();
        let matches = strategy.run(&units, &term("datum mark"), &config);
        assert_eq!(matches.len(), 1);
        let highlighted = &matches[0].highlighted_context;
        assert_eq!(highlighted.matches("<mark>").count(), 2);
        assert!(highlighted.contains("<mark>datum</mark> <mark>mark</mark>"));
    }

    #[test]
    fn substring_variant_maps_back_into_normalized_text() {
        let units = preprocess(
            "Crew stations shall preserve the bodyclearance envelope defined \
             in the anthropometric annex of this standard.",
        );
        let strategy = SubstringVariant;
        let config = MatcherConfig::default();
        let matches = strategy.run(&units, &term("body clearance"), &config);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].context.contains("bodyclearance"));
        assert!(matches[0]
            .highlighted_context
            .contains("<mark>bodyclearance</mark>"));
    }

    #[test]
    fn substring_variant_requires_fused_occurrence() {
        let units = preprocess(
            "Crew stations shall preserve the body envelope and the head \
             clearance limits defined in the annex.",
        );
        let strategy = SubstringVariant;
        let config = MatcherConfig::default();
        assert!(strategy
            .run(&units, &term("body clearance"), &config)
            .is_empty());
    }
}
