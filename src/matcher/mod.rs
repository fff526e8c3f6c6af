//! Multi-strategy phrase matching over normalized document text.
//!
//! Bare terms are matched as case-insensitive substrings per sentence.
//! Exact (quoted) phrases go through an ordered cascade of strategies:
//! a flexible whitespace/hyphen-tolerant pattern per paragraph, a
//! two-word proximity fallback per sentence, and (enhanced mode only)
//! a substring-variant pass over an alphanumeric strip of the whole
//! text. All candidates flow through one shared quality filter so the
//! strategies cannot drift apart on what counts as a usable snippet.

mod quality;
mod strategy;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::query::SearchTerm;
use crate::text::normalize;

use quality::{accept_context, cap_context, highlight, plain_pattern};
use strategy::{FlexiblePattern, MatchStrategy, Proximity, SubstringVariant};

/// Which algorithm produced a match. Carried through to the debug
/// trace endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Sentence,
    FlexiblePattern,
    Proximity,
    SubstringVariant,
}

/// A single hit of one term inside one text, before it is folded into
/// a result row.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub matched_term: String,
    pub context: String,
    pub highlighted_context: String,
    /// Sentence or paragraph index, or a character offset for
    /// substring-variant hits.
    pub location: usize,
    pub is_exact: bool,
    pub strategy: StrategyKind,
}

/// Tunable matching thresholds.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Max character gap between the two words of a phrase (base pass).
    pub proximity_window: usize,
    /// Max character gap in the enhanced pass.
    pub enhanced_proximity_window: usize,
    /// Contexts shorter than this are rejected as noise.
    pub min_context_chars: usize,
    /// Contexts with fewer words than this are rejected.
    pub min_context_words: usize,
    /// Returned context is capped to this many characters.
    pub max_context_chars: usize,
    /// Context radius for substring-variant hits.
    pub variant_context_radius: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            proximity_window: 20,
            enhanced_proximity_window: 50,
            min_context_chars: 20,
            min_context_words: 3,
            max_context_chars: 500,
            variant_context_radius: 100,
        }
    }
}

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// One sentence, kept in original and normalized form. Matching runs
/// against the normalized text; context is built from it as well since
/// normalization only repairs artifacts.
#[derive(Debug)]
pub(crate) struct Unit {
    pub normalized: String,
    pub normalized_lower: String,
}

/// One paragraph with its own sentence units.
#[derive(Debug)]
pub(crate) struct Paragraph {
    pub normalized: String,
    pub sentences: Vec<Unit>,
}

/// Preprocessed view of one section's text.
#[derive(Debug)]
pub(crate) struct TextUnits {
    pub sentences: Vec<Unit>,
    pub paragraphs: Vec<Paragraph>,
    pub normalized_full: String,
}

fn split_sentences(text: &str) -> Vec<Unit> {
    SENTENCE_BREAK
        .split(text)
        .filter_map(|raw| {
            let normalized = normalize(raw);
            if normalized.is_empty() {
                None
            } else {
                let normalized_lower = normalized.to_lowercase();
                Some(Unit {
                    normalized,
                    normalized_lower,
                })
            }
        })
        .collect()
}

pub(crate) fn preprocess(text: &str) -> TextUnits {
    let sentences = split_sentences(text);
    let paragraphs = PARAGRAPH_BREAK
        .split(text)
        .filter_map(|raw| {
            let normalized = normalize(raw);
            if normalized.is_empty() {
                None
            } else {
                Some(Paragraph {
                    sentences: split_sentences(raw),
                    normalized,
                })
            }
        })
        .collect();

    TextUnits {
        sentences,
        paragraphs,
        normalized_full: normalize(text),
    }
}

/// Context for a hit in sentence `index`: the sentence plus one
/// neighbor on each side.
pub(crate) fn sentence_context(sentences: &[Unit], index: usize) -> String {
    let start = index.saturating_sub(1);
    let end = (index + 2).min(sentences.len());
    sentences[start..end]
        .iter()
        .map(|u| u.normalized.as_str())
        .collect::<Vec<_>>()
        .join(". ")
}

/// Finds term occurrences in one section's text.
pub struct PhraseMatcher {
    config: MatcherConfig,
}

impl Default for PhraseMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl PhraseMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Base pass: bare terms by sentence substring, exact phrases via
    /// the strategy cascade, stopping at the first strategy that
    /// accepts a match for a term.
    pub fn find_matches(&self, text: &str, terms: &[SearchTerm]) -> Vec<Match> {
        let units = preprocess(text);
        let mut matches = Vec::new();

        for term in terms {
            if term.is_exact {
                let cascade: [&dyn MatchStrategy; 2] = [
                    &FlexiblePattern,
                    &Proximity {
                        window: self.config.proximity_window,
                    },
                ];
                for strategy in cascade {
                    let found = strategy.run(&units, term, &self.config);
                    if !found.is_empty() {
                        matches.extend(found);
                        break;
                    }
                }
            } else {
                matches.extend(self.match_plain_term(&units, term));
            }
        }

        matches
    }

    /// Enhanced pass: accumulates candidates across all strategies
    /// (wider proximity window, plus the substring-variant pass)
    /// before filtering and deduplicating. Used as a fallback when the
    /// base pass found nothing for a section containing exact terms.
    pub fn find_matches_enhanced(&self, text: &str, terms: &[SearchTerm]) -> Vec<Match> {
        let units = preprocess(text);
        let mut matches = Vec::new();

        for term in terms {
            if term.is_exact {
                let cascade: [&dyn MatchStrategy; 3] = [
                    &FlexiblePattern,
                    &Proximity {
                        window: self.config.enhanced_proximity_window,
                    },
                    &SubstringVariant,
                ];
                let mut candidates = Vec::new();
                for strategy in cascade {
                    candidates.extend(strategy.run(&units, term, &self.config));
                }
                // The same hit surfaced by two strategies counts once.
                let mut seen = std::collections::HashSet::new();
                matches.extend(
                    candidates
                        .into_iter()
                        .filter(|m| seen.insert((m.matched_term.clone(), m.context.clone()))),
                );
            } else {
                matches.extend(self.match_plain_term(&units, term));
            }
        }

        matches
    }

    fn match_plain_term(&self, units: &TextUnits, term: &SearchTerm) -> Vec<Match> {
        // Pattern and needle come from the normalized term so both
        // sides of the comparison are in decomposed form.
        let needle = normalize(&term.text).to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let pattern = plain_pattern(&needle);

        let mut matches = Vec::new();
        for (index, sentence) in units.sentences.iter().enumerate() {
            if !sentence.normalized_lower.contains(&needle) {
                continue;
            }
            let context = cap_context(
                &sentence_context(&units.sentences, index),
                self.config.max_context_chars,
            );
            if !accept_context(&context, &self.config) {
                continue;
            }
            let highlighted_context = highlight(&context, &pattern);
            matches.push(Match {
                matched_term: term.text.clone(),
                context,
                highlighted_context,
                location: index,
                is_exact: false,
                strategy: StrategyKind::Sentence,
            });
        }
        matches
    }
}
