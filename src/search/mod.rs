//! Search coordination and result ranking.
//!
//! One search request flows one way: raw query → parsed terms →
//! translated terms → per-document matcher output → ranked result
//! rows. The service owns the only persistent state: the read-only
//! metadata index built at startup and the bounded document cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::document::{build_metadata_index, DocumentCache, DocumentMetadata};
use crate::extract::TextExtractor;
use crate::matcher::{Match, PhraseMatcher};
use crate::query::{parse_query, TranslationTable};

/// Search-level errors surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query is required")]
    EmptyQuery,

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

/// One ranked search hit, in the legacy wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub document: String,
    pub filename: String,
    pub section_title: String,
    pub section_number: String,
    pub page: u32,
    pub matched_term: String,
    pub context: String,
    pub highlighted_context: String,
}

/// Complete outcome of one search request.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<ResultRow>,
    pub search_terms: Vec<String>,
    pub translated_terms: Vec<String>,
    /// Rows found before the result cap was applied.
    pub total_matches: usize,
}

/// Per-section dump for the diagnostics endpoint.
#[derive(Debug, Serialize)]
pub struct SectionDump {
    pub title: String,
    pub number: String,
    pub page: u32,
    pub preview: String,
    pub term_containment: Vec<TermContainment>,
}

#[derive(Debug, Serialize)]
pub struct TermContainment {
    pub term: String,
    pub is_exact: bool,
    pub contained: bool,
}

/// Per-section matcher trace for the diagnostics endpoint.
#[derive(Debug, Serialize)]
pub struct SectionTrace {
    pub section_number: String,
    pub page: u32,
    pub base_matches: Vec<Match>,
    pub enhanced_matches: Vec<Match>,
}

/// Orchestrates parsing, translation, cache loading, matching and
/// ranking for search requests.
pub struct SearchService {
    index: HashMap<String, DocumentMetadata>,
    cache: DocumentCache,
    matcher: PhraseMatcher,
    translations: TranslationTable,
    max_results: usize,
}

impl SearchService {
    pub fn new(
        index: HashMap<String, DocumentMetadata>,
        extractor: Arc<dyn TextExtractor>,
        cache_capacity: usize,
        max_results: usize,
    ) -> Self {
        Self {
            index,
            cache: DocumentCache::new(extractor, cache_capacity),
            matcher: PhraseMatcher::default(),
            translations: TranslationTable::builtin(),
            max_results,
        }
    }

    /// Scan the documents directory and build a ready-to-serve
    /// service. A missing directory yields an empty index, not an
    /// error.
    pub fn initialize(
        documents_dir: &Path,
        extractor: Arc<dyn TextExtractor>,
        cache_capacity: usize,
        max_results: usize,
    ) -> Self {
        let index = build_metadata_index(documents_dir, extractor.as_ref());
        Self::new(index, extractor, cache_capacity, max_results)
    }

    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// All indexed documents, in stable filename order.
    pub fn documents(&self) -> Vec<&DocumentMetadata> {
        let mut documents: Vec<&DocumentMetadata> = self.index.values().collect();
        documents.sort_by(|a, b| a.filename.cmp(&b.filename));
        documents
    }

    /// Run one search request end to end.
    ///
    /// Unknown filenames in `selected` are silently skipped; documents
    /// whose extraction fails are skipped with a warning and the
    /// search continues over the rest.
    pub async fn search(
        &self,
        query: &str,
        selected: &[String],
        language: &str,
    ) -> Result<SearchOutcome, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let parsed = parse_query(query);
        let terms = self.translations.expand(&parsed, language);
        let search_terms: Vec<String> = parsed.iter().map(|t| t.text.clone()).collect();
        let translated_terms: Vec<String> = terms.iter().map(|t| t.text.clone()).collect();
        let has_exact = terms.iter().any(|t| t.is_exact);

        let mut rows = Vec::new();
        for metadata in self.target_documents(selected) {
            let data = match self.cache.get(metadata).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", metadata.filename, e);
                    continue;
                }
            };

            for section in &data.sections {
                let text = section.content();
                let mut matches = self.matcher.find_matches(&text, &terms);
                if matches.is_empty() && has_exact {
                    matches = self.matcher.find_matches_enhanced(&text, &terms);
                }
                for m in matches {
                    rows.push(ResultRow {
                        document: data.title.clone(),
                        filename: metadata.filename.clone(),
                        section_title: section.title.clone(),
                        section_number: section.number.clone(),
                        page: section.page,
                        matched_term: m.matched_term,
                        context: m.context,
                        highlighted_context: m.highlighted_context,
                    });
                }
            }
        }

        let total_matches = rows.len();
        rank_results(&mut rows);
        rows.truncate(self.max_results);

        Ok(SearchOutcome {
            results: rows,
            search_terms,
            translated_terms,
            total_matches,
        })
    }

    /// Section dump with per-term containment, for diagnostics.
    pub async fn debug_sections(
        &self,
        filename: &str,
        query: &str,
        language: &str,
    ) -> Result<Vec<SectionDump>, SearchError> {
        let metadata = self
            .index
            .get(filename)
            .ok_or_else(|| SearchError::DocumentNotFound(filename.to_string()))?;
        let data = self
            .cache
            .get(metadata)
            .await
            .map_err(|e| SearchError::ExtractionFailed(e.to_string()))?;

        let terms = self.translations.expand(&parse_query(query), language);
        let dumps = data
            .sections
            .iter()
            .map(|section| {
                let text = crate::text::normalize(&section.content()).to_lowercase();
                let term_containment = terms
                    .iter()
                    .map(|term| TermContainment {
                        term: term.text.clone(),
                        is_exact: term.is_exact,
                        contained: text
                            .contains(&crate::text::normalize(&term.text).to_lowercase()),
                    })
                    .collect();
                SectionDump {
                    title: section.title.clone(),
                    number: section.number.clone(),
                    page: section.page,
                    preview: text.chars().take(200).collect(),
                    term_containment,
                }
            })
            .collect();
        Ok(dumps)
    }

    /// Per-section matcher trace across both passes, for diagnostics.
    pub async fn debug_trace(
        &self,
        filename: &str,
        query: &str,
        language: &str,
    ) -> Result<Vec<SectionTrace>, SearchError> {
        let metadata = self
            .index
            .get(filename)
            .ok_or_else(|| SearchError::DocumentNotFound(filename.to_string()))?;
        let data = self
            .cache
            .get(metadata)
            .await
            .map_err(|e| SearchError::ExtractionFailed(e.to_string()))?;

        let terms = self.translations.expand(&parse_query(query), language);
        let traces = data
            .sections
            .iter()
            .map(|section| {
                let text = section.content();
                SectionTrace {
                    section_number: section.number.clone(),
                    page: section.page,
                    base_matches: self.matcher.find_matches(&text, &terms),
                    enhanced_matches: self.matcher.find_matches_enhanced(&text, &terms),
                }
            })
            .collect();
        Ok(traces)
    }

    fn target_documents(&self, selected: &[String]) -> Vec<&DocumentMetadata> {
        let mut targets: Vec<&DocumentMetadata> = if selected.is_empty() {
            self.index.values().collect()
        } else {
            selected
                .iter()
                .filter_map(|name| self.index.get(name))
                .collect()
        };
        targets.sort_by(|a, b| a.filename.cmp(&b.filename));
        targets
    }
}

/// Numeric section ordering: unparseable section numbers sort last.
fn section_order_key(number: &str) -> u64 {
    number.trim().parse().unwrap_or(u64::MAX)
}

/// Stable rank: document title ascending, then numeric section order.
fn rank_results(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| {
        a.document.cmp(&b.document).then_with(|| {
            section_order_key(&a.section_number).cmp(&section_order_key(&b.section_number))
        })
    });
}
