//! PDF text extraction using MuPDF.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mupdf::Document;

use crate::document::{DocumentData, Section};

use super::{ExtractError, TextExtractor};

/// MuPDF-backed extractor producing one section per non-empty page.
#[derive(Debug, Clone, Default)]
pub struct MupdfExtractor;

impl MupdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<Document, ExtractError> {
        let path_str = path.to_string_lossy();
        Document::open(&*path_str).map_err(|e| ExtractError::OpenFailed(e.to_string()))
    }

    /// Blocking extraction body; MuPDF work runs off the async runtime.
    fn extract_blocking(path: PathBuf) -> Result<DocumentData, ExtractError> {
        let doc = Self::open(&path)?;
        let page_count = doc
            .page_count()
            .map_err(|e| ExtractError::ExtractionFailed(e.to_string()))? as usize;

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mut sections = Vec::with_capacity(page_count);
        let mut full_text = String::new();

        for page_index in 0..page_count {
            let page = match doc.load_page(page_index as i32) {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Skipping page {} of {}: {}", page_index + 1, title, e);
                    continue;
                }
            };
            let text = match page.to_text() {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "No text from page {} of {}: {}",
                        page_index + 1,
                        title,
                        e
                    );
                    continue;
                }
            };
            if text.trim().is_empty() {
                continue;
            }

            let page_number = (page_index + 1) as u32;
            sections.push(Section {
                title: format!("Page {page_number}"),
                number: page_number.to_string(),
                page: page_number,
                content_lines: text.lines().map(str::to_string).collect(),
            });
            full_text.push_str(&text);
            full_text.push('\n');
        }

        if sections.is_empty() {
            tracing::warn!("No extractable text in {}", title);
        }

        Ok(DocumentData {
            title,
            sections,
            full_text,
        })
    }
}

#[async_trait]
impl TextExtractor for MupdfExtractor {
    async fn extract(&self, source_path: &Path) -> Result<DocumentData, ExtractError> {
        let path = source_path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_blocking(path))
            .await
            .map_err(|e| ExtractError::ExtractionFailed(format!("extraction task failed: {e}")))?
    }

    fn count_pages(&self, source_path: &Path) -> Result<usize, ExtractError> {
        let doc = Self::open(source_path)?;
        let count = doc
            .page_count()
            .map_err(|e| ExtractError::ExtractionFailed(e.to_string()))?;
        Ok(count as usize)
    }
}
