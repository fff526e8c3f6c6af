//! Core document types.

use std::path::PathBuf;

use serde::Serialize;

/// Lightweight per-document metadata, built once at startup without
/// loading page content. Immutable for the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub title: String,
    pub sections_count: usize,
    #[serde(skip)]
    pub source_path: PathBuf,
}

/// One searchable unit of content, one per extracted page.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    /// Section number as printed ("1", "2", ...); kept as a string
    /// because extracted documents also carry dotted numbers.
    pub number: String,
    /// 1-indexed page number, monotonically increasing per document.
    pub page: u32,
    pub content_lines: Vec<String>,
}

impl Section {
    /// The section's text as one string, the form the matcher takes.
    pub fn content(&self) -> String {
        self.content_lines.join("\n")
    }
}

/// Fully extracted document content. Owned by the cache once created
/// and immutable for the lifetime of its slot.
#[derive(Debug, Clone)]
pub struct DocumentData {
    pub title: String,
    pub sections: Vec<Section>,
    pub full_text: String,
}

impl DocumentData {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
