//! Text extraction boundary.
//!
//! The search core never parses binary document formats itself; it
//! consumes page-segmented plain text from a [`TextExtractor`]. The
//! production implementation wraps MuPDF; tests substitute in-memory
//! extractors.

mod pdf;

pub use pdf::MupdfExtractor;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::document::DocumentData;

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open document: {0}")]
    OpenFailed(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability for turning a source document into page-segmented text.
///
/// A document that opens but yields no text produces an empty
/// [`DocumentData`], not an error.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the full page-segmented content of one document.
    async fn extract(&self, source_path: &Path) -> Result<DocumentData, ExtractError>;

    /// Count pages without retaining any content. Used by startup
    /// indexing, which must stay cheap for large corpora.
    fn count_pages(&self, source_path: &Path) -> Result<usize, ExtractError>;
}
