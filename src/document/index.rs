//! Startup metadata indexing.
//!
//! Opens each source document just long enough to count pages; no
//! content is retained. The resulting index is read-only for the
//! process lifetime.

use std::collections::HashMap;
use std::path::Path;

use crate::extract::TextExtractor;

use super::DocumentMetadata;

/// Scan `documents_dir` for PDF files and build the metadata index.
///
/// A missing directory is logged and yields an empty index rather
/// than aborting startup; individual files that fail to open are
/// skipped the same way.
pub fn build_metadata_index(
    documents_dir: &Path,
    extractor: &dyn TextExtractor,
) -> HashMap<String, DocumentMetadata> {
    let mut index = HashMap::new();

    let entries = match std::fs::read_dir(documents_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(
                "Documents directory not found: {}: {}",
                documents_dir.display(),
                e
            );
            return index;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !filename.to_lowercase().ends_with(".pdf") {
            continue;
        }

        match extractor.count_pages(&path) {
            Ok(sections_count) => {
                tracing::info!("Indexed {}: {} sections", filename, sections_count);
                index.insert(
                    filename.to_string(),
                    DocumentMetadata {
                        filename: filename.to_string(),
                        title: filename.to_string(),
                        sections_count,
                        source_path: path,
                    },
                );
            }
            Err(e) => {
                tracing::error!("Error indexing {}: {}", filename, e);
            }
        }
    }

    tracing::info!("Indexing complete. {} documents indexed.", index.len());
    index
}
