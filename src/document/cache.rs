//! Bounded on-demand document cache.
//!
//! Documents are extracted lazily on first access and held in a small
//! fixed-capacity LRU. Concurrent misses on the same key share a
//! single extraction (single-flight); eviction removes whole entries
//! only.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::{Mutex, OnceCell};

use crate::extract::{ExtractError, TextExtractor};

use super::{DocumentData, DocumentMetadata};

/// Default capacity, matching the deployment the corpus was sized for.
pub const DEFAULT_CAPACITY: usize = 2;

type LoadResult = Result<Arc<DocumentData>, Arc<ExtractError>>;
type LoadCell = Arc<OnceCell<LoadResult>>;

struct CacheState {
    entries: LruCache<String, Arc<DocumentData>>,
    inflight: HashMap<String, LoadCell>,
}

/// Size-bounded, on-demand document store.
pub struct DocumentCache {
    extractor: Arc<dyn TextExtractor>,
    state: Mutex<CacheState>,
}

impl DocumentCache {
    pub fn new(extractor: Arc<dyn TextExtractor>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CAPACITY).unwrap());
        Self {
            extractor,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                inflight: HashMap::new(),
            }),
        }
    }

    /// Get a document's content, extracting on miss.
    ///
    /// A hit refreshes the entry's recency. On a miss, exactly one
    /// extraction runs per key regardless of how many callers are
    /// waiting; all waiters receive the same result. Failed loads are
    /// not cached, so the next access retries.
    pub async fn get(&self, metadata: &DocumentMetadata) -> LoadResult {
        let cell = {
            let mut state = self.state.lock().await;
            if let Some(data) = state.entries.get(&metadata.filename) {
                return Ok(Arc::clone(data));
            }
            Arc::clone(
                state
                    .inflight
                    .entry(metadata.filename.clone())
                    .or_default(),
            )
        };

        let result = cell
            .get_or_init(|| async {
                tracing::info!("Loading document content for {}", metadata.filename);
                self.extractor
                    .extract(&metadata.source_path)
                    .await
                    .map(Arc::new)
                    .map_err(Arc::new)
            })
            .await
            .clone();

        // First completer publishes to the LRU and retires the
        // in-flight slot; later waiters see it already gone.
        let mut state = self.state.lock().await;
        if state.inflight.remove(&metadata.filename).is_some() {
            if let Ok(data) = &result {
                state.entries.push(metadata.filename.clone(), Arc::clone(data));
            }
        }
        result
    }

    /// Number of resident documents.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Whether a document is currently resident (does not refresh
    /// recency).
    pub async fn contains(&self, filename: &str) -> bool {
        self.state.lock().await.entries.contains(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingExtractor {
        calls: AtomicUsize,
        delay_ms: u64,
    }

    impl CountingExtractor {
        fn new(delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay_ms,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextExtractor for CountingExtractor {
        async fn extract(&self, source_path: &Path) -> Result<DocumentData, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
            }
            let title = source_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned();
            Ok(DocumentData {
                title: title.clone(),
                sections: vec![Section {
                    title: "Page 1".into(),
                    number: "1".into(),
                    page: 1,
                    content_lines: vec![format!("content of {title}")],
                }],
                full_text: format!("content of {title}"),
            })
        }

        fn count_pages(&self, _source_path: &Path) -> Result<usize, ExtractError> {
            Ok(1)
        }
    }

    fn metadata(name: &str) -> DocumentMetadata {
        DocumentMetadata {
            filename: name.to_string(),
            title: name.to_string(),
            sections_count: 1,
            source_path: PathBuf::from(format!("/docs/{name}")),
        }
    }

    #[tokio::test]
    async fn hit_returns_cached_content_without_reextraction() {
        let extractor = CountingExtractor::new(0);
        let cache = DocumentCache::new(extractor.clone(), 2);
        let meta = metadata("a.pdf");

        let first = cache.get(&meta).await.unwrap();
        let second = cache.get(&meta).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(extractor.calls(), 1);
    }

    #[tokio::test]
    async fn least_recently_used_entry_is_evicted_at_capacity() {
        let extractor = CountingExtractor::new(0);
        let cache = DocumentCache::new(extractor.clone(), 2);

        cache.get(&metadata("a.pdf")).await.unwrap();
        cache.get(&metadata("b.pdf")).await.unwrap();
        // Touch a so b becomes the eviction candidate.
        cache.get(&metadata("a.pdf")).await.unwrap();
        cache.get(&metadata("c.pdf")).await.unwrap();

        assert!(cache.contains("a.pdf").await);
        assert!(!cache.contains("b.pdf").await);
        assert!(cache.contains("c.pdf").await);

        // Accessing the evicted document re-triggers extraction.
        let calls_before = extractor.calls();
        cache.get(&metadata("b.pdf")).await.unwrap();
        assert_eq!(extractor.calls(), calls_before + 1);
    }

    #[tokio::test]
    async fn concurrent_misses_extract_once() {
        let extractor = CountingExtractor::new(50);
        let cache = Arc::new(DocumentCache::new(extractor.clone(), 2));
        let meta = metadata("a.pdf");

        let (left, right) = tokio::join!(cache.get(&meta), cache.get(&meta));
        let left = left.unwrap();
        let right = right.unwrap();

        assert!(Arc::ptr_eq(&left, &right));
        assert_eq!(extractor.calls(), 1);
    }

    #[tokio::test]
    async fn failed_loads_are_retried() {
        struct FailingOnce {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl TextExtractor for FailingOnce {
            async fn extract(&self, _source_path: &Path) -> Result<DocumentData, ExtractError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ExtractError::OpenFailed("corrupt file".into()))
                } else {
                    Ok(DocumentData {
                        title: "a.pdf".into(),
                        sections: Vec::new(),
                        full_text: String::new(),
                    })
                }
            }

            fn count_pages(&self, _source_path: &Path) -> Result<usize, ExtractError> {
                Ok(0)
            }
        }

        let cache = DocumentCache::new(
            Arc::new(FailingOnce {
                calls: AtomicUsize::new(0),
            }),
            2,
        );
        let meta = metadata("a.pdf");

        assert!(cache.get(&meta).await.is_err());
        assert_eq!(cache.len().await, 0);
        assert!(cache.get(&meta).await.is_ok());
    }
}
