//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::extract::TextExtractor;
use crate::search::SearchService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pub config: Config,
    pub search: SearchService,
}

impl AppState {
    /// Build the state: scans the documents directory once and wires
    /// the search service around the resulting index.
    pub fn new(config: Config, extractor: Arc<dyn TextExtractor>) -> Self {
        let search = SearchService::initialize(
            &config.documents.dir,
            extractor,
            config.documents.cache_capacity,
            config.search.max_results,
        );
        Self {
            inner: Arc::new(AppStateInner { config, search }),
        }
    }

    /// State over an already-built service, for tests.
    pub fn with_service(config: Config, search: SearchService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, search }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the search service
    pub fn search(&self) -> &SearchService {
        &self.inner.search
    }
}
