//! Configuration management for the standards search server

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub documents: DocumentsConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DocumentsConfig {
    /// Directory scanned for PDF files at startup.
    pub dir: PathBuf,
    /// Number of fully-extracted documents held in memory.
    pub cache_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Result rows returned per request after ranking.
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5001,
            },
            documents: DocumentsConfig {
                dir: PathBuf::from("./documents"),
                cache_capacity: crate::document::DEFAULT_CAPACITY,
            },
            search: SearchConfig { max_results: 50 },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            documents: DocumentsConfig {
                dir: env::var("DOCUMENTS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.documents.dir),
                cache_capacity: env::var("DOCUMENT_CACHE_CAPACITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(defaults.documents.cache_capacity),
            },
            search: SearchConfig {
                max_results: env::var("MAX_RESULTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(defaults.search.max_results),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.documents.cache_capacity, 2);
        assert_eq!(config.search.max_results, 50);
    }
}
