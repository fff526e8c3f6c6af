//! Document model, startup metadata index, and the bounded cache.

mod cache;
mod index;
mod types;

pub use cache::{DocumentCache, DEFAULT_CAPACITY};
pub use index::build_metadata_index;
pub use types::{DocumentData, DocumentMetadata, Section};
