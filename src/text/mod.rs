//! Text canonicalization for extracted page content.
//!
//! PDF text extraction produces line-wrapped words, soft hyphens and
//! other invisible artifacts that defeat naive substring search. Both
//! document text and query terms pass through the same normalizer so
//! phrase matching compares like with like.

mod normalize;

pub use normalize::normalize;
