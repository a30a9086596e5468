//! docfetch-text
//!
//! Tantivy-backed storage: schema, indexing, the query phase, and the
//! segment adapter the fetch phase reads value columns through.

pub mod tantivy_utils;
pub mod index;
pub mod search;
pub mod segment;

pub use index::TantivyIndexer;
pub use search::{Candidate, TantivySearchEngine};
pub use segment::TantivySegment;
