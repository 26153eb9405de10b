//! Link-graph persistence and normalization
//!
//! This module owns the two sides of the crawler/solver boundary: the JSON
//! snapshot contract the crawler writes, and the column-stochastic transition
//! matrix the PageRank solver consumes.

mod normalize;
mod snapshot;

pub use normalize::{normalize, validate_columns, NormalizedGraph};
pub use snapshot::{sanitize_filename, CrawlMetadata, CrawlSnapshot, PageRecord};
