//! Crawler module for bounded breadth-first page discovery
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with failure classification
//! - HTML link extraction with the External-links cutoff
//! - The FIFO frontier queue
//! - Overall crawl coordination and link-graph accumulation

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::CrawlSession;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::{Frontier, QueuedPage};
pub use parser::extract_links;
