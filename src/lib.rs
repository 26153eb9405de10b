//! Linkrank: a bounded crawler and PageRank pipeline
//!
//! This crate discovers a bounded subgraph of a website by breadth-first crawling
//! from a seed page, persists the page/link graph as a JSON snapshot, and ranks the
//! visited pages by structural importance using damped power iteration (PageRank).

pub mod config;
pub mod crawler;
pub mod graph;
pub mod rank;
pub mod url;

use thiserror::Error;

/// Main error type for linkrank operations
#[derive(Debug, Error)]
pub enum LinkRankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL {url}: {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Ranking error: {0}")]
    Rank(#[from] RankError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors from graph normalization and the PageRank solver
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Matrix column {column} sums to {sum}, expected 1.0 (normalizer bug)")]
    NotColumnStochastic { column: usize, sum: f64 },

    #[error("Matrix is not square: {rows} rows, row {row} has {len} entries")]
    NotSquare { rows: usize, row: usize, len: usize },
}

/// Result type alias for linkrank operations
pub type Result<T> = std::result::Result<T, LinkRankError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::CrawlSession;
pub use graph::{normalize, CrawlSnapshot, NormalizedGraph};
pub use rank::{build_report, solve, RankOutcome, RankReport};
pub use self::url::{extract_authority, is_in_scope};
