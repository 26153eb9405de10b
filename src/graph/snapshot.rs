//! Crawl snapshot persistence
//!
//! The snapshot is the sole contract between the crawler and the graph
//! normalizer: a JSON record of crawl metadata plus one entry per visited page
//! with its recorded outgoing links. Pages and links are sorted so
//! serialization is reproducible. A page's `outgoing_links` may reference URLs
//! that were never visited (crawl budget exhausted first); the normalizer
//! prunes those.

use crate::LinkRankError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// A persisted crawl result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    pub metadata: CrawlMetadata,
    pub pages: Vec<PageRecord>,
}

/// Metadata describing how a snapshot was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlMetadata {
    pub seed_url: String,
    pub crawl_timestamp: String,
    pub total_pages: usize,
    pub max_pages: usize,
    pub max_depth: u32,
    pub random_seed: u64,
    pub config_hash: String,
}

/// One visited page and the links recorded at visit time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub outgoing_links: Vec<String>,
    pub num_outgoing_links: usize,
}

impl CrawlSnapshot {
    /// Writes the snapshot as pretty-printed JSON under `data_dir`
    ///
    /// The filename is `{crawl_timestamp}_{sanitized_seed_page}.json`; the
    /// directory is created if missing. Returns the path written.
    pub fn save(&self, data_dir: &Path) -> Result<PathBuf, LinkRankError> {
        std::fs::create_dir_all(data_dir)?;

        let filename = format!(
            "{}_{}.json",
            self.metadata.crawl_timestamp,
            sanitize_filename(&self.metadata.seed_url)
        );
        let path = data_dir.join(filename);

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;

        tracing::info!("Snapshot saved to {}", path.display());
        Ok(path)
    }

    /// Loads a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, LinkRankError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: CrawlSnapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}

/// Converts a URL to a safe filename component
///
/// Uses the last path segment with common page extensions stripped and every
/// character outside `[A-Za-z0-9_-]` replaced by `_`, truncated to 50 chars.
/// Falls back to the host (dots replaced) for URLs without a path.
pub fn sanitize_filename(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return "page".to_string(),
    };

    let path = parsed.path().trim_matches('/');

    if path.is_empty() {
        return parsed
            .host_str()
            .map(|h| h.replace('.', "_"))
            .unwrap_or_else(|| "page".to_string());
    }

    let segment = path.rsplit('/').next().unwrap_or(path);
    let stem = segment
        .strip_suffix(".html")
        .or_else(|| segment.strip_suffix(".php"))
        .or_else(|| segment.strip_suffix(".aspx"))
        .or_else(|| segment.strip_suffix(".asp"))
        .unwrap_or(segment);

    stem.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(50)
        .collect()
}
