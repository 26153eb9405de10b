//! Crawl session - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that coordinates fetching,
//! link extraction, scope classification, and link-graph accumulation. All
//! mutable crawl state (visited set, accumulated graph, RNG, frontier) lives in
//! a single [`CrawlSession`] so multiple crawls can run independently and be
//! tested in isolation.
//!
//! The traversal is single-threaded and sequential: one fetch at a time with a
//! politeness delay in between. Given the same seed URL, caps, random seed, and
//! page content, two runs produce an identical visited set, link graph, and
//! traversal order.

use crate::config::Config;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::crawler::{build_http_client, fetch_page, FetchOutcome};
use crate::graph::{CrawlMetadata, CrawlSnapshot, PageRecord};
use crate::url::{extract_authority, is_in_scope};
use crate::LinkRankError;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use reqwest::Client;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Duration;
use url::Url;

/// A bounded breadth-first crawl rooted at a single seed URL
pub struct CrawlSession {
    config: Config,
    config_hash: String,
    client: Client,
    base_authority: String,
    visited: HashSet<String>,
    links: BTreeMap<String, BTreeSet<String>>,
    frontier: Frontier,
    rng: StdRng,
}

impl CrawlSession {
    /// Creates a new crawl session from a validated configuration
    ///
    /// The seed URL is parsed up front to derive the base authority that scope
    /// classification runs against; the RNG is seeded from the configured
    /// random seed so traversal order is reproducible.
    pub fn new(config: Config, config_hash: String) -> Result<Self, LinkRankError> {
        let seed = Url::parse(&config.crawl.seed_url)?;
        let base_authority =
            extract_authority(&seed).ok_or_else(|| LinkRankError::InvalidSeed {
                url: config.crawl.seed_url.clone(),
                reason: "no network authority".to_string(),
            })?;

        let client = build_http_client(&config.user_agent)?;
        let frontier = Frontier::seeded(seed.to_string());
        let rng = StdRng::seed_from_u64(config.crawl.random_seed);

        Ok(Self {
            config,
            config_hash,
            client,
            base_authority,
            visited: HashSet::new(),
            links: BTreeMap::new(),
            frontier,
            rng,
        })
    }

    /// Runs the breadth-first crawl to completion and returns the snapshot
    ///
    /// The loop terminates when the frontier drains or `max_pages` URLs have
    /// been visited; entries deeper than `max_depth` are skipped at dequeue.
    /// With `max_depth` 0 only the seed page is visited.
    pub async fn run(&mut self) -> Result<CrawlSnapshot, LinkRankError> {
        let max_pages = self.config.crawl.max_pages;
        let max_depth = self.config.crawl.max_depth;
        let crawl_timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();

        tracing::info!(
            "Starting crawl: seed={}, max_pages={}, max_depth={}, random_seed={}",
            self.config.crawl.seed_url,
            max_pages,
            max_depth,
            self.config.crawl.random_seed
        );

        let start_time = std::time::Instant::now();

        while !self.frontier.is_empty() && self.visited.len() < max_pages {
            let page = match self.frontier.pop() {
                Some(p) => p,
                None => break,
            };

            // Dedupe at dequeue time; the queue may hold a URL more than once
            if self.visited.contains(&page.url) || page.depth > max_depth {
                continue;
            }

            self.visited.insert(page.url.clone());
            tracing::debug!(
                "Crawling ({}/{}) depth {}: {}",
                self.visited.len(),
                max_pages,
                page.depth,
                page.url
            );

            let outgoing = self.visit(&page.url).await;
            tracing::debug!("  found {} in-scope links", outgoing.len());

            // The recorded graph keeps the full filtered link set; the shuffle
            // below affects traversal order only.
            if !outgoing.is_empty() {
                self.links
                    .entry(page.url.clone())
                    .or_default()
                    .extend(outgoing.iter().cloned());
            }

            // Sorted base order, then a seeded Fisher-Yates shuffle: traversal
            // is decorrelated from alphabetical/document bias but exactly
            // reproducible for a given seed.
            let mut traversal = outgoing;
            traversal.sort();
            traversal.shuffle(&mut self.rng);

            for link in traversal {
                if !self.visited.contains(&link) {
                    self.frontier.push(link, page.depth + 1);
                }
            }

            if self.visited.len() % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {:.2} pages/sec",
                    self.visited.len(),
                    self.frontier.len(),
                    self.visited.len() as f64 / elapsed.as_secs_f64()
                );
            }

            // Politeness delay between fetches
            let delay = self.config.crawl.fetch_delay_ms;
            if delay > 0 && !self.frontier.is_empty() && self.visited.len() < max_pages {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }

        tracing::info!(
            "Crawl complete: {} pages visited in {:?}",
            self.visited.len(),
            start_time.elapsed()
        );

        Ok(self.snapshot(crawl_timestamp))
    }

    /// Fetches one page and returns its in-scope outgoing links
    ///
    /// Any fetch or parse failure is logged and yields an empty link set; a
    /// single bad page never aborts the crawl.
    async fn visit(&mut self, url: &str) -> Vec<String> {
        let base_url = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                // Frontier entries are resolver output, so this indicates a bug
                tracing::error!("Unparseable frontier URL {}: {}", url, e);
                return Vec::new();
            }
        };

        let body = match fetch_page(&self.client, url).await {
            FetchOutcome::Success { body, .. } => body,
            FetchOutcome::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}, treating as zero links", status_code, url);
                return Vec::new();
            }
            FetchOutcome::NetworkError { error } => {
                tracing::warn!("Fetch failed for {}: {}, treating as zero links", url, error);
                return Vec::new();
            }
        };

        let extracted = extract_links(&body, &base_url, &self.config.crawl.exclude_patterns);

        extracted
            .into_iter()
            .filter(|link| is_in_scope(link, &self.base_authority))
            .collect()
    }

    /// Builds the persistence-contract snapshot from the accumulated state
    ///
    /// Pages are sorted by URL and each page's outgoing links are sorted, so
    /// serialization is reproducible byte-for-byte.
    fn snapshot(&self, crawl_timestamp: String) -> CrawlSnapshot {
        let mut urls: Vec<&String> = self.visited.iter().collect();
        urls.sort();

        let pages = urls
            .into_iter()
            .map(|url| {
                let outgoing_links: Vec<String> = self
                    .links
                    .get(url)
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default();
                PageRecord {
                    url: url.clone(),
                    num_outgoing_links: outgoing_links.len(),
                    outgoing_links,
                }
            })
            .collect();

        CrawlSnapshot {
            metadata: CrawlMetadata {
                seed_url: self.config.crawl.seed_url.clone(),
                crawl_timestamp,
                total_pages: self.visited.len(),
                max_pages: self.config.crawl.max_pages,
                max_depth: self.config.crawl.max_depth,
                random_seed: self.config.crawl.random_seed,
                config_hash: self.config_hash.clone(),
            },
            pages,
        }
    }
}
