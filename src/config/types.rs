use serde::Deserialize;

/// Main configuration structure for linkrank
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of pages to visit
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum depth to crawl from the seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Seed for the traversal-order shuffle (crawls are reproducible given
    /// the same seed)
    #[serde(rename = "random-seed", default = "default_random_seed")]
    pub random_seed: u64,

    /// Politeness delay between fetches (milliseconds)
    #[serde(rename = "fetch-delay-ms", default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Substrings that disqualify a URL (administrative/non-content namespaces)
    #[serde(rename = "exclude-patterns", default)]
    pub exclude_patterns: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// PageRank solver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Probability the random surfer follows a link rather than teleporting
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// L1 convergence tolerance
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Hard cap on power iterations
    #[serde(rename = "max-iterations", default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            epsilon: default_epsilon(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where crawl snapshots and ranking reports are written
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

fn default_random_seed() -> u64 {
    42
}

fn default_fetch_delay_ms() -> u64 {
    500
}

fn default_damping() -> f64 {
    0.85
}

fn default_epsilon() -> f64 {
    1e-9
}

fn default_max_iterations() -> u32 {
    100
}
