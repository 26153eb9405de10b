//! Linkrank main entry point
//!
//! Command-line interface for the crawl-and-rank pipeline: crawl a bounded
//! subgraph from a seed page, persist the link graph as a JSON snapshot,
//! normalize it to a transition matrix, and rank pages with PageRank.

use clap::Parser;
use linkrank::config::{load_config_with_hash, Config};
use linkrank::graph::{normalize, CrawlSnapshot};
use linkrank::rank::{build_report, solve};
use linkrank::CrawlSession;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Linkrank: bounded web crawling + PageRank
///
/// Crawls breadth-first from a configured seed URL, bounded by page count and
/// depth, then ranks the discovered pages by structural importance.
#[derive(Parser, Debug)]
#[command(name = "linkrank")]
#[command(version = "1.0.0")]
#[command(about = "Bounded crawler and PageRank pipeline", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["crawl_only", "rank_only"])]
    dry_run: bool,

    /// Crawl and write the snapshot, but skip ranking
    #[arg(long, conflicts_with_all = ["dry_run", "rank_only"])]
    crawl_only: bool,

    /// Rank an existing snapshot instead of crawling
    #[arg(long, value_name = "SNAPSHOT", conflicts_with_all = ["dry_run", "crawl_only"])]
    rank_only: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(snapshot_path) = cli.rank_only {
        handle_rank_only(&config, &snapshot_path)?;
    } else {
        handle_pipeline(config, config_hash, cli.crawl_only).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkrank=info,warn"),
            1 => EnvFilter::new("linkrank=debug,info"),
            2 => EnvFilter::new("linkrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Linkrank Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!("  Max pages: {}", config.crawl.max_pages);
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Random seed: {}", config.crawl.random_seed);
    println!("  Fetch delay: {}ms", config.crawl.fetch_delay_ms);

    println!("\nExclusion patterns ({}):", config.crawl.exclude_patterns.len());
    for pattern in &config.crawl.exclude_patterns {
        println!("  - {}", pattern);
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nRanking:");
    println!("  Damping: {}", config.ranking.damping);
    println!("  Epsilon: {}", config.ranking.epsilon);
    println!("  Max iterations: {}", config.ranking.max_iterations);

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);

    println!("\n✓ Configuration is valid");
}

/// Handles the --rank-only mode: ranks an existing snapshot
fn handle_rank_only(config: &Config, snapshot_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading snapshot from {}", snapshot_path.display());
    let snapshot = CrawlSnapshot::load(snapshot_path)?;
    rank_snapshot(config, &snapshot)?;
    Ok(())
}

/// Handles the main crawl (and, unless --crawl-only, rank) operation
async fn handle_pipeline(
    config: Config,
    config_hash: String,
    crawl_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = PathBuf::from(&config.output.data_dir);

    let mut session = CrawlSession::new(config.clone(), config_hash)?;
    let snapshot = session.run().await?;
    let snapshot_path = snapshot.save(&data_dir)?;

    println!("✓ Crawl snapshot written to: {}", snapshot_path.display());

    if crawl_only {
        return Ok(());
    }

    rank_snapshot(&config, &snapshot)?;
    Ok(())
}

/// Normalizes a snapshot, solves PageRank, and writes + prints the report
fn rank_snapshot(config: &Config, snapshot: &CrawlSnapshot) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Normalizing link graph: {} visited pages",
        snapshot.pages.len()
    );
    let graph = normalize(snapshot);

    let outcome = solve(
        &graph.matrix,
        config.ranking.damping,
        config.ranking.epsilon,
        config.ranking.max_iterations,
    )?;

    let report = build_report(&outcome, &graph, &snapshot.metadata);
    let report_path = report.save(Path::new(&config.output.data_dir))?;

    report.print_top(20);
    println!("\n✓ Ranking report written to: {}", report_path.display());

    Ok(())
}
