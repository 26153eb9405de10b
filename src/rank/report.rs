//! Ranking report generation
//!
//! Turns a solver outcome plus the normalizer's index maps into a 1-based
//! ranked listing, serialized as JSON next to the crawl snapshot.

use crate::graph::{sanitize_filename, CrawlMetadata, NormalizedGraph};
use crate::rank::RankOutcome;
use crate::LinkRankError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A complete ranking report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    /// Metadata of the crawl the ranking was computed from
    pub metadata: CrawlMetadata,

    /// Whether the solver reached its fixed point (false: iteration cap hit)
    pub converged: bool,

    /// Iterations the solver performed
    pub iterations: u32,

    /// Pages ordered by descending importance
    pub rankings: Vec<RankedPage>,
}

/// One ranked page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPage {
    /// 1-based rank position
    pub rank: usize,
    pub url: String,
    pub score: f64,
}

/// Builds a ranking report from a solver outcome
///
/// Pages are ordered by score descending; ties break by URL ascending so the
/// report is bit-exact reproducible for a given snapshot.
pub fn build_report(
    outcome: &RankOutcome,
    graph: &NormalizedGraph,
    metadata: &CrawlMetadata,
) -> RankReport {
    let mut order: Vec<usize> = (0..outcome.scores.len()).collect();
    order.sort_by(|&a, &b| {
        outcome.scores[b]
            .total_cmp(&outcome.scores[a])
            .then_with(|| graph.index_to_url[a].cmp(&graph.index_to_url[b]))
    });

    let rankings = order
        .into_iter()
        .enumerate()
        .map(|(position, index)| RankedPage {
            rank: position + 1,
            url: graph.index_to_url[index].clone(),
            score: outcome.scores[index],
        })
        .collect();

    RankReport {
        metadata: metadata.clone(),
        converged: outcome.converged,
        iterations: outcome.iterations,
        rankings,
    }
}

impl RankReport {
    /// Writes the report as pretty-printed JSON under `data_dir`
    ///
    /// Filename: `pagerank_results_{sanitized_seed_page}.json`. Returns the
    /// path written.
    pub fn save(&self, data_dir: &Path) -> Result<PathBuf, LinkRankError> {
        std::fs::create_dir_all(data_dir)?;

        let filename = format!(
            "pagerank_results_{}.json",
            sanitize_filename(&self.metadata.seed_url)
        );
        let path = data_dir.join(filename);

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;

        tracing::info!("Ranking report saved to {}", path.display());
        Ok(path)
    }

    /// Prints the top `limit` entries to stdout
    pub fn print_top(&self, limit: usize) {
        println!("\n=== PageRank Results ===");
        println!(
            "Pages: {}, iterations: {}{}",
            self.rankings.len(),
            self.iterations,
            if self.converged {
                " (converged)"
            } else {
                " (iteration cap hit)"
            }
        );

        for entry in self.rankings.iter().take(limit) {
            println!("{:>4}. {:.6}  {}", entry.rank, entry.score, entry.url);
        }

        if self.rankings.len() > limit {
            println!("  ... {} more", self.rankings.len() - limit);
        }
    }
}
