//! Graph normalization: crawl snapshot to column-stochastic transition matrix
//!
//! The matrix is indexed `matrix[target][source]`: column `source` distributes
//! that page's probability mass over its qualifying out-links. Qualifying means
//! the target was itself visited (unvisited targets have no row and are
//! pruned) and is not the source page (self-links carry no mass). A source
//! left with zero qualifying out-links is a dangling node; its entire column
//! is filled with 1/N so no mass vanishes and every column still sums to 1.

use crate::graph::CrawlSnapshot;
use crate::RankError;
use std::collections::{BTreeSet, HashMap};

/// Tolerance for the column-sum invariant check
///
/// Looser than the solver's convergence epsilon: it only has to absorb f64
/// rounding in sums of N terms of 1/k, not measure convergence.
const COLUMN_SUM_TOLERANCE: f64 = 1e-6;

/// A normalized link graph ready for the PageRank solver
#[derive(Debug, Clone)]
pub struct NormalizedGraph {
    /// Column-stochastic transition matrix, `matrix[target][source]`
    pub matrix: Vec<Vec<f64>>,

    /// URL to matrix index
    pub url_to_index: HashMap<String, usize>,

    /// Matrix index to URL (inverse of `url_to_index`)
    pub index_to_url: Vec<String>,
}

/// Builds the transition matrix and index maps from a crawl snapshot
///
/// Indices are assigned in sorted-URL order so the assignment is deterministic
/// across runs; consumers must still go through the returned maps rather than
/// assume any ordering. An empty snapshot yields an empty matrix.
pub fn normalize(snapshot: &CrawlSnapshot) -> NormalizedGraph {
    let mut index_to_url: Vec<String> = snapshot.pages.iter().map(|p| p.url.clone()).collect();
    index_to_url.sort();
    index_to_url.dedup();

    let url_to_index: HashMap<String, usize> = index_to_url
        .iter()
        .enumerate()
        .map(|(i, url)| (url.clone(), i))
        .collect();

    let n = index_to_url.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for page in &snapshot.pages {
        let source = match url_to_index.get(&page.url) {
            Some(&i) => i,
            None => continue,
        };

        // Qualifying out-links: visited targets only, self excluded
        let out: BTreeSet<usize> = page
            .outgoing_links
            .iter()
            .filter_map(|target| url_to_index.get(target).copied())
            .filter(|&target| target != source)
            .collect();

        if out.is_empty() {
            // Dangling node: redistribute uniformly over all pages,
            // including the dangling page's own row
            let uniform = 1.0 / n as f64;
            for row in matrix.iter_mut() {
                row[source] = uniform;
            }
        } else {
            let weight = 1.0 / out.len() as f64;
            for target in out {
                matrix[target][source] = weight;
            }
        }
    }

    NormalizedGraph {
        matrix,
        url_to_index,
        index_to_url,
    }
}

/// Checks that every column of the matrix sums to 1 within tolerance
///
/// A failing column indicates a normalizer bug, not bad input; callers treat
/// it as fatal.
pub fn validate_columns(matrix: &[Vec<f64>]) -> Result<(), RankError> {
    let n = matrix.len();

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(RankError::NotSquare {
                rows: n,
                row: i,
                len: row.len(),
            });
        }
    }

    for column in 0..n {
        let sum: f64 = matrix.iter().map(|row| row[column]).sum();
        if (sum - 1.0).abs() > COLUMN_SUM_TOLERANCE {
            return Err(RankError::NotColumnStochastic { column, sum });
        }
    }

    Ok(())
}
