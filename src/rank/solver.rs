//! PageRank solver: damped power iteration over a column-stochastic matrix
//!
//! Iterates `R' = d * (A . R) + (1 - d) * E` with E the uniform teleport
//! vector, until the L1 delta drops below epsilon or the iteration cap is
//! hit. Because every column of A sums to 1 and `d * 1 + (1 - d) * 1 = 1`,
//! the rank vector keeps unit mass at every step.

use crate::graph::validate_columns;
use crate::RankError;

/// Result of a PageRank solve
///
/// `converged` distinguishes a genuine fixed point from an exhausted
/// iteration budget; callers must not conflate the two.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// Importance score per matrix index; non-negative, sums to 1
    pub scores: Vec<f64>,

    /// Number of iterations performed
    pub iterations: u32,

    /// Whether the L1 delta fell below epsilon before the cap
    pub converged: bool,
}

/// Runs damped power iteration to convergence or the iteration cap
///
/// The matrix must be square and column-stochastic; a violating column is a
/// normalizer bug and returns [`RankError::NotColumnStochastic`]. An empty
/// matrix short-circuits to an empty converged outcome.
pub fn solve(
    matrix: &[Vec<f64>],
    damping: f64,
    epsilon: f64,
    max_iterations: u32,
) -> Result<RankOutcome, RankError> {
    let n = matrix.len();

    if n == 0 {
        return Ok(RankOutcome {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        });
    }

    validate_columns(matrix)?;

    let teleport = 1.0 / n as f64;
    let mut ranks = vec![teleport; n];

    for iteration in 1..=max_iterations {
        let mut next = vec![0.0; n];
        for (target, row) in matrix.iter().enumerate() {
            let mut mass = 0.0;
            for (source, weight) in row.iter().enumerate() {
                mass += weight * ranks[source];
            }
            next[target] = damping * mass + (1.0 - damping) * teleport;
        }

        let delta: f64 = next
            .iter()
            .zip(ranks.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        ranks = next;

        if delta < epsilon {
            tracing::debug!("PageRank converged after {} iterations", iteration);
            return Ok(RankOutcome {
                scores: ranks,
                iterations: iteration,
                converged: true,
            });
        }
    }

    tracing::warn!(
        "PageRank hit the iteration cap ({}) without converging",
        max_iterations
    );
    Ok(RankOutcome {
        scores: ranks,
        iterations: max_iterations,
        converged: false,
    })
}
