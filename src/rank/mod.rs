//! PageRank solving and report generation

mod report;
mod solver;

pub use report::{build_report, RankReport, RankedPage};
pub use solver::{solve, RankOutcome};
