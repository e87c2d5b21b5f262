//! Benchmark parameter types used as Criterion benchmark ids.

use std::fmt;

use dbscan_core::Algorithm;

/// Parameters for a neighbour precompute benchmark run.
#[derive(Clone, Debug)]
pub struct NeighborBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Neighbour finder under test.
    pub algorithm: Algorithm,
    /// Precompute worker count.
    pub workers: usize,
}

impl fmt::Display for NeighborBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},alg={},workers={}",
            self.point_count, self.algorithm, self.workers
        )
    }
}

/// Parameters for an end-to-end clustering benchmark run.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Density threshold.
    pub min_points: usize,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},min={}", self.point_count, self.min_points)
    }
}
