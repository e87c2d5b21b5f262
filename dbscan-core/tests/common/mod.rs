use dbscan_core::{Algorithm, ClusteringResult, DbscanBuilder, DbscanError, PointSet};
use dbscan_test_support::fixtures::{FOURTEEN_POINTS, canonical_labels};

#[must_use]
pub fn fourteen_points() -> PointSet {
    PointSet::try_from_rows(FOURTEEN_POINTS).expect("fixture rows are uniform")
}

/// Parameters for one clustering run in tests.
#[derive(Clone, Copy, Debug)]
pub struct RunParams {
    pub algorithm: Algorithm,
    pub epsilon: f64,
    pub min_points: usize,
    pub leaf_size: usize,
    pub workers: usize,
}

impl RunParams {
    #[must_use]
    pub fn brute(epsilon: f64, min_points: usize) -> Self {
        Self {
            algorithm: Algorithm::Brute,
            epsilon,
            min_points,
            leaf_size: 30,
            workers: 1,
        }
    }

    #[must_use]
    pub fn with_algorithm(self, algorithm: Algorithm, leaf_size: usize) -> Self {
        Self {
            algorithm,
            leaf_size,
            ..self
        }
    }

    #[must_use]
    pub fn with_workers(self, workers: usize) -> Self {
        Self { workers, ..self }
    }

    pub fn run(self, points: &PointSet) -> Result<ClusteringResult, DbscanError> {
        DbscanBuilder::new()
            .with_algorithm(self.algorithm)
            .with_epsilon(self.epsilon)
            .with_min_points(self.min_points)
            .with_leaf_size(self.leaf_size)
            .with_workers(self.workers)
            .build()?
            .run(points)
    }
}

/// Labels renamed so equal partitions compare equal.
#[must_use]
pub fn partition(result: &ClusteringResult) -> Vec<i64> {
    canonical_labels(&result.raw_labels())
}
