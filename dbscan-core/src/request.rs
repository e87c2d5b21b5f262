//! Plain in-memory call contract.
//!
//! [`cluster`] takes a [`ClusterRequest`] and returns a [`ClusterResponse`]
//! without touching any encoding; adapters such as the CLI translate
//! documents to and from these shapes.

use crate::{
    Result,
    builder::{DEFAULT_LEAF_SIZE, DEFAULT_WORKERS, DbscanBuilder},
    neighbors::Algorithm,
    point::PointSet,
};

/// A clustering request.
///
/// # Examples
/// ```
/// use dbscan_core::{Algorithm, ClusterRequest, cluster};
///
/// let request = ClusterRequest::new(Algorithm::KdTree, 1.0, 2)
///     .with_leaf_size(4)
///     .with_points(vec![vec![0.0], vec![1.0], vec![7.0]]);
/// let response = cluster(&request)?;
/// assert_eq!(response.labels, vec![1, 1, -1]);
/// assert_eq!(response.clusters, 1);
/// # Ok::<(), dbscan_core::DbscanError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRequest {
    /// Neighbour finder to use.
    pub algorithm: Algorithm,
    /// Inclusive neighbourhood radius.
    pub epsilon: f64,
    /// Density threshold, counting the point itself.
    pub min_points: usize,
    /// k-d tree leaf size; only validated for [`Algorithm::KdTree`].
    pub leaf_size: usize,
    /// Precompute worker count.
    pub workers: usize,
    /// Input rows; every row must share one dimension.
    pub points: Vec<Vec<f64>>,
}

impl ClusterRequest {
    /// Creates a request with no points, the default leaf size, and one
    /// worker.
    #[must_use]
    pub fn new(algorithm: Algorithm, epsilon: f64, min_points: usize) -> Self {
        Self {
            algorithm,
            epsilon,
            min_points,
            leaf_size: DEFAULT_LEAF_SIZE,
            workers: DEFAULT_WORKERS,
            points: Vec::new(),
        }
    }

    /// Sets the leaf size.
    #[must_use]
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Sets the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replaces the input rows.
    #[must_use]
    pub fn with_points(mut self, points: Vec<Vec<f64>>) -> Self {
        self.points = points;
        self
    }
}

/// The outcome of a clustering request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterResponse {
    /// One label per input row: `-1` for noise, `k >= 1` for cluster `k`.
    pub labels: Vec<i64>,
    /// Number of clusters produced.
    pub clusters: usize,
}

/// Runs one clustering call over the request shapes.
///
/// Parameters are validated before the rows are ingested, and no clustering
/// work starts unless both succeed.
///
/// # Errors
/// Returns the configuration errors of [`DbscanBuilder::build`],
/// [`crate::DbscanError::PointSet`] for invalid rows, and
/// [`crate::DbscanError::WorkerPool`] when the workers cannot start.
pub fn cluster(request: &ClusterRequest) -> Result<ClusterResponse> {
    let dbscan = DbscanBuilder::new()
        .with_algorithm(request.algorithm)
        .with_epsilon(request.epsilon)
        .with_min_points(request.min_points)
        .with_leaf_size(request.leaf_size)
        .with_workers(request.workers)
        .build()?;
    let points = PointSet::try_from_rows(&request.points)?;
    let result = dbscan.run(&points)?;
    Ok(ClusterResponse {
        labels: result.raw_labels(),
        clusters: result.cluster_count(),
    })
}
