//! Clustering entry point.
//!
//! [`Dbscan::run`] drives one call end to end: build the neighbour finder
//! (and its index), precompute every neighbourhood behind a barrier, then
//! expand clusters on the calling thread.

use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use tracing::{info, instrument};

use crate::{
    Result,
    distance::{Euclidean, Metric},
    engine::ClusterEngine,
    neighbors::{Algorithm, Finder},
    point::PointSet,
    precompute::PrecomputeStage,
    result::ClusteringResult,
};

/// A validated DBSCAN configuration.
///
/// Instances are created with [`crate::DbscanBuilder`] and hold no per-call
/// state, so one instance may cluster many point sets.
///
/// # Examples
/// ```
/// use dbscan_core::{DbscanBuilder, PointSet};
///
/// let points = PointSet::try_from_rows([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [8.0, 8.0]])?;
/// let dbscan = DbscanBuilder::new()
///     .with_epsilon(1.0)
///     .with_min_points(3)
///     .build()?;
/// let result = dbscan.run(&points)?;
/// assert_eq!(result.raw_labels(), vec![1, 1, 1, -1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dbscan<M = Euclidean> {
    algorithm: Algorithm,
    epsilon: f64,
    min_points: NonZeroUsize,
    leaf_size: NonZeroUsize,
    workers: NonZeroUsize,
    metric: M,
}

impl<M: Metric> Dbscan<M> {
    pub(crate) fn new(
        algorithm: Algorithm,
        epsilon: f64,
        min_points: NonZeroUsize,
        leaf_size: NonZeroUsize,
        workers: NonZeroUsize,
        metric: M,
    ) -> Self {
        Self {
            algorithm,
            epsilon,
            min_points,
            leaf_size,
            workers,
            metric,
        }
    }

    /// Returns the neighbour finder used by [`Dbscan::run`].
    #[rustfmt::skip]
    #[must_use]
    pub fn algorithm(&self) -> Algorithm { self.algorithm }

    /// Returns the neighbourhood radius.
    #[rustfmt::skip]
    #[must_use]
    pub fn epsilon(&self) -> f64 { self.epsilon }

    /// Returns the density threshold, counting the point itself.
    #[rustfmt::skip]
    #[must_use]
    pub fn min_points(&self) -> NonZeroUsize { self.min_points }

    /// Returns the k-d tree leaf size.
    #[rustfmt::skip]
    #[must_use]
    pub fn leaf_size(&self) -> NonZeroUsize { self.leaf_size }

    /// Returns the precompute worker count.
    #[rustfmt::skip]
    #[must_use]
    pub fn workers(&self) -> NonZeroUsize { self.workers }

    /// Returns the distance metric.
    #[rustfmt::skip]
    #[must_use]
    pub fn metric(&self) -> &M { &self.metric }

    /// Clusters `points`, returning one label per point in input order.
    ///
    /// An empty point set yields an empty result with zero clusters.
    ///
    /// # Errors
    /// Returns [`crate::DbscanError::WorkerPool`] when the precompute workers
    /// cannot be started. Configuration problems are rejected earlier by the
    /// builder.
    #[instrument(
        name = "core.run",
        err,
        skip(self, points),
        fields(
            points = points.len(),
            dimension = points.dimension(),
            algorithm = %self.algorithm,
            epsilon = self.epsilon,
            min_points = self.min_points.get(),
            workers = self.workers.get(),
            leaf_size = self.leaf_size.get(),
            metric = self.metric.name(),
        ),
    )]
    pub fn run(&self, points: &PointSet) -> Result<ClusteringResult> {
        if points.is_empty() {
            info!(clusters = 0, noise = 0, "no points supplied; nothing to cluster");
            return Ok(ClusteringResult::default());
        }

        let finder = Finder::new(
            self.algorithm,
            points,
            &self.metric,
            self.epsilon,
            self.leaf_size,
        );
        let started = Instant::now();
        let table = PrecomputeStage::new(self.workers).run(&finder)?;
        record_precompute(started.elapsed());

        let result = ClusterEngine::new(self.min_points).run(&table);
        record_run(points.len(), &result);
        info!(
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            "clustering completed"
        );
        Ok(result)
    }

    /// Convenience wrapper building a [`PointSet`] from `rows` before running.
    ///
    /// # Errors
    /// Returns [`crate::DbscanError::PointSet`] when the rows are ragged,
    /// zero-width, or contain non-finite values, plus any error of
    /// [`Dbscan::run`].
    pub fn cluster_rows<I, R>(&self, rows: I) -> Result<ClusteringResult>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let points = PointSet::try_from_rows(rows)?;
        self.run(&points)
    }
}

#[cfg(feature = "metrics")]
fn record_precompute(elapsed: Duration) {
    metrics::histogram!("dbscan_precompute_seconds").record(elapsed.as_secs_f64());
}

#[cfg(not(feature = "metrics"))]
fn record_precompute(_elapsed: Duration) {}

#[cfg(feature = "metrics")]
fn record_run(points: usize, result: &ClusteringResult) {
    let as_count = |value: usize| u64::try_from(value).unwrap_or(u64::MAX);
    metrics::counter!("dbscan_runs_total").increment(1);
    metrics::counter!("dbscan_points_total").increment(as_count(points));
    metrics::counter!("dbscan_noise_points_total").increment(as_count(result.noise_count()));
    metrics::gauge!("dbscan_last_cluster_count").set(
        u32::try_from(result.cluster_count()).map_or(f64::from(u32::MAX), f64::from),
    );
}

#[cfg(not(feature = "metrics"))]
fn record_run(_points: usize, _result: &ClusteringResult) {}
