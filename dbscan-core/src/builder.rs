//! Builder utilities for configuring DBSCAN runs.
//!
//! Every parameter is validated in [`DbscanBuilder::build`], so a constructed
//! [`Dbscan`] can no longer fail on configuration grounds.

use std::num::NonZeroUsize;

use crate::{
    Result,
    dbscan::Dbscan,
    distance::{Euclidean, Metric},
    error::DbscanError,
    neighbors::Algorithm,
};

/// Default neighbourhood radius.
pub const DEFAULT_EPSILON: f64 = 0.5;
/// Default density threshold, counting the point itself.
pub const DEFAULT_MIN_POINTS: usize = 5;
/// Default k-d tree leaf size.
pub const DEFAULT_LEAF_SIZE: usize = 30;
/// Default precompute worker count.
pub const DEFAULT_WORKERS: usize = 1;

/// Configures and constructs [`Dbscan`] instances.
///
/// # Examples
/// ```
/// use dbscan_core::{Algorithm, DbscanBuilder};
///
/// let dbscan = DbscanBuilder::new()
///     .with_algorithm(Algorithm::KdTree)
///     .with_epsilon(2.5)
///     .with_min_points(4)
///     .with_leaf_size(16)
///     .with_workers(2)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(dbscan.min_points().get(), 4);
/// assert_eq!(dbscan.algorithm(), Algorithm::KdTree);
/// assert_eq!(dbscan.workers().get(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DbscanBuilder<M = Euclidean> {
    algorithm: Algorithm,
    epsilon: f64,
    min_points: usize,
    leaf_size: usize,
    workers: usize,
    metric: M,
}

impl Default for DbscanBuilder {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            epsilon: DEFAULT_EPSILON,
            min_points: DEFAULT_MIN_POINTS,
            leaf_size: DEFAULT_LEAF_SIZE,
            workers: DEFAULT_WORKERS,
            metric: Euclidean,
        }
    }
}

impl DbscanBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{Algorithm, DbscanBuilder};
    ///
    /// let builder = DbscanBuilder::new();
    /// assert_eq!(builder.algorithm(), Algorithm::Brute);
    /// assert_eq!(builder.min_points(), 5);
    /// assert_eq!(builder.workers(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Metric> DbscanBuilder<M> {
    /// Selects the neighbour finder.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Returns the configured neighbour finder.
    #[rustfmt::skip]
    #[must_use]
    pub fn algorithm(&self) -> Algorithm { self.algorithm }

    /// Overrides the neighbourhood radius.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::DbscanBuilder;
    ///
    /// let builder = DbscanBuilder::new().with_epsilon(1.25);
    /// assert_eq!(builder.epsilon(), 1.25);
    /// ```
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the configured neighbourhood radius.
    #[rustfmt::skip]
    #[must_use]
    pub fn epsilon(&self) -> f64 { self.epsilon }

    /// Overrides the density threshold.
    #[must_use]
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Returns the configured density threshold.
    #[rustfmt::skip]
    #[must_use]
    pub fn min_points(&self) -> usize { self.min_points }

    /// Overrides the k-d tree leaf size. Ignored by the brute-force finder.
    #[must_use]
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Returns the configured leaf size.
    #[rustfmt::skip]
    #[must_use]
    pub fn leaf_size(&self) -> usize { self.leaf_size }

    /// Overrides the precompute worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the configured worker count.
    #[rustfmt::skip]
    #[must_use]
    pub fn workers(&self) -> usize { self.workers }

    /// Replaces the distance metric, keeping every other setting.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{DbscanBuilder, Manhattan};
    ///
    /// let dbscan = DbscanBuilder::new()
    ///     .with_metric(Manhattan)
    ///     .build()
    ///     .expect("configuration is valid");
    /// assert_eq!(dbscan.metric(), &Manhattan);
    /// ```
    #[must_use]
    pub fn with_metric<N: Metric>(self, metric: N) -> DbscanBuilder<N> {
        DbscanBuilder {
            algorithm: self.algorithm,
            epsilon: self.epsilon,
            min_points: self.min_points,
            leaf_size: self.leaf_size,
            workers: self.workers,
            metric,
        }
    }

    /// Returns the configured metric.
    #[rustfmt::skip]
    #[must_use]
    pub fn metric(&self) -> &M { &self.metric }

    /// Validates the configuration and constructs a [`Dbscan`] instance.
    ///
    /// # Errors
    /// Returns [`DbscanError::InvalidMinPoints`] when `min_points` is zero,
    /// [`DbscanError::InvalidEpsilon`] when `epsilon` is negative or not
    /// finite, [`DbscanError::InvalidWorkers`] when `workers` is zero, and
    /// [`DbscanError::InvalidLeafSize`] when the k-d tree is selected with a
    /// zero leaf size.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{DbscanBuilder, DbscanError};
    ///
    /// let err = DbscanBuilder::new().with_min_points(0).build().unwrap_err();
    /// assert!(matches!(err, DbscanError::InvalidMinPoints { got: 0 }));
    /// ```
    pub fn build(self) -> Result<Dbscan<M>> {
        let min_points = NonZeroUsize::new(self.min_points).ok_or(
            DbscanError::InvalidMinPoints {
                got: self.min_points,
            },
        )?;
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(DbscanError::InvalidEpsilon { got: self.epsilon });
        }
        let workers = NonZeroUsize::new(self.workers)
            .ok_or(DbscanError::InvalidWorkers { got: self.workers })?;
        let leaf_size = match (self.algorithm, NonZeroUsize::new(self.leaf_size)) {
            (_, Some(leaf_size)) => leaf_size,
            (Algorithm::Brute, None) => NonZeroUsize::new(DEFAULT_LEAF_SIZE)
                .unwrap_or(NonZeroUsize::MIN),
            (Algorithm::KdTree, None) => {
                return Err(DbscanError::InvalidLeafSize {
                    got: self.leaf_size,
                });
            }
        };

        Ok(Dbscan::new(
            self.algorithm,
            self.epsilon,
            min_points,
            leaf_size,
            workers,
            self.metric,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_documented_values() {
        let dbscan = DbscanBuilder::new().build().expect("defaults are valid");
        assert_eq!(dbscan.algorithm(), Algorithm::Brute);
        assert_eq!(dbscan.epsilon(), DEFAULT_EPSILON);
        assert_eq!(dbscan.min_points().get(), DEFAULT_MIN_POINTS);
        assert_eq!(dbscan.leaf_size().get(), DEFAULT_LEAF_SIZE);
        assert_eq!(dbscan.workers().get(), DEFAULT_WORKERS);
    }

    #[rstest]
    #[case::negative(-0.1)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_invalid_epsilon(#[case] epsilon: f64) {
        let err = DbscanBuilder::new()
            .with_epsilon(epsilon)
            .build()
            .expect_err("epsilon must be rejected");
        assert!(matches!(err, DbscanError::InvalidEpsilon { .. }));
    }

    #[rstest]
    fn zero_epsilon_is_accepted() {
        let dbscan = DbscanBuilder::new()
            .with_epsilon(0.0)
            .build()
            .expect("zero radius is valid");
        assert_eq!(dbscan.epsilon(), 0.0);
    }

    #[rstest]
    fn rejects_zero_workers() {
        let err = DbscanBuilder::new()
            .with_workers(0)
            .build()
            .expect_err("zero workers must be rejected");
        assert_eq!(err, DbscanError::InvalidWorkers { got: 0 });
    }

    #[rstest]
    #[case::brute(Algorithm::Brute, true)]
    #[case::kd_tree(Algorithm::KdTree, false)]
    fn zero_leaf_size_only_matters_for_the_index(
        #[case] algorithm: Algorithm,
        #[case] accepted: bool,
    ) {
        let outcome = DbscanBuilder::new()
            .with_algorithm(algorithm)
            .with_leaf_size(0)
            .build();
        match outcome {
            Ok(dbscan) => {
                assert!(accepted);
                assert_eq!(dbscan.leaf_size().get(), DEFAULT_LEAF_SIZE);
            }
            Err(err) => {
                assert!(!accepted);
                assert_eq!(err, DbscanError::InvalidLeafSize { got: 0 });
            }
        }
    }
}
