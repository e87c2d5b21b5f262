//! Seeded synthetic point sets for benchmarks.
//!
//! Points are drawn uniformly inside axis-aligned boxes around centroids laid
//! out on a line, with a fraction of uniform background points standing in
//! for noise.

use dbscan_core::PointSet;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Errors that may occur while generating synthetic data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The configured cluster count exceeded the available points.
    #[error("cluster count ({cluster_count}) must not exceed point count ({point_count})")]
    ClusterCountExceedsPointCount {
        /// Number of clusters requested.
        cluster_count: usize,
        /// Number of points requested.
        point_count: usize,
    },
    /// A floating-point generator parameter was invalid.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the invalid parameter.
        parameter: &'static str,
    },
}

/// Configuration for [`SyntheticSource::generate`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlobConfig {
    /// Total number of points, background noise included.
    pub point_count: usize,
    /// Coordinates per point.
    pub dimensions: usize,
    /// Number of dense blobs.
    pub cluster_count: usize,
    /// Half-width of each blob along every axis.
    pub spread: f64,
    /// Distance between neighbouring blob centroids on the first axis.
    pub separation: f64,
    /// Every `noise_every`-th point is uniform background; `0` disables it.
    pub noise_every: usize,
    /// RNG seed.
    pub seed: u64,
}

impl BlobConfig {
    /// Returns a configuration with the benchmark defaults for `point_count`
    /// points in `dimensions` dimensions.
    #[must_use]
    pub const fn new(point_count: usize, dimensions: usize, seed: u64) -> Self {
        Self {
            point_count,
            dimensions,
            cluster_count: 8,
            spread: 1.0,
            separation: 10.0,
            noise_every: 20,
            seed,
        }
    }

    fn validate(&self) -> Result<(), SyntheticError> {
        if self.point_count == 0 {
            return Err(SyntheticError::ZeroPoints);
        }
        if self.dimensions == 0 {
            return Err(SyntheticError::ZeroDimensions);
        }
        if self.cluster_count == 0 {
            return Err(SyntheticError::ZeroClusters);
        }
        if self.cluster_count > self.point_count {
            return Err(SyntheticError::ClusterCountExceedsPointCount {
                cluster_count: self.cluster_count,
                point_count: self.point_count,
            });
        }
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(SyntheticError::InvalidFloatParameter { parameter: "spread" });
        }
        if !self.separation.is_finite() || self.separation <= 0.0 {
            return Err(SyntheticError::InvalidFloatParameter {
                parameter: "separation",
            });
        }
        Ok(())
    }
}

/// Generated rows plus the configuration that produced them.
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    rows: Vec<Vec<f64>>,
    config: BlobConfig,
}

impl SyntheticSource {
    /// Generates a deterministic dataset.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &BlobConfig) -> Result<Self, SyntheticError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let extent = config.separation * usize_to_f64(config.cluster_count);
        let rows = (0..config.point_count)
            .map(|index| {
                if config.noise_every > 0 && index % config.noise_every == config.noise_every - 1 {
                    (0..config.dimensions)
                        .map(|_| rng.gen_range(-config.separation..extent))
                        .collect()
                } else {
                    let centroid = usize_to_f64(index % config.cluster_count) * config.separation;
                    (0..config.dimensions)
                        .map(|axis| {
                            let centre = if axis == 0 { centroid } else { 0.0 };
                            centre + rng.gen_range(-config.spread..=config.spread)
                        })
                        .collect()
                }
            })
            .collect();
        Ok(Self {
            rows,
            config: config.clone(),
        })
    }

    /// Returns the generated rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns the generating configuration.
    #[must_use]
    pub const fn config(&self) -> &BlobConfig {
        &self.config
    }

    /// Converts the rows into a [`PointSet`].
    ///
    /// # Errors
    /// Returns [`BenchSetupError::PointSet`] if the rows are rejected.
    pub fn to_point_set(&self) -> Result<PointSet, BenchSetupError> {
        Ok(PointSet::try_from_rows(&self.rows)?)
    }
}

fn usize_to_f64(value: usize) -> f64 {
    u32::try_from(value).map_or(f64::from(u32::MAX), f64::from)
}
