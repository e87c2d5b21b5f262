//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use dbscan_core::{DbscanError, PointSetError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated rows did not form a point set.
    #[error("point set construction failed: {0}")]
    PointSet(#[from] PointSetError),
    /// Clustering configuration or execution failed.
    #[error("clustering failed: {0}")]
    Dbscan(#[from] DbscanError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
