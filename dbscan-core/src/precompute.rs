//! Parallel neighbour precomputation.
//!
//! Every point's neighbour list is computed before expansion starts. Workers
//! only read coordinates (or the index); nothing is written until the table is
//! assembled, so worker scheduling cannot affect the result.

use std::num::NonZeroUsize;
#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(not(feature = "parallel"))]
use tracing::warn;
use tracing::{debug, instrument};

use crate::{
    error::Result,
    neighbors::{NeighborFinder, NeighborTable},
    point::PointId,
};
#[cfg(feature = "parallel")]
use crate::error::DbscanError;

/// Fixed-size worker pool producing a complete [`NeighborTable`].
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use dbscan_core::{BruteForce, Euclidean, PointId, PointSet, PrecomputeStage};
///
/// let points = PointSet::try_from_rows([[0.0], [1.0], [5.0]])?;
/// let finder = BruteForce::new(&points, Euclidean, 1.0);
/// let workers = NonZeroUsize::new(2).expect("non-zero");
/// let table = PrecomputeStage::new(workers).run(&finder)?;
/// assert_eq!(table.get(PointId::new(0)), &[PointId::new(1)]);
/// assert!(table.get(PointId::new(2)).is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecomputeStage {
    workers: NonZeroUsize,
}

impl PrecomputeStage {
    /// Creates a stage running `workers` concurrent queries.
    #[must_use]
    pub const fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    /// Returns the configured worker count.
    #[must_use]
    pub const fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Queries every point and waits for all lists before returning.
    ///
    /// # Errors
    /// Returns [`crate::DbscanError::WorkerPool`] when the worker threads
    /// cannot be spawned, and [`crate::DbscanError::IncompleteNeighborTable`]
    /// if a list is missing when the barrier is reached.
    #[instrument(
        name = "core.precompute",
        err,
        skip(self, finder),
        fields(points = finder.points().len(), workers = self.workers.get()),
    )]
    pub fn run<F: NeighborFinder>(&self, finder: &F) -> Result<NeighborTable> {
        let items = finder.points().len();
        let lists = if self.workers.get() == 1 || items < 2 {
            query_sequential(finder)
        } else {
            self.query_parallel(finder)?
        };
        let table = NeighborTable::from_lists(items, lists)?;
        debug!(
            edges = table.iter().map(|(_, list)| list.len()).sum::<usize>(),
            "neighbour table complete"
        );
        Ok(table)
    }

    #[cfg(feature = "parallel")]
    fn query_parallel<F: NeighborFinder>(&self, finder: &F) -> Result<Vec<Vec<PointId>>> {
        let workers = self.workers.get();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("dbscan-precompute-{index}"))
            .build()
            .map_err(|error| DbscanError::WorkerPool {
                workers,
                message: Arc::from(error.to_string()),
            })?;
        let items = finder.points().len();
        Ok(pool.install(|| {
            (0..items)
                .into_par_iter()
                .map(|index| finder.neighbors(PointId::new(index)))
                .collect()
        }))
    }

    #[cfg(not(feature = "parallel"))]
    fn query_parallel<F: NeighborFinder>(&self, finder: &F) -> Result<Vec<Vec<PointId>>> {
        warn!(
            workers = self.workers.get(),
            "parallel feature disabled; running precompute on the calling thread"
        );
        Ok(query_sequential(finder))
    }
}

fn query_sequential<F: NeighborFinder>(finder: &F) -> Vec<Vec<PointId>> {
    finder
        .points()
        .ids()
        .map(|id| finder.neighbors(id))
        .collect()
}
