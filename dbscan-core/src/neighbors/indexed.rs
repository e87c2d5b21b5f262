//! Neighbour finder backed by a k-d tree.

use std::num::NonZeroUsize;

use super::NeighborFinder;
use crate::{
    distance::Metric,
    kdtree::KdTree,
    point::{PointId, PointSet},
};

/// Answers queries through a [`KdTree`] built once at construction.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use dbscan_core::{Euclidean, IndexedQuery, NeighborFinder, PointId, PointSet};
///
/// let points = PointSet::try_from_rows([[0.0], [1.0], [3.0]])?;
/// let leaf_size = NonZeroUsize::new(2).expect("non-zero");
/// let finder = IndexedQuery::build(&points, Euclidean, 2.0, leaf_size);
/// assert_eq!(
///     finder.neighbors(PointId::new(1)),
///     vec![PointId::new(0), PointId::new(2)]
/// );
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IndexedQuery<'a, M> {
    tree: KdTree<'a>,
    metric: M,
    epsilon: f64,
}

impl<'a, M: Metric> IndexedQuery<'a, M> {
    /// Builds the index over `points` and wraps it.
    #[must_use]
    pub fn build(points: &'a PointSet, metric: M, epsilon: f64, leaf_size: NonZeroUsize) -> Self {
        Self {
            tree: KdTree::build(points, leaf_size),
            metric,
            epsilon,
        }
    }

    /// Returns the underlying index.
    #[must_use]
    pub const fn tree(&self) -> &KdTree<'a> {
        &self.tree
    }
}

impl<M: Metric> NeighborFinder for IndexedQuery<'_, M> {
    fn points(&self) -> &PointSet {
        self.tree.points()
    }

    fn neighbors(&self, point: PointId) -> Vec<PointId> {
        let Some(query) = self.tree.points().point(point) else {
            return Vec::new();
        };
        let mut hits = self.tree.query_radius(query, self.epsilon, &self.metric);
        hits.retain(|id| *id != point);
        hits
    }
}
