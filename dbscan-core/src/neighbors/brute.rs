//! Linear-scan neighbour finder.

use super::NeighborFinder;
use crate::{
    distance::Metric,
    point::{PointId, PointSet},
};

/// Scans every point for each query; `O(n)` per query.
///
/// # Examples
/// ```
/// use dbscan_core::{BruteForce, Euclidean, NeighborFinder, PointId, PointSet};
///
/// let points = PointSet::try_from_rows([[0.0], [1.0], [3.0]])?;
/// let finder = BruteForce::new(&points, Euclidean, 1.0);
/// assert_eq!(finder.neighbors(PointId::new(0)), vec![PointId::new(1)]);
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BruteForce<'a, M> {
    points: &'a PointSet,
    metric: M,
    epsilon: f64,
}

impl<'a, M: Metric> BruteForce<'a, M> {
    /// Creates a finder answering queries within `epsilon`.
    #[must_use]
    pub const fn new(points: &'a PointSet, metric: M, epsilon: f64) -> Self {
        Self {
            points,
            metric,
            epsilon,
        }
    }
}

impl<M: Metric> NeighborFinder for BruteForce<'_, M> {
    fn points(&self) -> &PointSet {
        self.points
    }

    fn neighbors(&self, point: PointId) -> Vec<PointId> {
        let Some(query) = self.points.point(point) else {
            return Vec::new();
        };
        self.points
            .iter()
            .filter(|(id, coords)| {
                *id != point && self.metric.distance(query, coords) <= self.epsilon
            })
            .map(|(id, _)| id)
            .collect()
    }
}
