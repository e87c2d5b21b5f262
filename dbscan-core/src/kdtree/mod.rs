//! Static k-d tree used to accelerate radius queries.
//!
//! The tree is built once per clustering call over a borrowed [`PointSet`] and
//! is read-only afterwards, so precompute workers query it concurrently. Nodes
//! live in a flat arena and reference contiguous ranges of a permutation of
//! point ids. Each node records the bounding box of its points, which the
//! query uses to prune whole subtrees.

mod query;

use std::num::NonZeroUsize;

use tracing::instrument;

use crate::point::{PointId, PointSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeKind {
    Leaf { start: usize, end: usize },
    Branch { left: usize, right: usize },
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

/// Spatial index over a [`PointSet`] answering inclusive radius queries.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use dbscan_core::{Euclidean, KdTree, PointId, PointSet};
///
/// let points = PointSet::try_from_rows([[0.0, 0.0], [1.0, 0.0], [5.0, 5.0]])?;
/// let leaf_size = NonZeroUsize::new(1).expect("non-zero");
/// let tree = KdTree::build(&points, leaf_size);
/// let hits = tree.query_radius(&[0.0, 0.0], 1.0, &Euclidean);
/// assert_eq!(hits, vec![PointId::new(0), PointId::new(1)]);
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct KdTree<'a> {
    points: &'a PointSet,
    leaf_size: NonZeroUsize,
    order: Vec<PointId>,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl<'a> KdTree<'a> {
    /// Builds the tree, splitting on the widest axis at the median until every
    /// leaf holds at most `leaf_size` points.
    #[instrument(
        name = "core.kdtree.build",
        skip(points),
        fields(points = points.len(), dimension = points.dimension(), leaf_size = leaf_size.get()),
    )]
    #[must_use]
    pub fn build(points: &'a PointSet, leaf_size: NonZeroUsize) -> Self {
        let mut tree = Self {
            points,
            leaf_size,
            order: points.ids().collect(),
            nodes: Vec::with_capacity(points.len().saturating_mul(2) / leaf_size.get() + 1),
            root: None,
        };
        if !points.is_empty() {
            tree.root = Some(tree.build_range(0, points.len()));
        }
        tree
    }

    /// Returns the leaf-size threshold the tree was built with.
    #[must_use]
    pub const fn leaf_size(&self) -> NonZeroUsize {
        self.leaf_size
    }

    /// Returns the number of indexed points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no points are indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves in the arena.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::Leaf { .. }))
            .count()
    }

    pub(crate) const fn points(&self) -> &'a PointSet {
        self.points
    }

    fn build_range(&mut self, start: usize, end: usize) -> usize {
        let (lower, upper) = self.bounds(start, end);
        let count = end - start;
        let axis = widest_axis(&lower, &upper);

        let kind = match axis {
            Some(axis) if count > self.leaf_size.get() => {
                let mid = count / 2;
                let points = self.points;
                if let Some(slice) = self.order.get_mut(start..end) {
                    slice.select_nth_unstable_by(mid, |left, right| {
                        coordinate(points, *left, axis).total_cmp(&coordinate(points, *right, axis))
                    });
                }
                let left = self.build_range(start, start + mid);
                let right = self.build_range(start + mid, end);
                NodeKind::Branch { left, right }
            }
            // Either small enough or every point is identical: stop splitting.
            _ => NodeKind::Leaf { start, end },
        };

        self.nodes.push(Node { kind, lower, upper });
        self.nodes.len() - 1
    }

    fn bounds(&self, start: usize, end: usize) -> (Vec<f64>, Vec<f64>) {
        let dimension = self.points.dimension();
        let mut lower = vec![f64::INFINITY; dimension];
        let mut upper = vec![f64::NEG_INFINITY; dimension];
        for id in self.order.get(start..end).unwrap_or_default() {
            let Some(coords) = self.points.point(*id) else {
                continue;
            };
            for ((lo, hi), &value) in lower.iter_mut().zip(upper.iter_mut()).zip(coords) {
                *lo = lo.min(value);
                *hi = hi.max(value);
            }
        }
        (lower, upper)
    }
}

fn coordinate(points: &PointSet, id: PointId, axis: usize) -> f64 {
    points
        .point(id)
        .and_then(|coords| coords.get(axis))
        .copied()
        .unwrap_or(0.0)
}

/// Axis with the largest spread, or `None` when every axis is degenerate.
fn widest_axis(lower: &[f64], upper: &[f64]) -> Option<usize> {
    lower
        .iter()
        .zip(upper)
        .map(|(lo, hi)| hi - lo)
        .enumerate()
        .filter(|(_, spread)| *spread > 0.0)
        .max_by(|(_, left), (_, right)| left.total_cmp(right))
        .map(|(axis, _)| axis)
}
