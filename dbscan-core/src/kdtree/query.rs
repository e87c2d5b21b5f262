//! Radius queries over a built [`KdTree`].

use super::{KdTree, NodeKind};
use crate::{distance::Metric, point::PointId};

impl KdTree<'_> {
    /// Returns every indexed point whose distance to `query` is at most
    /// `radius`, in ascending id order.
    ///
    /// The result matches a linear scan exactly: a subtree is skipped only when
    /// [`Metric::distance_to_box`] already exceeds `radius`, and that bound
    /// never exceeds the distance to a point inside the box. A point equal to
    /// `query` is included, so callers wanting strict neighbours filter their
    /// own id.
    #[must_use]
    pub fn query_radius<M: Metric + ?Sized>(
        &self,
        query: &[f64],
        radius: f64,
        metric: &M,
    ) -> Vec<PointId> {
        let mut hits = Vec::new();
        let Some(root) = self.root else {
            return hits;
        };

        let mut pending = vec![root];
        while let Some(index) = pending.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if metric.distance_to_box(query, &node.lower, &node.upper) > radius {
                continue;
            }
            match node.kind {
                NodeKind::Branch { left, right } => {
                    pending.push(right);
                    pending.push(left);
                }
                NodeKind::Leaf { start, end } => {
                    let members = self.order.get(start..end).unwrap_or_default();
                    hits.extend(members.iter().copied().filter(|id| {
                        self.points
                            .point(*id)
                            .is_some_and(|coords| metric.distance(query, coords) <= radius)
                    }));
                }
            }
        }

        hits.sort_unstable();
        hits
    }
}
