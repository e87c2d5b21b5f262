//! Sequential density-reachability expansion.
//!
//! Runs after the precompute barrier on a single thread. Label writes depend on
//! earlier cluster assignments, so this pass is never parallelised.

use std::{collections::VecDeque, num::NonZeroUsize};

use tracing::{debug, instrument};

use crate::{
    neighbors::NeighborTable,
    point::PointId,
    result::{ClusterId, ClusteringResult, Label},
};

/// Mutable per-call clustering state, owned exclusively by the engine.
///
/// `visited` flips from `false` to `true` at most once per point. A label
/// may move from unassigned or noise to a cluster, but a cluster label is
/// final.
#[derive(Debug)]
struct ClusterState {
    visited: Vec<bool>,
    labels: Vec<Label>,
    /// Cluster whose expansion frontier last enqueued each point.
    enqueued_by: Vec<Option<ClusterId>>,
}

impl ClusterState {
    fn new(items: usize) -> Self {
        Self {
            visited: vec![false; items],
            labels: vec![Label::Unassigned; items],
            enqueued_by: vec![None; items],
        }
    }

    /// Marks `point` visited, returning `true` when it was not visited before.
    fn visit(&mut self, point: PointId) -> bool {
        match self.visited.get_mut(point.index()) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    fn mark_noise(&mut self, point: PointId) {
        if let Some(label @ Label::Unassigned) = self.labels.get_mut(point.index()) {
            *label = Label::Noise;
        }
    }

    /// Assigns `cluster` unless the point already belongs to a cluster.
    fn claim(&mut self, point: PointId, cluster: ClusterId) {
        if let Some(label @ (Label::Unassigned | Label::Noise)) =
            self.labels.get_mut(point.index())
        {
            *label = Label::Cluster(cluster);
        }
    }

    /// Records that `cluster` queued `point`, returning `false` if it already
    /// had.
    fn enqueue(&mut self, point: PointId, cluster: ClusterId) -> bool {
        match self.enqueued_by.get_mut(point.index()) {
            Some(slot) if *slot != Some(cluster) => {
                *slot = Some(cluster);
                true
            }
            _ => false,
        }
    }
}

/// Assigns cluster labels from a precomputed [`NeighborTable`].
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use dbscan_core::{ClusterEngine, NeighborTable, PointId};
///
/// // 0 and 1 are mutual neighbours; 2 is isolated.
/// let table = NeighborTable::from_lists(
///     3,
///     vec![vec![PointId::new(1)], vec![PointId::new(0)], vec![]],
/// )?;
/// let engine = ClusterEngine::new(NonZeroUsize::new(2).expect("non-zero"));
/// let result = engine.run(&table);
/// assert_eq!(result.raw_labels(), vec![1, 1, -1]);
/// # Ok::<(), dbscan_core::DbscanError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterEngine {
    min_points: NonZeroUsize,
}

impl ClusterEngine {
    /// Creates an engine using `min_points` as the density threshold. The
    /// threshold counts the point itself.
    #[must_use]
    pub const fn new(min_points: NonZeroUsize) -> Self {
        Self { min_points }
    }

    /// Returns the configured density threshold.
    #[must_use]
    pub const fn min_points(&self) -> NonZeroUsize {
        self.min_points
    }

    /// Returns `true` when a neighbourhood of `neighbours` other points makes
    /// its owner a core point.
    #[must_use]
    pub const fn is_core(&self, neighbours: usize) -> bool {
        neighbours >= self.min_points.get() - 1
    }

    /// Runs the expansion pass over every point in id order.
    #[instrument(
        name = "core.expand",
        skip(self, table),
        fields(points = table.len(), min_points = self.min_points.get()),
    )]
    #[must_use]
    pub fn run(&self, table: &NeighborTable) -> ClusteringResult {
        let mut state = ClusterState::new(table.len());
        let mut next_cluster = Some(ClusterId::FIRST);
        let mut cluster_count = 0_usize;

        for (point, neighbours) in table.iter() {
            if !state.visit(point) {
                continue;
            }
            if !self.is_core(neighbours.len()) {
                state.mark_noise(point);
                continue;
            }
            let Some(cluster) = next_cluster else {
                // Identifier space exhausted; cannot happen below 2^64 points.
                state.mark_noise(point);
                continue;
            };
            next_cluster = cluster.next();
            cluster_count += 1;
            state.claim(point, cluster);
            let touched = self.expand(&mut state, table, point, cluster);
            debug!(cluster = cluster.get(), seed = point.index(), touched, "cluster expanded");
        }

        ClusteringResult::new(state.labels, cluster_count)
    }

    /// Grows `cluster` breadth-first from the core point `seed`, returning the
    /// number of points the frontier touched.
    fn expand(
        &self,
        state: &mut ClusterState,
        table: &NeighborTable,
        seed: PointId,
        cluster: ClusterId,
    ) -> usize {
        state.enqueue(seed, cluster);
        let mut frontier = VecDeque::new();
        for &neighbour in table.get(seed) {
            if state.enqueue(neighbour, cluster) {
                frontier.push_back(neighbour);
            }
        }

        let mut touched = 1_usize;
        while let Some(point) = frontier.pop_front() {
            touched += 1;
            if state.visit(point) {
                let neighbours = table.get(point);
                if self.is_core(neighbours.len()) {
                    for &next in neighbours {
                        if state.enqueue(next, cluster) {
                            frontier.push_back(next);
                        }
                    }
                }
            }
            state.claim(point, cluster);
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(lists: &[&[usize]]) -> NeighborTable {
        let lists = lists
            .iter()
            .map(|list| list.iter().copied().map(PointId::new).collect())
            .collect::<Vec<_>>();
        NeighborTable::from_lists(lists.len(), lists).expect("table must be complete")
    }

    fn engine(min_points: usize) -> ClusterEngine {
        ClusterEngine::new(NonZeroUsize::new(min_points).expect("non-zero"))
    }

    #[rstest]
    fn empty_table_yields_empty_result() {
        let result = engine(3).run(&table(&[]));
        assert!(result.is_empty());
        assert_eq!(result.cluster_count(), 0);
    }

    #[rstest]
    fn noise_is_promoted_to_border_point() {
        // 0 is visited first and is not core; 1 is core and reaches 0.
        let result = engine(3).run(&table(&[&[1], &[0, 2], &[1]]));
        assert_eq!(result.raw_labels(), vec![1, 1, 1]);
        assert_eq!(result.cluster_count(), 1);
    }

    #[rstest]
    fn border_point_stays_with_first_cluster() {
        // 2 borders the core points 1 and 3, which are not density-connected.
        let result = engine(4).run(&table(&[
            &[1],
            &[0, 2, 5],
            &[1, 3],
            &[2, 4, 6],
            &[3],
            &[1],
            &[3],
        ]));
        assert_eq!(result.raw_labels(), vec![1, 1, 1, 2, 2, 1, 2]);
        assert_eq!(result.cluster_count(), 2);
    }

    #[rstest]
    fn chains_of_core_points_form_one_cluster() {
        let result = engine(2).run(&table(&[&[1], &[0, 2], &[1, 3], &[2], &[]]));
        assert_eq!(result.raw_labels(), vec![1, 1, 1, 1, -1]);
    }

    #[rstest]
    fn min_points_one_never_yields_noise() {
        let result = engine(1).run(&table(&[&[], &[2], &[1], &[]]));
        assert_eq!(result.raw_labels(), vec![1, 2, 2, 3]);
        assert_eq!(result.noise_count(), 0);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(5, true)]
    fn core_threshold_excludes_the_point_itself(#[case] neighbours: usize, #[case] core: bool) {
        assert_eq!(engine(3).is_core(neighbours), core);
    }
}
