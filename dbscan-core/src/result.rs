//! Result types for clustering operations.
//!
//! Labels follow the wire convention: `0` means unassigned, `-1` noise, and
//! `k >= 1` membership of cluster `k`. A finished [`ClusteringResult`] never
//! contains [`Label::Unassigned`].

use std::num::NonZeroU64;

use crate::point::PointId;

/// Identifier assigned to a cluster; allocated from `1` upwards without gaps.
///
/// # Examples
/// ```
/// use dbscan_core::ClusterId;
///
/// let first = ClusterId::FIRST;
/// assert_eq!(first.get(), 1);
/// assert_eq!(first.next().map(ClusterId::get), Some(2));
/// assert!(ClusterId::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(NonZeroU64);

impl ClusterId {
    /// The first identifier handed out in a run.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Creates an identifier, rejecting zero.
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0.get() }

    /// Returns the identifier following this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

/// Clustering state of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    /// Not yet reached by the expansion pass.
    #[default]
    Unassigned,
    /// Not density-reachable from any core point.
    Noise,
    /// Member of the given cluster.
    Cluster(ClusterId),
}

impl Label {
    /// Wire value of the noise label.
    pub const NOISE_RAW: i64 = -1;

    /// Returns the wire encoding: `0`, `-1`, or the cluster id.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{ClusterId, Label};
    ///
    /// assert_eq!(Label::Unassigned.as_raw(), 0);
    /// assert_eq!(Label::Noise.as_raw(), -1);
    /// assert_eq!(Label::Cluster(ClusterId::FIRST).as_raw(), 1);
    /// ```
    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Unassigned => 0,
            Self::Noise => Self::NOISE_RAW,
            Self::Cluster(id) => i64::try_from(id.get()).unwrap_or(i64::MAX),
        }
    }

    /// Returns the cluster when the point is a member of one.
    #[must_use]
    pub const fn cluster(self) -> Option<ClusterId> {
        match self {
            Self::Cluster(id) => Some(id),
            Self::Unassigned | Self::Noise => None,
        }
    }

    /// Returns `true` for noise points.
    #[must_use]
    pub const fn is_noise(self) -> bool {
        matches!(self, Self::Noise)
    }
}

/// Output of a clustering run: one label per input point plus the cluster
/// count.
///
/// # Examples
/// ```
/// use dbscan_core::{DbscanBuilder, PointSet};
///
/// let points = PointSet::try_from_rows([[0.0], [0.5], [1.0], [9.0]])?;
/// let dbscan = DbscanBuilder::new()
///     .with_epsilon(0.5)
///     .with_min_points(2)
///     .build()?;
/// let result = dbscan.run(&points)?;
/// assert_eq!(result.raw_labels(), vec![1, 1, 1, -1]);
/// assert_eq!(result.cluster_count(), 1);
/// assert_eq!(result.noise_count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusteringResult {
    labels: Vec<Label>,
    cluster_count: usize,
}

impl ClusteringResult {
    pub(crate) const fn new(labels: Vec<Label>, cluster_count: usize) -> Self {
        Self {
            labels,
            cluster_count,
        }
    }

    /// Returns the labels in input order.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the label of `point`, or `None` when the id is out of range.
    #[must_use]
    pub fn label(&self, point: PointId) -> Option<Label> {
        self.labels.get(point.index()).copied()
    }

    /// Returns the labels in their wire encoding.
    #[must_use]
    pub fn raw_labels(&self) -> Vec<i64> {
        self.labels.iter().map(|label| label.as_raw()).collect()
    }

    /// Returns the number of clusters produced.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Returns the number of points labelled as noise.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|label| label.is_noise()).count()
    }

    /// Returns the members of every cluster, indexed by `cluster id - 1`.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<PointId>> {
        let mut groups = vec![Vec::new(); self.cluster_count];
        for (index, label) in self.labels.iter().enumerate() {
            let slot = label
                .cluster()
                .and_then(|id| usize::try_from(id.get() - 1).ok())
                .and_then(|slot| groups.get_mut(slot));
            if let Some(group) = slot {
                group.push(PointId::new(index));
            }
        }
        groups
    }

    /// Returns the points labelled as noise.
    #[must_use]
    pub fn noise(&self) -> Vec<PointId> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_noise())
            .map(|(index, _)| PointId::new(index))
            .collect()
    }

    /// Returns the number of labelled points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the run covered no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
