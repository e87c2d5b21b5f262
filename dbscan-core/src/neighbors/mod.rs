//! Neighbour queries and the precomputed neighbour table.
//!
//! A [`NeighborFinder`] answers "which *other* points lie within `epsilon`
//! of this one?" with an inclusive boundary. Two implementations exist:
//! [`BruteForce`] scans every point, and [`IndexedQuery`] delegates to a
//! [`crate::KdTree`]. Both must return identical sets so the clustering
//! output never depends on the chosen algorithm.

mod brute;
mod indexed;

use std::{fmt, str::FromStr, sync::Arc};

pub use self::brute::BruteForce;
pub use self::indexed::IndexedQuery;

use crate::{
    distance::Metric,
    error::{DbscanError, Result},
    point::{PointId, PointSet},
};

/// Wire name of the linear-scan finder.
pub const BRUTE_NAME: &str = "brute";
/// Wire name of the k-d tree finder.
pub const KD_TREE_NAME: &str = "kd_tree";

/// Selects the neighbour finder used during precompute.
///
/// # Examples
/// ```
/// use dbscan_core::Algorithm;
///
/// let algorithm: Algorithm = "kd_tree".parse()?;
/// assert_eq!(algorithm, Algorithm::KdTree);
/// assert_eq!(algorithm.to_string(), "kd_tree");
/// assert!("ball_tree".parse::<Algorithm>().is_err());
/// # Ok::<(), dbscan_core::DbscanError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Linear scan over every point.
    #[default]
    Brute,
    /// Radius queries against a k-d tree built once per call.
    KdTree,
}

impl Algorithm {
    /// Returns the wire name of the algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brute => BRUTE_NAME,
            Self::KdTree => KD_TREE_NAME,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = DbscanError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            BRUTE_NAME => Ok(Self::Brute),
            KD_TREE_NAME => Ok(Self::KdTree),
            other => Err(DbscanError::UnknownAlgorithm {
                name: Arc::from(other),
            }),
        }
    }
}

/// Capability answering epsilon-neighbourhood queries over a point set.
///
/// Implementations are read-only and shared across precompute workers.
pub trait NeighborFinder: Sync {
    /// The point set queries are answered against.
    fn points(&self) -> &PointSet;

    /// Returns the distinct points, other than `point`, whose distance to
    /// `point` is at most epsilon, in ascending id order.
    fn neighbors(&self, point: PointId) -> Vec<PointId>;
}

/// Runtime-selected neighbour finder.
#[derive(Debug)]
pub enum Finder<'a, M> {
    /// Linear scan.
    BruteForce(BruteForce<'a, M>),
    /// Indexed radius queries.
    Indexed(IndexedQuery<'a, M>),
}

impl<'a, M: Metric> Finder<'a, M> {
    /// Builds the finder for `algorithm`, constructing the spatial index when
    /// required.
    pub fn new(
        algorithm: Algorithm,
        points: &'a PointSet,
        metric: M,
        epsilon: f64,
        leaf_size: std::num::NonZeroUsize,
    ) -> Self {
        match algorithm {
            Algorithm::Brute => Self::BruteForce(BruteForce::new(points, metric, epsilon)),
            Algorithm::KdTree => {
                Self::Indexed(IndexedQuery::build(points, metric, epsilon, leaf_size))
            }
        }
    }
}

impl<M: Metric> NeighborFinder for Finder<'_, M> {
    fn points(&self) -> &PointSet {
        match self {
            Self::BruteForce(finder) => finder.points(),
            Self::Indexed(finder) => finder.points(),
        }
    }

    fn neighbors(&self, point: PointId) -> Vec<PointId> {
        match self {
            Self::BruteForce(finder) => finder.neighbors(point),
            Self::Indexed(finder) => finder.neighbors(point),
        }
    }
}

/// Neighbour lists for every point, keyed by [`PointId`].
///
/// Populated once by the precompute stage and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    lists: Vec<Vec<PointId>>,
}

impl NeighborTable {
    /// Wraps precomputed lists, checking that exactly one list exists per
    /// point.
    ///
    /// # Errors
    /// Returns [`DbscanError::IncompleteNeighborTable`] when the number of
    /// lists differs from `expected`.
    pub fn from_lists(expected: usize, lists: Vec<Vec<PointId>>) -> Result<Self> {
        if lists.len() != expected {
            return Err(DbscanError::IncompleteNeighborTable {
                expected,
                received: lists.len(),
            });
        }
        Ok(Self { lists })
    }

    /// Returns the neighbours of `point` (empty for unknown ids).
    #[must_use]
    pub fn get(&self, point: PointId) -> &[PointId] {
        self.lists
            .get(point.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of points covered by the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` when the table covers no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Iterates over `(point, neighbours)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[PointId])> {
        self.lists
            .iter()
            .enumerate()
            .map(|(index, list)| (PointId::new(index), list.as_slice()))
    }
}
