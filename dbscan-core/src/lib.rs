//! Density-based clustering (DBSCAN) core library.
//!
//! A call flows through four stages: rows are ingested into an immutable
//! [`PointSet`]; a [`NeighborFinder`] ([`BruteForce`] or the k-d tree backed
//! [`IndexedQuery`]) answers radius queries; the [`PrecomputeStage`] runs
//! those queries on a fixed worker pool and joins into a [`NeighborTable`];
//! finally the single-threaded [`ClusterEngine`] assigns labels.
//!
//! ```
//! use dbscan_core::{Algorithm, DbscanBuilder};
//!
//! let dbscan = DbscanBuilder::new()
//!     .with_algorithm(Algorithm::KdTree)
//!     .with_epsilon(1.5)
//!     .with_min_points(2)
//!     .with_leaf_size(2)
//!     .build()?;
//! let result = dbscan.cluster_rows([[0.0, 0.0], [1.0, 1.0], [10.0, 10.0], [11.0, 11.0], [50.0, 0.0]])?;
//! assert_eq!(result.raw_labels(), vec![1, 1, 2, 2, -1]);
//! # Ok::<(), dbscan_core::DbscanError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod dbscan;
mod distance;
mod engine;
mod error;
mod kdtree;
mod neighbors;
mod point;
mod precompute;
mod request;
mod result;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{
        DEFAULT_EPSILON, DEFAULT_LEAF_SIZE, DEFAULT_MIN_POINTS, DEFAULT_WORKERS, DbscanBuilder,
    },
    dbscan::Dbscan,
    distance::{Euclidean, Manhattan, Metric},
    engine::ClusterEngine,
    error::{DbscanError, DbscanErrorCode, PointSetError, PointSetErrorCode, Result},
    kdtree::KdTree,
    neighbors::{
        Algorithm, BRUTE_NAME, BruteForce, Finder, IndexedQuery, KD_TREE_NAME, NeighborFinder,
        NeighborTable,
    },
    point::{PointId, PointSet},
    precompute::PrecomputeStage,
    request::{ClusterRequest, ClusterResponse, cluster},
    result::{ClusterId, ClusteringResult, Label},
};
