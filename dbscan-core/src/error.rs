//! Error types for the DBSCAN core library.
//!
//! Every failure the core can report is a caller-input problem detected before
//! clustering starts, with two exceptions: the worker pool could not be spawned,
//! or the precompute barrier observed an incomplete neighbour table.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while ingesting rows into a [`crate::PointSet`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PointSetError {
    /// A row's length differs from the first row's length.
    #[error("row {row} has dimension {actual} but expected {expected}")]
    DimensionMismatch {
        /// Index of the offending row.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Dimension of the offending row.
        actual: usize,
    },
    /// Rows must have at least one coordinate.
    #[error("point vectors must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("row {row} has a non-finite coordinate on axis {axis}")]
    NonFiniteCoordinate {
        /// Index of the offending row.
        row: usize,
        /// Axis holding the non-finite value.
        axis: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PointSetError`] variants.
    enum PointSetErrorCode for PointSetError {
        /// A row's length differs from the first row's length.
        DimensionMismatch => DimensionMismatch { .. } => "POINT_SET_DIMENSION_MISMATCH",
        /// Rows must have at least one coordinate.
        ZeroDimension => ZeroDimension => "POINT_SET_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "POINT_SET_NON_FINITE_COORDINATE",
    }
}

/// Error type produced when configuring or running [`crate::Dbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DbscanError {
    /// The algorithm selector did not name a known neighbour finder.
    #[error("unknown algorithm `{name}`; expected `brute` or `kd_tree`")]
    UnknownAlgorithm {
        /// Selector supplied by the caller.
        name: Arc<str>,
    },
    /// `min_points` must be at least one.
    #[error("min_points must be at least 1 (got {got})")]
    InvalidMinPoints {
        /// The rejected value.
        got: usize,
    },
    /// `epsilon` must be finite and non-negative.
    #[error("epsilon must be finite and non-negative (got {got})")]
    InvalidEpsilon {
        /// The rejected value.
        got: f64,
    },
    /// `leaf_size` must be at least one when the k-d tree is selected.
    #[error("leaf_size must be at least 1 (got {got})")]
    InvalidLeafSize {
        /// The rejected value.
        got: usize,
    },
    /// `workers` must be at least one.
    #[error("workers must be at least 1 (got {got})")]
    InvalidWorkers {
        /// The rejected value.
        got: usize,
    },
    /// The input rows could not form a valid point set.
    #[error("invalid point set: {error}")]
    PointSet {
        #[source]
        /// Underlying ingestion error.
        error: PointSetError,
    },
    /// The precompute worker pool could not be created.
    #[error("failed to start {workers} precompute workers: {message}")]
    WorkerPool {
        /// Requested worker count.
        workers: usize,
        /// Message reported by the thread pool builder.
        message: Arc<str>,
    },
    /// The precompute barrier received fewer neighbour lists than points.
    #[error("neighbour table holds {received} lists but {expected} points were queried")]
    IncompleteNeighborTable {
        /// Number of points in the set.
        expected: usize,
        /// Number of neighbour lists received.
        received: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DbscanError`] variants.
    enum DbscanErrorCode for DbscanError {
        /// The algorithm selector did not name a known neighbour finder.
        UnknownAlgorithm => UnknownAlgorithm { .. } => "DBSCAN_UNKNOWN_ALGORITHM",
        /// `min_points` must be at least one.
        InvalidMinPoints => InvalidMinPoints { .. } => "DBSCAN_INVALID_MIN_POINTS",
        /// `epsilon` must be finite and non-negative.
        InvalidEpsilon => InvalidEpsilon { .. } => "DBSCAN_INVALID_EPSILON",
        /// `leaf_size` must be at least one.
        InvalidLeafSize => InvalidLeafSize { .. } => "DBSCAN_INVALID_LEAF_SIZE",
        /// `workers` must be at least one.
        InvalidWorkers => InvalidWorkers { .. } => "DBSCAN_INVALID_WORKERS",
        /// The input rows could not form a valid point set.
        PointSetFailure => PointSet { .. } => "DBSCAN_POINT_SET_FAILURE",
        /// The precompute worker pool could not be created.
        WorkerPool => WorkerPool { .. } => "DBSCAN_WORKER_POOL",
        /// The precompute barrier received fewer neighbour lists than points.
        IncompleteNeighborTable => IncompleteNeighborTable { .. } => "DBSCAN_INCOMPLETE_NEIGHBOR_TABLE",
    }
}

impl DbscanError {
    /// Retrieve the inner [`PointSetErrorCode`] when the error originated while
    /// ingesting points.
    #[must_use]
    pub const fn point_set_code(&self) -> Option<PointSetErrorCode> {
        match self {
            Self::PointSet { error } => Some(error.code()),
            _ => None,
        }
    }

    /// Returns `true` when the caller's input or configuration caused the
    /// failure.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            Self::WorkerPool { .. } | Self::IncompleteNeighborTable { .. }
        )
    }
}

impl From<PointSetError> for DbscanError {
    fn from(error: PointSetError) -> Self {
        Self::PointSet { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DbscanError>;
