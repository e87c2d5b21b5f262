//! Dense vector ingestion from Arrow and Parquet for `dbscan-core`.
//!
//! Columns of type `FixedSizeList<Float32 | Float64, D>` are flattened into a
//! row-major `f64` buffer that converts into a [`dbscan_core::PointSet`].

mod errors;
mod ingest;
mod provider;

pub use errors::DenseMatrixProviderError;
pub use provider::DenseMatrixProvider;
