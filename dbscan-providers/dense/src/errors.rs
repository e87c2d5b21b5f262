use arrow_schema::{ArrowError, DataType};
use dbscan_core::PointSetError;
use thiserror::Error;

/// Failures raised while loading dense vectors.
#[derive(Debug, Error)]
pub enum DenseMatrixProviderError {
    /// The requested column does not exist.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound {
        /// Requested column name.
        column: String,
    },
    /// The column is not a fixed-size list.
    #[error("column `{column}` must be a FixedSizeList<Float32 | Float64, _> but found {actual:?}")]
    InvalidColumnType {
        /// Requested column name.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// The list items are not 32- or 64-bit floats.
    #[error("FixedSizeList child type must be Float32 or Float64 but found {actual:?}")]
    InvalidListValueType {
        /// Child type found.
        actual: DataType,
    },
    /// The schema declares nulls where none are accepted.
    #[error("column `{column}` must be non-nullable (nullable child: {nullable_child})")]
    NullableField {
        /// Requested column name.
        column: String,
        /// Whether the list items, rather than the list itself, are nullable.
        nullable_child: bool,
    },
    /// The list width cannot describe a point dimension.
    #[error("invalid FixedSizeList dimension {actual}")]
    InvalidDimension {
        /// Declared list width.
        actual: i32,
    },
    /// A whole row was null.
    #[error("row {row} is null")]
    NullRow {
        /// Absolute row index.
        row: usize,
    },
    /// A row contained a null coordinate.
    #[error("row {row} contains null value at position {value_index}")]
    NullValue {
        /// Absolute row index.
        row: usize,
        /// Position of the null coordinate.
        value_index: usize,
    },
    /// A row's length disagreed with the list width.
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        /// Absolute row index.
        row: usize,
        /// List width.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
    /// The flattened buffer would not fit in memory.
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow {
        /// Rows in the offending batch.
        rows: usize,
        /// Row width.
        dimension: usize,
    },
    /// Batches disagreed on the list width.
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    InconsistentBatchDimension {
        /// Width of the first batch.
        expected: usize,
        /// Width of the offending batch.
        actual: usize,
    },
    /// The vectors could not form a point set.
    #[error("invalid points: {0}")]
    PointSet(#[from] PointSetError),
    /// Arrow decoding failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet decoding failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// The file could not be opened.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
