//! Dense matrix provider implementation.
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use dbscan_core::PointSet;
use parquet::{
    arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder},
    file::reader::ChunkReader,
};

use crate::{
    errors::DenseMatrixProviderError,
    ingest::{append_fixed_size_list_values, validate_fixed_size_list_field},
};

/// Row-major matrix of `f64` vectors loaded from Arrow or Parquet.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use arrow_array::{ArrayRef, FixedSizeListArray, Float64Array};
/// use arrow_schema::{DataType, Field};
/// use dbscan_providers_dense::DenseMatrixProvider;
///
/// let values = Float64Array::from(vec![0.0, 0.0, 3.0, 4.0]);
/// let array = FixedSizeListArray::new(
///     Arc::new(Field::new("item", DataType::Float64, false)),
///     2,
///     Arc::new(values) as ArrayRef,
///     None,
/// );
/// let provider = DenseMatrixProvider::try_from_fixed_size_list("demo", &array)?;
/// assert_eq!(provider.rows(), 2);
/// let points = provider.into_point_set()?;
/// assert_eq!(points.dimension(), 2);
/// # Ok::<(), dbscan_providers_dense::DenseMatrixProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrixProvider {
    name: String,
    rows: usize,
    dimension: usize,
    values: Vec<f64>,
}

impl DenseMatrixProvider {
    fn from_parts(name: impl Into<String>, rows: usize, dimension: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), rows.saturating_mul(dimension));
        Self {
            name: name.into(),
            rows,
            dimension,
            values,
        }
    }

    /// Returns the provider name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the dimensionality of each row.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the underlying row-major matrix.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.values
    }

    /// Loads data from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Returns an error when the child type is not a float, the width is not
    /// positive, or any row or value is null.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut values = Vec::new();
        let dimension = append_fixed_size_list_values(array, None, 0, &mut values)?;
        Ok(Self::from_parts(name, array.len(), dimension, values))
    }

    /// Loads a `FixedSizeList<Float32 | Float64, D>` column from a Parquet
    /// file.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::Io`] when the file cannot be
    /// opened, plus every error of [`Self::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads a column from any Parquet chunk reader.
    ///
    /// # Errors
    /// Returns an error when the column is missing, has the wrong type, is
    /// nullable, contains nulls, or the Parquet data cannot be decoded.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        R: ChunkReader + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let batches = builder.with_projection(mask).build()?;
        let schema = batches.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let dimension = validate_fixed_size_list_field(schema.field(column_index), column)?;

        let mut values = Vec::new();
        let mut rows = 0_usize;
        for batch in batches {
            let batch = batch?;
            let column_array = batch.column(column_index);
            let list = column_array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| DenseMatrixProviderError::InvalidColumnType {
                    column: column.to_owned(),
                    actual: column_array.data_type().clone(),
                })?;
            append_fixed_size_list_values(list, Some(dimension), rows, &mut values)?;
            rows += list.len();
        }
        Ok(Self::from_parts(name, rows, dimension, values))
    }

    /// Converts the matrix into a [`PointSet`].
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::PointSet`] when a coordinate is
    /// NaN or infinite.
    pub fn into_point_set(self) -> Result<PointSet, DenseMatrixProviderError> {
        Ok(PointSet::try_from_flat(self.dimension, self.values)?)
    }
}
