//! Flattening of fixed-size list arrays into row-major `f64` buffers.
use arrow_array::{Array, ArrayRef, FixedSizeListArray, Float32Array, Float64Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseMatrixProviderError;

fn is_float(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Float32 | DataType::Float64)
}

fn list_width(width: i32) -> Result<usize, DenseMatrixProviderError> {
    usize::try_from(width)
        .ok()
        .filter(|&dimension| dimension > 0)
        .ok_or(DenseMatrixProviderError::InvalidDimension { actual: width })
}

/// Checks a schema field and returns its list width.
pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseMatrixProviderError> {
    let DataType::FixedSizeList(child, width) = field.data_type() else {
        return Err(DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: field.data_type().clone(),
        });
    };
    if field.is_nullable() || child.is_nullable() {
        return Err(DenseMatrixProviderError::NullableField {
            column: column.to_owned(),
            nullable_child: child.is_nullable(),
        });
    }
    if !is_float(child.data_type()) {
        return Err(DenseMatrixProviderError::InvalidListValueType {
            actual: child.data_type().clone(),
        });
    }
    list_width(*width)
}

/// Appends every row of `array` to `out`, returning the list width.
pub(crate) fn append_fixed_size_list_values(
    array: &FixedSizeListArray,
    expected_dimension: Option<usize>,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<usize, DenseMatrixProviderError> {
    let value_type = array.value_type();
    if !is_float(&value_type) {
        return Err(DenseMatrixProviderError::InvalidListValueType { actual: value_type });
    }
    let dimension = list_width(array.value_length())?;
    if let Some(expected) = expected_dimension.filter(|&expected| expected != dimension) {
        return Err(DenseMatrixProviderError::InconsistentBatchDimension {
            expected,
            actual: dimension,
        });
    }

    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseMatrixProviderError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseMatrixProviderError::NullRow { row });
        }
        extend_row(&array.value(row_index), row, dimension, out)?;
    }
    Ok(dimension)
}

fn extend_row(
    values: &ArrayRef,
    row: usize,
    dimension: usize,
    out: &mut Vec<f64>,
) -> Result<(), DenseMatrixProviderError> {
    if values.len() != dimension {
        return Err(DenseMatrixProviderError::InvalidRowLength {
            row,
            expected: dimension,
            actual: values.len(),
        });
    }
    if let Some(value_index) = (0..dimension).find(|&index| values.is_null(index)) {
        return Err(DenseMatrixProviderError::NullValue { row, value_index });
    }
    if let Some(floats) = values.as_any().downcast_ref::<Float64Array>() {
        out.extend(floats.values().iter().copied());
    } else if let Some(floats) = values.as_any().downcast_ref::<Float32Array>() {
        out.extend(floats.values().iter().map(|&value| f64::from(value)));
    } else {
        return Err(DenseMatrixProviderError::InvalidListValueType {
            actual: values.data_type().clone(),
        });
    }
    Ok(())
}
