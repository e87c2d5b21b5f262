//! Point storage for a single clustering call.
//!
//! A [`PointSet`] is an arena of fixed-dimension coordinate vectors addressed
//! by [`PointId`]. It is immutable once built, so the precompute stage can
//! share it across workers; the mutable clustering state (visited flags and
//! labels) lives in the expansion engine instead.

use crate::error::PointSetError;

/// Stable identifier assigned to a point at ingestion time.
///
/// The identifier is the point's position in the input, so labels read out by
/// id are aligned index-for-index with the caller's rows.
///
/// # Examples
/// ```
/// use dbscan_core::PointId;
///
/// let id = PointId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(usize);

impl PointId {
    /// Wraps a zero-based input position.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the zero-based input position.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

/// Ordered, index-addressable collection of points sharing one dimension.
///
/// # Examples
/// ```
/// use dbscan_core::{PointId, PointSet};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimension(), 2);
/// assert_eq!(points.point(PointId::new(1)), Some(&[2.0, 3.0][..]));
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    dimension: usize,
    len: usize,
    coordinates: Vec<f64>,
}

impl PointSet {
    /// Builds a point set from individual rows.
    ///
    /// An empty input is valid and yields an empty set of dimension zero.
    ///
    /// # Errors
    /// Returns [`PointSetError::ZeroDimension`] when the rows are empty
    /// vectors, [`PointSetError::DimensionMismatch`] when a row's length
    /// differs from the first row, and [`PointSetError::NonFiniteCoordinate`]
    /// when a coordinate is NaN or infinite.
    pub fn try_from_rows<I, R>(rows: I) -> Result<Self, PointSetError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let mut dimension = None;
        let mut coordinates = Vec::new();
        let mut len = 0_usize;
        for (row_index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *dimension.get_or_insert(row.len());
            if expected == 0 {
                return Err(PointSetError::ZeroDimension);
            }
            if row.len() != expected {
                return Err(PointSetError::DimensionMismatch {
                    row: row_index,
                    expected,
                    actual: row.len(),
                });
            }
            validate_finite(row_index, row)?;
            coordinates.extend_from_slice(row);
            len += 1;
        }
        Ok(Self {
            dimension: dimension.unwrap_or(0),
            len,
            coordinates,
        })
    }

    /// Builds a point set from a row-major buffer of `dimension`-wide rows.
    ///
    /// # Errors
    /// Returns [`PointSetError::ZeroDimension`] when `dimension` is zero but
    /// values are present, [`PointSetError::DimensionMismatch`] when the buffer
    /// ends with a partial row, and [`PointSetError::NonFiniteCoordinate`]
    /// when a coordinate is NaN or infinite.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::PointSet;
    ///
    /// let points = PointSet::try_from_flat(3, vec![0.0; 9])?;
    /// assert_eq!(points.len(), 3);
    /// # Ok::<(), dbscan_core::PointSetError>(())
    /// ```
    pub fn try_from_flat(dimension: usize, coordinates: Vec<f64>) -> Result<Self, PointSetError> {
        if coordinates.is_empty() {
            return Ok(Self {
                dimension,
                len: 0,
                coordinates,
            });
        }
        if dimension == 0 {
            return Err(PointSetError::ZeroDimension);
        }
        let remainder = coordinates.len() % dimension;
        let len = coordinates.len() / dimension;
        if remainder != 0 {
            return Err(PointSetError::DimensionMismatch {
                row: len,
                expected: dimension,
                actual: remainder,
            });
        }
        for (row_index, row) in coordinates.chunks_exact(dimension).enumerate() {
            validate_finite(row_index, row)?;
        }
        Ok(Self {
            dimension,
            len,
            coordinates,
        })
    }

    /// Returns the number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the set holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the shared coordinate dimension (zero for an empty set).
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the coordinates of `id`, or `None` when it is out of range.
    #[must_use]
    pub fn point(&self, id: PointId) -> Option<&[f64]> {
        let start = id.index().checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        if id.index() >= self.len {
            return None;
        }
        self.coordinates.get(start..end)
    }

    /// Iterates over every point id in input order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = PointId> + use<> {
        (0..self.len).map(PointId::new)
    }

    /// Iterates over `(id, coordinates)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[f64])> {
        // `chunks_exact` rejects a zero chunk size; an empty set has nothing to yield.
        let chunk = self.dimension.max(1);
        self.coordinates
            .chunks_exact(chunk)
            .take(self.len)
            .enumerate()
            .map(|(index, row)| (PointId::new(index), row))
    }
}

fn validate_finite(row: usize, values: &[f64]) -> Result<(), PointSetError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(axis) => Err(PointSetError::NonFiniteCoordinate { row, axis }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_rows_yield_empty_set() {
        let points = PointSet::try_from_rows(Vec::<Vec<f64>>::new()).expect("empty is valid");
        assert!(points.is_empty());
        assert_eq!(points.dimension(), 0);
        assert_eq!(points.iter().count(), 0);
        assert_eq!(points.point(PointId::new(0)), None);
    }

    #[rstest]
    fn mismatched_rows_are_rejected() {
        let err = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![1.0]])
            .expect_err("ragged rows must fail");
        assert_eq!(
            err,
            PointSetError::DimensionMismatch {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[rstest]
    fn zero_width_rows_are_rejected() {
        let err = PointSet::try_from_rows(vec![Vec::<f64>::new()])
            .expect_err("zero-width rows must fail");
        assert_eq!(err, PointSetError::ZeroDimension);
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    fn non_finite_coordinates_are_rejected(#[case] value: f64) {
        let err = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![1.0, value]])
            .expect_err("non-finite values must fail");
        assert_eq!(err, PointSetError::NonFiniteCoordinate { row: 1, axis: 1 });
    }

    #[rstest]
    fn flat_buffer_rejects_partial_rows() {
        let err = PointSet::try_from_flat(2, vec![0.0, 1.0, 2.0]).expect_err("partial row");
        assert_eq!(
            err,
            PointSetError::DimensionMismatch {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[rstest]
    fn iter_preserves_input_order() {
        let points = PointSet::try_from_rows([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])
            .expect("rows are uniform");
        let collected: Vec<_> = points
            .iter()
            .map(|(id, row)| (id.index(), row.to_vec()))
            .collect();
        assert_eq!(
            collected,
            vec![
                (0, vec![1.0, 2.0]),
                (1, vec![3.0, 4.0]),
                (2, vec![5.0, 6.0]),
            ]
        );
    }
}
