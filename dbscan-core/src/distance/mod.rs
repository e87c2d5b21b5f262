//! Pluggable distance metrics.
//!
//! Neighbourhoods are defined with the linear distance returned by
//! [`Metric::distance`] and an inclusive `<= epsilon` boundary. Squared
//! distances are never compared against `epsilon`, so callers always pass the
//! radius in the metric's own units.

mod euclidean;
mod manhattan;

pub use self::euclidean::Euclidean;
pub use self::manhattan::Manhattan;

/// A distance function over equal-length coordinate slices.
///
/// Implementations must be symmetric and non-negative. The spatial index
/// additionally relies on [`Metric::distance_to_box`] never exceeding the
/// distance to any point inside the box; the default returns `0.0`, which
/// disables pruning but keeps indexed queries exact.
///
/// # Examples
/// ```
/// use dbscan_core::{Euclidean, Metric};
///
/// let d = Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
/// assert_eq!(d, 5.0);
/// ```
pub trait Metric: Send + Sync {
    /// Stable, human-readable metric name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Distance between two points of the same dimension.
    fn distance(&self, left: &[f64], right: &[f64]) -> f64;

    /// Lower bound on the distance from `point` to any point inside the
    /// axis-aligned box `[lower, upper]`.
    fn distance_to_box(&self, _point: &[f64], _lower: &[f64], _upper: &[f64]) -> f64 {
        0.0
    }
}

impl<M: Metric + ?Sized> Metric for &M {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> f64 {
        (**self).distance(left, right)
    }

    fn distance_to_box(&self, point: &[f64], lower: &[f64], upper: &[f64]) -> f64 {
        (**self).distance_to_box(point, lower, upper)
    }
}

/// Per-axis gap between `value` and the interval `[lower, upper]`.
pub(crate) fn axis_gap(value: f64, lower: f64, upper: f64) -> f64 {
    if value < lower {
        lower - value
    } else if value > upper {
        value - upper
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Metric relying on the default box bound.
    struct Chebyshev;

    impl Metric for Chebyshev {
        fn name(&self) -> &'static str {
            "chebyshev"
        }

        fn distance(&self, left: &[f64], right: &[f64]) -> f64 {
            left.iter()
                .zip(right)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max)
        }
    }

    #[rstest]
    #[case::inside(&[0.5, 0.5])]
    #[case::outside(&[10.0, -3.0])]
    fn default_box_bound_never_prunes(#[case] point: &[f64]) {
        assert_eq!(Chebyshev.distance_to_box(point, &[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[rstest]
    fn references_forward_to_the_metric() {
        let metric = &Chebyshev;
        assert_eq!(metric.name(), "chebyshev");
        assert_eq!(metric.distance(&[0.0, 0.0], &[3.0, -4.0]), 4.0);
        assert_eq!(metric.distance_to_box(&[5.0], &[0.0], &[1.0]), 0.0);
    }
}
