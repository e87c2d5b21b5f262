use super::{Metric, axis_gap};

/// Taxicab (L1) distance.
///
/// # Examples
/// ```
/// use dbscan_core::{Manhattan, Metric};
///
/// assert_eq!(Manhattan.distance(&[0.0, 0.0], &[3.0, 4.0]), 7.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Metric for Manhattan {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> f64 {
        left.iter().zip(right).map(|(l, r)| (l - r).abs()).sum()
    }

    fn distance_to_box(&self, point: &[f64], lower: &[f64], upper: &[f64]) -> f64 {
        point
            .iter()
            .zip(lower.iter().zip(upper))
            .map(|(&value, (&lo, &hi))| axis_gap(value, lo, hi))
            .sum()
    }
}
