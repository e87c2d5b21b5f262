use super::{Metric, axis_gap};

/// Straight-line (L2) distance.
///
/// # Examples
/// ```
/// use dbscan_core::{Euclidean, Metric};
///
/// let d = Euclidean.distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0]);
/// assert!((d - 7.071_067_811_865_476).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn name(&self) -> &'static str {
        "euclidean"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> f64 {
        left.iter()
            .zip(right)
            .map(|(l, r)| {
                let diff = l - r;
                diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }

    fn distance_to_box(&self, point: &[f64], lower: &[f64], upper: &[f64]) -> f64 {
        point
            .iter()
            .zip(lower.iter().zip(upper))
            .map(|(&value, (&lo, &hi))| {
                let gap = axis_gap(value, lo, hi);
                gap * gap
            })
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[0.0, 0.0], &[3.0, 4.0], 5.0)]
    #[case(&[1.0, 1.0], &[1.0, 1.0], 0.0)]
    #[case(&[-2.0], &[2.0], 4.0)]
    fn distance_matches_hand_computed_values(
        #[case] left: &[f64],
        #[case] right: &[f64],
        #[case] expected: f64,
    ) {
        assert_eq!(Euclidean.distance(left, right), expected);
        assert_eq!(Euclidean.distance(right, left), expected);
    }

    #[rstest]
    fn box_distance_is_zero_inside_the_box() {
        let d = Euclidean.distance_to_box(&[1.0, 1.0], &[0.0, 0.0], &[2.0, 2.0]);
        assert_eq!(d, 0.0);
    }

    #[rstest]
    fn box_distance_never_exceeds_corner_distance() {
        let point = [5.0, -3.0];
        let lower = [0.0, 0.0];
        let upper = [2.0, 1.0];
        let bound = Euclidean.distance_to_box(&point, &lower, &upper);
        assert_eq!(bound, Euclidean.distance(&point, &[2.0, 0.0]));
        for corner in [[0.0, 0.0], [2.0, 1.0], [0.0, 1.0], [2.0, 0.0]] {
            assert!(bound <= Euclidean.distance(&point, &corner));
        }
    }
}
