//! Canonical point sets and label helpers.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Fourteen two-dimensional points forming three loose groups and one outlier.
pub const FOURTEEN_POINTS: [[f64; 2]; 14] = [
    [6.0, 6.0],
    [1.0, 1.0],
    [2.0, 2.0],
    [10.0, 10.0],
    [43.0, 43.0],
    [9.0, 9.0],
    [21.0, 21.0],
    [3.0, 3.0],
    [22.0, 22.0],
    [40.0, 40.0],
    [41.0, 41.0],
    [20.0, 20.0],
    [42.0, 42.0],
    [100.0, 100.0],
];

/// Labels for [`FOURTEEN_POINTS`] with `epsilon = 5.0` and `min_points = 3`.
pub const MIXED_LABELS: [i64; 14] = [1, 1, 1, 1, 2, 1, 3, 1, 3, 2, 2, 3, 2, -1];

/// Cluster count matching [`MIXED_LABELS`].
pub const MIXED_CLUSTERS: usize = 3;

/// Returns [`FOURTEEN_POINTS`] as owned rows.
#[must_use]
pub fn fourteen_point_rows() -> Vec<Vec<f64>> {
    FOURTEEN_POINTS.iter().map(|row| row.to_vec()).collect()
}

/// Parameters for [`seeded_blobs`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobSpec {
    /// Number of blobs.
    pub blobs: usize,
    /// Points drawn around each blob centre.
    pub points_per_blob: usize,
    /// Coordinate dimension.
    pub dimension: usize,
    /// Maximum per-axis offset from the centre.
    pub spread: f64,
    /// Distance between consecutive blob centres along every axis.
    pub separation: f64,
}

impl Default for BlobSpec {
    fn default() -> Self {
        Self {
            blobs: 4,
            points_per_blob: 64,
            dimension: 2,
            spread: 1.0,
            separation: 20.0,
        }
    }
}

/// Generates well-separated blobs deterministically from `seed`.
///
/// Rows are interleaved across blobs so cluster membership does not follow
/// input order.
///
/// # Examples
/// ```
/// use dbscan_test_support::fixtures::{BlobSpec, seeded_blobs};
///
/// let rows = seeded_blobs(7, BlobSpec { blobs: 2, points_per_blob: 5, ..BlobSpec::default() });
/// assert_eq!(rows.len(), 10);
/// assert!(rows.iter().all(|row| row.len() == 2));
/// assert_eq!(rows, seeded_blobs(7, BlobSpec { blobs: 2, points_per_blob: 5, ..BlobSpec::default() }));
/// ```
#[must_use]
pub fn seeded_blobs(seed: u64, spec: BlobSpec) -> Vec<Vec<f64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(spec.blobs * spec.points_per_blob);
    for _ in 0..spec.points_per_blob {
        for blob in 0..spec.blobs {
            let centre = blob as f64 * spec.separation;
            let row = (0..spec.dimension)
                .map(|_| centre + rng.gen_range(-spec.spread..=spec.spread))
                .collect();
            rows.push(row);
        }
    }
    rows
}

/// Renumbers cluster labels in order of first appearance, keeping noise.
///
/// Two labelings describe the same partition exactly when their canonical
/// forms are equal.
///
/// # Examples
/// ```
/// use dbscan_test_support::fixtures::canonical_labels;
///
/// assert_eq!(canonical_labels(&[3, 3, -1, 1, 3]), vec![1, 1, -1, 2, 1]);
/// ```
#[must_use]
pub fn canonical_labels(labels: &[i64]) -> Vec<i64> {
    let mut renamed: Vec<(i64, i64)> = Vec::new();
    labels
        .iter()
        .map(|&label| {
            if label <= 0 {
                return label;
            }
            if let Some(&(_, to)) = renamed.iter().find(|(from, _)| *from == label) {
                return to;
            }
            let to = renamed.len() as i64 + 1;
            renamed.push((label, to));
            to
        })
        .collect()
}
