//! Shared test utilities for `dbscan-core`.

use dbscan_test_support::{
    ci::property_test_profile::ProptestRunProfile, fixtures::FOURTEEN_POINTS,
};
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    distance::Metric,
    point::{PointId, PointSet},
};

/// Builds a proptest configuration honouring `DBSCAN_PROPTEST_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: ProptestRunProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}

/// The fourteen-point scenario set.
#[must_use]
pub(crate) fn fourteen_points() -> PointSet {
    PointSet::try_from_rows(FOURTEEN_POINTS).expect("fixture rows are uniform")
}

/// Integer lattice of `columns * rows` points with unit spacing.
#[must_use]
pub(crate) fn grid_points(columns: usize, rows: usize) -> PointSet {
    let coordinates = (0..rows)
        .flat_map(|y| (0..columns).flat_map(move |x| [x as f64, y as f64]))
        .collect();
    PointSet::try_from_flat(2, coordinates).expect("grid rows are uniform")
}

/// Reference radius query: every id within `radius` of `query`, self included.
#[must_use]
pub(crate) fn linear_scan<M: Metric>(
    points: &PointSet,
    query: &[f64],
    radius: f64,
    metric: &M,
) -> Vec<PointId> {
    points
        .iter()
        .filter(|(_, coords)| metric.distance(query, coords) <= radius)
        .map(|(id, _)| id)
        .collect()
}
