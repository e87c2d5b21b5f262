//! Property tests over randomly generated point sets.

mod common;

use std::collections::BTreeSet;

use common::{RunParams, partition};
use dbscan_core::{
    Algorithm, BruteForce, Euclidean, NeighborFinder, PointId, PointSet, PrecomputeStage,
};
use dbscan_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use test_strategy::Arbitrary;

/// Shape of a generated point set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum Layout {
    /// Points on a coarse grid, so many pairs sit exactly on the radius.
    #[weight(3)]
    Lattice,
    /// Tight groups around a few centres.
    #[weight(2)]
    Grouped,
    /// Repeated copies of a handful of points.
    #[weight(1)]
    Duplicates,
}

#[derive(Clone, Debug)]
struct Case {
    rows: Vec<Vec<f64>>,
    epsilon: f64,
    min_points: usize,
}

fn config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: ProptestRunProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}

fn rows_for(layout: Layout) -> BoxedStrategy<Vec<Vec<f64>>> {
    let half_steps = |range: std::ops::RangeInclusive<i32>| {
        range.prop_map(|value| f64::from(value) * 0.5)
    };
    match layout {
        Layout::Lattice => (1_usize..=3)
            .prop_flat_map(move |dimension| {
                prop::collection::vec(
                    prop::collection::vec(half_steps(-10..=10), dimension),
                    0..40,
                )
            })
            .boxed(),
        Layout::Grouped => (
            prop::collection::vec(half_steps(-40..=40), 1..=4),
            prop::collection::vec((0_usize..4, half_steps(-2..=2), half_steps(-2..=2)), 0..40),
        )
            .prop_map(|(centres, offsets)| {
                offsets
                    .into_iter()
                    .map(|(group, dx, dy)| {
                        let centre = centres[group % centres.len()];
                        vec![centre + dx, centre + dy]
                    })
                    .collect()
            })
            .boxed(),
        Layout::Duplicates => (
            prop::collection::vec(prop::collection::vec(half_steps(-6..=6), 2), 1..=4),
            prop::collection::vec(0_usize..4, 0..30),
        )
            .prop_map(|(distinct, picks)| {
                picks
                    .into_iter()
                    .map(|pick| distinct[pick % distinct.len()].clone())
                    .collect()
            })
            .boxed(),
    }
}

fn cases() -> impl Strategy<Value = Case> {
    any::<Layout>().prop_flat_map(|layout| {
        (
            rows_for(layout),
            (0_i32..=8).prop_map(|value| f64::from(value) * 0.5),
            1_usize..=5,
        )
            .prop_map(|(rows, epsilon, min_points)| Case {
                rows,
                epsilon,
                min_points,
            })
    })
}

fn points_of(case: &Case) -> PointSet {
    PointSet::try_from_rows(&case.rows).expect("generated rows share one dimension")
}

proptest! {
    #![proptest_config(config(64))]

    #[test]
    fn brute_and_kd_tree_agree(case in cases(), leaf_size in 1_usize..8, workers in 1_usize..4) {
        let points = points_of(&case);
        let brute = RunParams::brute(case.epsilon, case.min_points)
            .run(&points)
            .expect("brute run must succeed");
        let indexed = RunParams::brute(case.epsilon, case.min_points)
            .with_algorithm(Algorithm::KdTree, leaf_size)
            .with_workers(workers)
            .run(&points)
            .expect("indexed run must succeed");
        prop_assert_eq!(partition(&brute), partition(&indexed));
        prop_assert_eq!(brute.cluster_count(), indexed.cluster_count());
    }

    #[test]
    fn worker_count_is_invisible(case in cases(), workers in 2_usize..6) {
        let points = points_of(&case);
        let single = RunParams::brute(case.epsilon, case.min_points)
            .run(&points)
            .expect("single-worker run must succeed");
        let many = RunParams::brute(case.epsilon, case.min_points)
            .with_workers(workers)
            .run(&points)
            .expect("multi-worker run must succeed");
        prop_assert_eq!(single, many);
    }

    #[test]
    fn neighbour_relation_is_symmetric(case in cases()) {
        let points = points_of(&case);
        let finder = BruteForce::new(&points, Euclidean, case.epsilon);
        let table = PrecomputeStage::new(std::num::NonZeroUsize::MIN)
            .run(&finder)
            .expect("precompute must succeed");
        let edges: BTreeSet<(PointId, PointId)> = table
            .iter()
            .flat_map(|(point, neighbours)| neighbours.iter().map(move |other| (point, *other)))
            .collect();
        for &(left, right) in &edges {
            prop_assert!(left != right, "a point must not neighbour itself");
            prop_assert!(edges.contains(&(right, left)));
        }
        prop_assert_eq!(finder.points().len(), table.len());
    }

    #[test]
    fn trivial_density_has_no_noise(case in cases()) {
        let points = points_of(&case);
        let result = RunParams::brute(case.epsilon, 1)
            .run(&points)
            .expect("run must succeed");
        prop_assert_eq!(result.noise_count(), 0);
    }

    #[test]
    fn labels_are_well_formed(case in cases()) {
        let points = points_of(&case);
        let result = RunParams::brute(case.epsilon, case.min_points)
            .run(&points)
            .expect("run must succeed");
        let raw = result.raw_labels();
        prop_assert_eq!(raw.len(), points.len());
        prop_assert!(raw.iter().all(|&label| label == -1 || label >= 1));
        let ids: BTreeSet<i64> = raw.iter().copied().filter(|&label| label > 0).collect();
        let expected: BTreeSet<i64> = (1..).take(result.cluster_count()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn rerunning_is_idempotent(case in cases()) {
        let points = points_of(&case);
        let params = RunParams::brute(case.epsilon, case.min_points)
            .with_algorithm(Algorithm::KdTree, 3);
        let first = params.run(&points).expect("first run must succeed");
        let second = params.run(&points.clone()).expect("second run must succeed");
        prop_assert_eq!(first, second);
    }
}
