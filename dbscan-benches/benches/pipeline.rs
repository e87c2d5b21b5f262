//! End-to-end clustering benchmarks.
//!
//! Measures `Dbscan::run` with the k-d tree finder, covering index build,
//! precompute and expansion together.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use dbscan_benches::{
    error::BenchSetupError,
    params::PipelineBenchParams,
    source::{BlobConfig, SyntheticSource},
};
use dbscan_core::{Algorithm, DbscanBuilder};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 2;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[1_000, 10_000];

/// Density thresholds to benchmark.
const MIN_POINTS: &[usize] = &[4, 16];

fn pipeline_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("dbscan_run");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let source = SyntheticSource::generate(&BlobConfig::new(point_count, DIMENSIONS, SEED))?;
        let points = source.to_point_set()?;

        for &min_points in MIN_POINTS {
            let dbscan = DbscanBuilder::new()
                .with_algorithm(Algorithm::KdTree)
                .with_epsilon(0.5)
                .with_min_points(min_points)
                .with_workers(4)
                .build()?;
            let params = PipelineBenchParams {
                point_count,
                min_points,
            };
            group.bench_with_input(BenchmarkId::from_parameter(&params), &points, |b, input| {
                b.iter(|| dbscan.run(input));
            });
        }
    }

    group.finish();
    Ok(())
}

fn pipeline(c: &mut Criterion) {
    if let Err(err) = pipeline_impl(c) {
        panic!("pipeline benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pipeline);
criterion_main!(benches);
