//! Neighbour precompute benchmarks.
//!
//! Compares the brute-force scan with k-d tree queries across dataset sizes
//! and worker counts. Index construction is included, matching what a
//! clustering call pays.

use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use dbscan_benches::{
    error::BenchSetupError,
    params::NeighborBenchParams,
    source::{BlobConfig, SyntheticSource},
};
use dbscan_core::{Algorithm, DEFAULT_LEAF_SIZE, Euclidean, Finder, PrecomputeStage};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 3;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[1_000, 5_000];

/// Worker counts to benchmark.
const WORKER_COUNTS: &[usize] = &[1, 4];

/// Neighbourhood radius; roughly one blob half-width.
const EPSILON: f64 = 0.8;

fn non_zero(value: usize, context: &'static str) -> Result<NonZeroUsize, BenchSetupError> {
    NonZeroUsize::new(value).ok_or(BenchSetupError::ZeroValue { context })
}

fn precompute_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("precompute");
    group.sample_size(10);
    let leaf_size = non_zero(DEFAULT_LEAF_SIZE, "leaf size")?;

    for &point_count in POINT_COUNTS {
        let source = SyntheticSource::generate(&BlobConfig::new(point_count, DIMENSIONS, SEED))?;
        let points = source.to_point_set()?;

        for algorithm in [Algorithm::Brute, Algorithm::KdTree] {
            for &workers in WORKER_COUNTS {
                let stage = PrecomputeStage::new(non_zero(workers, "workers")?);
                let params = NeighborBenchParams {
                    point_count,
                    algorithm,
                    workers,
                };
                group.bench_with_input(
                    BenchmarkId::from_parameter(&params),
                    &algorithm,
                    |b, &selected| {
                        b.iter(|| {
                            let finder =
                                Finder::new(selected, &points, &Euclidean, EPSILON, leaf_size);
                            stage.run(&finder)
                        });
                    },
                );
            }
        }
    }

    group.finish();
    Ok(())
}

fn precompute(c: &mut Criterion) {
    if let Err(err) = precompute_impl(c) {
        panic!("precompute benchmark setup failed: {err}");
    }
}

criterion_group!(benches, precompute);
criterion_main!(benches);
