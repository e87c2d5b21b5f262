//! Benchmark support crate for the DBSCAN workspace.
//!
//! Provides seeded synthetic point sets and parameter types used by the
//! Criterion benchmarks for neighbour precomputation and full clustering runs.

pub mod error;
pub mod params;
pub mod source;
