//! Support library for the `dbscan` CLI binary.
//!
//! Exposes the command pipeline, the JSON request codec, and logging setup so
//! doctests and integration tests can exercise them without spawning a
//! process.

pub mod cli;
pub mod logging;
