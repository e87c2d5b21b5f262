//! Shared test utilities used across dbscan crates.
//!
//! Holds the tracing recording layer, canonical point fixtures, a seeded blob
//! generator, and the property-test run profile. The crate deliberately does
//! not depend on `dbscan-core`, so fixtures are plain coordinate rows and
//! label vectors.

pub mod ci;
pub mod fixtures;
pub mod tracing;
