//! Environment-driven tuning shared by CI and local runs.

pub mod property_test_profile;
