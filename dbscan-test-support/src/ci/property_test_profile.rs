//! Property-test run profile.
//!
//! Suites read their case count through [`ProptestRunProfile::load`] so one
//! environment variable scales every property run at once.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const DBSCAN_PROPTEST_CASES_ENV_KEY: &str = "DBSCAN_PROPTEST_CASES";

/// Case budget for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to `default_cases` when the override is
    /// absent or unusable.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbscan_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(DBSCAN_PROPTEST_CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = DBSCAN_PROPTEST_CASES_ENV_KEY,
                    raw = %raw,
                    reason,
                    "ignoring property-test case override",
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self { cases }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, &'static str> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive"),
        Ok(cases) => Ok(cases),
        Err(_) => Err("case count must be an unsigned integer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 512 ", Ok(512))]
    #[case("0", Err("case count must be positive"))]
    #[case("-3", Err("case count must be an unsigned integer"))]
    #[case("many", Err("case count must be an unsigned integer"))]
    fn parses_case_overrides(#[case] raw: &str, #[case] expected: Result<u32, &'static str>) {
        assert_eq!(parse_cases(raw), expected);
    }
}
