//! Property-test run profile parsing for CI and local overrides.
//!
//! Every property suite reads its case count and fork mode through
//! [`ProptestRunProfile::load`], so one pair of environment variables tunes
//! the whole workspace.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const SAMPLEVAL_PBT_FORK_ENV_KEY: &str = "SAMPLEVAL_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile from the environment, falling back to the provided
    /// defaults when a variable is unset or malformed.
    ///
    /// # Examples
    /// ```
    /// use sampleval_test_support::property_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_env_or_default(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: read_env_or_default(SAMPLEVAL_PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether proptest cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_env_or_default<T: Copy>(
    key: &'static str,
    default: T,
    parser: fn(&str) -> Result<T, String>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 250 ", Ok(250))]
    #[case("0", Err(()))]
    #[case("-1", Err(()))]
    #[case("abc", Err(()))]
    fn case_counts_must_be_positive_integers(#[case] raw: &str, #[case] expected: Result<u32, ()>) {
        assert_eq!(parse_cases(raw).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("true", Ok(true))]
    #[case("ON", Ok(true))]
    #[case("1", Ok(true))]
    #[case("no", Ok(false))]
    #[case("0", Ok(false))]
    #[case("", Err(()))]
    #[case("maybe", Err(()))]
    fn fork_flags_accept_common_spellings(#[case] raw: &str, #[case] expected: Result<bool, ()>) {
        assert_eq!(parse_bool(raw).map_err(|_| ()), expected);
    }

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(
            read_env_or_default("SAMPLEVAL_TEST_SUPPORT_UNSET_KEY", 17, parse_cases),
            17
        );
    }
}
