//! Resolver configuration: wait ceiling, polling cadence, absence policy.
//!
//! Configuration is an explicit value handed to [`crate::ElementResolver`]
//! at construction; there is no hidden global. The one concession to
//! environment-driven setups is [`ResolverConfig::from_env`], which reads
//! the same knobs from process environment variables for suites that
//! configure their runs externally.

use std::time::Duration;

use tracing::warn;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default ceiling for any single wait (90 seconds)
pub const DEFAULT_MAX_WAIT_SECS: u64 = 90;

/// Default polling cadence (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Environment variable overriding the wait ceiling, in whole seconds
pub const MAX_WAIT_ENV_VAR: &str = "ESPERAR_MAX_WAIT";

/// Environment variable selecting the fail-hard absence policy
pub const FAIL_IF_NOT_FOUND_ENV_VAR: &str = "ESPERAR_FAIL_IF_NOT_FOUND";

// =============================================================================
// ABSENCE POLICY
// =============================================================================

/// What the action layer should do when it targets an absent element.
///
/// The resolver itself never enforces this; absence is data there. The
/// policy is carried in configuration so every consumer of a resolver
/// agrees on one answer for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsencePolicy {
    /// Escalate into a test failure immediately
    Fail,
    /// Log a warning and let the test keep running
    LogAndContinue,
}

impl AbsencePolicy {
    /// Whether this policy escalates absence into a failure
    #[must_use]
    pub const fn fails_hard(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl Default for AbsencePolicy {
    fn default() -> Self {
        Self::LogAndContinue
    }
}

// =============================================================================
// RESOLVER CONFIG
// =============================================================================

/// Configuration threaded into resolver and navigator construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Ceiling on any single wait; requested budgets are clamped to this
    pub max_wait: Duration,
    /// Fixed cadence between probe cycles while polling
    pub poll_interval: Duration,
    /// Absence policy for the action layer
    pub absence_policy: AbsencePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            absence_policy: AbsencePolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from the process environment, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// Reads [`MAX_WAIT_ENV_VAR`] (whole seconds) and
    /// [`FAIL_IF_NOT_FOUND_ENV_VAR`] (`true` selects
    /// [`AbsencePolicy::Fail`]).
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(MAX_WAIT_ENV_VAR) {
            match raw.parse::<u64>() {
                Ok(secs) => config.max_wait = Duration::from_secs(secs),
                Err(_) => warn!(
                    value = %raw,
                    "ignoring unparsable {MAX_WAIT_ENV_VAR}; using {DEFAULT_MAX_WAIT_SECS}s"
                ),
            }
        }
        if let Ok(raw) = std::env::var(FAIL_IF_NOT_FOUND_ENV_VAR) {
            if raw.eq_ignore_ascii_case("true") {
                config.absence_policy = AbsencePolicy::Fail;
            }
        }
        config
    }

    /// Set the wait ceiling
    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Set the polling cadence
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the absence policy
    #[must_use]
    pub const fn with_absence_policy(mut self, policy: AbsencePolicy) -> Self {
        self.absence_policy = policy;
        self
    }

    /// Clamp a requested wait given in whole seconds.
    ///
    /// Negative and over-ceiling requests both collapse to the ceiling;
    /// everything in range passes through. Never an error, and idempotent:
    /// re-clamping a clamped value is a no-op.
    #[must_use]
    pub fn clamp_wait_secs(&self, requested: i64) -> Duration {
        let ceiling = self.max_wait.as_secs() as i64;
        if requested < 0 || requested > ceiling {
            self.max_wait
        } else {
            Duration::from_secs(requested as u64)
        }
    }

    /// Cap an already-non-negative budget at the ceiling.
    ///
    /// Used both for caller-supplied budgets and for the decayed remainder
    /// of a parent-then-child resolution, where the remainder saturates at
    /// zero rather than wrapping to the ceiling.
    #[must_use]
    pub fn clamp_wait(&self, requested: Duration) -> Duration {
        requested.min(self.max_wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod clamp_tests {
        use super::*;

        #[test]
        fn test_in_range_passes_through() {
            let config = ResolverConfig::default();
            assert_eq!(config.clamp_wait_secs(30), Duration::from_secs(30));
            assert_eq!(config.clamp_wait_secs(0), Duration::ZERO);
            assert_eq!(config.clamp_wait_secs(90), Duration::from_secs(90));
        }

        #[test]
        fn test_negative_collapses_to_ceiling() {
            let config = ResolverConfig::default();
            assert_eq!(config.clamp_wait_secs(-1), Duration::from_secs(90));
            assert_eq!(config.clamp_wait_secs(i64::MIN), Duration::from_secs(90));
        }

        #[test]
        fn test_over_ceiling_collapses_to_ceiling() {
            let config = ResolverConfig::default();
            assert_eq!(config.clamp_wait_secs(91), Duration::from_secs(90));
            assert_eq!(config.clamp_wait_secs(i64::MAX), Duration::from_secs(90));
        }

        #[test]
        fn test_custom_ceiling_is_respected() {
            let config = ResolverConfig::new().with_max_wait(Duration::from_secs(10));
            assert_eq!(config.clamp_wait_secs(30), Duration::from_secs(10));
            assert_eq!(config.clamp_wait_secs(5), Duration::from_secs(5));
        }

        #[test]
        fn test_duration_clamp_caps_at_ceiling() {
            let config = ResolverConfig::new().with_max_wait(Duration::from_secs(10));
            assert_eq!(
                config.clamp_wait(Duration::from_secs(30)),
                Duration::from_secs(10)
            );
            assert_eq!(config.clamp_wait(Duration::ZERO), Duration::ZERO);
        }

        proptest! {
            #[test]
            fn prop_clamped_value_is_in_range(requested in any::<i64>()) {
                let config = ResolverConfig::default();
                let clamped = config.clamp_wait_secs(requested);
                prop_assert!(clamped <= config.max_wait);
            }

            #[test]
            fn prop_clamp_is_idempotent(requested in any::<i64>()) {
                let config = ResolverConfig::default();
                let once = config.clamp_wait_secs(requested);
                let twice = config.clamp_wait_secs(once.as_secs() as i64);
                prop_assert_eq!(once, twice);
            }
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = ResolverConfig::default();
            assert_eq!(config.max_wait, Duration::from_secs(90));
            assert_eq!(config.poll_interval, Duration::from_millis(100));
            assert_eq!(config.absence_policy, AbsencePolicy::LogAndContinue);
        }

        #[test]
        fn test_builder_chaining() {
            let config = ResolverConfig::new()
                .with_max_wait(Duration::from_secs(15))
                .with_poll_interval(Duration::from_millis(25))
                .with_absence_policy(AbsencePolicy::Fail);
            assert_eq!(config.max_wait, Duration::from_secs(15));
            assert_eq!(config.poll_interval, Duration::from_millis(25));
            assert!(config.absence_policy.fails_hard());
        }
    }

    mod env_tests {
        use super::*;

        // Single test touching both variables: env mutation is process-wide
        // and must not race with itself across the test harness threads.
        #[test]
        fn test_from_env_overrides_and_fallbacks() {
            std::env::set_var(MAX_WAIT_ENV_VAR, "45");
            std::env::set_var(FAIL_IF_NOT_FOUND_ENV_VAR, "TRUE");
            let config = ResolverConfig::from_env();
            assert_eq!(config.max_wait, Duration::from_secs(45));
            assert_eq!(config.absence_policy, AbsencePolicy::Fail);

            std::env::set_var(MAX_WAIT_ENV_VAR, "not-a-number");
            std::env::set_var(FAIL_IF_NOT_FOUND_ENV_VAR, "no");
            let config = ResolverConfig::from_env();
            assert_eq!(config.max_wait, Duration::from_secs(DEFAULT_MAX_WAIT_SECS));
            assert_eq!(config.absence_policy, AbsencePolicy::LogAndContinue);

            std::env::remove_var(MAX_WAIT_ENV_VAR);
            std::env::remove_var(FAIL_IF_NOT_FOUND_ENV_VAR);
        }
    }

    mod absence_policy_tests {
        use super::*;

        #[test]
        fn test_default_policy_logs_and_continues() {
            assert!(!AbsencePolicy::default().fails_hard());
        }

        #[test]
        fn test_fail_policy_fails_hard() {
            assert!(AbsencePolicy::Fail.fails_hard());
        }
    }
}
