//! Runtime configuration.
//!
//! [`Mode`] decides whether argument preconditions are checked. It defaults
//! to the `STOREMUX_ENV` environment variable, falling back to the build
//! profile when the variable is unset.

use std::env;

/// Name of the environment variable read by [`Mode::from_env`].
pub const MODE_ENV_VAR: &str = "STOREMUX_ENV";

/// Whether precondition checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Check preconditions and report violations as
    /// [`Error::Precondition`](crate::Error::Precondition).
    Strict,
    /// Skip precondition checks.
    Lenient,
}

impl Mode {
    /// Resolve the mode from `STOREMUX_ENV`.
    ///
    /// `production` selects [`Mode::Lenient`]; any other value selects
    /// [`Mode::Strict`]. When unset, debug builds are strict and release
    /// builds are lenient.
    pub fn from_env() -> Self {
        match env::var(MODE_ENV_VAR) {
            Ok(value) => Self::from_env_value(&value),
            Err(_) => Self::from_build(),
        }
    }

    fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Mode::Lenient
        } else {
            Mode::Strict
        }
    }

    fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Mode::Strict
        } else {
            Mode::Lenient
        }
    }

    /// Whether precondition checks run in this mode.
    pub fn is_strict(self) -> bool {
        self == Mode::Strict
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::from_env()
    }
}

/// How a multiplexer reacts when one of its stores fails to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Stop at the first failing store; later stores are not dispatched to.
    #[default]
    AbortOnFirstError,
    /// Dispatch to every store, then report all failures together.
    CollectErrors,
}

/// Configuration shared by selectors, bisectors and multiplexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub mode: Mode,
    pub dispatch_policy: DispatchPolicy,
}

impl Config {
    /// Configuration with the mode resolved from `STOREMUX_ENV`.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Default configuration with precondition checks enabled.
    pub fn strict() -> Self {
        Self::default().with_mode(Mode::Strict)
    }

    /// Default configuration with precondition checks skipped.
    pub fn lenient() -> Self {
        Self::default().with_mode(Mode::Lenient)
    }

    /// Replace the precondition mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the multiplexed dispatch failure policy.
    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_value_is_lenient() {
        assert_eq!(Mode::from_env_value("production"), Mode::Lenient);
        assert_eq!(Mode::from_env_value(" Production\n"), Mode::Lenient);
    }

    #[test]
    fn other_values_are_strict() {
        assert_eq!(Mode::from_env_value("development"), Mode::Strict);
        assert_eq!(Mode::from_env_value("test"), Mode::Strict);
        assert_eq!(Mode::from_env_value(""), Mode::Strict);
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::lenient().with_dispatch_policy(DispatchPolicy::CollectErrors);
        assert_eq!(config.mode, Mode::Lenient);
        assert_eq!(config.dispatch_policy, DispatchPolicy::CollectErrors);
        assert!(Config::strict().mode.is_strict());
        assert_eq!(
            Config::strict().dispatch_policy,
            DispatchPolicy::AbortOnFirstError
        );
    }
}
