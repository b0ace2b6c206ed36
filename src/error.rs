//! Error types for storemux.
//!
//! Precondition violations are only reported in [`Mode::Strict`](crate::Mode);
//! lookup failures from [`Multiplexer::select_first`](crate::Multiplexer::select_first)
//! are reported in every mode.

use std::fmt;

use thiserror::Error;

use crate::multiplex::Dispatched;

/// The precondition a caller violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionKind {
    /// A selection path with no keys.
    EmptyPath,
    /// State to select from was falsy (`null`, `false`, `0` or `""`).
    MissingState,
    /// A key in the selection path did not resolve and no default was given.
    MissingPath,
}

impl fmt::Display for PreconditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreconditionKind::EmptyPath => "empty path",
            PreconditionKind::MissingState => "missing state",
            PreconditionKind::MissingPath => "missing path",
        };
        f.write_str(name)
    }
}

/// Errors raised by selectors, bisectors and multiplexers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("precondition violated ({kind}): {message}")]
    Precondition {
        kind: PreconditionKind,
        message: String,
    },

    #[error(
        "None of the requested stores exist in store mapping | configured => {} requested => {}",
        json_list(configured),
        json_list(requested)
    )]
    NoMatchingStore {
        configured: Vec<String>,
        requested: Vec<String>,
    },
}

impl Error {
    pub(crate) fn precondition(kind: PreconditionKind, message: impl Into<String>) -> Self {
        Error::Precondition {
            kind,
            message: message.into(),
        }
    }

    /// The violated precondition, if this is a precondition error.
    pub fn precondition_kind(&self) -> Option<PreconditionKind> {
        match self {
            Error::Precondition { kind, .. } => Some(*kind),
            Error::NoMatchingStore { .. } => None,
        }
    }
}

/// Failure of a multiplexed dispatch.
///
/// Which variant is produced depends on the
/// [`DispatchPolicy`](crate::DispatchPolicy) the multiplexer was built with.
#[derive(Debug, Error)]
pub enum DispatchError<O, E>
where
    O: fmt::Debug,
    E: std::error::Error + 'static,
{
    /// A store failed and the remaining stores were not dispatched to.
    #[error("dispatch to store '{store}' failed")]
    Aborted {
        store: String,
        #[source]
        source: E,
    },

    /// Every store was dispatched to and at least one of them failed.
    #[error("dispatch failed for {} store(s): {}", failures.len(), failed_names(failures))]
    Failed {
        completed: Dispatched<O>,
        failures: Vec<(String, E)>,
    },
}

impl<O, E> DispatchError<O, E>
where
    O: fmt::Debug,
    E: std::error::Error + 'static,
{
    /// Names of the stores whose dispatch failed, in dispatch order.
    pub fn failed_stores(&self) -> Vec<&str> {
        match self {
            DispatchError::Aborted { store, .. } => vec![store.as_str()],
            DispatchError::Failed { failures, .. } => {
                failures.iter().map(|(name, _)| name.as_str()).collect()
            }
        }
    }
}

fn json_list(names: &[String]) -> String {
    serde_json::to_string(names).unwrap_or_default()
}

fn failed_names<E>(failures: &[(String, E)]) -> String {
    failures
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matching_store_lists_both_name_sets() {
        let err = Error::NoMatchingStore {
            configured: vec!["app".into(), "session".into()],
            requested: vec!["z".into()],
        };
        let message = err.to_string();
        assert!(message.contains(r#"configured => ["app","session"]"#));
        assert!(message.contains(r#"requested => ["z"]"#));
        assert_eq!(err.precondition_kind(), None);
    }

    #[test]
    fn precondition_message_carries_kind() {
        let err = Error::precondition(PreconditionKind::EmptyPath, "must specify a selection path");
        assert_eq!(
            err.to_string(),
            "precondition violated (empty path): must specify a selection path"
        );
        assert_eq!(err.precondition_kind(), Some(PreconditionKind::EmptyPath));
    }
}
