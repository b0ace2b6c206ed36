use serde_json::Value;
use tracing::trace;

use super::path::{is_truthy, Key, SelectionPath};
use crate::config::{Config, Mode};
use crate::error::{Error, PreconditionKind, Result};

/// Selects a subtree of a state value by walking a fixed path.
///
/// Traversal stops at the first absent or falsy step, and a falsy final
/// value is replaced by the default. A stored `0`, `false` or `""` is
/// therefore indistinguishable from a missing one.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storemux::create_state_selector;
///
/// let state = json!({ "a": { "b": { "c": 5 } } });
///
/// let c = create_state_selector(["a", "b", "c"]);
/// assert_eq!(c.select(&state, None).unwrap(), Some(json!(5)));
///
/// let missing = create_state_selector(["a", "x"]);
/// assert_eq!(missing.select_or(&state, json!("default")).unwrap(), json!("default"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSelector {
    path: SelectionPath,
    mode: Mode,
}

impl StateSelector {
    /// Create a selector whose mode comes from the default [`Config`].
    pub fn new(path: SelectionPath) -> Self {
        Self::with_config(path, Config::default())
    }

    /// Create a selector using the mode from `config`.
    pub fn with_config(path: SelectionPath, config: Config) -> Self {
        Self::with_mode(path, config.mode)
    }

    /// Create a selector with an explicit mode.
    pub fn with_mode(path: SelectionPath, mode: Mode) -> Self {
        Self { path, mode }
    }

    /// The path this selector walks.
    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    /// Whether this selector checks preconditions.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Select from `state`, borrowing the result.
    ///
    /// In [`Mode::Strict`] an empty path, a falsy state, or an unresolved
    /// step without a default are reported as [`Error::Precondition`].
    pub fn select_ref<'a>(
        &self,
        state: &'a Value,
        default: Option<&'a Value>,
    ) -> Result<Option<&'a Value>> {
        if self.mode.is_strict() {
            self.check_preconditions(state)?;
        }
        self.traverse(state, default, self.mode.is_strict())
    }

    /// Select from `state`, cloning the result.
    pub fn select(&self, state: &Value, default: Option<&Value>) -> Result<Option<Value>> {
        Ok(self.select_ref(state, default)?.cloned())
    }

    /// Select from `state`, falling back to `default`.
    pub fn select_or(&self, state: &Value, default: Value) -> Result<Value> {
        let found = self.select_ref(state, Some(&default))?.cloned();
        Ok(found.unwrap_or(default))
    }

    /// Select without any precondition checks.
    pub(crate) fn select_unchecked<'a>(
        &self,
        state: &'a Value,
        default: Option<&'a Value>,
    ) -> Option<&'a Value> {
        // Traversal only fails when the path is required.
        self.traverse(state, default, false).unwrap_or(default)
    }

    fn check_preconditions(&self, state: &Value) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::precondition(
                PreconditionKind::EmptyPath,
                "must specify a selection path",
            ));
        }
        if !is_truthy(state) {
            return Err(Error::precondition(
                PreconditionKind::MissingState,
                "state is required",
            ));
        }
        Ok(())
    }

    fn traverse<'a>(
        &self,
        state: &'a Value,
        default: Option<&'a Value>,
        require_path: bool,
    ) -> Result<Option<&'a Value>> {
        let mut current = Some(state);
        for key in &self.path {
            current = current.and_then(|value| key.lookup(value));
            if current.is_some_and(is_truthy) {
                continue;
            }
            if require_path && default.is_none() {
                return Err(self.missing_path(key, state));
            }
            trace!(key = %key, path = %self.path, "selection stopped at absent state");
            break;
        }
        Ok(current.filter(|value| is_truthy(value)).or(default))
    }

    fn missing_path(&self, key: &Key, state: &Value) -> Error {
        let root = self
            .path
            .first()
            .map(ToString::to_string)
            .unwrap_or_default();
        Error::precondition(
            PreconditionKind::MissingPath,
            format!(
                "'{key}' state must exist in key chain {path} \
                 (is the state for '{root}' mounted in the root state?) {state}",
                path = self.path,
            ),
        )
    }
}

/// Create a selector for the path formed by `keys`.
pub fn create_state_selector<I, K>(keys: I) -> StateSelector
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    StateSelector::new(SelectionPath::new(keys))
}
